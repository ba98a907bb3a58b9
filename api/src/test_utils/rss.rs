//! Minimal RSS reader used to assert on rendered feeds

use quick_xml::events::Event;
use quick_xml::reader::Reader;

#[derive(Debug, Default)]
pub struct ParsedFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    pub self_link: Option<String>,
    pub items: Vec<ParsedItem>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedItem {
    pub title: String,
    pub link: String,
    pub guid: String,
    pub pub_date: String,
    pub content: String,
}

/// Parse an RSS document, failing on any XML error
pub fn parse_rss(xml: &str) -> Result<ParsedFeed, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = ParsedFeed::default();
    let mut path: Vec<String> = Vec::new();
    let mut current: Option<ParsedItem> = None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    current = Some(ParsedItem::default());
                }
                path.push(name);
            }
            Event::End(e) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        feed.items.push(item);
                    }
                }
                path.pop();
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"atom:link" {
                    let href = e
                        .try_get_attribute("href")
                        .map_err(|e| e.to_string())?;
                    if let Some(href) = href {
                        let value = href.unescape_value().map_err(|e| e.to_string())?;
                        feed.self_link = Some(value.to_string());
                    }
                }
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|e| e.to_string())?.to_string();
                let element = path.last().map(String::as_str).unwrap_or_default();

                match current.as_mut() {
                    Some(item) => match element {
                        "title" => item.title = text,
                        "link" => item.link = text,
                        "guid" => item.guid = text,
                        "pubDate" => item.pub_date = text,
                        "content:encoded" => item.content = text,
                        _ => {}
                    },
                    // rss > channel > element
                    None if path.len() == 3 => match element {
                        "title" => feed.title = text,
                        "link" => feed.link = text,
                        "description" => feed.description = text,
                        "language" => feed.language = text,
                        _ => {}
                    },
                    None => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(feed)
}
