//! Feed renderer
//!
//! Renders feeds to RSS 2.0 XML.

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::app::{Feed, FeedItem};
use crate::error::FeedError;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";
const GENERATOR: &str = concat!("article-feed-api ", env!("CARGO_PKG_VERSION"));

const ERROR_FEED_TITLE: &str = "Error en Mi Feed de Artículos Personal";

fn xml_error<E: std::fmt::Display>(e: E) -> FeedError {
    FeedError::Xml(e.to_string())
}

/// Render a feed to a pretty-printed RSS 2.0 document
pub fn render_rss(feed: &Feed) -> Result<String, FeedError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NS));
    rss.push_attribute(("xmlns:content", CONTENT_NS));
    writer.write_event(Event::Start(rss)).map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .map_err(xml_error)?;

    write_text_element(&mut writer, "title", &feed.title)?;
    write_text_element(&mut writer, "link", &feed.self_link)?;
    write_text_element(&mut writer, "description", &feed.description)?;

    let mut self_link = BytesStart::new("atom:link");
    self_link.push_attribute(("href", feed.self_link.as_str()));
    self_link.push_attribute(("rel", "self"));
    self_link.push_attribute(("type", "application/rss+xml"));
    writer.write_event(Event::Empty(self_link)).map_err(xml_error)?;

    write_text_element(&mut writer, "language", &feed.language)?;
    write_text_element(&mut writer, "generator", GENERATOR)?;
    write_text_element(
        &mut writer,
        "lastBuildDate",
        &feed.generated_at.to_rfc2822(),
    )?;

    for item in &feed.items {
        write_item(&mut writer, item)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .map_err(xml_error)?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    xml.push('\n');
    Ok(xml)
}

fn write_item<W: std::io::Write>(
    writer: &mut Writer<W>,
    item: &FeedItem,
) -> Result<(), FeedError> {
    writer
        .write_event(Event::Start(BytesStart::new("item")))
        .map_err(xml_error)?;

    write_text_element(writer, "title", &item.title)?;
    write_text_element(writer, "link", &item.link)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    writer.write_event(Event::Start(guid)).map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(&item.guid)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("guid")))
        .map_err(xml_error)?;

    write_text_element(writer, "pubDate", &item.pub_date.to_rfc2822())?;
    write_text_element(writer, "content:encoded", &item.content)?;

    writer
        .write_event(Event::End(BytesEnd::new("item")))
        .map_err(xml_error)?;
    Ok(())
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), FeedError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)?;
    Ok(())
}

/// Render the minimal RSS document returned when the feed cannot be generated
///
/// Built without the writer so that it cannot fail itself.
pub fn render_error_feed(message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>{}</title>
    <link>#</link>
    <description>Fallo al generar el feed RSS: {}</description>
  </channel>
</rss>
"#,
        ERROR_FEED_TITLE,
        escape(message)
    )
}
