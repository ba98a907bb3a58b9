use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_CREDENTIALS_PATH: &str = "../firebase_creds.json";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_EMULATOR_PROJECT: &str = "demo-article-feed";

/// Deployment environment, selects where credentials come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Credentials are read from a local service account file
    Dev,
    /// Credentials are supplied through an environment variable
    Deployed(String),
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "dev" => Environment::Dev,
            other => Environment::Deployed(other.to_string()),
        }
    }
}

/// Channel metadata for the RSS feed
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub title: String,
    pub description: String,
    pub language: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            title: "Mi Feed de Artículos Personal (Python)".to_string(),
            description: "Artículos y enlaces guardados personalmente con Python y Firebase.".to_string(),
            language: "es-es".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    /// Service account file used in the dev environment
    pub credentials_path: PathBuf,
    /// Inline service account JSON (or a path to it) used outside dev
    pub service_account_key: Option<String>,
    /// Firestore emulator host:port, bypasses credentials when set
    pub emulator_host: Option<String>,
    /// Overrides the project id found in the credentials
    pub project_id: Option<String>,
    pub articles_collection: String,
    /// Secret required by POST /api/add_article
    pub add_article_api_key: Option<String>,
    /// Public base URL used for the feed's self link
    pub public_base_url: Option<String>,
    pub feed: FeedSettings,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = FeedSettings::default();

        Self {
            environment: Environment::parse(&lookup("ENVIRONMENT").unwrap_or_default()),
            credentials_path: non_empty("FIREBASE_CREDENTIALS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH)),
            service_account_key: non_empty("FIREBASE_SERVICE_ACCOUNT_KEY"),
            emulator_host: non_empty("FIRESTORE_EMULATOR_HOST"),
            project_id: non_empty("FIREBASE_PROJECT_ID"),
            articles_collection: non_empty("ARTICLES_COLLECTION")
                .unwrap_or_else(|| "articles".to_string()),
            add_article_api_key: non_empty("ADD_ARTICLE_API_KEY"),
            public_base_url: non_empty("PUBLIC_BASE_URL"),
            feed: FeedSettings {
                title: non_empty("FEED_TITLE").unwrap_or(defaults.title),
                description: non_empty("FEED_DESCRIPTION").unwrap_or(defaults.description),
                language: non_empty("FEED_LANGUAGE").unwrap_or(defaults.language),
            },
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Resolve the credentials used to reach the document store
    ///
    /// The emulator needs none. Otherwise the dev environment reads the service
    /// account file and every other environment reads `FIREBASE_SERVICE_ACCOUNT_KEY`,
    /// which holds either the JSON itself or a path to it.
    pub fn load_credentials(&self) -> Result<Credentials, ConfigError> {
        if let Some(host) = &self.emulator_host {
            return Ok(Credentials::Emulator {
                host: host.clone(),
                project_id: self
                    .project_id
                    .clone()
                    .unwrap_or_else(|| DEFAULT_EMULATOR_PROJECT.to_string()),
            });
        }

        let mut key = match &self.environment {
            Environment::Dev => ServiceAccountKey::from_file(&self.credentials_path)?,
            Environment::Deployed(_) => {
                let raw = self
                    .service_account_key
                    .as_deref()
                    .ok_or(ConfigError::MissingVariable("FIREBASE_SERVICE_ACCOUNT_KEY"))?;
                if raw.trim_start().starts_with('{') {
                    ServiceAccountKey::from_json(raw)?
                } else {
                    ServiceAccountKey::from_file(Path::new(raw))?
                }
            }
        };

        if let Some(project_id) = &self.project_id {
            key.project_id = project_id.clone();
        }

        Ok(Credentials::ServiceAccount(key))
    }
}

/// Credentials for the document store
#[derive(Debug, Clone)]
pub enum Credentials {
    ServiceAccount(ServiceAccountKey),
    Emulator { host: String, project_id: String },
}

impl Credentials {
    pub fn project_id(&self) -> &str {
        match self {
            Credentials::ServiceAccount(key) => &key.project_id,
            Credentials::Emulator { project_id, .. } => project_id,
        }
    }
}

/// Google service account key file contents (the fields we use)
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let key: Self = serde_json::from_str(raw)?;
        key.validate()?;
        Ok(key)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::CredentialsFileNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.client_email.is_empty() {
            return Err(ConfigError::Invalid("client_email is empty".to_string()));
        }
        if !self.private_key.contains("PRIVATE KEY") {
            return Err(ConfigError::Invalid(
                "private_key is not a PEM encoded key".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}
