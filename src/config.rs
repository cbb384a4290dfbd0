//! Application-level configuration loading: store location, listen port and CORS allow-list.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "HIGH_SCORE_CONFIG_PATH";
/// Connection string of the document store.
const MONGO_URI_ENV: &str = "MONGODB_URI";
/// Database holding the `scores` collection.
const MONGO_DB_ENV: &str = "MONGODB_DB";
/// Deployment environment; `production` hides internal error details from clients.
const APP_ENV: &str = "APP_ENV";
const DEFAULT_DB: &str = "high_score";
const DEFAULT_PORT: u16 = 8080;
/// Browser origins allowed to read responses when no config file overrides them.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    mongo_uri: Option<String>,
    mongo_db: String,
    port: u16,
    production: bool,
    allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load the configuration from the environment and the optional JSON file.
    ///
    /// Nothing here is fatal: a missing connection string only surfaces once a request needs the
    /// store, and an unreadable file falls back to the built-in allow-list.
    pub fn load() -> Self {
        let mongo_uri = env::var(MONGO_URI_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        if mongo_uri.is_none() {
            warn!(var = MONGO_URI_ENV, "MongoDB connection string not set");
        }

        let port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let config = Self {
            mongo_uri,
            mongo_db: env::var(MONGO_DB_ENV).unwrap_or_else(|_| DEFAULT_DB.into()),
            port,
            production: env::var(APP_ENV)
                .map(|value| is_production(&value))
                .unwrap_or(false),
            ..Self::default()
        };

        match load_raw_config() {
            Some(raw) => config.merge(raw),
            None => config,
        }
    }

    /// Replace the CORS allow-list.
    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// Toggle production mode (redacted internal errors).
    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Set the document store connection string.
    pub fn with_mongo_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongo_uri = Some(uri.into());
        self
    }

    /// Connection string, when one is configured.
    pub fn mongo_uri(&self) -> Option<&str> {
        self.mongo_uri.as_deref()
    }

    /// Database holding the `scores` collection.
    pub fn mongo_db(&self) -> &str {
        &self.mongo_db
    }

    /// TCP port the HTTP server binds to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether internal error details are hidden from clients.
    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Origins echoed back in `Access-Control-Allow-Origin`.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    fn merge(mut self, raw: RawConfig) -> Self {
        if let Some(origins) = raw.allowed_origins {
            self.allowed_origins = origins
                .into_iter()
                .map(|origin| origin.trim().trim_end_matches('/').to_owned())
                .filter(|origin| !origin.is_empty())
                .collect();
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mongo_uri: None,
            mongo_db: DEFAULT_DB.into(),
            port: DEFAULT_PORT,
            production: false,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| (*origin).to_owned())
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    allowed_origins: Option<Vec<String>>,
}

fn load_raw_config() -> Option<RawConfig> {
    let path = resolve_config_path();
    match fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
            Ok(raw) => {
                info!(path = %path.display(), "loaded configuration file");
                Some(raw)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config; falling back to defaults"
                );
                None
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                path = %path.display(),
                "config file not found; using built-in defaults"
            );
            None
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read config; falling back to defaults"
            );
            None
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn is_production(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "production" | "prod")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_local_dev_origins() {
        let config = AppConfig::default();
        assert!(
            config
                .allowed_origins()
                .iter()
                .any(|origin| origin == "http://localhost:3000")
        );
        assert_eq!(config.mongo_db(), "high_score");
        assert!(config.mongo_uri().is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn config_file_replaces_allow_list() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"allowed_origins": ["https://game.example.com/", "  ", "https://admin.example.com"]}"#,
        )
        .unwrap();
        let config = AppConfig::default().merge(raw);
        assert_eq!(
            config.allowed_origins(),
            ["https://game.example.com", "https://admin.example.com"]
        );
    }

    #[test]
    fn empty_config_file_keeps_defaults() {
        let raw: RawConfig = serde_json::from_str("{}").unwrap();
        let config = AppConfig::default().merge(raw);
        assert_eq!(config.allowed_origins().len(), DEFAULT_ALLOWED_ORIGINS.len());
    }

    #[test]
    fn builders_override_fields() {
        let config = AppConfig::default()
            .with_mongo_uri("mongodb://db:27017")
            .with_production(true)
            .with_allowed_origins(["https://game.example.com"]);
        assert_eq!(config.mongo_uri(), Some("mongodb://db:27017"));
        assert!(config.is_production());
        assert_eq!(config.allowed_origins(), ["https://game.example.com"]);
    }

    #[test]
    fn production_detection() {
        assert!(is_production("production"));
        assert!(is_production(" PROD "));
        assert!(!is_production("development"));
        assert!(!is_production(""));
    }
}
