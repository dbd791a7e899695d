use std::path::Path;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::AppError;
use crate::store::cosmic::DEFAULT_API_URL;

/// Service configuration.
///
/// Layered, last wins: built-in defaults, an optional TOML file, then
/// `TAVOLA__<SECTION>__<KEY>` environment variables. The Cosmic variables
/// `COSMIC_BUCKET_SLUG`, `COSMIC_READ_KEY` and `COSMIC_WRITE_KEY` are
/// honoured on top.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Cosmic,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub api_url: String,
    pub bucket_slug: String,
    pub read_key: String,
    #[serde(default)]
    pub write_key: Option<String>,
    /// Fill the memory backend with sample content on startup.
    #[serde(default)]
    pub seed_demo: bool,
}

impl Settings {
    /// Load from defaults, `path` (if given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix("TAVOLA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .set_override_option("store.bucket_slug", std::env::var("COSMIC_BUCKET_SLUG").ok())?
            .set_override_option("store.read_key", std::env::var("COSMIC_READ_KEY").ok())?
            .set_override_option("store.write_key", std::env::var("COSMIC_WRITE_KEY").ok())?
            .build()?
            .try_deserialize()
    }

    /// Load from defaults and an inline TOML document only.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Reject combinations that would only fail at the first request.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.store.backend == StoreBackend::Cosmic {
            if self.store.bucket_slug.trim().is_empty() {
                return Err(AppError::Internal(
                    "store.bucket_slug is required for the cosmic backend".into(),
                ));
            }
            if self.store.read_key.trim().is_empty() {
                return Err(AppError::Internal(
                    "store.read_key is required for the cosmic backend".into(),
                ));
            }
            if self.store.write_key.as_deref().map_or(true, str::is_empty) {
                tracing::warn!("No content store write key configured, form submissions and votes will fail");
            }
        }
        if self.store.seed_demo && self.store.backend != StoreBackend::Memory {
            tracing::warn!("store.seed_demo only applies to the memory backend, ignoring");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.cors_origins", Vec::<String>::new())?
        .set_default("store.backend", "cosmic")?
        .set_default("store.api_url", DEFAULT_API_URL)?
        .set_default("store.bucket_slug", "")?
        .set_default("store.read_key", "")?
        .set_default("store.seed_demo", false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.bind_address(), "0.0.0.0:3000");
        assert_eq!(settings.store.backend, StoreBackend::Cosmic);
        assert_eq!(settings.store.api_url, DEFAULT_API_URL);
        assert!(settings.store.write_key.is_none());
        assert!(settings.server.cors_origins.is_empty());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let settings = Settings::from_toml(
            r#"
            [server]
            port = 8080
            cors_origins = ["https://blog.example.com"]

            [store]
            backend = "memory"
            seed_demo = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.cors_origins, vec!["https://blog.example.com"]);
        assert_eq!(settings.store.backend, StoreBackend::Memory);
        assert!(settings.store.seed_demo);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cosmic_backend_requires_bucket_and_read_key() {
        let settings = Settings::from_toml("").unwrap();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("bucket_slug"));

        let settings = Settings::from_toml(
            r#"
            [store]
            bucket_slug = "world-travels-food"
            "#,
        )
        .unwrap();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("read_key"));

        let settings = Settings::from_toml(
            r#"
            [store]
            bucket_slug = "world-travels-food"
            read_key = "rk"
            write_key = "wk"
            "#,
        )
        .unwrap();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = Settings::from_toml(
            r#"
            [store]
            backend = "postgres"
            "#,
        );
        assert!(result.is_err());
    }
}
