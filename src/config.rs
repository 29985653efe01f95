// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PaperError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub store: StoreConfig,
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Base URL of the hosted project, e.g. `https://xyz.supabase.co`
    pub url: String,
    pub service_key: Option<String>,
    pub paper_table: String,
    pub question_table: String,
    pub content_table: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    pub max_file_size_mb: usize,
    pub default_subject: String,
    pub default_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewerConfig {
    /// Place content at its stored x/y coordinates in the HTML viewer.
    pub preserve_layout: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default_config();
        let mut builder = config::Config::builder()
            .add_source(
                config::Config::try_from(&defaults)
                    .map_err(|e| PaperError::Config(e.to_string()))?,
            );

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(
                config::File::from(Path::new("config/default.toml")).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PAPER_PARSE")
                .separator("__")
                .try_parsing(true),
        );

        // The hosted store is conventionally configured through these two variables.
        builder = builder
            .set_override_option("store.url", std::env::var("SUPABASE_URL").ok())
            .and_then(|b| {
                b.set_override_option(
                    "store.service_key",
                    std::env::var("SUPABASE_SERVICE_KEY").ok(),
                )
            })
            .map_err(|e| PaperError::Config(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| PaperError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PaperError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            store: StoreConfig {
                url: "http://localhost:54321".to_string(),
                service_key: None,
                paper_table: "Paper".to_string(),
                question_table: "Question".to_string(),
                content_table: "QuestionContent".to_string(),
                request_timeout_secs: 30,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            upload: UploadConfig {
                max_file_size_mb: 25,
                default_subject: "Economics".to_string(),
                default_level: "A-Level".to_string(),
            },
            viewer: ViewerConfig {
                preserve_layout: false,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.store.url)
            .map_err(|e| PaperError::Config(format!("store.url: {}", e)))?;
        Validator::validate_port(self.server.port)
            .map_err(|e| PaperError::Config(format!("server.port: {}", e)))?;

        if self.upload.max_file_size_mb == 0 {
            return Err(PaperError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.upload.max_file_size_mb * 1_048_576
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.paper_table, "Paper");
        assert_eq!(config.max_upload_bytes(), 25 * 1_048_576);
        assert!(!config.viewer.preserve_layout);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[server]\nhost = \"0.0.0.0\"\nport = 9100\n\n[upload]\nmax_file_size_mb = 5\ndefault_subject = \"Economics\"\ndefault_level = \"AS-Level\"\n\n[viewer]\npreserve_layout = true"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.upload.default_level, "AS-Level");
        assert!(config.viewer.preserve_layout);
        // untouched sections keep their built-in values
        assert_eq!(config.store.content_table, "QuestionContent");
    }

    #[test]
    fn test_rejects_zero_upload_size() {
        let mut config = Config::default_config();
        config.upload.max_file_size_mb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_store_url() {
        let mut config = Config::default_config();
        config.store.url = "postgres://localhost".to_string();
        assert!(config.validate().is_err());
    }
}
