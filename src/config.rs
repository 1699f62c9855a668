use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub listings_url: String,
    pub listing_url: String,
    pub storage_base_url: String,
    pub page_size: usize,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listings_url: "http://localhost:54321/functions/v1/lst".to_string(),
            listing_url: "http://localhost:8080/api/public/lst".to_string(),
            storage_base_url: "http://localhost:54321/storage/v1/object/public".to_string(),
            page_size: 20,
            request_timeout_seconds: 10,
            user_agent: "marketplace-listings/0.1".to_string(),
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config {} not found, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{ "storage_base_url": "https://cdn.example.com", "page_size": 5 }"#,
        )
        .unwrap();
        assert_eq!(cfg.storage_base_url, "https://cdn.example.com");
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.request_timeout_seconds, 10);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config("/nonexistent/marketplace-listings.json").unwrap();
        assert_eq!(cfg.page_size, 20);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join("marketplace-listings-bad-config.json");
        fs::write(&path, "{ not json").unwrap();
        let result = load_config(path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(path);
    }
}
