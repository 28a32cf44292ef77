//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration, loadable from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the remote auth backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Directory holding the order collection and session slot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Simulated proof-upload duration in milliseconds
    #[serde(default = "default_upload_delay_ms")]
    pub upload_delay_ms: u64,
    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_api_base_url() -> String {
    "http://192.168.0.113:5107".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_upload_delay_ms() -> u64 {
    2000
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            data_dir: default_data_dir(),
            upload_delay_ms: default_upload_delay_ms(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment (a `.env` file is honored
    /// when present), falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = std::env::var("VITRINA_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(dir) = std::env::var("VITRINA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(delay) = std::env::var("VITRINA_UPLOAD_DELAY_MS")
            && let Ok(delay) = delay.parse()
        {
            config.upload_delay_ms = delay;
        }
        if let Ok(timeout) = std::env::var("VITRINA_REQUEST_TIMEOUT")
            && let Ok(timeout) = timeout.parse()
        {
            config.request_timeout = timeout;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.upload_delay_ms, 2000);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_serde_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.request_timeout, 30);
    }
}
