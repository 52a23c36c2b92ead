use reqwest::Url;
use thiserror::Error;

const API_URL_VAR: &str = "ECHOSYNTH_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Where the processing API lives and which routes it exposes.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub upload_path: String,
    pub translate_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            upload_path: "/upload".to_string(),
            translate_path: "/translate".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_VAR) {
            config.api_base_url = url;
        }
        config.base_url()?;
        Ok(config)
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })
    }
}
