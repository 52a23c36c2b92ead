use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status; `message` is the body's `error` field when it had one.
    #[error("Request rejected with status {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid artifact reference '{0}'")]
    InvalidReference(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// The message the server asked us to show, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Network("Request timeout".to_string())
        } else if error.is_connect() {
            ApiError::Network(format!("Connection failed: {}", error))
        } else if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            ApiError::Rejected {
                status,
                message: None,
            }
        } else {
            ApiError::Network(error.to_string())
        }
    }
}
