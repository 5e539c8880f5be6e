//! Error types for the form service client

use thiserror::Error;

/// Form service client error
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL could not be combined with an endpoint path
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Unexpected response from the form service: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server returned an error status
    #[error("{}", server_message(.status, .message))]
    Server { status: u16, message: String },
}

fn server_message(status: &u16, message: &str) -> String {
    if message.is_empty() {
        format!("Form service returned status {status}")
    } else {
        message.to_string()
    }
}

/// Result type for form service operations
pub type Result<T> = std::result::Result<T, ApiError>;
