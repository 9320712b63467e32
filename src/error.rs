use thiserror::Error;

/// Errors that can occur while talking to the recipe service
#[derive(Error, Debug)]
pub enum BrowserError {
    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Recipe service returned status {0}")]
    StatusError(u16),

    /// The response body was not the expected `{"meals": ...}` shape
    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
