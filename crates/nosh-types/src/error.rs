use thiserror::Error;

/// Errors from the business-search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(String),

    #[error("search provider returned HTTP {status}")]
    Status { status: u16 },

    #[error("search provider error {code}: {description}")]
    Provider { code: String, description: String },

    #[error("failed to decode search response: {0}")]
    Deserialization(String),
}

/// Errors from the messaging platform.
#[derive(Debug, Error)]
pub enum MessengerError {
    #[error("messaging request failed: {0}")]
    Transport(String),

    #[error("messaging API rejected {method}: {description}")]
    Rejected { method: String, description: String },

    #[error("failed to decode messaging response: {0}")]
    Deserialization(String),
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("missing required setting: {0}")]
    Missing(String),
}
