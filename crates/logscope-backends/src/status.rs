//! Dashboard status probe, exposed as its own operation.

use thiserror::Error;

/// Why a status request failed. Each variant maps to a tool envelope name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("{0}")]
    Configuration(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Unexpected(String),
}

impl StatusError {
    pub fn kind(&self) -> &'static str {
        match self {
            StatusError::Configuration(_) => "ConfigurationError",
            StatusError::Http { .. } => "HTTPError",
            StatusError::Connection(_) => "ConnectionError",
            StatusError::Unexpected(_) => "UnexpectedError",
        }
    }

    /// Human summary for the envelope `message` field.
    pub fn summary(&self) -> &'static str {
        match self {
            StatusError::Configuration(_) => "Kibana is not configured",
            StatusError::Http { .. } => "Failed to fetch Kibana status",
            StatusError::Connection(_) => {
                "Cannot connect to Kibana. Check if the URL is correct and the service is running."
            }
            StatusError::Unexpected(_) => "An unexpected error occurred",
        }
    }
}
