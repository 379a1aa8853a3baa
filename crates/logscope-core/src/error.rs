//! Error taxonomy for logscope.
//!
//! Two levels exist. [`AttemptError`] describes why a single candidate
//! endpoint failed; those are absorbed by the fallback executor and only
//! become visible through [`AggregatedFailure`]. [`SearchError`] is what a
//! caller of the search facade sees.

use thiserror::Error;

/// Why one candidate endpoint attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// Connection refused, DNS failure, TLS failure or timeout.
    #[error("request failed: {message}")]
    Transport { message: String, timed_out: bool },

    /// The backend answered with a non-success HTTP status.
    #[error("{status} - {body}")]
    Rejection { status: u16, body: String },

    /// The backend answered 2xx but the body was not JSON.
    #[error("unexpected response format: {0}")]
    InvalidPayload(String),
}

impl AttemptError {
    /// Build a transport error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display, timed_out: bool) -> Self {
        Self::Transport {
            message: cause.to_string(),
            timed_out,
        }
    }

    /// HTTP status attached to this failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejection { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A failed attempt against one named candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{candidate} failed: {error}")]
pub struct AttemptFailure {
    pub candidate: String,
    pub error: AttemptError,
}

/// Every candidate was tried and none produced data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedFailure {
    /// Whether any connectivity probe succeeded along the way.
    pub connectivity_established: bool,
    /// Failures in the order they happened.
    pub attempts: Vec<AttemptFailure>,
}

impl AggregatedFailure {
    /// The most recent individual failure, if any candidate ran at all.
    pub fn last(&self) -> Option<&AttemptFailure> {
        self.attempts.last()
    }
}

impl std::fmt::Display for AggregatedFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.connectivity_established {
            write!(f, "Connectivity check passed but all search endpoints failed.")?;
        } else {
            write!(f, "Cannot connect to backend. All search endpoints failed.")?;
        }
        match self.last() {
            Some(last) => write!(f, " Last error: {last}"),
            None => write!(f, " Last error: no candidate endpoints were configured"),
        }
    }
}

impl std::error::Error for AggregatedFailure {}

/// Errors surfaced by the search facade and the link builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Bad caller input. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// Missing or inconsistent backend configuration.
    #[error("{0}")]
    Configuration(String),

    /// A backend answered with a payload whose shape we do not understand.
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),

    /// All candidate endpoints were exhausted.
    #[error("{0}")]
    Unavailable(#[from] AggregatedFailure),
}

impl SearchError {
    /// Stable name used in the `error` field of tool envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Configuration(_) => "ConfigurationError",
            Self::MalformedResponse(_) => "MalformedResponseError",
            Self::Unavailable(_) => "SearchUnavailableError",
        }
    }
}

/// Result alias used throughout logscope.
pub type Result<T> = std::result::Result<T, SearchError>;
