//! Tool functions: JSON in, JSON out.
//!
//! | tool            | network | success payload                |
//! |-----------------|---------|--------------------------------|
//! | `fetch_logs`    | yes     | `{total, took, hits: [...]}`   |
//! | `fetch_status`  | yes     | the dashboard status document  |
//! | `discover_link` | no      | `{"url": "..."}`               |
//!
//! Failures are [`ErrorEnvelope`]s: `{"error": <kind>, "message", "details"?}`.

use logscope_backends::{SearchService, StatusError};
use logscope_core::{parse_fields, SearchCriteria, SearchError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Message used for every search that exhausted its candidates.
pub const SEARCH_FAILED_MESSAGE: &str =
    "Failed to fetch logs. Check Kibana configuration and credentials.";

/// What every tool returns. [`render`] turns it into the wire string.
pub type ToolResult = Result<Value, ErrorEnvelope>;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Arguments shared by `fetch_logs` and `discover_link`.
///
/// Keys are snake_case; the camelCase spellings are accepted as aliases.
/// Omitted values fall back to the [`SearchCriteria`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequest {
    #[serde(alias = "indexPattern")]
    pub index_pattern: String,
    #[serde(default, alias = "timeFrom", skip_serializing_if = "Option::is_none")]
    pub time_from: Option<String>,
    #[serde(default, alias = "timeTo", skip_serializing_if = "Option::is_none")]
    pub time_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Comma-separated field names, e.g. `"message,log.level"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default, alias = "sortField", skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default, alias = "sortOrder", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl ToolRequest {
    pub fn new(index_pattern: impl Into<String>) -> Self {
        Self {
            index_pattern: index_pattern.into(),
            ..Self::default()
        }
    }

    /// Parse raw tool arguments. A malformed request is a `ValidationError`.
    pub fn from_value(args: Value) -> Result<Self, ErrorEnvelope> {
        serde_json::from_value(args).map_err(|e| {
            ErrorEnvelope::from(&SearchError::Validation(format!("invalid arguments: {e}")))
        })
    }

    /// Resolve into criteria, starting from the service's defaults.
    pub fn to_criteria(&self, service: &SearchService) -> SearchCriteria {
        let mut criteria = service.criteria(self.index_pattern.clone());
        if let Some(from) = &self.time_from {
            criteria.time_from = from.clone();
        }
        if let Some(to) = &self.time_to {
            criteria.time_to = to.clone();
        }
        if let Some(query) = &self.query {
            criteria.query = query.clone();
        }
        if let Some(fields) = &self.fields {
            criteria.fields = parse_fields(fields);
        }
        if let Some(size) = self.size {
            criteria.size = size;
        }
        if let Some(field) = &self.sort_field {
            criteria.sort_field = field.clone();
        }
        if let Some(order) = &self.sort_order {
            criteria.sort_order = order.clone();
        }
        criteria
    }
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Structured failure returned instead of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Stable error kind, e.g. `ValidationError`.
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEnvelope {
    /// Startup failure: the configuration could not be read or applied.
    pub fn configuration(err: &anyhow::Error) -> Self {
        Self {
            error: "ConfigurationError".to_string(),
            message: err.to_string(),
            details: err.chain().nth(1).map(|_| format!("{err:#}")),
        }
    }
}

impl From<&SearchError> for ErrorEnvelope {
    fn from(err: &SearchError) -> Self {
        let (message, details) = match err {
            SearchError::Validation(msg) | SearchError::Configuration(msg) => (msg.clone(), None),
            SearchError::MalformedResponse(_) => (
                "The backend answered with a response logscope cannot read.".to_string(),
                Some(err.to_string()),
            ),
            SearchError::Unavailable(failure) => {
                (SEARCH_FAILED_MESSAGE.to_string(), Some(failure.to_string()))
            }
        };
        Self {
            error: err.kind().to_string(),
            message,
            details,
        }
    }
}

impl From<&StatusError> for ErrorEnvelope {
    fn from(err: &StatusError) -> Self {
        let (message, details) = match err {
            StatusError::Configuration(msg) => (msg.clone(), None),
            other => (other.summary().to_string(), Some(other.to_string())),
        };
        Self {
            error: err.kind().to_string(),
            message,
            details,
        }
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Search logs. Succeeds with the serialised `UnifiedResult`.
pub async fn fetch_logs(service: &SearchService, request: &ToolRequest) -> ToolResult {
    let criteria = request.to_criteria(service);
    match service.search(&criteria).await {
        Ok(result) => serde_json::to_value(result).map_err(|e| ErrorEnvelope {
            error: "UnexpectedError".to_string(),
            message: "Failed to serialise search result".to_string(),
            details: Some(e.to_string()),
        }),
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "fetch_logs failed");
            Err(ErrorEnvelope::from(&err))
        }
    }
}

/// Fetch the dashboard status document to verify connectivity.
pub async fn fetch_status(service: &SearchService) -> ToolResult {
    service.status().await.map_err(|err| {
        tracing::warn!(kind = err.kind(), error = %err, "fetch_status failed");
        ErrorEnvelope::from(&err)
    })
}

/// Build a Discover link for the request. Never performs network I/O.
pub fn discover_link(service: &SearchService, request: &ToolRequest) -> ToolResult {
    let criteria = request.to_criteria(service);
    service
        .discover_url(&criteria)
        .map(|url| json!({ "url": url }))
        .map_err(|err| ErrorEnvelope::from(&err))
}

/// Pretty JSON for either outcome.
pub fn render(result: &ToolResult) -> String {
    let rendered = match result {
        Ok(value) => serde_json::to_string_pretty(value),
        Err(envelope) => serde_json::to_string_pretty(envelope),
    };
    rendered.unwrap_or_else(|e| unexpected(&e.to_string()))
}

fn unexpected(message: &str) -> String {
    json!({ "error": "UnexpectedError", "message": message }).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
