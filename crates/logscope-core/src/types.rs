//! Core types shared by every layer: the caller-facing [`SearchCriteria`],
//! the validated [`SortOrder`], and the backend-independent
//! [`UnifiedResult`].

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIME_FROM: &str = "now-15m";
pub const DEFAULT_TIME_TO: &str = "now";
pub const DEFAULT_SORT_FIELD: &str = "@timestamp";
pub const DEFAULT_SORT_ORDER: &str = "desc";
pub const DEFAULT_SIZE: usize = 100;

/// One abstract "find records in a time window" request.
///
/// Time bounds are passed to the backend verbatim; they may be absolute
/// timestamps or date-math expressions such as `now-1h` and are never parsed
/// locally. `sort_order` holds the caller's raw text and is validated when
/// the criteria are compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Index pattern or data view to search, e.g. `logs-*`.
    pub index: String,
    pub time_from: String,
    pub time_to: String,
    /// KQL / Lucene expression. Empty means "match everything".
    pub query: String,
    /// Fields to return, in order. Empty means all fields.
    pub fields: Vec<String>,
    pub sort_field: String,
    pub sort_order: String,
    /// Maximum number of records to return.
    pub size: usize,
}

impl SearchCriteria {
    /// Criteria for `index` with the default window (`now-15m` .. `now`),
    /// newest first, 100 records.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            time_from: DEFAULT_TIME_FROM.to_string(),
            time_to: DEFAULT_TIME_TO.to_string(),
            query: String::new(),
            fields: Vec::new(),
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_order: DEFAULT_SORT_ORDER.to_string(),
            size: DEFAULT_SIZE,
        }
    }

    /// Check everything that can be checked without a backend.
    ///
    /// Returns the parsed sort direction so callers validate it exactly once.
    pub fn validate(&self) -> Result<SortOrder, SearchError> {
        let order: SortOrder = self.sort_order.parse()?;
        if self.index.trim().is_empty() {
            return Err(SearchError::Validation(
                "index_pattern must not be empty".to_string(),
            ));
        }
        if self.sort_field.trim().is_empty() {
            return Err(SearchError::Validation(
                "sort_field must not be empty".to_string(),
            ));
        }
        if self.size == 0 {
            return Err(SearchError::Validation(
                "size must be a positive integer".to_string(),
            ));
        }
        Ok(order)
    }
}

/// Sort direction understood by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(SearchError::Validation(format!(
                "Invalid sort_order: {other}. Must be 'desc' or 'asc'."
            ))),
        }
    }
}

/// Split a comma-separated field list as accepted by the tool contract.
///
/// Entries are trimmed, empty entries dropped and duplicates removed while
/// keeping the first occurrence.
pub fn parse_fields(raw: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for field in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        if !fields.iter().any(|seen| seen == field) {
            fields.push(field.to_string());
        }
    }
    fields
}

// ---------------------------------------------------------------------------
// Unified result contract
// ---------------------------------------------------------------------------

/// Backend-independent search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedResult {
    /// Total number of matching documents (may exceed `hits.len()`).
    pub total: u64,
    /// Backend-reported execution time in milliseconds.
    pub took: u64,
    pub hits: Vec<Record>,
}

/// One matching document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score. `None` when the backend did not score the hit
    /// (typical for sorted queries), never coerced to zero.
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: serde_json::Map<String, serde_json::Value>,
}

impl UnifiedResult {
    /// Enforce `hits.len() <= limit` and `total >= hits.len()`.
    pub fn enforce_limit(mut self, limit: usize) -> Self {
        if self.hits.len() > limit {
            tracing::debug!(
                returned = self.hits.len(),
                limit,
                "backend returned more hits than requested; truncating"
            );
            self.hits.truncate(limit);
        }
        self.total = self.total.max(self.hits.len() as u64);
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
