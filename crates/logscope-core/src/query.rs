//! Query compiler: turns [`SearchCriteria`] into an Elasticsearch query body.
//!
//! The compiled document has this shape:
//!
//! ```text
//! {
//!   "query": { "bool": {
//!       "must":   [ query_string | match_all ],       // exactly one
//!       "filter": [ { "range": { "@timestamp": { gte, lte, format } } } ]
//!   }},
//!   "sort": [ { <sort_field>: { "order": "asc" | "desc" } } ],
//!   "size": <n>,
//!   "_source": [ ... ]                                 // only with a projection
//! }
//! ```
//!
//! Time bounds are copied verbatim: the backend's date-math grammar is
//! authoritative and nothing is parsed locally.

use crate::error::SearchError;
use crate::types::SearchCriteria;
use serde::Serialize;
use serde_json::{json, Value};

/// Field every time-range filter targets.
pub const TIMESTAMP_FIELD: &str = "@timestamp";

/// Upper bound the backends accept for a single page (`index.max_result_window`).
pub const DEFAULT_MAX_SIZE: usize = 10_000;

/// A compiled, immutable backend query body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryDocument(Value);

impl QueryDocument {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The `size` clause.
    pub fn size(&self) -> u64 {
        self.0["size"].as_u64().unwrap_or_default()
    }

    /// The clauses of `query.bool.must`.
    pub fn must_clauses(&self) -> &[Value] {
        self.0["query"]["bool"]["must"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Compiles criteria into [`QueryDocument`]s, clamping the result size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCompiler {
    max_size: usize,
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl QueryCompiler {
    /// A compiler that never emits a `size` above `max_size` (minimum 1).
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size: max_size.max(1),
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Clamp a requested size to the configured maximum.
    pub fn clamp_size(&self, requested: usize) -> usize {
        if requested > self.max_size {
            tracing::debug!(requested, max = self.max_size, "clamping result size");
        }
        requested.min(self.max_size)
    }

    /// Validate `criteria` and build its query body.
    ///
    /// Fails with [`SearchError::Validation`] on an unknown sort order, an
    /// empty index or sort field, or a zero size.
    pub fn compile(&self, criteria: &SearchCriteria) -> Result<QueryDocument, SearchError> {
        let order = criteria.validate()?;
        let size = self.clamp_size(criteria.size);

        let text_clause = if criteria.query.is_empty() {
            json!({ "match_all": {} })
        } else {
            json!({
                "query_string": {
                    "query": criteria.query,
                    "analyze_wildcard": true
                }
            })
        };

        let mut sort_clause = serde_json::Map::new();
        sort_clause.insert(
            criteria.sort_field.clone(),
            json!({ "order": order.as_str() }),
        );

        let mut doc = json!({
            "query": {
                "bool": {
                    "must": [text_clause],
                    "filter": [{
                        "range": {
                            TIMESTAMP_FIELD: {
                                "gte": criteria.time_from,
                                "lte": criteria.time_to,
                                "format": "strict_date_optional_time"
                            }
                        }
                    }]
                }
            },
            "sort": [Value::Object(sort_clause)],
            "size": size
        });

        if !criteria.fields.is_empty() {
            doc["_source"] = json!(criteria.fields);
        }

        tracing::debug!(index = %criteria.index, size, "compiled query document");
        Ok(QueryDocument(doc))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
