//! Response normalizer: maps a backend search response onto [`UnifiedResult`].
//!
//! Accepted shapes:
//!
//! - a plain `_search` response (`{ took, hits: { total, hits: [...] } }`),
//! - the same wrapped by the dashboard proxy as `{ rawResponse: ... }`, or
//!   `{ result: { rawResponse: ... } }` for batched searches.
//!
//! `hits.total` is either a bare integer (`rest_total_hits_as_int`, 6.x) or
//! `{ "value": n, "relation": ... }` (7.x+). Anything else is rejected rather
//! than coerced.

use crate::error::SearchError;
use crate::types::{Record, UnifiedResult};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TotalHits {
    Count(u64),
    Object { value: u64 },
}

impl TotalHits {
    fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) | TotalHits::Object { value: n } => *n,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    took: u64,
    hits: HitList,
}

#[derive(Debug, Deserialize)]
struct HitList {
    #[serde(default)]
    total: Option<TotalHits>,
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_index")]
    index: String,
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score", default)]
    score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: Map<String, Value>,
}

/// Strip dashboard proxy envelopes, returning the inner search response.
fn unwrap_envelope(raw: &Value) -> &Value {
    if let Some(inner) = raw.get("rawResponse").filter(|v| v.is_object()) {
        return inner;
    }
    if let Some(inner) = raw
        .get("result")
        .and_then(|r| r.get("rawResponse"))
        .filter(|v| v.is_object())
    {
        return inner;
    }
    raw
}

/// Convert a backend response into a [`UnifiedResult`].
///
/// A missing `hits.total` falls back to the number of returned hits; a
/// missing `took` is reported as 0. A missing or mistyped hit list fails with
/// [`SearchError::MalformedResponse`].
pub fn normalize(raw: &Value) -> Result<UnifiedResult, SearchError> {
    let response = unwrap_envelope(raw);
    if response.get("hits").and_then(|h| h.get("hits")).is_none() {
        return Err(SearchError::MalformedResponse(
            "response has no `hits.hits` list".to_string(),
        ));
    }

    let parsed = SearchResponse::deserialize(response)
        .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

    let total = parsed
        .hits
        .total
        .as_ref()
        .map(TotalHits::value)
        .unwrap_or(parsed.hits.hits.len() as u64);

    let hits = parsed
        .hits
        .hits
        .into_iter()
        .map(|hit| Record {
            index: hit.index,
            id: hit.id,
            score: hit.score,
            source: hit.source,
        })
        .collect();

    Ok(UnifiedResult {
        total,
        took: parsed.took,
        hits,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
