//! Canned backend payloads used across harnesses.
//!
//! Hits carry deterministic `@timestamp` values counting back one second at a
//! time from a fixed instant, so sorted assertions are stable.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

/// How `hits.total` is spelled in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalShape {
    /// `"total": 42` (`rest_total_hits_as_int` / 6.x).
    Bare,
    /// `"total": {"value": 42, "relation": "eq"}` (7.x+).
    Object,
    /// No `total` key at all.
    Missing,
}

const LEVELS: &[&str] = &["INFO", "WARN", "ERROR", "DEBUG"];

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// One search hit.
pub fn hit(index: &str, id: &str, ts: DateTime<Utc>, level: &str, message: &str) -> Value {
    json!({
        "_index": index,
        "_id": id,
        "_score": null,
        "_source": {
            "@timestamp": ts.to_rfc3339(),
            "log.level": level,
            "message": message,
            "service.name": "payments-api"
        }
    })
}

/// `n` hits from `logs-app`, newest first, ids `doc-0 .. doc-{n-1}`.
pub fn sample_hits(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            hit(
                "logs-app",
                &format!("doc-{i}"),
                base_time() - Duration::seconds(i as i64),
                LEVELS[i % LEVELS.len()],
                &format!("request {i} handled"),
            )
        })
        .collect()
}

/// A `_search` response with `total` spelled per `shape`.
pub fn es_response(total: u64, shape: TotalShape, hits: Vec<Value>) -> Value {
    let mut hits_obj = json!({ "max_score": null, "hits": hits });
    match shape {
        TotalShape::Bare => hits_obj["total"] = json!(total),
        TotalShape::Object => hits_obj["total"] = json!({ "value": total, "relation": "eq" }),
        TotalShape::Missing => {}
    }
    json!({
        "took": 7,
        "timed_out": false,
        "_shards": { "total": 1, "successful": 1, "skipped": 0, "failed": 0 },
        "hits": hits_obj
    })
}

/// `response` wrapped the way the batched-search endpoint returns it.
pub fn bsearch_envelope(response: Value) -> Value {
    json!({
        "id": "0",
        "isPartial": false,
        "isRunning": false,
        "rawResponse": response
    })
}

/// A healthy dashboard status document.
pub fn kibana_status_doc() -> Value {
    json!({
        "name": "kibana",
        "version": { "number": "8.15.0" },
        "status": { "overall": { "level": "available" } }
    })
}
