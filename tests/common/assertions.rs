//! Domain-specific assertion macros for logscope harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! contract was violated: the envelope kind, the hit ids, or the shape of a
//! compiled query document.

// ---------------------------------------------------------------------------
// Tool results
// ---------------------------------------------------------------------------

/// Assert that a `ToolResult` is an error envelope of the given kind.
///
/// ```rust
/// assert_envelope!(fetch_logs(&service, &request).await, "ValidationError");
/// ```
#[macro_export]
macro_rules! assert_envelope {
    ($result:expr, $kind:expr) => {{
        let result: logscope::ToolResult = $result;
        match result {
            Ok(value) => panic!(
                "assert_envelope! failed: expected {} envelope, got success:\n{}",
                $kind,
                serde_json::to_string_pretty(&value).unwrap()
            ),
            Err(envelope) => {
                assert_eq!(
                    envelope.error, $kind,
                    "assert_envelope! failed: wrong kind, envelope: {:?}",
                    envelope
                );
                envelope
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Assert the `_id`s of a `UnifiedResult`, in order.
///
/// ```rust
/// assert_hit_ids!(result, ["doc-0", "doc-1"]);
/// ```
#[macro_export]
macro_rules! assert_hit_ids {
    ($result:expr, [$($id:expr),* $(,)?]) => {{
        let result: &logscope_core::UnifiedResult = &$result;
        let actual: Vec<&str> = result.hits.iter().map(|h| h.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        assert_eq!(
            actual, expected,
            "assert_hit_ids! failed: total={} took={}",
            result.total, result.took
        );
    }};
}

// ---------------------------------------------------------------------------
// Query documents
// ---------------------------------------------------------------------------

/// Assert that a compiled document carries exactly one primary clause, and
/// that it is the expected one (`"match_all"` or `"query_string"`).
#[macro_export]
macro_rules! assert_primary_clause {
    ($doc:expr, $clause:expr) => {{
        let doc: &logscope_core::QueryDocument = &$doc;
        let must = doc.must_clauses();
        assert_eq!(
            must.len(),
            1,
            "assert_primary_clause! failed: expected one must clause, got {:?}",
            must
        );
        let has_match_all = must[0].get("match_all").is_some();
        let has_query_string = must[0].get("query_string").is_some();
        assert!(
            has_match_all != has_query_string,
            "assert_primary_clause! failed: clause must be exactly one of match_all/query_string: {}",
            must[0]
        );
        assert!(
            must[0].get($clause).is_some(),
            "assert_primary_clause! failed: expected {}, got {}",
            $clause,
            must[0]
        );
    }};
}
