//! Test builders: ergonomic constructors for criteria, configs and candidates.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use logscope_backends::CandidateEndpoint;
use logscope_core::config::Config;
use logscope_core::SearchCriteria;
use serde_json::json;

// ---------------------------------------------------------------------------
// CriteriaBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`SearchCriteria`].
///
/// # Example
///
/// ```rust
/// let criteria = CriteriaBuilder::new("logs-*")
///     .window("now-1h", "now")
///     .query("log.level:ERROR")
///     .fields(&["message", "log.level"])
///     .size(20)
///     .build();
/// ```
pub struct CriteriaBuilder {
    criteria: SearchCriteria,
}

impl CriteriaBuilder {
    pub fn new(index: &str) -> Self {
        Self {
            criteria: SearchCriteria::new(index),
        }
    }

    pub fn window(mut self, from: &str, to: &str) -> Self {
        self.criteria.time_from = from.to_string();
        self.criteria.time_to = to.to_string();
        self
    }

    pub fn query(mut self, query: &str) -> Self {
        self.criteria.query = query.to_string();
        self
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.criteria.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn sort(mut self, field: &str, order: &str) -> Self {
        self.criteria.sort_field = field.to_string();
        self.criteria.sort_order = order.to_string();
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.criteria.size = size;
        self
    }

    pub fn build(self) -> SearchCriteria {
        self.criteria
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Built-in defaults with the given backends and short timeouts.
pub fn config_for(kibana: Option<&str>, elastic: Option<&str>) -> Config {
    let mut config = Config::defaults();
    config.kibana.url = kibana.map(str::to_string);
    config.elastic.url = elastic.map(str::to_string);
    config.search.probe_timeout_secs = 2;
    config.search.fetch_timeout_secs = 5;
    config
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// A connectivity probe at `mem://<name>`.
pub fn probe(name: &str) -> CandidateEndpoint {
    CandidateEndpoint::probe(name, format!("mem://{name}"))
}

/// A data fetch at `mem://<name>` with a trivial body.
pub fn fetch(name: &str) -> CandidateEndpoint {
    CandidateEndpoint::fetch(name, format!("mem://{name}"), json!({ "size": 1 }))
}
