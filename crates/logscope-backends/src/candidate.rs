//! Candidate endpoints and the per-backend plans that produce them.
//!
//! A search is attempted against an ordered list of candidates. For a
//! dashboard (Kibana) deployment the list is:
//!
//! 1. `GET  /api/status`: connectivity probe, never yields data
//! 2. `POST /internal/bsearch`: batched search, may be disabled
//! 3. `POST /api/console/proxy?path=<index>/_search&method=POST`
//!
//! followed by `POST <host>/<index>/_search` for every configured direct
//! search-engine host.

use crate::transport::{Credentials, Method, TransportRequest};
use logscope_core::config::Config;
use logscope_core::{QueryDocument, SearchError};
use serde_json::{json, Value};
use std::time::Duration;

pub const KIBANA_STATUS: &str = "kibana status (connectivity test)";
pub const KIBANA_BSEARCH: &str = "internal bsearch";
pub const KIBANA_CONSOLE_PROXY: &str = "console proxy";

/// What a candidate is attempted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Success only proves the backend is reachable; iteration continues.
    ConnectivityProbe,
    /// Success ends the search with this candidate's payload.
    DataFetch,
}

/// One transport target attempted during a search.
#[derive(Debug, Clone)]
pub struct CandidateEndpoint {
    pub name: String,
    pub url: String,
    pub method: Method,
    pub payload: Option<Value>,
    pub role: Role,
    pub credentials: Credentials,
    pub headers: Vec<(&'static str, String)>,
}

impl CandidateEndpoint {
    /// A `GET` connectivity probe.
    pub fn probe(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: Method::Get,
            payload: None,
            role: Role::ConnectivityProbe,
            credentials: Credentials::None,
            headers: Vec::new(),
        }
    }

    /// A `POST` data fetch with a JSON body.
    pub fn fetch(name: impl Into<String>, url: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: Method::Post,
            payload: Some(payload),
            role: Role::DataFetch,
            credentials: Credentials::None,
            headers: Vec::new(),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Materialise the request for this candidate.
    pub fn to_request(&self, timeout: Duration) -> TransportRequest {
        TransportRequest {
            method: self.method,
            url: self.url.clone(),
            body: self.payload.clone(),
            headers: self.headers.clone(),
            credentials: self.credentials.clone(),
            timeout,
        }
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Credentials for dashboard requests.
pub fn kibana_credentials(config: &Config) -> Credentials {
    Credentials::resolve(
        config.kibana.api_key.as_deref(),
        config.kibana.username.as_deref(),
        config.kibana.password.as_deref(),
    )
}

/// Credentials for direct search-engine requests.
///
/// Falls back to the dashboard user when no engine API key is configured,
/// since both usually share the same security realm.
pub fn elastic_credentials(config: &Config) -> Credentials {
    Credentials::resolve(
        config.elastic.api_key.as_deref(),
        config.kibana.username.as_deref(),
        config.kibana.password.as_deref(),
    )
}

/// `GET <base>/api/status`, also used on its own by the status operation.
pub fn kibana_status_probe(base_url: &str, credentials: &Credentials) -> CandidateEndpoint {
    let base = base_url.trim_end_matches('/');
    CandidateEndpoint::probe(KIBANA_STATUS, format!("{base}/api/status"))
        .with_credentials(credentials.clone())
        .with_header("kbn-xsrf", "true")
}

/// Dashboard candidates: status probe, batched search, console proxy.
pub fn kibana_candidates(
    base_url: &str,
    credentials: &Credentials,
    index: &str,
    document: &QueryDocument,
) -> Vec<CandidateEndpoint> {
    let base = base_url.trim_end_matches('/');
    let encoded_index = urlencoding::encode(index);

    let bsearch_payload = json!({
        "params": {
            "index": index,
            "body": document,
            "rest_total_hits_as_int": true
        }
    });

    let fetches = [
        CandidateEndpoint::fetch(
            KIBANA_BSEARCH,
            format!("{base}/internal/bsearch"),
            bsearch_payload,
        ),
        CandidateEndpoint::fetch(
            KIBANA_CONSOLE_PROXY,
            format!("{base}/api/console/proxy?path={encoded_index}/_search&method=POST"),
            document.as_value().clone(),
        ),
    ]
    .into_iter()
    .map(|c| {
        c.with_credentials(credentials.clone())
            .with_header("kbn-xsrf", "true")
    });

    std::iter::once(kibana_status_probe(base, credentials))
        .chain(fetches)
        .collect()
}

/// One direct `_search` candidate per host.
pub fn elastic_candidates(
    hosts: &[String],
    credentials: &Credentials,
    index: &str,
    document: &QueryDocument,
) -> Vec<CandidateEndpoint> {
    let encoded_index = urlencoding::encode(index);
    hosts
        .iter()
        .map(|host| {
            let host = host.trim_end_matches('/');
            CandidateEndpoint::fetch(
                format!("elasticsearch {host}"),
                format!("{host}/{encoded_index}/_search"),
                document.as_value().clone(),
            )
            .with_credentials(credentials.clone())
        })
        .collect()
}

/// Full ordered candidate list for `index`, dashboard first.
///
/// Fails with [`SearchError::Configuration`] when no backend is configured.
pub fn plan(
    config: &Config,
    index: &str,
    document: &QueryDocument,
) -> Result<Vec<CandidateEndpoint>, SearchError> {
    let mut candidates = Vec::new();
    if let Some(base) = config.kibana_url() {
        candidates.extend(kibana_candidates(
            base,
            &kibana_credentials(config),
            index,
            document,
        ));
    }
    let hosts = config.elastic.hosts();
    if !hosts.is_empty() {
        candidates.extend(elastic_candidates(
            &hosts,
            &elastic_credentials(config),
            index,
            document,
        ));
    }

    if candidates.is_empty() {
        return Err(SearchError::Configuration(
            "No search backend configured. Set KIBANA_URL or ELASTIC_URL \
             (or [kibana].url / [elastic].url in the config file)."
                .to_string(),
        ));
    }
    Ok(candidates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
