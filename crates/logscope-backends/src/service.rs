//! Unified search facade.
//!
//! [`SearchService::search`] composes the layers:
//!
//! ```text
//! criteria ─► QueryCompiler ─► candidate::plan ─► FallbackExecutor ─► normalize ─► UnifiedResult
//! ```
//!
//! Validation and configuration errors surface before any network call.
//! Exhausted candidates surface as [`SearchError::Unavailable`]; a payload the
//! normalizer cannot read surfaces unchanged as
//! [`SearchError::MalformedResponse`].

use crate::candidate;
use crate::executor::{truncate_body, ExecutorOptions, FallbackExecutor};
use crate::status::StatusError;
use crate::transport::{HttpTransport, Transport};
use logscope_core::config::Config;
use logscope_core::normalize::normalize;
use logscope_core::{link, QueryCompiler, SearchCriteria, SearchError, UnifiedResult};
use serde_json::Value;
use std::sync::Arc;

/// Entry point for searches, status checks and link generation.
///
/// Holds no per-search state; one instance may serve concurrent searches.
#[derive(Debug, Clone)]
pub struct SearchService {
    config: Config,
    compiler: QueryCompiler,
    executor: FallbackExecutor,
}

impl SearchService {
    /// Build a service talking HTTP with `reqwest`.
    pub fn new(config: Config) -> Result<Self, SearchError> {
        let transport = HttpTransport::new(config.search.accept_invalid_certs)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build a service over an arbitrary transport.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let compiler = QueryCompiler::new(config.search.max_size);
        let executor = FallbackExecutor::new(transport, ExecutorOptions::from(&config.search));
        Self {
            config,
            compiler,
            executor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Criteria for `index` using the configured default page size.
    pub fn criteria(&self, index: impl Into<String>) -> SearchCriteria {
        let mut criteria = SearchCriteria::new(index);
        criteria.size = self.config.search.default_size;
        criteria
    }

    /// Search records matching `criteria`.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<UnifiedResult, SearchError> {
        let document = self.compiler.compile(criteria)?;
        let candidates = candidate::plan(&self.config, &criteria.index, &document)?;

        tracing::info!(
            index = %criteria.index,
            time_from = %criteria.time_from,
            time_to = %criteria.time_to,
            query = %criteria.query,
            size = document.size(),
            candidates = candidates.len(),
            "searching"
        );

        let success = self.executor.execute(&candidates).await?;
        let result = normalize(&success.payload)?.enforce_limit(document.size() as usize);

        tracing::info!(
            candidate = %success.candidate,
            total = result.total,
            took_ms = result.took,
            "search completed"
        );
        Ok(result)
    }

    /// Fetch the dashboard status document (`GET /api/status`).
    pub async fn status(&self) -> Result<Value, StatusError> {
        let base = self.config.kibana_url().ok_or_else(|| {
            StatusError::Configuration(
                "No Kibana URL configured. Set KIBANA_URL or [kibana].url.".to_string(),
            )
        })?;

        let probe =
            candidate::kibana_status_probe(base, &candidate::kibana_credentials(&self.config));

        tracing::info!(url = %probe.url, "fetching Kibana status");
        let options = self.executor.options();
        let response = self
            .executor
            .transport()
            .send(probe.to_request(options.probe_timeout))
            .await
            .map_err(|e| StatusError::Connection(e.to_string()))?;

        if !response.is_success() {
            let err = StatusError::Http {
                status: response.status,
                body: truncate_body(&response.body, options.error_body_limit),
            };
            tracing::error!(error = %err, "Kibana status request failed");
            return Err(err);
        }

        let status: Value = serde_json::from_str(&response.body)
            .map_err(|e| StatusError::Unexpected(format!("status body is not JSON: {e}")))?;
        tracing::info!("Kibana status retrieved");
        Ok(status)
    }

    /// Shareable Discover URL for `criteria`. Never touches the network.
    pub fn discover_url(&self, criteria: &SearchCriteria) -> Result<String, SearchError> {
        link::discover_url(
            self.config.kibana_url().unwrap_or_default(),
            &self.config.kibana.discover_route,
            &self.config.kibana.data_view_id,
            criteria,
        )
    }
}
