//! Endpoint fallback executor.
//!
//! Candidates are attempted strictly in order, each exactly once:
//!
//! - a connectivity probe that answers 2xx sets the "reachable" flag and
//!   iteration continues;
//! - a data fetch that fails (transport error, non-2xx status, non-JSON
//!   body) is recorded and iteration continues;
//! - the first data fetch that returns JSON ends the loop, so no later
//!   candidate is ever contacted.
//!
//! Candidates are never raced. If nothing yields data, the recorded failures
//! are returned as an [`AggregatedFailure`].

use crate::candidate::{CandidateEndpoint, Role};
use crate::transport::Transport;
use logscope_core::config::SearchConfig;
use logscope_core::{AggregatedFailure, AttemptError, AttemptFailure};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Per-attempt limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorOptions {
    pub probe_timeout: Duration,
    pub fetch_timeout: Duration,
    /// Maximum number of characters of an error body kept for diagnostics.
    pub error_body_limit: usize,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for ExecutorOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            probe_timeout: config.probe_timeout(),
            fetch_timeout: config.fetch_timeout(),
            error_body_limit: config.error_body_limit,
        }
    }
}

/// The payload of the data fetch that succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSuccess {
    pub payload: Value,
    /// Name of the candidate that produced the payload.
    pub candidate: String,
    /// Position of that candidate in the list.
    pub position: usize,
    /// Whether a connectivity probe succeeded before the data arrived.
    pub connectivity_established: bool,
}

/// Keep at most `limit` characters of `body`.
pub fn truncate_body(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[derive(Clone)]
pub struct FallbackExecutor {
    transport: Arc<dyn Transport>,
    options: ExecutorOptions,
}

impl std::fmt::Debug for FallbackExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackExecutor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl FallbackExecutor {
    pub fn new(transport: Arc<dyn Transport>, options: ExecutorOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Attempt `candidates` in order until one data fetch returns JSON.
    pub async fn execute(
        &self,
        candidates: &[CandidateEndpoint],
    ) -> Result<FetchSuccess, AggregatedFailure> {
        let mut connectivity_established = false;
        let mut attempts: Vec<AttemptFailure> = Vec::new();

        for (position, candidate) in candidates.iter().enumerate() {
            let timeout = match candidate.role {
                Role::ConnectivityProbe => self.options.probe_timeout,
                Role::DataFetch => self.options.fetch_timeout,
            };
            tracing::info!(
                candidate = %candidate.name,
                method = %candidate.method,
                url = %candidate.url,
                "trying candidate endpoint"
            );

            match self.attempt(candidate, timeout).await {
                Ok(None) => {
                    connectivity_established = true;
                    tracing::info!(candidate = %candidate.name, "connectivity verified");
                }
                Ok(Some(payload)) => {
                    tracing::info!(candidate = %candidate.name, position, "search succeeded");
                    return Ok(FetchSuccess {
                        payload,
                        candidate: candidate.name.clone(),
                        position,
                        connectivity_established,
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        candidate = %candidate.name,
                        status = ?error.status(),
                        error = %error,
                        "candidate endpoint failed"
                    );
                    if candidate.role == Role::ConnectivityProbe
                        && matches!(error, AttemptError::Transport { .. })
                    {
                        tracing::error!(
                            candidate = %candidate.name,
                            "cannot reach backend; check that the host resolves and is listening"
                        );
                    }
                    attempts.push(AttemptFailure {
                        candidate: candidate.name.clone(),
                        error,
                    });
                }
            }
        }

        let failure = AggregatedFailure {
            connectivity_established,
            attempts,
        };
        tracing::error!(
            connectivity = failure.connectivity_established,
            attempts = failure.attempts.len(),
            "{failure}"
        );
        Err(failure)
    }

    /// One attempt. `Ok(None)` is a successful probe, `Ok(Some)` fetched data.
    async fn attempt(
        &self,
        candidate: &CandidateEndpoint,
        timeout: Duration,
    ) -> Result<Option<Value>, AttemptError> {
        let response = self.transport.send(candidate.to_request(timeout)).await?;

        if !response.is_success() {
            return Err(AttemptError::Rejection {
                status: response.status,
                body: truncate_body(&response.body, self.options.error_body_limit),
            });
        }

        match candidate.role {
            Role::ConnectivityProbe => Ok(None),
            Role::DataFetch => serde_json::from_str(&response.body)
                .map(Some)
                .map_err(|e| AttemptError::InvalidPayload(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
