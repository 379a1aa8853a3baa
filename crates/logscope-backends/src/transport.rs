//! Transport seam between the fallback executor and the network.
//!
//! [`Transport::send`] returns `Err` only for transport-level failures
//! (connection refused, DNS, TLS, timeout). Any HTTP answer, including 4xx
//! and 5xx, is an `Ok` [`TransportResponse`]; interpreting the status is the
//! executor's job.

use async_trait::async_trait;
use logscope_core::{AttemptError, SearchError};
use serde_json::Value;
use std::time::Duration;

/// HTTP verb used by a candidate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Authentication attached to a request. Exactly one mechanism per call.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    #[default]
    None,
    /// `Authorization: ApiKey <key>`.
    ApiKey(String),
    Basic { username: String, password: String },
}

impl Credentials {
    /// Pick a mechanism from whatever is configured. An API key wins over
    /// username/password; basic auth needs both halves.
    pub fn resolve(
        api_key: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Self {
        fn present(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }
        if let Some(key) = present(api_key) {
            return Credentials::ApiKey(key.to_string());
        }
        match (present(username), present(password)) {
            (Some(username), Some(password)) => Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
            _ => Credentials::None,
        }
    }
}

// Keep secrets out of logs and test failure output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::None => write!(f, "None"),
            Credentials::ApiKey(_) => write!(f, "ApiKey(***)"),
            Credentials::Basic { username, .. } => write!(f, "Basic({username}:***)"),
        }
    }
}

/// One outbound HTTP request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub headers: Vec<(&'static str, String)>,
    pub credentials: Credentials,
    pub timeout: Duration,
}

/// Status and body of an HTTP answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, AttemptError>;
}

// ---------------------------------------------------------------------------
// reqwest implementation
// ---------------------------------------------------------------------------

/// [`Transport`] backed by a shared `reqwest` client. Redirects are followed.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client. `accept_invalid_certs` disables certificate
    /// verification for self-signed dashboard deployments.
    pub fn new(accept_invalid_certs: bool) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| SearchError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

/// Render an error together with its source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, AttemptError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        }
        .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        builder = match &request.credentials {
            Credentials::None => builder,
            Credentials::ApiKey(key) => {
                builder.header(reqwest::header::AUTHORIZATION, format!("ApiKey {key}"))
            }
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AttemptError::transport(describe(&e), e.is_timeout()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::transport(describe(&e), e.is_timeout()))?;

        Ok(TransportResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
