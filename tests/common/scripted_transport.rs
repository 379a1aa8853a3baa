//! In-memory [`Transport`] with scripted replies.
//!
//! Replies are matched by URL substring, first rule wins. A URL no rule
//! matches fails with a transport error, as if nothing were listening.
//! Every request is recorded before it is answered.

use async_trait::async_trait;
use logscope_backends::{Transport, TransportRequest, TransportResponse};
use logscope_core::AttemptError;
use serde_json::Value;
use std::sync::Mutex;

/// A scripted outcome for one URL fragment.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Answer with this status and body.
    Respond(u16, String),
    /// Fail at the transport level.
    Fail { message: String, timed_out: bool },
}

impl Scripted {
    pub fn json(value: Value) -> Self {
        Scripted::Respond(200, value.to_string())
    }

    pub fn status(code: u16, body: &str) -> Self {
        Scripted::Respond(code, body.to_string())
    }

    pub fn refused() -> Self {
        Scripted::Fail {
            message: "connection refused".to_string(),
            timed_out: false,
        }
    }

    pub fn timeout() -> Self {
        Scripted::Fail {
            message: "operation timed out".to_string(),
            timed_out: true,
        }
    }
}

#[derive(Default)]
pub struct ScriptedTransport {
    rules: Vec<(String, Scripted)>,
    calls: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL contains `fragment` with `reply`.
    pub fn on(mut self, fragment: &str, reply: Scripted) -> Self {
        self.rules.push((fragment.to_string(), reply));
        self
    }

    pub fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, AttemptError> {
        self.calls.lock().unwrap().push(request.clone());
        let rule = self
            .rules
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(Scripted::refused);
        match rule {
            Scripted::Respond(status, body) => Ok(TransportResponse { status, body }),
            Scripted::Fail { message, timed_out } => Err(AttemptError::transport(message, timed_out)),
        }
    }
}
