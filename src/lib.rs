//! logscope: uniform log search over Kibana and Elasticsearch.
//!
//! This crate is the inbound tool boundary. Each tool takes a loosely typed
//! request, drives [`SearchService`](logscope_backends::SearchService) and
//! returns either a JSON payload or a structured [`ErrorEnvelope`]; nothing
//! crosses the boundary as a panic or an opaque error.
//!
//! # Architecture
//!
//! ```text
//! CLI / agent ──► tools ──► logscope-backends::SearchService ──► Kibana / Elasticsearch
//!                   │
//!                   └──► logscope-core (criteria, compiler, normaliser, links)
//! ```

pub mod tools;

pub use tools::{
    discover_link, fetch_logs, fetch_status, render, ErrorEnvelope, ToolRequest, ToolResult,
};
