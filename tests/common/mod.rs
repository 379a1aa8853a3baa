//! Shared test utilities for logscope integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Network-facing helpers bind to 127.0.0.1 on a random
//! port so harnesses can run in parallel.
#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fake_kibana_api;
pub mod fixtures;
pub mod scripted_transport;

pub use builders::*;
pub use fake_kibana_api::{FakeKibanaApi, Reply};
pub use fixtures::*;
pub use scripted_transport::{Scripted, ScriptedTransport};
