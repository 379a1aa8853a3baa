//! logscope-backends: everything in logscope that touches the network.
//!
//! # Architecture
//!
//! ```text
//! SearchService ──► candidate::plan ──► FallbackExecutor ──► dyn Transport
//!                                                               │
//!                                              HttpTransport (reqwest)
//! ```
//!
//! The [`Transport`] trait is the only seam to the outside world. Tests drive
//! the executor and the facade through a scripted implementation; production
//! code uses [`HttpTransport`].

pub mod candidate;
pub mod executor;
pub mod service;
pub mod status;
pub mod transport;

pub use candidate::{CandidateEndpoint, Role};
pub use executor::{ExecutorOptions, FallbackExecutor, FetchSuccess};
pub use service::SearchService;
pub use status::StatusError;
pub use transport::{
    Credentials, HttpTransport, Method, Transport, TransportRequest, TransportResponse,
};
