//! logscope-core: pure logic behind logscope.
//!
//! Nothing in this crate performs network I/O. It holds the data model and
//! the three transformation layers the search facade composes, plus the
//! link builder that shares their input.
//!
//! # Architecture
//!
//! ```text
//! SearchCriteria ──► query::QueryCompiler ──► QueryDocument ──► (backends)
//!                                                                   │
//! UnifiedResult ◄── normalize::normalize ◄── raw backend JSON ◄─────┘
//!
//! SearchCriteria ──► link::discover_url ──► rison::encode ──► URL
//! ```

pub mod config;
pub mod error;
pub mod link;
pub mod normalize;
pub mod query;
pub mod rison;
pub mod types;

pub use error::{AggregatedFailure, AttemptError, AttemptFailure, SearchError};
pub use query::{QueryCompiler, QueryDocument};
pub use rison::RisonValue;
pub use types::{parse_fields, Record, SearchCriteria, SortOrder, UnifiedResult};
