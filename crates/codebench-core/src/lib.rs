//! Codebench Core: data model shared by the scoring and comparison crates
//!
//! Wire shapes for queries, generated code and raw analysis metrics, the
//! four quality categories, and the unified error enum used at the service
//! boundary.

pub mod category;
pub mod context;
pub mod data_model;
pub mod error;

pub use category::{CategoryKey, CategoryScores};
pub use context::RequestContext;
pub use data_model::{ComparisonSet, GeneratedCode, ModelResult, QueryStatus, RawMetrics};
pub use error::CodebenchError;

/// Engine version reported by the API
pub const CODEBENCH_VERSION: &str = env!("CARGO_PKG_VERSION");
