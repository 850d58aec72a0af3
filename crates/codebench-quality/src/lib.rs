//! Codebench Quality: category score normalization
//!
//! Maps one analysis record to four bounded category scores
//! (correctness, efficiency, maintainability, security) using a
//! data-driven scoring table.
//!
//! # Example
//!
//! ```
//! use codebench_core::RawMetrics;
//! use codebench_quality::normalize;
//!
//! let metrics = RawMetrics {
//!     pass_rate: Some(100.0),
//!     error_handling_score: Some(100.0),
//!     runtime_error_rate: Some(0.0),
//!     ..Default::default()
//! };
//!
//! let scores = normalize(&metrics);
//! assert_eq!(scores.correctness, 100.0);
//! ```
//!
//! A custom table can be loaded from YAML with [`ScoringProfile::load`].
//! Absent fields never raise errors; each term's [`MissingPolicy`] decides
//! what it contributes.

pub mod normalizer;
pub mod profile;

pub use normalizer::{clamp_score, normalize, standard_profile, TermContribution};
pub use profile::{
    Direction, MetricField, MissingPolicy, ProfileError, ScoringProfile, ScoringTerm, Transform,
};
