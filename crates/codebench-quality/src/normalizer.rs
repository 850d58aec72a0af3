//! Category score normalization
//!
//! Turns one raw metrics record into four bounded category scores. Every
//! category is the plain average of its term contributions, clamped to
//! `[0, 100]` only at the end.

use crate::profile::{MetricField, ScoringProfile};
use codebench_core::{CategoryKey, CategoryScores, RawMetrics};
use once_cell::sync::Lazy;
use serde::Serialize;

static STANDARD: Lazy<ScoringProfile> = Lazy::new(ScoringProfile::standard);

/// Bound a category average to `[0, 100]`. NaN maps to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// One term's share of a category score
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermContribution {
    pub field: MetricField,
    pub category: CategoryKey,
    /// Whether the analysis service reported the field
    pub present: bool,
    pub contribution: f64,
}

impl ScoringProfile {
    /// Normalize a metrics record with this table. Never fails.
    pub fn normalize(&self, metrics: &RawMetrics) -> CategoryScores {
        let mut sums = [0.0f64; 4];
        let mut counts = [0usize; 4];

        for term in &self.terms {
            let i = term.category.index();
            sums[i] += term.contribution(metrics);
            counts[i] += 1;
        }

        CategoryScores::from_fn(|key| {
            let i = key.index();
            if counts[i] == 0 {
                0.0
            } else {
                clamp_score(sums[i] / counts[i] as f64)
            }
        })
    }

    /// Per-term contributions, in table order
    pub fn explain(&self, metrics: &RawMetrics) -> Vec<TermContribution> {
        self.terms
            .iter()
            .map(|term| TermContribution {
                field: term.field,
                category: term.category,
                present: term.field.read(metrics).is_some(),
                contribution: term.contribution(metrics),
            })
            .collect()
    }
}

/// Shared instance of the standard table
pub fn standard_profile() -> &'static ScoringProfile {
    &STANDARD
}

/// Normalize with the standard table
pub fn normalize(metrics: &RawMetrics) -> CategoryScores {
    STANDARD.normalize(metrics)
}
