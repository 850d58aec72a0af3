//! Data Model: UserQuery, GeneratedCode, CodeMetrics
//!
//! Mirrors the JSON returned by the query and analysis services. Every
//! metric is optional; the scoring crates decide what an absent value means.
use serde::{Deserialize, Serialize};

/// Raw quality measurements for one generated artifact.
///
/// Produced by the analysis service and never mutated here. Values are not
/// validated: negative counts flow into the formulas unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_id: Option<i64>,

    // === Correctness ===
    /// Percentage of passing test cases (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,
    /// Error handling quality (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_handling_score: Option<f64>,
    /// Percentage of runs that threw (0-100, lower is better)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_error_rate: Option<f64>,

    // === Efficiency ===
    /// Milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_execution_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithmic_complexity: Option<f64>,

    // === Maintainability ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cyclomatic_complexity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_of_code: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nesting_depth: Option<f64>,
    /// Cohesion (0-100, higher is better)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohesion_score: Option<f64>,

    // === Security (occurrence counts) ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xss_vulnerabilities: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injection_vulnerabilities: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardcoded_secrets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsafe_operations: Option<f64>,

    /// Upstream total (0-100). Used as-is for the overall ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<String>,
}

impl RawMetrics {
    /// Upstream total score, absent counted as zero
    pub fn total_score_or_zero(&self) -> f64 {
        self.total_score.unwrap_or(0.0)
    }
}

/// One model's answer to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<i64>,
    /// Model identifier. Not unique within a comparison.
    pub llm_name: String,
    #[serde(default)]
    pub code_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Wall-clock generation time. Any JSON number is accepted.
    #[serde(default)]
    pub generation_time_ms: f64,
    /// Absent until the analysis service has run for this artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<RawMetrics>,
}

/// Alias used by the comparison crates
pub type ModelResult = GeneratedCode;

impl GeneratedCode {
    pub fn is_analyzed(&self) -> bool {
        self.metrics.is_some()
    }
}

/// Lifecycle of a query on the generation service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    #[default]
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

/// All artifacts generated for one user prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_category: Option<String>,
    #[serde(default)]
    pub status: QueryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub generated_codes: Vec<GeneratedCode>,
}

impl ComparisonSet {
    /// Entries with metrics, in input order
    pub fn analyzed(&self) -> impl Iterator<Item = &GeneratedCode> {
        self.generated_codes.iter().filter(|c| c.is_analyzed())
    }

    /// Entries still waiting for the analysis service
    pub fn unanalyzed(&self) -> impl Iterator<Item = &GeneratedCode> {
        self.generated_codes.iter().filter(|c| !c.is_analyzed())
    }

    pub fn find_code(&self, code_id: i64) -> Option<&GeneratedCode> {
        self.generated_codes.iter().find(|c| c.id == code_id)
    }

    /// Content digest of the set, stable for identical input.
    ///
    /// Derived views are pure functions of the set, so callers can key a
    /// memo on this value.
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        format!("blake3:{}", blake3::hash(&bytes))
    }
}
