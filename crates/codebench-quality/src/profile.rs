//! Scoring Profiles: the per-field scoring table
//!
//! Each row of the table says which category a raw metric feeds, which way
//! is "better", how the raw value becomes a 0-100 contribution, and what
//! happens when the analysis service did not report the field.

use codebench_core::{CategoryKey, RawMetrics};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Raw metric fields that can appear in a scoring table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricField {
    PassRate,
    ErrorHandlingScore,
    RuntimeErrorRate,
    AvgExecutionTime,
    MemoryUsage,
    AlgorithmicComplexity,
    CyclomaticComplexity,
    LinesOfCode,
    NestingDepth,
    CohesionScore,
    XssVulnerabilities,
    InjectionVulnerabilities,
    HardcodedSecrets,
    UnsafeOperations,
}

impl MetricField {
    /// Read this field from a metrics record
    pub fn read(self, m: &RawMetrics) -> Option<f64> {
        match self {
            Self::PassRate => m.pass_rate,
            Self::ErrorHandlingScore => m.error_handling_score,
            Self::RuntimeErrorRate => m.runtime_error_rate,
            Self::AvgExecutionTime => m.avg_execution_time,
            Self::MemoryUsage => m.memory_usage,
            Self::AlgorithmicComplexity => m.algorithmic_complexity,
            Self::CyclomaticComplexity => m.cyclomatic_complexity,
            Self::LinesOfCode => m.lines_of_code,
            Self::NestingDepth => m.nesting_depth,
            Self::CohesionScore => m.cohesion_score,
            Self::XssVulnerabilities => m.xss_vulnerabilities,
            Self::InjectionVulnerabilities => m.injection_vulnerabilities,
            Self::HardcodedSecrets => m.hardcoded_secrets,
            Self::UnsafeOperations => m.unsafe_operations,
        }
    }

    /// Wire name of the field
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PassRate => "passRate",
            Self::ErrorHandlingScore => "errorHandlingScore",
            Self::RuntimeErrorRate => "runtimeErrorRate",
            Self::AvgExecutionTime => "avgExecutionTime",
            Self::MemoryUsage => "memoryUsage",
            Self::AlgorithmicComplexity => "algorithmicComplexity",
            Self::CyclomaticComplexity => "cyclomaticComplexity",
            Self::LinesOfCode => "linesOfCode",
            Self::NestingDepth => "nestingDepth",
            Self::CohesionScore => "cohesionScore",
            Self::XssVulnerabilities => "xssVulnerabilities",
            Self::InjectionVulnerabilities => "injectionVulnerabilities",
            Self::HardcodedSecrets => "hardcodedSecrets",
            Self::UnsafeOperations => "unsafeOperations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// How a raw value becomes a contribution to its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    /// The raw value is the contribution
    Direct,
    /// `100 - value * points / per`, optionally floored at zero.
    /// A term loses `points` for every `per` units of raw value.
    Inverted {
        points: f64,
        #[serde(default = "default_per")]
        per: f64,
        #[serde(default)]
        floor_at_zero: bool,
    },
}

fn default_per() -> f64 {
    1.0
}

impl Transform {
    /// Inverted transform losing `points` per unit of raw value
    pub fn inverted(points: f64, floor_at_zero: bool) -> Self {
        Self::Inverted { points, per: 1.0, floor_at_zero }
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Direct => value,
            Self::Inverted { points, per, floor_at_zero } => {
                let inverted = 100.0 - value * points / per;
                if floor_at_zero {
                    inverted.max(0.0)
                } else {
                    inverted
                }
            }
        }
    }

    fn direction(self) -> Direction {
        match self {
            Self::Direct => Direction::HigherIsBetter,
            Self::Inverted { .. } => Direction::LowerIsBetter,
        }
    }
}

/// What an absent field contributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "value", rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Pretend the field held this raw value and run the transform
    Substitute(f64),
    /// Skip the transform; the term contributes this value directly
    Contribute(f64),
}

/// One row of the scoring table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTerm {
    pub field: MetricField,
    pub category: CategoryKey,
    pub direction: Direction,
    pub transform: Transform,
    pub missing: MissingPolicy,
}

impl ScoringTerm {
    pub fn new(
        field: MetricField,
        category: CategoryKey,
        transform: Transform,
        missing: MissingPolicy,
    ) -> Self {
        Self {
            field,
            category,
            direction: transform.direction(),
            transform,
            missing,
        }
    }

    /// Contribution of this term for one metrics record
    pub fn contribution(&self, metrics: &RawMetrics) -> f64 {
        match (self.field.read(metrics), self.missing) {
            (Some(value), _) => self.transform.apply(value),
            (None, MissingPolicy::Substitute(value)) => self.transform.apply(value),
            (None, MissingPolicy::Contribute(value)) => value,
        }
    }
}

/// Errors raised while loading a scoring profile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile: {0}")]
    Io(String),
    #[error("failed to parse profile: {0}")]
    Parse(String),
    #[error("field {0} appears more than once")]
    DuplicateField(&'static str),
    #[error("field {field} is marked {declared:?} but its transform implies {implied:?}")]
    DirectionMismatch {
        field: &'static str,
        declared: Direction,
        implied: Direction,
    },
    #[error("category {0} has no scoring terms")]
    EmptyCategory(CategoryKey),
    #[error("field {0} has a non-finite constant or a zero divisor")]
    NonFinite(&'static str),
}

/// A complete scoring table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    /// Profile name (e.g., "default@1.0")
    pub name: String,
    pub terms: Vec<ScoringTerm>,
}

impl ScoringProfile {
    /// The table the comparison dashboard has always used.
    ///
    /// Inverted efficiency and maintainability terms are floored per term and
    /// contribute 0 when absent. The four vulnerability penalties are not
    /// floored per term; only the category average is clamped.
    pub fn standard() -> Self {
        use CategoryKey::*;
        use MetricField::*;

        let direct = Transform::Direct;
        let complement = Transform::inverted(1.0, false);
        let floored = |points: f64, per: f64| Transform::Inverted { points, per, floor_at_zero: true };
        let penalty = Transform::inverted(25.0, false);
        let zero = MissingPolicy::Substitute(0.0);
        let skipped = MissingPolicy::Contribute(0.0);

        Self {
            name: "standard@1.0".to_string(),
            terms: vec![
                ScoringTerm::new(PassRate, Correctness, direct, zero),
                ScoringTerm::new(ErrorHandlingScore, Correctness, direct, zero),
                ScoringTerm::new(RuntimeErrorRate, Correctness, complement, zero),
                ScoringTerm::new(AvgExecutionTime, Efficiency, floored(1.0, 10.0), skipped),
                ScoringTerm::new(MemoryUsage, Efficiency, floored(1.0, 1.0), skipped),
                ScoringTerm::new(AlgorithmicComplexity, Efficiency, floored(10.0, 1.0), skipped),
                ScoringTerm::new(CyclomaticComplexity, Maintainability, floored(5.0, 1.0), skipped),
                ScoringTerm::new(LinesOfCode, Maintainability, floored(1.0, 5.0), skipped),
                ScoringTerm::new(NestingDepth, Maintainability, floored(10.0, 1.0), skipped),
                ScoringTerm::new(CohesionScore, Maintainability, direct, zero),
                ScoringTerm::new(XssVulnerabilities, Security, penalty, zero),
                ScoringTerm::new(InjectionVulnerabilities, Security, penalty, zero),
                ScoringTerm::new(HardcodedSecrets, Security, penalty, zero),
                ScoringTerm::new(UnsafeOperations, Security, penalty, zero),
            ],
        }
    }

    /// Load and validate a profile from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        let profile: Self =
            serde_yaml::from_str(yaml).map_err(|e| ProfileError::Parse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a YAML file
    pub fn load(path: &str) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProfileError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Check the table is usable: every category scored, each field used
    /// once, directions consistent with transforms, constants finite.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let mut seen = HashSet::new();
        for term in &self.terms {
            let field = term.field.as_str();
            if !seen.insert(term.field) {
                return Err(ProfileError::DuplicateField(field));
            }

            let implied = term.transform.direction();
            if term.direction != implied {
                return Err(ProfileError::DirectionMismatch {
                    field,
                    declared: term.direction,
                    implied,
                });
            }

            let scale_ok = match term.transform {
                Transform::Direct => true,
                Transform::Inverted { points, per, .. } => {
                    points.is_finite() && per.is_finite() && per != 0.0
                }
            };
            let missing_ok = match term.missing {
                MissingPolicy::Substitute(v) | MissingPolicy::Contribute(v) => v.is_finite(),
            };
            if !scale_ok || !missing_ok {
                return Err(ProfileError::NonFinite(field));
            }
        }

        for key in CategoryKey::ALL {
            if !self.terms.iter().any(|t| t.category == key) {
                return Err(ProfileError::EmptyCategory(key));
            }
        }

        Ok(())
    }

    /// Terms feeding one category, in table order
    pub fn terms_for(&self, key: CategoryKey) -> impl Iterator<Item = &ScoringTerm> {
        self.terms.iter().filter(move |t| t.category == key)
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_valid() {
        let profile = ScoringProfile::standard();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.terms.len(), 14);
        assert_eq!(profile.terms_for(CategoryKey::Correctness).count(), 3);
        assert_eq!(profile.terms_for(CategoryKey::Efficiency).count(), 3);
        assert_eq!(profile.terms_for(CategoryKey::Maintainability).count(), 4);
        assert_eq!(profile.terms_for(CategoryKey::Security).count(), 4);
    }

    #[test]
    fn test_transform_apply() {
        let floored = Transform::inverted(25.0, true);
        let raw = Transform::inverted(25.0, false);
        let per_ten = Transform::Inverted { points: 1.0, per: 10.0, floor_at_zero: true };
        assert_eq!(floored.apply(5.0), 0.0);
        assert_eq!(raw.apply(5.0), -25.0);
        assert_eq!(per_ten.apply(250.0), 75.0);
        assert_eq!(per_ten.apply(5000.0), 0.0);
        assert_eq!(Transform::Direct.apply(42.0), 42.0);
    }

    #[test]
    fn test_missing_policies() {
        let metrics = RawMetrics::default();
        let substitute = ScoringTerm::new(
            MetricField::RuntimeErrorRate,
            CategoryKey::Correctness,
            Transform::inverted(1.0, false),
            MissingPolicy::Substitute(0.0),
        );
        let contribute = ScoringTerm::new(
            MetricField::AvgExecutionTime,
            CategoryKey::Efficiency,
            Transform::Inverted { points: 1.0, per: 10.0, floor_at_zero: true },
            MissingPolicy::Contribute(0.0),
        );
        assert_eq!(substitute.contribution(&metrics), 100.0);
        assert_eq!(contribute.contribution(&metrics), 0.0);
    }

    #[test]
    fn test_yaml_roundtrip_of_standard() {
        let yaml = serde_yaml::to_string(&ScoringProfile::standard()).unwrap();
        let loaded = ScoringProfile::from_yaml(&yaml).unwrap();
        assert_eq!(loaded, ScoringProfile::standard());
    }

    #[test]
    fn test_direction_mismatch_rejected() {
        let mut profile = ScoringProfile::standard();
        profile.terms[0].direction = Direction::LowerIsBetter;
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::DirectionMismatch { field: "passRate", .. })
        ));
    }

    #[test]
    fn test_empty_category_rejected() {
        let mut profile = ScoringProfile::standard();
        profile.terms.retain(|t| t.category != CategoryKey::Security);
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::EmptyCategory(CategoryKey::Security))
        ));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut profile = ScoringProfile::standard();
        let first = profile.terms[0].clone();
        profile.terms.push(first);
        assert!(matches!(profile.validate(), Err(ProfileError::DuplicateField("passRate"))));
    }
}
