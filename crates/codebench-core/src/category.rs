//! Quality categories and the bounded scores derived for each
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four quality dimensions, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Correctness,
    Efficiency,
    Maintainability,
    Security,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 4] = [
        CategoryKey::Correctness,
        CategoryKey::Efficiency,
        CategoryKey::Maintainability,
        CategoryKey::Security,
    ];

    /// Position in `ALL` and in radar vectors
    pub fn index(self) -> usize {
        match self {
            Self::Correctness => 0,
            Self::Efficiency => 1,
            Self::Maintainability => 2,
            Self::Security => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correctness => "correctness",
            Self::Efficiency => "efficiency",
            Self::Maintainability => "maintainability",
            Self::Security => "security",
        }
    }

    /// Human-readable axis label
    pub fn label(self) -> &'static str {
        match self {
            Self::Correctness => "Correctness",
            Self::Efficiency => "Efficiency",
            Self::Maintainability => "Maintainability",
            Self::Security => "Security",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized category scores, each in `[0, 100]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub correctness: f64,
    pub efficiency: f64,
    pub maintainability: f64,
    pub security: f64,
}

impl CategoryScores {
    /// Build scores by evaluating `f` once per category
    pub fn from_fn(mut f: impl FnMut(CategoryKey) -> f64) -> Self {
        Self {
            correctness: f(CategoryKey::Correctness),
            efficiency: f(CategoryKey::Efficiency),
            maintainability: f(CategoryKey::Maintainability),
            security: f(CategoryKey::Security),
        }
    }

    pub fn get(&self, key: CategoryKey) -> f64 {
        match key {
            CategoryKey::Correctness => self.correctness,
            CategoryKey::Efficiency => self.efficiency,
            CategoryKey::Maintainability => self.maintainability,
            CategoryKey::Security => self.security,
        }
    }

    /// Scores in `CategoryKey::ALL` order
    pub fn to_array(&self) -> [f64; 4] {
        [self.correctness, self.efficiency, self.maintainability, self.security]
    }

    /// Unweighted mean of the four categories
    pub fn mean(&self) -> f64 {
        self.to_array().iter().sum::<f64>() / 4.0
    }
}
