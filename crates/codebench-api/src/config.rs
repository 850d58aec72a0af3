//! Configuration module
use codebench_compare::{Comparator, Palette};
use codebench_core::CodebenchError;
use codebench_quality::ScoringProfile;
use std::env;

/// Service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Listen address
    pub addr: String,

    /// Base URL of the query/analysis services
    pub upstream_url: String,

    /// Bearer token forwarded to the upstream services
    pub upstream_token: Option<String>,

    pub upstream_timeout_secs: u64,

    /// Scoring table YAML, standard table when unset
    pub profile_path: Option<String>,

    /// Palette YAML, standard palette when unset
    pub palette_path: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            addr: non_empty("CODEBENCH_ADDR").unwrap_or_else(|| "0.0.0.0:8787".to_string()),

            upstream_url: non_empty("CODEBENCH_UPSTREAM_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://localhost:3001/api".to_string()),

            upstream_token: non_empty("CODEBENCH_UPSTREAM_TOKEN"),

            upstream_timeout_secs: non_empty("CODEBENCH_UPSTREAM_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),

            profile_path: non_empty("CODEBENCH_PROFILE"),

            palette_path: non_empty("CODEBENCH_PALETTE"),
        }
    }

    /// Scoring table and palette named by this configuration
    pub fn load_comparator(&self) -> Result<Comparator, CodebenchError> {
        let profile = match &self.profile_path {
            Some(path) => ScoringProfile::load(path)
                .map_err(|e| CodebenchError::ConfigError(format!("{}: {}", path, e)))?,
            None => ScoringProfile::standard(),
        };
        let palette = match &self.palette_path {
            Some(path) => Palette::load(path)
                .map_err(|e| CodebenchError::ConfigError(format!("{}: {}", path, e)))?,
            None => Palette::standard(),
        };
        Ok(Comparator::new(profile, palette))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
