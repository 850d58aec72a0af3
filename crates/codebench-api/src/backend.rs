//! Upstream services
//!
//! The query service owns comparison sets; the analysis service attaches
//! metrics to generated code. Both are reached through [`QueryBackend`] so
//! handlers never depend on a concrete transport.

use crate::config::ApiConfig;
use async_trait::async_trait;
use codebench_core::{CodebenchError, ComparisonSet};
use reqwest::StatusCode;
use std::time::Duration;

#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Current state of a query and all of its generated code
    async fn fetch_comparison_set(&self, query_id: i64) -> Result<ComparisonSet, CodebenchError>;

    /// Ask the analysis service to analyze one generated code. The metrics
    /// become visible on the next fetch.
    async fn analyze_code(&self, code_id: i64) -> Result<(), CodebenchError>;
}

/// HTTP client for the query and analysis services
pub struct HttpBackend {
    base_url: String,
    token: Option<String>,
    http_client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> Result<Self, CodebenchError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(|e| CodebenchError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.upstream_url.clone(),
            token: config.upstream_token.clone(),
            http_client,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn check_status(url: &str, status: StatusCode) -> Result<(), CodebenchError> {
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            Err(CodebenchError::NotFound(url.to_string()))
        } else {
            Err(CodebenchError::UpstreamError(format!("{} returned {}", url, status.as_u16())))
        }
    }
}

#[async_trait]
impl QueryBackend for HttpBackend {
    async fn fetch_comparison_set(&self, query_id: i64) -> Result<ComparisonSet, CodebenchError> {
        let url = format!("{}/queries/{}", self.base_url, query_id);

        let response = self
            .authorize(self.http_client.get(&url))
            .send()
            .await
            .map_err(|e| CodebenchError::UpstreamError(e.to_string()))?;

        Self::check_status(&url, response.status())?;

        response
            .json()
            .await
            .map_err(|e| CodebenchError::SchemaError(format!("{}: {}", url, e)))
    }

    async fn analyze_code(&self, code_id: i64) -> Result<(), CodebenchError> {
        let url = format!("{}/analysis/analyze/{}", self.base_url, code_id);

        let response = self
            .authorize(self.http_client.post(&url))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| CodebenchError::UpstreamError(e.to_string()))?;

        Self::check_status(&url, response.status())
    }
}
