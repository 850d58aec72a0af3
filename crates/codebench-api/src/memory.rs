//! In-process backend holding comparison sets and canned analysis results.
use crate::backend::QueryBackend;
use async_trait::async_trait;
use codebench_core::{CodebenchError, ComparisonSet, RawMetrics};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryBackend {
    sets: RwLock<HashMap<i64, ComparisonSet>>,
    /// Metrics the analysis service reports per code id. Codes without an
    /// entry fail to analyze.
    analyses: RwLock<HashMap<i64, RawMetrics>>,
    fetches: AtomicUsize,
    analyze_calls: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a set under its id (0 when absent)
    pub async fn insert_set(&self, set: ComparisonSet) {
        let id = set.id.unwrap_or(0);
        self.sets.write().await.insert(id, set);
    }

    pub async fn set_analysis(&self, code_id: i64, metrics: RawMetrics) {
        self.analyses.write().await.insert(code_id, metrics);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn analyze_count(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryBackend for InMemoryBackend {
    async fn fetch_comparison_set(&self, query_id: i64) -> Result<ComparisonSet, CodebenchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.sets
            .read()
            .await
            .get(&query_id)
            .cloned()
            .ok_or_else(|| CodebenchError::NotFound(format!("query {}", query_id)))
    }

    async fn analyze_code(&self, code_id: i64) -> Result<(), CodebenchError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);

        let metrics = self
            .analyses
            .read()
            .await
            .get(&code_id)
            .cloned()
            .ok_or_else(|| CodebenchError::UpstreamError(format!("analysis failed for code {}", code_id)))?;

        let mut sets = self.sets.write().await;
        let code = sets
            .values_mut()
            .flat_map(|set| set.generated_codes.iter_mut())
            .find(|code| code.id == code_id)
            .ok_or_else(|| CodebenchError::NotFound(format!("code {}", code_id)))?;
        code.metrics = Some(metrics);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebench_core::GeneratedCode;

    fn pending_set() -> ComparisonSet {
        ComparisonSet {
            id: Some(5),
            generated_codes: vec![GeneratedCode {
                id: 50,
                query_id: Some(5),
                llm_name: "qwen".to_string(),
                code_content: String::new(),
                generated_at: None,
                generation_time_ms: 0.0,
                metrics: None,
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_analysis_attaches_metrics() {
        let backend = InMemoryBackend::new();
        backend.insert_set(pending_set()).await;
        backend.set_analysis(50, RawMetrics::default()).await;

        backend.analyze_code(50).await.unwrap();
        let set = backend.fetch_comparison_set(5).await.unwrap();
        assert!(set.generated_codes[0].is_analyzed());
        assert_eq!(backend.analyze_count(), 1);
        assert_eq!(backend.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let backend = InMemoryBackend::new();
        backend.insert_set(pending_set()).await;

        assert!(matches!(
            backend.fetch_comparison_set(6).await,
            Err(CodebenchError::NotFound(_))
        ));
        assert!(matches!(
            backend.analyze_code(50).await,
            Err(CodebenchError::UpstreamError(_))
        ));

        backend.set_analysis(99, RawMetrics::default()).await;
        assert!(matches!(backend.analyze_code(99).await, Err(CodebenchError::NotFound(_))));
    }
}
