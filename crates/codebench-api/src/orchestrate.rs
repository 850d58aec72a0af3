//! Analysis fan-out
//!
//! One analysis request per unanalyzed code, all in flight at once. Whatever
//! the outcome, the comparison set is reloaded exactly once afterwards so
//! the views cover every code that now has metrics.

use crate::backend::QueryBackend;
use codebench_core::{CodebenchError, ComparisonSet};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFailure {
    pub code_id: i64,
    pub error: String,
}

/// Outcome of an analysis run
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub requested: Vec<i64>,
    pub succeeded: Vec<i64>,
    pub failed: Vec<AnalysisFailure>,
    /// The set as reloaded after the run
    pub set: ComparisonSet,
}

impl AnalysisRun {
    pub fn fully_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Analyze every unanalyzed code of a query, then reload it once.
///
/// Individual failures are collected, never propagated. Only the initial
/// fetch and the reload can fail the run. When nothing is pending the set
/// is returned as fetched.
pub async fn analyze_all(
    backend: Arc<dyn QueryBackend>,
    query_id: i64,
) -> Result<AnalysisRun, CodebenchError> {
    let set = backend.fetch_comparison_set(query_id).await?;
    let requested: Vec<i64> = set.unanalyzed().map(|c| c.id).collect();

    if requested.is_empty() {
        return Ok(AnalysisRun {
            requested,
            succeeded: Vec::new(),
            failed: Vec::new(),
            set,
        });
    }

    info!(query_id, pending = requested.len(), "Analyzing pending codes");

    let handles: Vec<_> = requested
        .iter()
        .map(|&code_id| {
            let backend = Arc::clone(&backend);
            (code_id, tokio::spawn(async move { backend.analyze_code(code_id).await }))
        })
        .collect();

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for (code_id, handle) in handles {
        match handle.await {
            Ok(Ok(())) => succeeded.push(code_id),
            Ok(Err(e)) => failed.push(AnalysisFailure {
                code_id,
                error: e.to_string(),
            }),
            Err(e) => failed.push(AnalysisFailure {
                code_id,
                error: format!("analysis task aborted: {}", e),
            }),
        }
    }

    if !failed.is_empty() {
        warn!(
            query_id,
            failed = failed.len(),
            succeeded = succeeded.len(),
            "Some analyses failed"
        );
    }

    let set = backend.fetch_comparison_set(query_id).await?;

    Ok(AnalysisRun {
        requested,
        succeeded,
        failed,
        set,
    })
}

/// Analyze a single code of a query, then reload the query.
pub async fn analyze_one(
    backend: Arc<dyn QueryBackend>,
    query_id: i64,
    code_id: i64,
) -> Result<ComparisonSet, CodebenchError> {
    let set = backend.fetch_comparison_set(query_id).await?;
    if set.find_code(code_id).is_none() {
        return Err(CodebenchError::NotFound(format!(
            "code {} in query {}",
            code_id, query_id
        )));
    }

    backend.analyze_code(code_id).await?;
    info!(query_id, code_id, "Code analyzed");

    backend.fetch_comparison_set(query_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use codebench_core::{GeneratedCode, RawMetrics};

    fn code(id: i64, analyzed: bool) -> GeneratedCode {
        GeneratedCode {
            id,
            query_id: Some(1),
            llm_name: format!("model-{}", id),
            code_content: String::new(),
            generated_at: None,
            generation_time_ms: 0.0,
            metrics: analyzed.then(RawMetrics::default),
        }
    }

    async fn backend_with(codes: Vec<GeneratedCode>, analyzable: &[i64]) -> Arc<InMemoryBackend> {
        let backend = Arc::new(InMemoryBackend::new());
        backend
            .insert_set(ComparisonSet {
                id: Some(1),
                generated_codes: codes,
                ..Default::default()
            })
            .await;
        for &id in analyzable {
            backend
                .set_analysis(
                    id,
                    RawMetrics {
                        total_score: Some(id as f64),
                        ..Default::default()
                    },
                )
                .await;
        }
        backend
    }

    #[tokio::test]
    async fn test_all_succeed() {
        let backend = backend_with(vec![code(1, false), code(2, false)], &[1, 2]).await;
        let run = analyze_all(backend.clone(), 1).await.unwrap();

        assert!(run.fully_succeeded());
        assert_eq!(run.succeeded, vec![1, 2]);
        assert!(run.set.unanalyzed().next().is_none());
        // initial fetch + one reload
        assert_eq!(backend.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_partial_failure_still_reloads_once() {
        let backend = backend_with(vec![code(1, false), code(2, false), code(3, false)], &[1, 3]).await;
        let run = analyze_all(backend.clone(), 1).await.unwrap();

        assert!(!run.fully_succeeded());
        assert_eq!(run.succeeded, vec![1, 3]);
        assert_eq!(run.failed.len(), 1);
        assert_eq!(run.failed[0].code_id, 2);

        let analyzed: Vec<i64> = run.set.analyzed().map(|c| c.id).collect();
        assert_eq!(analyzed, vec![1, 3]);
        assert_eq!(backend.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_total_failure_still_reloads_once() {
        let backend = backend_with(vec![code(1, false), code(2, false)], &[]).await;
        let run = analyze_all(backend.clone(), 1).await.unwrap();

        assert_eq!(run.failed.len(), 2);
        assert!(run.succeeded.is_empty());
        assert_eq!(backend.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_only_unanalyzed_codes_are_requested() {
        let backend = backend_with(vec![code(1, true), code(2, false)], &[1, 2]).await;
        let run = analyze_all(backend.clone(), 1).await.unwrap();

        assert_eq!(run.requested, vec![2]);
        assert_eq!(backend.analyze_count(), 1);
    }

    #[tokio::test]
    async fn test_nothing_pending_skips_reload() {
        let backend = backend_with(vec![code(1, true)], &[]).await;
        let run = analyze_all(backend.clone(), 1).await.unwrap();

        assert!(run.requested.is_empty());
        assert!(run.fully_succeeded());
        assert_eq!(backend.fetch_count(), 1);
        assert_eq!(backend.analyze_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_query() {
        let backend = backend_with(vec![], &[]).await;
        assert!(matches!(analyze_all(backend, 9).await, Err(CodebenchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_analyze_one() {
        let backend = backend_with(vec![code(1, false), code(2, false)], &[2]).await;
        let set = analyze_one(backend.clone(), 1, 2).await.unwrap();
        assert_eq!(set.analyzed().map(|c| c.id).collect::<Vec<_>>(), vec![2]);

        assert!(matches!(
            analyze_one(backend.clone(), 1, 7).await,
            Err(CodebenchError::NotFound(_))
        ));
        assert!(matches!(
            analyze_one(backend, 1, 1).await,
            Err(CodebenchError::UpstreamError(_))
        ));
    }
}
