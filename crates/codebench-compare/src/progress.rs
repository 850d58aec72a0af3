//! Analysis progress of a comparison set
use codebench_core::ComparisonSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisProgress {
    pub total: usize,
    pub analyzed: usize,
    pub pending: usize,
    /// True when nothing is pending, including for an empty set
    pub all_analyzed: bool,
}

pub fn analysis_progress(set: &ComparisonSet) -> AnalysisProgress {
    let total = set.generated_codes.len();
    let analyzed = set.analyzed().count();
    let pending = total - analyzed;
    AnalysisProgress {
        total,
        analyzed,
        pending,
        all_analyzed: pending == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebench_core::{GeneratedCode, RawMetrics};

    fn code(id: i64, analyzed: bool) -> GeneratedCode {
        GeneratedCode {
            id,
            query_id: None,
            llm_name: format!("model-{}", id),
            code_content: String::new(),
            generated_at: None,
            generation_time_ms: 0.0,
            metrics: analyzed.then(RawMetrics::default),
        }
    }

    #[test]
    fn test_counts() {
        let set = ComparisonSet {
            generated_codes: vec![code(1, true), code(2, false), code(3, false)],
            ..Default::default()
        };
        let progress = analysis_progress(&set);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.analyzed, 1);
        assert_eq!(progress.pending, 2);
        assert!(!progress.all_analyzed);
    }

    #[test]
    fn test_empty_set_is_fully_analyzed() {
        let progress = analysis_progress(&ComparisonSet::default());
        assert_eq!(progress.total, 0);
        assert!(progress.all_analyzed);
    }
}
