//! Tabular view model: one row per analyzed entry
use crate::aggregate::ScoredResult;
use crate::palette::{Color, Palette};
use codebench_core::{CategoryScores, ModelResult};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: i64,
    pub llm_name: String,
    pub color: Color,
    /// Upstream score, `None` when the analysis service did not report one
    pub total_score: Option<f64>,
    pub scores: CategoryScores,
    /// Mean of the four category scores. Diagnostic only, never ranked on.
    pub local_average: f64,
    pub generation_time_ms: f64,
    pub is_winner: bool,
}

impl TableRow {
    pub fn build(scored: &ScoredResult<'_>, is_winner: bool, palette: &Palette) -> Self {
        let result = scored.result;
        Self {
            id: result.id,
            llm_name: result.llm_name.clone(),
            color: palette.color_for(&result.llm_name),
            total_score: result.metrics.as_ref().and_then(|m| m.total_score),
            scores: scored.scores,
            local_average: scored.scores.mean(),
            generation_time_ms: result.generation_time_ms,
            is_winner,
        }
    }

    /// Rows in input order. The winner flag is matched by artifact id since
    /// model names repeat.
    pub fn build_all(
        scored: &[ScoredResult<'_>],
        winner: Option<&ModelResult>,
        palette: &Palette,
    ) -> Vec<Self> {
        let winner_id = winner.map(|w| w.id);
        scored
            .iter()
            .map(|s| Self::build(s, Some(s.result.id) == winner_id, palette))
            .collect()
    }

    /// Absolute gap between upstream `totalScore` and the local mean
    pub fn drift(&self) -> Option<f64> {
        self.total_score.map(|t| (t - self.local_average).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebench_core::{GeneratedCode, RawMetrics};

    fn code(id: i64, name: &str, total: Option<f64>) -> GeneratedCode {
        GeneratedCode {
            id,
            query_id: None,
            llm_name: name.to_string(),
            code_content: String::new(),
            generated_at: None,
            generation_time_ms: 1500.0,
            metrics: Some(RawMetrics {
                total_score: total,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_winner_flag_by_id_not_name() {
        let a = code(1, "gpt-4o", Some(80.0));
        let b = code(2, "gpt-4o", Some(90.0));
        let scored = [
            ScoredResult {
                result: &a,
                scores: CategoryScores::default(),
            },
            ScoredResult {
                result: &b,
                scores: CategoryScores::default(),
            },
        ];
        let rows = TableRow::build_all(&scored, Some(&b), &Palette::standard());
        assert!(!rows[0].is_winner);
        assert!(rows[1].is_winner);
        assert_eq!(rows[1].generation_time_ms, 1500.0);
    }

    #[test]
    fn test_local_average_and_drift() {
        let a = code(1, "a", Some(60.0));
        let scored = ScoredResult {
            result: &a,
            scores: CategoryScores::from_fn(|k| (k.index() as f64 + 1.0) * 20.0),
        };
        let row = TableRow::build(&scored, false, &Palette::standard());
        assert_eq!(row.local_average, 50.0);
        assert_eq!(row.drift(), Some(10.0));

        let b = code(2, "b", None);
        let scored = ScoredResult {
            result: &b,
            scores: CategoryScores::default(),
        };
        let row = TableRow::build(&scored, false, &Palette::standard());
        assert_eq!(row.total_score, None);
        assert_eq!(row.drift(), None);
    }
}
