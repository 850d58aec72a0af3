//! Chart-ready projections of the analyzed entries.
//!
//! All three charts are keyed by `llmName` in iteration order and never
//! sorted. Values are raw scores; formatting belongs to the renderer.

use crate::aggregate::ScoredResult;
use crate::palette::{Color, Palette};
use codebench_core::CategoryKey;
use serde::Serialize;

/// Upper bound of every score axis
pub const SCORE_AXIS_MAX: f64 = 100.0;

/// Fixed line colors, one per category
pub fn category_color(key: CategoryKey) -> Color {
    let hex = match key {
        CategoryKey::Correctness => "#10b981",
        CategoryKey::Efficiency => "#3b82f6",
        CategoryKey::Maintainability => "#f59e0b",
        CategoryKey::Security => "#ef4444",
    };
    Color::new(hex)
}

// =============================================================================
// Radar
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarIndicator {
    pub key: CategoryKey,
    pub name: String,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarEntry {
    pub name: String,
    /// Scores in `CategoryKey::ALL` order
    pub value: [f64; 4],
    pub color: Color,
}

/// Four-axis vector per model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub indicators: Vec<RadarIndicator>,
    pub legend: Vec<String>,
    pub entries: Vec<RadarEntry>,
}

impl RadarChart {
    pub fn build(scored: &[ScoredResult<'_>], palette: &Palette) -> Self {
        let indicators = CategoryKey::ALL
            .iter()
            .map(|&key| RadarIndicator {
                key,
                name: key.label().to_string(),
                max: SCORE_AXIS_MAX,
            })
            .collect();

        Self {
            indicators,
            legend: scored.iter().map(|s| s.result.llm_name.clone()).collect(),
            entries: scored
                .iter()
                .map(|s| RadarEntry {
                    name: s.result.llm_name.clone(),
                    value: s.scores.to_array(),
                    color: palette.color_for(&s.result.llm_name),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Bar
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarValue {
    pub value: f64,
    pub color: Color,
}

/// Upstream `totalScore` per model, absent as zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub categories: Vec<String>,
    pub values: Vec<BarValue>,
}

impl BarChart {
    pub fn build(scored: &[ScoredResult<'_>], palette: &Palette) -> Self {
        Self {
            categories: scored.iter().map(|s| s.result.llm_name.clone()).collect(),
            values: scored
                .iter()
                .map(|s| BarValue {
                    value: s.total_score(),
                    color: palette.color_for(&s.result.llm_name),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Line
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub key: CategoryKey,
    pub name: String,
    pub color: Color,
    /// One point per model, same order as `LineChart::categories`
    pub data: Vec<f64>,
}

/// One series per category, one point per model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub categories: Vec<String>,
    pub series: Vec<LineSeries>,
}

impl LineChart {
    pub fn build(scored: &[ScoredResult<'_>]) -> Self {
        let series = CategoryKey::ALL
            .iter()
            .map(|&key| LineSeries {
                key,
                name: key.label().to_string(),
                color: category_color(key),
                data: scored.iter().map(|s| s.scores.get(key)).collect(),
            })
            .collect();

        Self {
            categories: scored.iter().map(|s| s.result.llm_name.clone()).collect(),
            series,
        }
    }
}

/// The three projections together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub radar: RadarChart,
    pub bar: BarChart,
    pub line: LineChart,
}

impl ChartSeries {
    pub fn build(scored: &[ScoredResult<'_>], palette: &Palette) -> Self {
        Self {
            radar: RadarChart::build(scored, palette),
            bar: BarChart::build(scored, palette),
            line: LineChart::build(scored),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebench_core::{CategoryScores, GeneratedCode, RawMetrics};

    fn code(id: i64, name: &str, total: Option<f64>) -> GeneratedCode {
        GeneratedCode {
            id,
            query_id: None,
            llm_name: name.to_string(),
            code_content: String::new(),
            generated_at: None,
            generation_time_ms: 0.0,
            metrics: Some(RawMetrics {
                total_score: total,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_projections_keep_iteration_order() {
        let low = code(1, "qwen", Some(10.0));
        let high = code(2, "gpt-4o", None);
        let scored = vec![
            ScoredResult {
                result: &low,
                scores: CategoryScores::from_fn(|_| 10.0),
            },
            ScoredResult {
                result: &high,
                scores: CategoryScores::from_fn(|k| k.index() as f64 * 30.0),
            },
        ];
        let charts = ChartSeries::build(&scored, &Palette::standard());

        assert_eq!(charts.radar.legend, vec!["qwen", "gpt-4o"]);
        assert_eq!(charts.radar.entries[1].value, [0.0, 30.0, 60.0, 90.0]);
        assert_eq!(charts.radar.entries[1].color.as_str(), "#22c55e");
        assert!(charts.radar.indicators.iter().all(|i| i.max == 100.0));

        assert_eq!(charts.bar.categories, vec!["qwen", "gpt-4o"]);
        assert_eq!(charts.bar.values[0].value, 10.0);
        assert_eq!(charts.bar.values[1].value, 0.0);

        assert_eq!(charts.line.series.len(), 4);
        let security = &charts.line.series[3];
        assert_eq!(security.key, CategoryKey::Security);
        assert_eq!(security.data, vec![10.0, 90.0]);
        assert_eq!(security.color.as_str(), "#ef4444");
    }

    #[test]
    fn test_empty_projections() {
        let charts = ChartSeries::build(&[], &Palette::standard());
        assert!(charts.radar.entries.is_empty());
        assert_eq!(charts.radar.indicators.len(), 4);
        assert!(charts.bar.values.is_empty());
        assert!(charts.line.series.iter().all(|s| s.data.is_empty()));
    }

    #[test]
    fn test_line_values_are_not_rounded() {
        let c = code(1, "a", None);
        let scored = [ScoredResult {
            result: &c,
            scores: CategoryScores::from_fn(|_| 100.0 / 3.0),
        }];
        let line = LineChart::build(&scored);
        assert_eq!(line.series[0].data[0], 100.0 / 3.0);
    }
}
