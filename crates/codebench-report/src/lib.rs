//! Codebench Report: comparison views rendered as Markdown
//!
//! Reshapes an [`AggregateView`] into report data (winner card, comparison
//! table, best-per-category cards, analysis progress) and renders it with
//! Handlebars templates.
//!
//! # Example
//!
//! ```
//! use codebench_core::ComparisonSet;
//! use codebench_report::render_report;
//!
//! let set = ComparisonSet {
//!     user_prompt: "reverse a string".to_string(),
//!     ..Default::default()
//! };
//! let markdown = render_report(&set).unwrap();
//! assert!(markdown.contains("No analyses available yet"));
//! ```

pub mod renderer;
pub mod templates;

use codebench_compare::{analysis_progress, AggregateView, AnalysisProgress, Color, Comparator, TableRow};
use codebench_core::{CategoryKey, ComparisonSet};
use renderer::ReportRenderer;
use serde::Serialize;
use thiserror::Error;

/// Template used by [`render_report`]
pub const COMPARISON_TEMPLATE: &str = "comparison";

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Template load failed: {0}")]
    Template(String),
    #[error("Render failed: {0}")]
    Render(String),
}

/// Winner card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerCard {
    pub id: i64,
    pub llm_name: String,
    pub color: Color,
    pub total_score: Option<f64>,
}

/// Best model in one category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCard {
    pub key: CategoryKey,
    pub label: String,
    pub llm_name: String,
    pub color: Color,
    pub score: f64,
}

/// Everything a report template can refer to
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub query_id: Option<i64>,
    pub prompt: String,
    pub fingerprint: String,
    pub winner: Option<WinnerCard>,
    pub rows: Vec<TableRow>,
    pub categories: Vec<CategoryCard>,
    pub progress: AnalysisProgress,
}

impl ReportData {
    pub fn build(set: &ComparisonSet, view: &AggregateView<'_>, comparator: &Comparator) -> Self {
        let palette = comparator.palette();

        let winner = view.overall_winner.map(|w| WinnerCard {
            id: w.id,
            llm_name: w.llm_name.clone(),
            color: palette.color_for(&w.llm_name),
            total_score: w.metrics.as_ref().and_then(|m| m.total_score),
        });

        let categories = view
            .category_winners
            .iter()
            .map(|(&key, best)| CategoryCard {
                key,
                label: key.label().to_string(),
                llm_name: best.llm_name.clone(),
                color: palette.color_for(&best.llm_name),
                score: view.scores_for(best.id).map(|s| s.get(key)).unwrap_or(0.0),
            })
            .collect();

        Self {
            query_id: set.id,
            prompt: set.user_prompt.clone(),
            fingerprint: set.fingerprint(),
            winner,
            rows: view.table.clone(),
            categories,
            progress: analysis_progress(set),
        }
    }
}

/// Render a named template over a comparison set
pub fn render_with(
    renderer: &ReportRenderer<'_>,
    template_name: &str,
    set: &ComparisonSet,
    comparator: &Comparator,
) -> Result<String, ReportError> {
    let view = comparator.aggregate(set);
    let data = ReportData::build(set, &view, comparator);
    renderer.render(template_name, &data).map_err(ReportError::Render)
}

/// Markdown comparison report with the built-in templates and the standard
/// scoring table and palette
pub fn render_report(set: &ComparisonSet) -> Result<String, ReportError> {
    let renderer = ReportRenderer::builtin().map_err(ReportError::Template)?;
    render_with(&renderer, COMPARISON_TEMPLATE, set, &Comparator::default())
}
