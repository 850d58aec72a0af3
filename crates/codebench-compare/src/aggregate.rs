//! Comparison aggregation
//!
//! Scores every analyzed entry of a comparison set once, then derives the
//! winners, chart series and table rows from those scores.

use crate::charts::ChartSeries;
use crate::palette::Palette;
use crate::table::TableRow;
use codebench_core::{CategoryKey, CategoryScores, ComparisonSet, ModelResult};
use codebench_quality::ScoringProfile;
use serde::Serialize;
use std::collections::BTreeMap;

/// An analyzed entry with its category scores
#[derive(Debug, Clone, Copy)]
pub struct ScoredResult<'a> {
    pub result: &'a ModelResult,
    pub scores: CategoryScores,
}

impl<'a> ScoredResult<'a> {
    /// Upstream total score, absent counted as zero
    pub fn total_score(&self) -> f64 {
        self.result
            .metrics
            .as_ref()
            .map(|m| m.total_score_or_zero())
            .unwrap_or(0.0)
    }
}

/// Everything the comparison views need, derived from one comparison set
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateView<'a> {
    /// Entries with metrics, input order
    pub analyzed: Vec<&'a ModelResult>,
    /// Highest upstream `totalScore`, first occurrence on ties
    pub overall_winner: Option<&'a ModelResult>,
    /// Highest normalized score per category, first occurrence on ties
    pub category_winners: BTreeMap<CategoryKey, &'a ModelResult>,
    pub chart_series: ChartSeries,
    pub table: Vec<TableRow>,
    #[serde(skip)]
    scored: Vec<ScoredResult<'a>>,
}

impl<'a> AggregateView<'a> {
    /// Nothing has been analyzed yet
    pub fn is_empty(&self) -> bool {
        self.analyzed.is_empty()
    }

    pub fn scored(&self) -> &[ScoredResult<'a>] {
        &self.scored
    }

    /// Category scores of an analyzed entry, by artifact id
    pub fn scores_for(&self, id: i64) -> Option<CategoryScores> {
        self.scored
            .iter()
            .find(|s| s.result.id == id)
            .map(|s| s.scores)
    }
}

/// Left fold keeping the current best unless a later entry is strictly
/// greater, so ties go to the earliest entry.
pub fn pick_winner<T: Copy>(items: &[T], score: impl Fn(&T) -> f64) -> Option<T> {
    let (first, rest) = items.split_first()?;
    let mut best = *first;
    let mut best_score = score(first);
    for item in rest {
        let current = score(item);
        if current > best_score {
            best = *item;
            best_score = current;
        }
    }
    Some(best)
}

/// Builds comparison views with a given scoring table and palette
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    profile: ScoringProfile,
    palette: Palette,
}

impl Comparator {
    pub fn new(profile: ScoringProfile, palette: Palette) -> Self {
        Self { profile, palette }
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Score each analyzed entry, input order
    pub fn score<'a>(&self, set: &'a ComparisonSet) -> Vec<ScoredResult<'a>> {
        set.analyzed()
            .filter_map(|result| {
                let metrics = result.metrics.as_ref()?;
                Some(ScoredResult {
                    result,
                    scores: self.profile.normalize(metrics),
                })
            })
            .collect()
    }

    /// Aggregate a comparison set. Never fails; an empty or fully
    /// unanalyzed set yields an empty view with no winners.
    pub fn aggregate<'a>(&self, set: &'a ComparisonSet) -> AggregateView<'a> {
        let scored = self.score(set);

        let overall_winner = pick_winner(&scored, |s| s.total_score()).map(|s| s.result);

        let category_winners = CategoryKey::ALL
            .iter()
            .filter_map(|&key| {
                pick_winner(&scored, |s| s.scores.get(key)).map(|s| (key, s.result))
            })
            .collect();

        let chart_series = ChartSeries::build(&scored, &self.palette);
        let table = TableRow::build_all(&scored, overall_winner, &self.palette);

        AggregateView {
            analyzed: scored.iter().map(|s| s.result).collect(),
            overall_winner,
            category_winners,
            chart_series,
            table,
            scored,
        }
    }
}
