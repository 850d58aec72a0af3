//! Codebench Compare: aggregation across a comparison set
//!
//! Takes the analyzed entries of a [`ComparisonSet`], scores each with a
//! scoring table, and derives the overall and per-category winners, the
//! radar/bar/line chart series and the table view model. Entries without
//! metrics are left out of every computation.
//!
//! ```
//! use codebench_compare::aggregate;
//! use codebench_core::ComparisonSet;
//!
//! let set = ComparisonSet::default();
//! let view = aggregate(&set);
//! assert!(view.overall_winner.is_none());
//! assert!(view.category_winners.is_empty());
//! ```

pub mod aggregate;
pub mod charts;
pub mod palette;
pub mod progress;
pub mod table;

pub use aggregate::{pick_winner, AggregateView, Comparator, ScoredResult};
pub use charts::{BarChart, ChartSeries, LineChart, LineSeries, RadarChart, RadarEntry};
pub use palette::{color_for, standard_palette, Color, Palette, PaletteEntry, PaletteError};
pub use progress::{analysis_progress, AnalysisProgress};
pub use table::TableRow;

use codebench_core::ComparisonSet;
use once_cell::sync::Lazy;

static STANDARD: Lazy<Comparator> = Lazy::new(Comparator::default);

/// Aggregate with the standard scoring table and palette
pub fn aggregate(set: &ComparisonSet) -> AggregateView<'_> {
    STANDARD.aggregate(set)
}
