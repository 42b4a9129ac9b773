//! Element height estimation.
//!
//! Layout never shapes text itself. It asks a [`Metrics`] implementation how
//! tall an element becomes at a given width. [`HeuristicMetrics`] is the
//! built-in estimator; callers with real font data can plug in their own.

mod heuristic;

pub use heuristic::HeuristicMetrics;

use crate::model::{Element, MetaElement};

/// Height estimation contract.
///
/// Implementations must be deterministic and return non-negative heights.
/// For wrapping content a narrower width never yields a smaller height.
pub trait Metrics: Send + Sync {
    /// Height of `element` when laid out in `available_width` points.
    fn height_for(&self, element: &Element, available_width: f64) -> f64;

    /// Height of a title, subtitle or footer in `available_width` points.
    fn meta_height_for(&self, meta: &MetaElement, available_width: f64) -> f64;
}
