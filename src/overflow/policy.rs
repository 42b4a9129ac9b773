//! Minimum-content rules for splitting elements across slides.

use crate::metrics::Metrics;
use serde::{Deserialize, Serialize};

/// Default marker appended to continuation titles and footers.
pub const DEFAULT_CONTINUATION_MARKER: &str = "(continued)";

/// Thresholds that decide whether a split is worth making.
///
/// The defaults are tuned values, not derived invariants; any positive
/// configuration is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitPolicy {
    /// Lines a text block must keep on both sides of a split
    pub min_text_lines: usize,

    /// Lines a code block must keep on both sides of a split
    pub min_code_lines: usize,

    /// Top-level items a list must keep on the current slide
    pub min_list_items: usize,

    /// Data rows a table must keep on the current slide
    pub min_table_rows: usize,

    /// Smallest fitted height, as a fraction of the space it was split into
    pub min_split_ratio: f64,

    /// Appended to continuation titles and footers
    pub continuation_marker: String,

    /// Continuation slides generated from one slide at most
    pub max_continuations: usize,

    /// Slack, in points, before a box counts as past the body boundary
    pub tolerance: f64,
}

impl SplitPolicy {
    /// Create a policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text line minimum.
    pub fn with_min_text_lines(mut self, lines: usize) -> Self {
        self.min_text_lines = lines.max(1);
        self
    }

    /// Set the code line minimum.
    pub fn with_min_code_lines(mut self, lines: usize) -> Self {
        self.min_code_lines = lines.max(1);
        self
    }

    /// Set the list item minimum.
    pub fn with_min_list_items(mut self, items: usize) -> Self {
        self.min_list_items = items.max(1);
        self
    }

    /// Set the table row minimum.
    pub fn with_min_table_rows(mut self, rows: usize) -> Self {
        self.min_table_rows = rows.max(1);
        self
    }

    /// Set the minimum fitted fraction.
    pub fn with_min_split_ratio(mut self, ratio: f64) -> Self {
        self.min_split_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Set the continuation marker.
    pub fn with_continuation_marker(mut self, marker: impl Into<String>) -> Self {
        self.continuation_marker = marker.into();
        self
    }

    /// Set the continuation limit.
    pub fn with_max_continuations(mut self, max: usize) -> Self {
        self.max_continuations = max.max(1);
        self
    }

    /// Set the boundary tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            min_text_lines: 2,
            min_code_lines: 2,
            min_list_items: 2,
            min_table_rows: 2,
            min_split_ratio: 0.1,
            continuation_marker: DEFAULT_CONTINUATION_MARKER.to_string(),
            max_continuations: 50,
            tolerance: 1.0,
        }
    }
}

/// What an element needs to know to split itself.
#[derive(Clone, Copy)]
pub struct SplitContext<'a> {
    /// Height estimator used to measure candidate parts
    pub metrics: &'a dyn Metrics,
    /// Thresholds
    pub policy: &'a SplitPolicy,
    /// Width to measure at when the element has no frame
    pub width: f64,
}

impl<'a> SplitContext<'a> {
    /// Create a context.
    pub fn new(metrics: &'a dyn Metrics, policy: &'a SplitPolicy, width: f64) -> Self {
        Self {
            metrics,
            policy,
            width,
        }
    }
}
