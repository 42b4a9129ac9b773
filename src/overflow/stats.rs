//! Pagination statistics.

use serde::{Deserialize, Serialize};

/// Counters collected while paginating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationStats {
    /// Slides handed to the engine
    pub slides_in: usize,
    /// Slides produced, continuations included
    pub pages_out: usize,
    /// Continuation slides created
    pub continuations: usize,
    /// Elements divided between two slides
    pub elements_split: usize,
    /// Sections moved whole to a later slide
    pub sections_deferred: usize,
    /// Sections placed despite overflowing because nothing could move
    pub forced_placements: usize,
}

impl PaginationStats {
    /// Add another run's counters to these.
    pub fn merge(&mut self, other: &PaginationStats) {
        self.slides_in += other.slides_in;
        self.pages_out += other.pages_out;
        self.continuations += other.continuations;
        self.elements_split += other.elements_split;
        self.sections_deferred += other.sections_deferred;
        self.forced_placements += other.forced_placements;
    }

    /// Check if any slide needed more than one page.
    pub fn overflowed(&self) -> bool {
        self.continuations > 0
    }
}
