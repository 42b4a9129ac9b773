//! # deckfit
//!
//! Slide layout and overflow pagination for structured presentation trees.
//!
//! A slide is a title, subtitle and footer plus a body tree of sections and
//! content elements. This library gives every node an absolute position and
//! size inside a fixed page, then splits slides whose body runs past the
//! page into continuation slides.
//!
//! ## Quick Start
//!
//! ```no_run
//! use deckfit::{Deck, Deckfit, PageConfig};
//!
//! fn main() -> deckfit::Result<()> {
//!     let json = std::fs::read_to_string("deck.json")?;
//!     let deck = Deck::from_json(&json)?;
//!
//!     let paginated = Deckfit::new(PageConfig::widescreen()).paginate_deck(deck);
//!     println!("{}", deckfit::render::to_json(&paginated, deckfit::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Zone model**: header, body and footer zones derived from page size and margins
//! - **Size directives**: absolute, percentage and implicit widths and heights
//! - **Pagination**: element splitting with minimum-content rules, row-aware
//! - **Pluggable metrics**: bring your own text measurement
//! - **Parallel processing**: uses Rayon for large decks

pub mod error;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod overflow;
pub mod render;
pub mod validate;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{LayoutEngine, LayoutOptions, Margins, PageConfig, Zones};
pub use metrics::{HeuristicMetrics, Metrics};
pub use model::{
    Deck, DirectiveValue, Directives, Element, ElementKind, ElementType, Frame, MetaElement,
    MetaRole, Section, SectionKind, Slide, TableBlock,
};
pub use overflow::{OverflowEngine, OverflowReport, PaginationStats, SplitPolicy};
pub use render::JsonFormat;
pub use validate::{validate_structure, Warning, WarningKind};

use rayon::prelude::*;
use std::sync::Arc;

/// Minimum number of slides before a deck is processed in parallel.
const PARALLEL_THRESHOLD: usize = 8;

/// Lay out a slide on `page` with default options.
///
/// # Example
///
/// ```
/// use deckfit::{layout_slide, Element, PageConfig, Slide};
///
/// let slide = Slide::new("s1").with_elements(vec![Element::text("Hello")]);
/// let slide = layout_slide(slide, &PageConfig::widescreen());
/// assert!(slide.sections[0].frame.is_some());
/// ```
pub fn layout_slide(slide: Slide, page: &PageConfig) -> Slide {
    Deckfit::new(*page).layout_slide(slide)
}

/// Lay out and paginate a slide on `page` with default options.
pub fn paginate_slide(slide: Slide, page: &PageConfig) -> Vec<Slide> {
    Deckfit::new(*page).paginate_slide(slide)
}

/// Lay out and paginate every slide of a deck on `page` with default options.
pub fn paginate_deck(deck: Deck, page: &PageConfig) -> Deck {
    Deckfit::new(*page).paginate_deck(deck)
}

/// Builder for the layout and pagination pipeline.
///
/// # Example
///
/// ```
/// use deckfit::{Deckfit, Element, PageConfig, Slide, SplitPolicy};
///
/// let deckfit = Deckfit::new(PageConfig::widescreen())
///     .with_policy(SplitPolicy::default().with_min_table_rows(3))
///     .sequential();
///
/// let slide = Slide::new("s1").with_elements(vec![Element::text("Hello")]);
/// let pages = deckfit.paginate_slide(slide);
/// assert_eq!(pages.len(), 1);
/// ```
#[derive(Clone)]
pub struct Deckfit {
    page: PageConfig,
    options: LayoutOptions,
    policy: SplitPolicy,
    metrics: Arc<dyn Metrics>,
    parallel: bool,
}

impl Deckfit {
    /// Create a pipeline for `page` with default options and heuristic metrics.
    pub fn new(page: PageConfig) -> Self {
        Self {
            page,
            options: LayoutOptions::default(),
            policy: SplitPolicy::default(),
            metrics: Arc::new(HeuristicMetrics::default()),
            parallel: true,
        }
    }

    /// Set layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the split policy.
    pub fn with_policy(mut self, policy: SplitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the height estimator.
    pub fn with_metrics(mut self, metrics: Arc<dyn Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Page geometry.
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// The layout engine this pipeline uses.
    pub fn layout_engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.page)
            .with_options(self.options.clone())
            .with_metrics(Arc::clone(&self.metrics))
    }

    /// The overflow engine this pipeline uses.
    pub fn overflow_engine(&self) -> OverflowEngine {
        OverflowEngine::new(self.layout_engine()).with_policy(self.policy.clone())
    }

    /// Lay out a slide without paginating it.
    pub fn layout_slide(&self, slide: Slide) -> Slide {
        self.layout_engine().layout(slide)
    }

    /// Report overflow for a slide, laying it out first if needed.
    pub fn detect(&self, slide: &Slide) -> OverflowReport {
        self.overflow_engine().detect(slide)
    }

    /// Lay out and paginate a slide.
    pub fn paginate_slide(&self, slide: Slide) -> Vec<Slide> {
        self.overflow_engine().paginate(slide)
    }

    /// Lay out and paginate every slide of a deck, keeping slide order.
    pub fn paginate_deck(&self, deck: Deck) -> Deck {
        self.paginate_deck_with_stats(deck).0
    }

    /// Lay out and paginate a deck and report totals.
    pub fn paginate_deck_with_stats(&self, deck: Deck) -> (Deck, PaginationStats) {
        let engine = self.overflow_engine();
        let Deck { title, slides } = deck;

        let results: Vec<(Vec<Slide>, PaginationStats)> =
            if self.parallel && slides.len() >= PARALLEL_THRESHOLD {
                log::debug!("paginating {} slides in parallel", slides.len());
                slides
                    .into_par_iter()
                    .map(|slide| engine.paginate_with_stats(slide))
                    .collect()
            } else {
                slides
                    .into_iter()
                    .map(|slide| engine.paginate_with_stats(slide))
                    .collect()
            };

        let mut stats = PaginationStats::default();
        let mut pages = Vec::with_capacity(results.len());
        for (slides, slide_stats) in results {
            stats.merge(&slide_stats);
            pages.extend(slides);
        }

        log::info!(
            "paginated {} slides into {} ({} continuations)",
            stats.slides_in,
            stats.pages_out,
            stats.continuations
        );
        (
            Deck {
                title,
                slides: pages,
            },
            stats,
        )
    }
}

impl std::fmt::Debug for Deckfit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deckfit")
            .field("page", &self.page)
            .field("options", &self.options)
            .field("policy", &self.policy)
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text(lines: usize) -> String {
        (1..=lines)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_deckfit_builder() {
        let deckfit = Deckfit::new(PageConfig::widescreen())
            .with_policy(SplitPolicy::default().with_min_text_lines(3))
            .with_options(LayoutOptions::default().with_vertical_spacing(6.0))
            .sequential();

        assert!(!deckfit.parallel);
        assert_eq!(deckfit.overflow_engine().policy().min_text_lines, 3);
        assert_eq!(deckfit.layout_engine().options().vertical_spacing, 6.0);
    }

    #[test]
    fn test_paginate_deck_keeps_order() {
        let mut deck = Deck::with_title("Order");
        for i in 0..10 {
            let text = if i == 3 { long_text(30) } else { format!("slide {}", i) };
            deck.add_slide(Slide::new(format!("s{}", i)).with_elements(vec![Element::text(text)]));
        }

        let (paginated, stats) =
            Deckfit::new(PageConfig::widescreen()).paginate_deck_with_stats(deck);
        let ids: Vec<&str> = paginated.slides.iter().map(|s| s.object_id.as_str()).collect();

        assert_eq!(paginated.title.as_deref(), Some("Order"));
        assert_eq!(&ids[..5], &["s0", "s1", "s2", "s3", "s3_cont"]);
        assert_eq!(stats.slides_in, 10);
        assert_eq!(stats.pages_out, paginated.slide_count());
        assert_eq!(stats.continuations, paginated.continuation_count());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut deck = Deck::new();
        for i in 0..12 {
            deck.add_slide(
                Slide::new(format!("s{}", i)).with_elements(vec![Element::text(long_text(i * 3))]),
            );
        }
        let page = PageConfig::widescreen();
        let parallel = Deckfit::new(page).paginate_deck(deck.clone());
        let sequential = Deckfit::new(page).sequential().paginate_deck(deck);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_free_functions() {
        let page = PageConfig::widescreen();
        let slide = Slide::new("s1").with_elements(vec![Element::text(long_text(20))]);

        let laid_out = layout_slide(slide.clone(), &page);
        assert_eq!(laid_out.sections.len(), 1);
        assert_eq!(paginate_slide(slide, &page).len(), 2);
    }
}
