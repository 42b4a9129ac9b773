//! Pagination driver.

use super::continuation::ContinuationBuilder;
use super::partition::{clamp_to, Partition, Partitioner};
use super::policy::{SplitContext, SplitPolicy};
use super::stats::PaginationStats;
use crate::layout::LayoutEngine;
use crate::model::{Section, Slide};
use serde::{Deserialize, Serialize};

/// Overflow analysis of one laid-out slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverflowReport {
    /// Slide analysed
    pub slide_id: String,
    /// Bottom edge of the body zone
    pub body_bottom: f64,
    /// Top-level sections whose box ends below the body zone
    pub overflowing_sections: Vec<String>,
    /// Distance the lowest of those boxes extends past the body zone
    pub overflow_amount: f64,
}

impl OverflowReport {
    /// Check if any top-level section crosses the body boundary.
    pub fn has_overflow(&self) -> bool {
        !self.overflowing_sections.is_empty()
    }
}

/// One pass over a laid-out slide.
enum Step {
    /// The slide is final.
    Done(Slide),
    /// The slide is final; `deferred` moves to a continuation.
    Continue { page: Slide, deferred: Vec<Section> },
}

/// Splits slides whose body content runs past the body zone.
///
/// Only the boxes of top-level sections are compared against the boundary.
/// A section whose fixed height hides its own content is left alone.
#[derive(Debug, Clone)]
pub struct OverflowEngine {
    layout: LayoutEngine,
    policy: SplitPolicy,
}

impl OverflowEngine {
    /// Create an engine that re-lays out continuations with `layout`.
    pub fn new(layout: LayoutEngine) -> Self {
        Self {
            layout,
            policy: SplitPolicy::default(),
        }
    }

    /// Set the split policy.
    pub fn with_policy(mut self, policy: SplitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The layout engine used for continuations.
    pub fn layout_engine(&self) -> &LayoutEngine {
        &self.layout
    }

    /// The split policy.
    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    /// Report which top-level sections cross the body boundary.
    ///
    /// A slide that has not been laid out yet is laid out first.
    pub fn detect(&self, slide: &Slide) -> OverflowReport {
        let laid_out;
        let slide = if needs_layout(slide) {
            laid_out = self.layout.layout(slide.clone());
            &laid_out
        } else {
            slide
        };

        let body_bottom = self.layout.body_zone().bottom();
        let limit = body_bottom + self.policy.tolerance;
        let mut overflowing_sections = Vec::new();
        let mut overflow_amount: f64 = 0.0;

        for section in &slide.sections {
            if let Some(frame) = section.frame.filter(|f| f.bottom() > limit) {
                overflowing_sections.push(section.id.clone());
                overflow_amount = overflow_amount.max(frame.bottom() - body_bottom);
            }
        }

        OverflowReport {
            slide_id: slide.object_id.clone(),
            body_bottom,
            overflowing_sections,
            overflow_amount,
        }
    }

    /// Paginate a slide into itself plus any continuation slides.
    pub fn paginate(&self, slide: Slide) -> Vec<Slide> {
        self.paginate_with_stats(slide).0
    }

    /// Paginate a slide and report what was done.
    ///
    /// The input is laid out first unless every top-level section already
    /// has a frame. A slide that fits comes back unchanged.
    pub fn paginate_with_stats(&self, slide: Slide) -> (Vec<Slide>, PaginationStats) {
        let mut stats = PaginationStats {
            slides_in: 1,
            ..Default::default()
        };

        let mut current = if needs_layout(&slide) {
            self.layout.layout(slide)
        } else {
            slide
        };
        let origin_id = current.object_id.clone();
        let mut builder = ContinuationBuilder::new(&current, &self.policy.continuation_marker);
        let mut pages = Vec::new();

        loop {
            match self.step(current, &mut stats) {
                Step::Done(page) => {
                    pages.push(page);
                    break;
                }
                Step::Continue { page, deferred } => {
                    pages.push(page);
                    let next = self.layout.layout(builder.next(deferred));
                    stats.continuations += 1;

                    if builder.ordinal() >= self.policy.max_continuations {
                        log::warn!(
                            "slide '{}' reached {} continuations; remaining content kept on '{}'",
                            origin_id,
                            self.policy.max_continuations,
                            next.object_id
                        );
                        pages.push(next);
                        break;
                    }
                    current = next;
                }
            }
        }

        stats.pages_out = pages.len();
        if stats.continuations > 0 {
            log::info!(
                "slide '{}' paginated into {} slides ({} elements split, {} sections deferred)",
                origin_id,
                stats.pages_out,
                stats.elements_split,
                stats.sections_deferred
            );
        }
        (pages, stats)
    }

    fn step(&self, mut slide: Slide, stats: &mut PaginationStats) -> Step {
        let body = self.layout.body_zone();
        let limit = body.bottom();
        let threshold = limit + self.policy.tolerance;

        let Some(index) = slide
            .sections
            .iter()
            .position(|s| s.frame.is_some_and(|f| f.bottom() > threshold))
        else {
            return Step::Done(slide);
        };

        let mut kept = std::mem::take(&mut slide.sections);
        let mut later = kept.split_off(index);
        let target = later.remove(0);

        log::debug!(
            "slide '{}': section '{}' crosses the body boundary at {:.1}",
            slide.object_id,
            target.id,
            limit
        );

        let ctx = SplitContext::new(self.layout.metrics().as_ref(), &self.policy, body.width);
        let mut partitioner = Partitioner::new(limit, self.layout.options().max_depth, ctx);
        let mut deferred = Vec::new();

        match partitioner.partition(&target) {
            Partition::Split {
                mut fitted,
                remainder,
                element_splits,
            } => {
                clamp_to(&mut fitted, limit);
                kept.push(fitted);
                deferred.push(remainder);
                stats.elements_split += element_splits;
            }
            Partition::Fits(mut section) if kept.is_empty() => {
                log::warn!(
                    "section '{}' on slide '{}' is taller than the body; box clamped",
                    target.id,
                    slide.object_id
                );
                stats.forced_placements += 1;
                clamp_to(&mut section, limit);
                kept.push(section);
            }
            Partition::Fits(_) => {
                log::debug!(
                    "section '{}' content fits but its box does not; moved whole",
                    target.id
                );
                stats.sections_deferred += 1;
                deferred.push(target);
            }
            Partition::Defer if kept.is_empty() => {
                log::warn!(
                    "section '{}' on slide '{}' cannot move or split; placed as is",
                    target.id,
                    slide.object_id
                );
                stats.forced_placements += 1;
                kept.push(target);
            }
            Partition::Defer => {
                stats.sections_deferred += 1;
                deferred.push(target);
            }
        }

        stats.sections_deferred += later.len();
        deferred.extend(later);

        slide.sections = kept;
        if deferred.iter().all(|s| s.element_count() == 0) {
            if !deferred.is_empty() {
                log::debug!(
                    "slide '{}': dropping {} empty trailing sections",
                    slide.object_id,
                    deferred.len()
                );
            }
            Step::Done(slide)
        } else {
            Step::Continue {
                page: slide,
                deferred,
            }
        }
    }
}

fn needs_layout(slide: &Slide) -> bool {
    !slide.elements.is_empty() || slide.sections.iter().any(|s| s.frame.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageConfig;
    use crate::model::{Directives, Element, ElementKind, Frame, Section, TableBlock};

    fn engine() -> OverflowEngine {
        OverflowEngine::new(LayoutEngine::new(PageConfig::widescreen()))
    }

    fn lines(count: usize) -> String {
        (1..=count)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn text_lines(element: &Element) -> usize {
        match &element.kind {
            ElementKind::Text(t) => t.text.lines().count(),
            _ => 0,
        }
    }

    #[test]
    fn test_fitting_slide_unchanged() {
        let engine = engine();
        let slide = engine.layout_engine().layout(
            Slide::new("s1")
                .with_title("Short")
                .with_elements(vec![Element::text("hello")]),
        );

        let pages = engine.paginate(slide.clone());
        assert_eq!(pages, vec![slide]);
    }

    #[test]
    fn test_fixed_height_hides_internal_overflow() {
        let section = Section::content("boxed")
            .with_directives(Directives::new().with_height(100.0))
            .with_elements(vec![Element::text(lines(35))]);
        let pages = engine().paginate(Slide::new("s1").with_sections(vec![section]));
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_crossing_box_with_fitting_content_moves_whole() {
        let slide = Slide::new("s1").with_sections(vec![
            Section::content("intro").with_elements(vec![Element::text(lines(6))]),
            Section::content("boxed")
                .with_directives(Directives::new().with_height(200.0))
                .with_elements(vec![Element::text("Summary")]),
        ]);
        let (pages, stats) = engine().paginate_with_stats(slide);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].sections.len(), 1);
        assert_eq!(pages[1].sections[0].id, "boxed");
        assert_eq!(pages[1].sections[0].frame.unwrap(), Frame::new(50.0, 140.0, 620.0, 185.0));
        assert_eq!(stats.sections_deferred, 1);
        assert_eq!(stats.forced_placements, 0);
    }

    #[test]
    fn test_empty_sections_follow_deferred_content() {
        let slide = Slide::new("s1").with_sections(vec![
            Section::content("main").with_elements(vec![Element::text(lines(20))]),
            Section::content("spacer").with_directives(Directives::new().with_height(40.0)),
        ]);
        let pages = engine().paginate(slide);

        let ids: Vec<Vec<&str>> = pages
            .iter()
            .map(|p| p.sections.iter().map(|s| s.id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["main"], vec!["main", "spacer"]]);
        assert_eq!(pages[1].sections[1].frame.unwrap().height, 40.0);
    }

    #[test]
    fn test_only_empty_sections_left_ends_pagination() {
        let slide = Slide::new("s1").with_sections(vec![
            Section::content("main").with_elements(vec![Element::text(lines(12))]),
            Section::content("spacer").with_directives(Directives::new().with_height(40.0)),
        ]);
        let pages = engine().paginate(slide);

        assert_eq!(pages.len(), 1);
        let ids: Vec<&str> = pages[0].sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["main"]);
    }

    #[test]
    fn test_long_text_continues() {
        let slide = Slide::new("s1")
            .with_title("Agenda")
            .with_elements(vec![Element::text(lines(20))]);
        let (pages, stats) = engine().paginate_with_stats(slide);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].object_id, "s1_cont");
        assert_eq!(pages[1].title.as_deref(), Some("Agenda (continued)"));
        assert!(pages[1].is_continuation);

        let first = text_lines(&pages[0].sections[0].elements()[0]);
        let second = text_lines(&pages[1].sections[0].elements()[0]);
        assert_eq!(first + second, 20);
        assert_eq!(stats.elements_split, 1);
        assert_eq!(stats.continuations, 1);
        assert_eq!(stats.pages_out, 2);
    }

    #[test]
    fn test_later_sections_deferred() {
        let sections = vec![
            Section::content("a").with_elements(vec![Element::text(lines(8))]),
            Section::content("b").with_elements(vec![Element::text(lines(8))]),
            Section::content("c").with_elements(vec![Element::text("tail")]),
        ];
        let (pages, stats) =
            engine().paginate_with_stats(Slide::new("s1").with_sections(sections));

        assert_eq!(pages.len(), 2);
        let ids: Vec<&str> = pages[1].sections.iter().map(|s| s.id.as_str()).collect();
        assert!(ids.ends_with(&["c"]));
        assert!(stats.sections_deferred >= 1);
    }

    #[test]
    fn test_unsplittable_first_section_is_forced() {
        // An image taller than the body, placed at the top
        let tall = Frame::new(50.0, 140.0, 620.0, 400.0);
        let section = Section::content("pic")
            .with_elements(vec![Element::image("tall.png").with_frame(tall)])
            .with_frame(tall);
        let slide = Slide::new("s1").with_sections(vec![section]);

        let (pages, stats) = engine().paginate_with_stats(slide.clone());
        assert_eq!(pages, vec![slide]);
        assert_eq!(stats.forced_placements, 1);
    }

    #[test]
    fn test_table_repeats_header_on_continuation() {
        let rows: Vec<Vec<String>> = (1..=20).map(|i| vec![format!("row {}", i)]).collect();
        let table = TableBlock::new(vec!["Name".into()], rows).unwrap();
        let slide = Slide::new("t").with_elements(vec![Element::table(table)]);

        let pages = engine().paginate(slide);
        assert!(pages.len() >= 2);
        let mut total = 0;
        for page in &pages {
            match &page.sections[0].elements()[0].kind {
                ElementKind::Table(t) => {
                    assert_eq!(t.headers().to_vec(), vec!["Name".to_string()]);
                    total += t.row_count();
                }
                other => panic!("expected table, got {:?}", other),
            }
        }
        assert_eq!(total, 20);
    }

    #[test]
    fn test_max_continuations_stops() {
        let slide = Slide::new("s1").with_elements(vec![Element::text(lines(200))]);
        let engine = engine().with_policy(SplitPolicy::default().with_max_continuations(2));
        let pages = engine.paginate(slide);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2].object_id, "s1_cont_2");

        // 12 lines per page until the cap; the last page keeps the rest
        let counts: Vec<usize> = pages
            .iter()
            .map(|p| text_lines(&p.sections[0].elements()[0]))
            .collect();
        assert_eq!(counts, vec![12, 12, 176]);
    }

    #[test]
    fn test_detect_reports_overflow() {
        let engine = engine();
        let slide = Slide::new("s1").with_elements(vec![Element::text(lines(20))]);
        let report = engine.detect(&slide);
        assert!(report.has_overflow());
        assert_eq!(report.overflowing_sections, vec!["root".to_string()]);
        assert_eq!(report.body_bottom, 325.0);
        assert!(report.overflow_amount > 0.0);

        let report = engine.detect(&Slide::new("s2").with_elements(vec![Element::text("x")]));
        assert!(!report.has_overflow());
        assert_eq!(report.overflow_amount, 0.0);
    }

    #[test]
    fn test_pages_fit_after_pagination() {
        let engine = engine();
        let slide = Slide::new("s1").with_elements(vec![
            Element::heading(2, "Details"),
            Element::text(lines(12)),
            Element::code(lines(12), Some("rust")),
        ]);
        for page in engine.paginate(slide) {
            for section in &page.sections {
                let frame = section.frame.unwrap();
                assert!(frame.bottom() <= 325.0 + 1.0, "{} overflows", page.object_id);
            }
        }
    }
}
