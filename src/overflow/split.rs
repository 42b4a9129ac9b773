//! Element splitting.
//!
//! Every element type answers `split(available_height)` with a fitted part
//! and a remainder. A part that would violate the minimum-content rules is
//! never produced: the element is then returned whole as the remainder.
//! Images are atomic and always come back whole as the fitted part.

use super::policy::SplitContext;
use crate::model::{
    CodeBlock, Element, ElementKind, ListBlock, TableBlock, TextBlock, TextFormat,
};

/// Fitted part and remainder of a split.
pub type SplitParts = (Option<Element>, Option<Element>);

impl Element {
    /// Split this element so the fitted part is at most `available_height` tall.
    ///
    /// Returns `(Some(self), None)` when the whole element fits or is an
    /// image, `(None, Some(self))` when no acceptable split exists, and
    /// `(Some(fitted), Some(remainder))` otherwise. The fitted part keeps
    /// this element's position; the remainder has no geometry.
    pub fn split(&self, available_height: f64, ctx: &SplitContext<'_>) -> SplitParts {
        if matches!(self.kind, ElementKind::Image(_)) {
            return (Some(self.clone()), None);
        }

        let width = self.frame.map(|f| f.width).unwrap_or(ctx.width);
        let full_height = ctx.metrics.height_for(self, width);
        if full_height <= available_height {
            return (Some(self.clone()), None);
        }

        let parts = match &self.kind {
            ElementKind::Text(block) => self.split_text(block, available_height, width, ctx),
            ElementKind::Code(block) => self.split_code(block, available_height, width, ctx),
            ElementKind::List(list) => self.split_list(list, available_height, width, ctx),
            ElementKind::Table(table) => self.split_table(table, available_height, width, ctx),
            ElementKind::Image(_) => None,
        };

        let Some((fitted_kind, remainder_kind)) = parts else {
            log::debug!(
                "{} element rejected split at {:.1}pt",
                self.element_type(),
                available_height
            );
            return (None, Some(self.clone()));
        };

        let mut fitted = self.with_kind(fitted_kind);
        let fitted_height = ctx.metrics.height_for(&fitted, width);
        if available_height > 0.0 && fitted_height / available_height < ctx.policy.min_split_ratio
        {
            log::debug!(
                "{} split fills {:.0}% of the available space, below the minimum ratio",
                self.element_type(),
                fitted_height / available_height * 100.0
            );
            return (None, Some(self.clone()));
        }
        fitted.frame = self.frame.map(|f| f.with_height(fitted_height));
        fitted.related_to_next = false;

        let mut remainder = self.with_kind(remainder_kind);
        remainder.frame = None;

        (Some(fitted), Some(remainder))
    }

    fn with_kind(&self, kind: ElementKind) -> Element {
        Element {
            kind,
            directives: self.directives.clone(),
            frame: self.frame,
            object_id: self.object_id.clone(),
            related_to_next: self.related_to_next,
        }
    }

    /// Largest `count` in `1..total` whose candidate fits, probing upward.
    fn largest_fitting(
        &self,
        total: usize,
        available_height: f64,
        width: f64,
        ctx: &SplitContext<'_>,
        build: impl Fn(usize) -> ElementKind,
    ) -> Option<usize> {
        let mut best = None;
        for count in 1..total {
            let candidate = self.with_kind(build(count));
            if ctx.metrics.height_for(&candidate, width) <= available_height {
                best = Some(count);
            } else {
                break;
            }
        }
        best
    }

    /// Line split keeping at least `min` lines on each side.
    fn line_split_point(
        &self,
        lines: usize,
        min: usize,
        available_height: f64,
        width: f64,
        ctx: &SplitContext<'_>,
        build: impl Fn(usize) -> ElementKind,
    ) -> Option<usize> {
        if lines < min * 2 {
            return None;
        }
        let fitting = self.largest_fitting(lines, available_height, width, ctx, build)?;
        let count = fitting.min(lines - min);
        (count >= min).then_some(count)
    }

    fn split_text(
        &self,
        block: &TextBlock,
        available_height: f64,
        width: f64,
        ctx: &SplitContext<'_>,
    ) -> Option<(ElementKind, ElementKind)> {
        let lines: Vec<&str> = block.text.split('\n').collect();
        let count = self.line_split_point(
            lines.len(),
            ctx.policy.min_text_lines,
            available_height,
            width,
            ctx,
            |n| {
                ElementKind::Text(TextBlock {
                    text: lines[..n].join("\n"),
                    formatting: Vec::new(),
                    heading_level: block.heading_level,
                })
            },
        )?;

        let head = lines[..count].join("\n");
        let tail = lines[count..].join("\n");
        let cut = head.chars().count();
        let (head_spans, tail_spans) = split_spans(&block.formatting, cut, cut + 1);

        Some((
            ElementKind::Text(TextBlock {
                text: head,
                formatting: head_spans,
                heading_level: block.heading_level,
            }),
            ElementKind::Text(TextBlock {
                text: tail,
                formatting: tail_spans,
                heading_level: block.heading_level,
            }),
        ))
    }

    fn split_code(
        &self,
        block: &CodeBlock,
        available_height: f64,
        width: f64,
        ctx: &SplitContext<'_>,
    ) -> Option<(ElementKind, ElementKind)> {
        let lines: Vec<&str> = block.code.split('\n').collect();
        let part = |range: std::ops::Range<usize>| {
            ElementKind::Code(CodeBlock {
                code: lines[range].join("\n"),
                language: block.language.clone(),
            })
        };
        let count = self.line_split_point(
            lines.len(),
            ctx.policy.min_code_lines,
            available_height,
            width,
            ctx,
            |n| part(0..n),
        )?;
        Some((part(0..count), part(count..lines.len())))
    }

    fn split_list(
        &self,
        list: &ListBlock,
        available_height: f64,
        width: f64,
        ctx: &SplitContext<'_>,
    ) -> Option<(ElementKind, ElementKind)> {
        let total = list.items.len();
        let part = |range: std::ops::Range<usize>| {
            ElementKind::List(ListBlock {
                start: list.start + range.start,
                items: list.items[range].to_vec(),
                ordered: list.ordered,
            })
        };
        let count =
            self.largest_fitting(total, available_height, width, ctx, |n| part(0..n))?;
        if count < ctx.policy.min_list_items {
            return None;
        }
        Some((part(0..count), part(count..total)))
    }

    fn split_table(
        &self,
        table: &TableBlock,
        available_height: f64,
        width: f64,
        ctx: &SplitContext<'_>,
    ) -> Option<(ElementKind, ElementKind)> {
        let total = table.row_count();
        let count = self.largest_fitting(total, available_height, width, ctx, |n| {
            ElementKind::Table(table.with_row_range(0..n))
        })?;
        if count < ctx.policy.min_table_rows {
            return None;
        }
        Some((
            ElementKind::Table(table.with_row_range(0..count)),
            ElementKind::Table(table.with_row_range(count..total)),
        ))
    }
}

/// Divides formatting spans at a character boundary.
///
/// Spans ending after `cut` are truncated in the head; spans ending after
/// `resume` continue in the tail, shifted so `resume` becomes offset zero.
fn split_spans(spans: &[TextFormat], cut: usize, resume: usize) -> (Vec<TextFormat>, Vec<TextFormat>) {
    let head = spans
        .iter()
        .filter(|s| s.start < cut)
        .map(|s| TextFormat {
            end: s.end.min(cut),
            ..s.clone()
        })
        .filter(|s| s.start < s.end)
        .collect();

    let tail = spans
        .iter()
        .filter(|s| s.end > resume)
        .map(|s| TextFormat {
            start: s.start.max(resume) - resume,
            end: s.end - resume,
            ..s.clone()
        })
        .filter(|s| s.start < s.end)
        .collect();

    (head, tail)
}
