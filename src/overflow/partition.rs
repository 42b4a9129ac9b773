//! Section partitioning against the body boundary.

use super::policy::SplitContext;
use crate::model::{Element, Section, SectionBody};

/// Outcome of partitioning one section.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Partition {
    /// Nothing inside the section crosses the boundary.
    Fits(Section),
    /// The section divides into a part for this page and one for the next.
    Split {
        fitted: Section,
        remainder: Section,
        element_splits: usize,
    },
    /// Nothing can stay; the whole section moves on.
    Defer,
}

/// Divides a laid-out section tree at a horizontal boundary.
pub(crate) struct Partitioner<'a> {
    limit: f64,
    tolerance: f64,
    max_depth: usize,
    ctx: SplitContext<'a>,
    path: Vec<String>,
}

impl<'a> Partitioner<'a> {
    pub(crate) fn new(limit: f64, max_depth: usize, ctx: SplitContext<'a>) -> Self {
        Self {
            limit,
            tolerance: ctx.policy.tolerance,
            max_depth,
            ctx,
            path: Vec::new(),
        }
    }

    fn crosses(&self, bottom: f64) -> bool {
        bottom > self.limit + self.tolerance
    }

    pub(crate) fn partition(&mut self, section: &Section) -> Partition {
        let Some(frame) = section.frame else {
            return Partition::Fits(section.clone());
        };
        if section.is_empty() {
            return Partition::Fits(section.clone());
        }

        if self.path.len() >= self.max_depth
            || (!section.id.is_empty() && self.path.iter().any(|p| *p == section.id))
        {
            log::debug!(
                "section '{}' not partitioned: repeated id or nesting limit",
                section.id
            );
            return if self.crosses(frame.bottom()) {
                Partition::Defer
            } else {
                Partition::Fits(section.clone())
            };
        }

        self.path.push(section.id.clone());
        let outcome = match &section.body {
            SectionBody::Empty => Partition::Fits(section.clone()),
            SectionBody::Elements(elements) => self.partition_elements(section, elements),
            SectionBody::Subsections(children) if section.is_row() => {
                self.partition_row(section, children)
            }
            SectionBody::Subsections(children) => self.partition_stack(section, children),
        };
        self.path.pop();
        outcome
    }

    fn partition_elements(&self, section: &Section, elements: &[Element]) -> Partition {
        let Some(index) = elements
            .iter()
            .position(|e| e.frame.is_some_and(|f| self.crosses(f.bottom())))
        else {
            return Partition::Fits(section.clone());
        };

        let element = &elements[index];
        let top = element.frame.map(|f| f.y).unwrap_or(self.limit);
        let available = (self.limit - top).max(0.0);

        let mut fitted: Vec<Element> = elements[..index].to_vec();
        let mut remainder: Vec<Element> = Vec::new();
        let mut element_splits = 0;

        match element.split(available, &self.ctx) {
            (Some(head), Some(tail)) => {
                log::debug!(
                    "split {} element in section '{}' at {:.1}pt",
                    element.element_type(),
                    section.id,
                    available
                );
                fitted.push(head);
                remainder.push(tail);
                element_splits = 1;
            }
            _ => remainder.push(element.clone()),
        }
        remainder.extend_from_slice(&elements[index + 1..]);

        if fitted.is_empty() {
            return Partition::Defer;
        }
        Partition::Split {
            fitted: section.with_body(SectionBody::Elements(fitted)),
            remainder: remainder_section(section, SectionBody::Elements(remainder)),
            element_splits,
        }
    }

    fn partition_stack(&mut self, section: &Section, children: &[Section]) -> Partition {
        let Some(index) = children
            .iter()
            .position(|c| c.frame.is_some_and(|f| self.crosses(f.bottom())))
        else {
            return Partition::Fits(section.clone());
        };

        let mut fitted: Vec<Section> = children[..index].to_vec();
        let mut remainder: Vec<Section> = Vec::new();
        let mut element_splits = 0;

        match self.partition(&children[index]) {
            Partition::Split {
                fitted: head,
                remainder: tail,
                element_splits: splits,
            } => {
                fitted.push(head);
                remainder.push(tail);
                element_splits = splits;
            }
            Partition::Fits(child) => fitted.push(child),
            Partition::Defer => remainder.push(children[index].clone()),
        }
        remainder.extend_from_slice(&children[index + 1..]);

        if fitted.is_empty() {
            return Partition::Defer;
        }
        if remainder.is_empty() {
            return Partition::Fits(section.with_body(SectionBody::Subsections(fitted)));
        }
        Partition::Split {
            fitted: section.with_body(SectionBody::Subsections(fitted)),
            remainder: remainder_section(section, SectionBody::Subsections(remainder)),
            element_splits,
        }
    }

    /// A row splits only when every column splits.
    fn partition_row(&mut self, section: &Section, children: &[Section]) -> Partition {
        if !children
            .iter()
            .any(|c| c.frame.is_some_and(|f| self.crosses(f.bottom())))
        {
            return Partition::Fits(section.clone());
        }

        let mut fitted = Vec::with_capacity(children.len());
        let mut remainder = Vec::with_capacity(children.len());
        let mut element_splits = 0;

        for child in children {
            match self.partition(child) {
                Partition::Split {
                    fitted: head,
                    remainder: tail,
                    element_splits: splits,
                } => {
                    fitted.push(head);
                    remainder.push(tail);
                    element_splits += splits;
                }
                _ => {
                    log::debug!(
                        "row '{}' kept whole: column '{}' cannot split",
                        section.id,
                        child.id
                    );
                    return Partition::Defer;
                }
            }
        }

        Partition::Split {
            fitted: section.with_body(SectionBody::Subsections(fitted)),
            remainder: remainder_section(section, SectionBody::Subsections(remainder)),
            element_splits,
        }
    }
}

/// The continuing part of a section. A fixed height belonged to the
/// original box and does not carry over.
fn remainder_section(section: &Section, body: SectionBody) -> Section {
    let mut remainder = section.with_body(body);
    remainder.directives.height = None;
    remainder.clear_geometry();
    remainder
}

/// Shrinks section boxes that cross `limit` so they end on it.
pub(crate) fn clamp_to(section: &mut Section, limit: f64) {
    if let Some(frame) = section.frame.as_mut() {
        if frame.bottom() > limit {
            frame.height = (limit - frame.y).max(0.0);
        }
    }
    if let SectionBody::Subsections(children) = &mut section.body {
        for child in children {
            clamp_to(child, limit);
        }
    }
}
