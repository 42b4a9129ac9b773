//! Size directive resolution along one axis.
//!
//! A size directive is either absolute (a number above 1, in points), a
//! percentage (a number in `(0, 1]` or a string such as `"40%"`), or
//! implicit (absent or unreadable). [`resolve_axis`] turns the directives of
//! a run of siblings into concrete lengths that fit the available space.

use crate::model::{DirectiveValue, Directives, Section};

/// Implicit share floor used by [`resolve_axis`].
pub const DEFAULT_MIN_IMPLICIT_SIZE: f64 = 20.0;

const EPSILON: f64 = 1e-9;

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    /// The directive for this axis.
    pub fn directive(self, directives: &Directives) -> Option<&DirectiveValue> {
        match self {
            Axis::Width => directives.width.as_ref(),
            Axis::Height => directives.height.as_ref(),
        }
    }
}

/// A classified size directive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Points
    Absolute(f64),
    /// Fraction of the reference length, in `(0, 1]`
    Percentage(f64),
}

impl Dimension {
    /// Classify a raw directive value. Unreadable values yield `None`.
    pub fn parse(value: &DirectiveValue) -> Option<Self> {
        match value {
            DirectiveValue::Number(n) => Self::from_number(*n),
            DirectiveValue::Text(s) => {
                let s = s.trim();
                if let Some(pct) = s.strip_suffix('%') {
                    let pct: f64 = pct.trim().parse().ok()?;
                    if pct.is_finite() && pct > 0.0 {
                        Some(Dimension::Percentage(pct / 100.0))
                    } else {
                        None
                    }
                } else {
                    let s = s.strip_suffix("pt").unwrap_or(s).trim();
                    Self::from_number(s.parse().ok()?)
                }
            }
            DirectiveValue::Other(_) => None,
        }
    }

    fn from_number(n: f64) -> Option<Self> {
        if !n.is_finite() || n <= 0.0 {
            None
        } else if n <= 1.0 {
            Some(Dimension::Percentage(n))
        } else {
            Some(Dimension::Absolute(n))
        }
    }

    /// Length against `reference`, without clamping.
    pub fn length(self, reference: f64) -> f64 {
        match self {
            Dimension::Absolute(points) => points,
            Dimension::Percentage(fraction) => reference * fraction,
        }
    }
}

/// Classify the directive a section carries for `axis`.
pub fn parse_dimension(directives: &Directives, axis: Axis) -> Option<Dimension> {
    axis.directive(directives).and_then(Dimension::parse)
}

/// Reference length for a node's own percentage directive.
///
/// When the parent's size on this axis was fixed by a directive the
/// percentage is taken of the parent's content size; an inferred parent
/// size is not known yet, so the page's content area is used instead.
pub fn percentage_reference(parent_is_fixed: bool, parent_content: f64, content_area: f64) -> f64 {
    if parent_is_fixed {
        parent_content
    } else {
        content_area
    }
}

/// Resolve a lone directive against `reference`, clamped to `available`.
pub fn resolve_single(dimension: Option<Dimension>, reference: f64, available: f64) -> Option<f64> {
    dimension.map(|d| d.length(reference).clamp(0.0, available.max(0.0)))
}

/// Resolve the sizes of sibling sections along `axis`.
///
/// See [`resolve_dimensions`] for the distribution rules.
pub fn resolve_axis(items: &[Section], available: f64, spacing: f64, axis: Axis) -> Vec<f64> {
    let dimensions: Vec<Option<Dimension>> = items
        .iter()
        .map(|s| parse_dimension(&s.directives, axis))
        .collect();
    resolve_dimensions(&dimensions, available, spacing, DEFAULT_MIN_IMPLICIT_SIZE)
}

/// Distribute `available` among items with optional size directives.
///
/// With `usable = available - spacing * (n - 1)`:
///
/// - If the explicit sizes fit in `usable`, they are kept and implicit items
///   share the remainder equally. A share under `min_size` is logged but
///   never taken from the explicit items.
/// - Otherwise implicit items get zero and every explicit size is scaled by
///   `usable / sum(explicit)`.
///
/// The result never exceeds `available` and sums to `usable` whenever any
/// implicit item exists or the explicit sizes are oversubscribed.
pub fn resolve_dimensions(
    dimensions: &[Option<Dimension>],
    available: f64,
    spacing: f64,
    min_size: f64,
) -> Vec<f64> {
    let count = dimensions.len();
    if count == 0 {
        return Vec::new();
    }

    let available = available.max(0.0);
    let usable = (available - spacing.max(0.0) * (count - 1) as f64).max(0.0);

    let sizes: Vec<Option<f64>> = dimensions
        .iter()
        .map(|d| d.map(|d| d.length(usable).min(available)))
        .collect();
    let explicit_total: f64 = sizes.iter().flatten().sum();
    let implicit_count = sizes.iter().filter(|s| s.is_none()).count();

    if explicit_total > usable + EPSILON {
        let scale = if explicit_total > 0.0 {
            usable / explicit_total
        } else {
            0.0
        };
        log::debug!(
            "oversubscribed axis: {:.1} requested of {:.1}, scaling by {:.3}",
            explicit_total,
            usable,
            scale
        );
        return sizes
            .into_iter()
            .map(|s| s.map(|v| v * scale).unwrap_or(0.0))
            .collect();
    }

    if implicit_count == 0 {
        return sizes.into_iter().flatten().collect();
    }

    let share = ((usable - explicit_total) / implicit_count as f64).max(0.0);
    if share < min_size {
        log::debug!(
            "implicit share {:.1} is under the {:.1} floor; explicit sizes kept",
            share,
            min_size
        );
    }

    sizes.into_iter().map(|s| s.unwrap_or(share)).collect()
}
