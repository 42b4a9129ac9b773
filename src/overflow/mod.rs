//! Pagination of laid-out slides.
//!
//! [`OverflowEngine`] compares each top-level section's box against the
//! bottom of the body zone. The first section that crosses it is
//! partitioned: elements that fit stay, the element on the boundary is
//! asked to [`split`](crate::model::Element::split), and everything after
//! moves to a continuation slide, which is laid out again and checked in
//! turn. Rows only split when every column can.

mod continuation;
mod engine;
mod partition;
mod policy;
mod split;
mod stats;

pub use engine::{OverflowEngine, OverflowReport};
pub use policy::{SplitContext, SplitPolicy, DEFAULT_CONTINUATION_MARKER};
pub use split::SplitParts;
pub use stats::PaginationStats;
