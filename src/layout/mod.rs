//! Slide layout.
//!
//! The page is split into a header zone (title, subtitle), a body zone (the
//! section tree) and a footer zone. [`LayoutEngine`] assigns a [`Frame`] to
//! every meta element, section and element; [`dimension`] holds the pure
//! functions that turn size directives into lengths.
//!
//! [`Frame`]: crate::model::Frame

mod config;
pub mod dimension;
mod engine;

pub use config::{LayoutOptions, Margins, PageConfig, Zones};
pub use dimension::{
    parse_dimension, percentage_reference, resolve_axis, resolve_dimensions, resolve_single, Axis,
    Dimension,
};
pub use engine::{LayoutEngine, IMPLICIT_ROOT_ID};
