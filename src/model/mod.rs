//! Document model types for slide content.
//!
//! A [`Deck`] holds [`Slide`]s; each slide carries page-level meta elements
//! (title, subtitle, footer) and a tree of [`Section`]s whose leaves are
//! [`Element`]s. The parser produces the tree without geometry; layout fills
//! in each node's [`Frame`].

mod deck;
mod directive;
mod element;
mod geometry;
mod section;
mod slide;
mod table;

pub use deck::Deck;
pub use directive::{
    DirectiveValue, Directives, HorizontalAlign, VerticalAlign, INHERITABLE_STYLE_KEYS,
};
pub use element::{
    CodeBlock, Element, ElementKind, ElementType, FormatKind, ImageBlock, ListBlock, ListItem,
    TextBlock, TextFormat, DEFAULT_IMAGE_ASPECT_RATIO,
};
pub use geometry::Frame;
pub use section::{Section, SectionBody, SectionKind};
pub use slide::{MetaElement, MetaRole, Slide};
pub use table::TableBlock;
