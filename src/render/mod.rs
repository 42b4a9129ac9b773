//! Output formats for laid-out decks.

mod json;
mod outline;

pub use json::{slide_to_json, to_json, JsonFormat};
pub use outline::to_outline;
