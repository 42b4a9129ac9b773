//! JSON rendering for decks and slides.

use crate::error::{Error, Result};
use crate::model::{Deck, Slide};
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a deck to JSON.
pub fn to_json(deck: &Deck, format: JsonFormat) -> Result<String> {
    serialize(deck, format)
}

/// Convert a single slide to JSON.
pub fn slide_to_json(slide: &Slide, format: JsonFormat) -> Result<String> {
    serialize(slide, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
