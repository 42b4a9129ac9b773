//! Deck structure.

use super::Slide;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// An ordered sequence of slides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Presentation title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Slides in order
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            slides: Vec::new(),
        }
    }

    /// Parse a deck from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a slide.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Number of continuation slides.
    pub fn continuation_count(&self) -> usize {
        self.slides.iter().filter(|s| s.is_continuation).count()
    }

    /// Find a slide by id.
    pub fn slide(&self, object_id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.object_id == object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_from_json() {
        let deck = Deck::from_json(
            r#"{"title": "Demo", "slides": [{"object_id": "a"}, {"object_id": "b", "is_continuation": true}]}"#,
        )
        .unwrap();

        assert_eq!(deck.title.as_deref(), Some("Demo"));
        assert_eq!(deck.slide_count(), 2);
        assert_eq!(deck.continuation_count(), 1);
        assert!(deck.slide("b").is_some());
        assert!(deck.slide("c").is_none());
    }

    #[test]
    fn test_deck_from_invalid_json() {
        let err = Deck::from_json("{\"slides\": 3}").unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }
}
