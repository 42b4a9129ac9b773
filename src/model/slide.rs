//! Slide types.

use super::{Directives, Element, Frame, Section};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Role of a page-level meta element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaRole {
    Title,
    Subtitle,
    Footer,
}

/// A title, subtitle or footer placed in a fixed zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaElement {
    /// Which zone slot this fills
    pub role: MetaRole,

    /// Displayed text
    pub text: String,

    /// Element directives
    #[serde(default, skip_serializing_if = "Directives::is_empty")]
    pub directives: Directives,

    /// Position and size, set by layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
}

impl MetaElement {
    /// Create an unpositioned meta element.
    pub fn new(role: MetaRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            directives: Directives::default(),
            frame: None,
        }
    }

    /// Set directives.
    pub fn with_directives(mut self, directives: Directives) -> Self {
        self.directives = directives;
        self
    }
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Unique identifier
    pub object_id: String,

    /// Slide title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Slide subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Footer text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    /// Speaker notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Slide-level directives, applied to the implicit root section and meta elements
    #[serde(default, skip_serializing_if = "Directives::is_empty")]
    pub directives: Directives,

    /// Positioned title, subtitle and footer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<MetaElement>,

    /// Top-level body sections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,

    /// Body elements of a slide without sections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,

    /// Whether this slide continues an overflowing one
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_continuation: bool,

    /// Background, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<serde_json::Value>,

    /// Layout kind, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            title: None,
            subtitle: None,
            footer: None,
            notes: None,
            directives: Directives::default(),
            meta: Vec::new(),
            sections: Vec::new(),
            elements: Vec::new(),
            is_continuation: false,
            background: None,
            layout: None,
        }
    }

    /// Parse a slide from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the footer.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Set speaker notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the top-level sections.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Set the loose body elements.
    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }

    /// Add a top-level section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Meta element for a role, if present.
    pub fn meta(&self, role: MetaRole) -> Option<&MetaElement> {
        self.meta.iter().find(|m| m.role == role)
    }

    /// Text for a meta role.
    pub fn meta_text(&self, role: MetaRole) -> Option<&str> {
        match role {
            MetaRole::Title => self.title.as_deref(),
            MetaRole::Subtitle => self.subtitle.as_deref(),
            MetaRole::Footer => self.footer.as_deref(),
        }
    }

    /// Check if the slide has no body content.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.sections.iter().all(|s| s.element_count() == 0)
    }

    /// Number of body elements.
    pub fn element_count(&self) -> usize {
        self.elements.len() + self.sections.iter().map(Section::element_count).sum::<usize>()
    }

    /// Forget all body and meta geometry.
    pub fn clear_geometry(&mut self) {
        self.sections.iter_mut().for_each(Section::clear_geometry);
        self.elements.iter_mut().for_each(Element::clear_geometry);
        self.meta.iter_mut().for_each(|m| m.frame = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_from_json() {
        let slide = Slide::from_json(
            r##"{
                "object_id": "s1",
                "title": "Quarterly review",
                "background": {"color": "#ffffff"},
                "sections": [
                    {"id": "main", "elements": [{"type": "text", "text": "Hello"}]}
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(slide.object_id, "s1");
        assert_eq!(slide.meta_text(MetaRole::Title), Some("Quarterly review"));
        assert_eq!(slide.sections.len(), 1);
        assert_eq!(slide.element_count(), 1);
        assert!(!slide.is_continuation);
        assert!(slide.background.is_some());
    }

    #[test]
    fn test_slide_is_empty() {
        let slide = Slide::new("s").with_sections(vec![Section::content("empty")]);
        assert!(slide.is_empty());

        let slide = Slide::new("s").with_elements(vec![Element::text("x")]);
        assert!(!slide.is_empty());
    }

    #[test]
    fn test_slide_clear_geometry() {
        let frame = Frame::new(1.0, 1.0, 1.0, 1.0);
        let mut slide = Slide::new("s")
            .with_sections(vec![Section::content("a").with_frame(frame)]);
        let mut title = MetaElement::new(MetaRole::Title, "T");
        title.frame = Some(frame);
        slide.meta.push(title);

        slide.clear_geometry();

        assert!(slide.sections[0].frame.is_none());
        assert!(slide.meta[0].frame.is_none());
    }
}
