//! Layout sections.

use super::{Directives, Element, Frame};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a section arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Children stack vertically
    #[default]
    Content,
    /// Children sit side by side
    Row,
}

/// What a section holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SectionBody {
    /// Terminal placeholder
    #[default]
    Empty,
    /// Content elements, stacked vertically
    Elements(Vec<Element>),
    /// Nested sections, arranged along the section's main axis
    Subsections(Vec<Section>),
}

/// A node of the body layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSection", into = "RawSection")]
pub struct Section {
    /// Section identifier
    pub id: String,
    /// Arrangement of children
    pub kind: SectionKind,
    /// Section directives
    pub directives: Directives,
    /// Position and size, set by layout
    pub frame: Option<Frame>,
    /// Children
    pub body: SectionBody,
}

/// Wire shape of a section.
#[derive(Serialize, Deserialize)]
struct RawSection {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: SectionKind,
    #[serde(default, skip_serializing_if = "Directives::is_empty")]
    directives: Directives,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frame: Option<Frame>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subsections: Vec<Section>,
}

impl TryFrom<RawSection> for Section {
    type Error = Error;

    fn try_from(raw: RawSection) -> Result<Self> {
        let body = SectionBody::from_parts(&raw.id, raw.elements, raw.subsections)?;
        Ok(Section {
            id: raw.id,
            kind: raw.kind,
            directives: raw.directives,
            frame: raw.frame,
            body,
        })
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        let (elements, subsections) = match section.body {
            SectionBody::Empty => (Vec::new(), Vec::new()),
            SectionBody::Elements(elements) => (elements, Vec::new()),
            SectionBody::Subsections(subsections) => (Vec::new(), subsections),
        };
        RawSection {
            id: section.id,
            kind: section.kind,
            directives: section.directives,
            frame: section.frame,
            elements,
            subsections,
        }
    }
}

impl SectionBody {
    /// Build a body from the two child lists, rejecting a mix of both.
    pub fn from_parts(id: &str, elements: Vec<Element>, subsections: Vec<Section>) -> Result<Self> {
        match (elements.is_empty(), subsections.is_empty()) {
            (true, true) => Ok(SectionBody::Empty),
            (false, true) => Ok(SectionBody::Elements(elements)),
            (true, false) => Ok(SectionBody::Subsections(subsections)),
            (false, false) => Err(Error::InvalidSection(format!(
                "section '{}' has both elements and subsections",
                id
            ))),
        }
    }
}

impl Section {
    /// Create an empty section.
    pub fn new(id: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            id: id.into(),
            kind,
            directives: Directives::default(),
            frame: None,
            body: SectionBody::Empty,
        }
    }

    /// Create an empty vertical section.
    pub fn content(id: impl Into<String>) -> Self {
        Self::new(id, SectionKind::Content)
    }

    /// Create an empty horizontal section.
    pub fn row(id: impl Into<String>) -> Self {
        Self::new(id, SectionKind::Row)
    }

    /// Create a section from both child lists, as a parser would.
    pub fn from_parts(
        id: impl Into<String>,
        kind: SectionKind,
        elements: Vec<Element>,
        subsections: Vec<Section>,
    ) -> Result<Self> {
        let id = id.into();
        let body = SectionBody::from_parts(&id, elements, subsections)?;
        Ok(Self {
            body,
            ..Self::new(id, kind)
        })
    }

    /// Replace the children with elements.
    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.body = if elements.is_empty() {
            SectionBody::Empty
        } else {
            SectionBody::Elements(elements)
        };
        self
    }

    /// Replace the children with subsections.
    pub fn with_subsections(mut self, subsections: Vec<Section>) -> Self {
        self.body = if subsections.is_empty() {
            SectionBody::Empty
        } else {
            SectionBody::Subsections(subsections)
        };
        self
    }

    /// Set directives.
    pub fn with_directives(mut self, directives: Directives) -> Self {
        self.directives = directives;
        self
    }

    /// Set the frame.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// A copy of this section's header (id, kind, directives, frame) with a new body.
    pub fn with_body(&self, body: SectionBody) -> Self {
        Self {
            id: self.id.clone(),
            kind: self.kind,
            directives: self.directives.clone(),
            frame: self.frame,
            body,
        }
    }

    /// Child elements, empty unless the body holds elements.
    pub fn elements(&self) -> &[Element] {
        match &self.body {
            SectionBody::Elements(elements) => elements,
            _ => &[],
        }
    }

    /// Child sections, empty unless the body holds subsections.
    pub fn subsections(&self) -> &[Section] {
        match &self.body {
            SectionBody::Subsections(subsections) => subsections,
            _ => &[],
        }
    }

    /// Check if the section has no children.
    pub fn is_empty(&self) -> bool {
        matches!(self.body, SectionBody::Empty)
    }

    /// Check if children sit side by side.
    pub fn is_row(&self) -> bool {
        self.kind == SectionKind::Row
    }

    /// Position, if laid out.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.frame.map(|f| f.position())
    }

    /// Size, if laid out.
    pub fn size(&self) -> Option<(f64, f64)> {
        self.frame.map(|f| f.size())
    }

    /// Forget position and size on this section and everything below it.
    pub fn clear_geometry(&mut self) {
        self.frame = None;
        match &mut self.body {
            SectionBody::Empty => {}
            SectionBody::Elements(elements) => elements.iter_mut().for_each(Element::clear_geometry),
            SectionBody::Subsections(subsections) => {
                subsections.iter_mut().for_each(Section::clear_geometry)
            }
        }
    }

    /// Number of elements in this subtree.
    pub fn element_count(&self) -> usize {
        match &self.body {
            SectionBody::Empty => 0,
            SectionBody::Elements(elements) => elements.len(),
            SectionBody::Subsections(subsections) => {
                subsections.iter().map(Section::element_count).sum()
            }
        }
    }

    /// Visit every element in this subtree, depth first.
    pub fn for_each_element<'a>(&'a self, f: &mut dyn FnMut(&'a Element)) {
        match &self.body {
            SectionBody::Empty => {}
            SectionBody::Elements(elements) => elements.iter().for_each(|e| f(e)),
            SectionBody::Subsections(subsections) => {
                for child in subsections {
                    child.for_each_element(f);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Directives;
    use serde_json::json;

    #[test]
    fn test_section_rejects_mixed_children() {
        let err = Section::from_parts(
            "main",
            SectionKind::Content,
            vec![Element::text("a")],
            vec![Section::content("child")],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSection(_)));
    }

    #[test]
    fn test_section_deserialize_rejects_mixed_children() {
        let result = serde_json::from_value::<Section>(json!({
            "id": "s1",
            "elements": [{"type": "text", "text": "a"}],
            "subsections": [{"id": "s2"}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_section_json_roundtrip_shape() {
        let section = Section::row("cols")
            .with_directives(Directives::new().with_gap(12.0))
            .with_subsections(vec![
                Section::content("left").with_elements(vec![Element::text("L")]),
                Section::content("right"),
            ]);

        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["type"], json!("row"));
        assert_eq!(value["subsections"][0]["elements"][0]["text"], json!("L"));
        assert!(value.get("elements").is_none());

        let back: Section = serde_json::from_value(value).unwrap();
        assert_eq!(back, section);
    }

    #[test]
    fn test_clear_geometry_recursive() {
        let frame = Frame::new(0.0, 0.0, 10.0, 10.0);
        let mut section = Section::content("outer")
            .with_frame(frame)
            .with_subsections(vec![Section::content("inner")
                .with_frame(frame)
                .with_elements(vec![Element::text("x").with_frame(frame)])]);

        section.clear_geometry();

        assert!(section.frame.is_none());
        let inner = &section.subsections()[0];
        assert!(inner.frame.is_none());
        assert!(inner.elements()[0].frame.is_none());
    }

    #[test]
    fn test_element_count_and_visit() {
        let section = Section::content("outer").with_subsections(vec![
            Section::content("a").with_elements(vec![Element::text("1"), Element::text("2")]),
            Section::content("b").with_elements(vec![Element::image("x.png")]),
        ]);
        assert_eq!(section.element_count(), 3);

        let mut seen = Vec::new();
        section.for_each_element(&mut |e| seen.push(e.element_type()));
        assert_eq!(seen.len(), 3);
    }
}
