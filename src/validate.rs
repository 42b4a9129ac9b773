//! Structural diagnostics.
//!
//! Layout and pagination never fail on odd input; they fall back to
//! defaults and carry on. [`validate_structure`] reports what they had to
//! work around so callers can surface it.

use crate::layout::{Axis, Dimension};
use crate::model::{Directives, Element, ElementKind, Section, SectionBody, Slide};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nesting depth reported as excessive.
pub const MAX_VALIDATION_DEPTH: usize = 64;

/// Kind of structural problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    EmptySlide,
    EmptyText,
    EmptyList,
    EmptyTable,
    EmptyCode,
    ImageWithoutUrl,
    MissingSectionId,
    EmptySection,
    InvalidDirective,
    RepeatedSectionId,
    DepthExceeded,
    LooseElementsWithSections,
}

/// A structural problem and where it was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    /// Slide id, section ids and element index joined by `/`
    pub path: String,
    pub message: String,
}

impl Warning {
    fn new(kind: WarningKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Collect structural warnings for a slide.
pub fn validate_structure(slide: &Slide) -> Vec<Warning> {
    let mut validator = Validator {
        warnings: Vec::new(),
        ancestors: Vec::new(),
    };
    validator.slide(slide);
    validator.warnings
}

struct Validator {
    warnings: Vec<Warning>,
    ancestors: Vec<String>,
}

impl Validator {
    fn push(&mut self, kind: WarningKind, path: &str, message: impl Into<String>) {
        self.warnings.push(Warning::new(kind, path, message));
    }

    fn slide(&mut self, slide: &Slide) {
        let path = slide.object_id.clone();

        if slide.is_empty() {
            self.push(WarningKind::EmptySlide, &path, "slide has no body content");
        }
        if !slide.elements.is_empty() && !slide.sections.is_empty() {
            self.push(
                WarningKind::LooseElementsWithSections,
                &path,
                format!(
                    "{} loose elements will be appended after the sections",
                    slide.elements.len()
                ),
            );
        }

        self.directives(&slide.directives, &path);
        for (index, element) in slide.elements.iter().enumerate() {
            self.element(element, &format!("{}/{}", path, index));
        }
        for section in &slide.sections {
            self.section(section, &path);
        }
    }

    fn section(&mut self, section: &Section, parent_path: &str) {
        let label = if section.id.is_empty() {
            "?"
        } else {
            section.id.as_str()
        };
        let path = format!("{}/{}", parent_path, label);

        if self.ancestors.len() >= MAX_VALIDATION_DEPTH {
            self.push(
                WarningKind::DepthExceeded,
                &path,
                format!("nesting deeper than {} sections", MAX_VALIDATION_DEPTH),
            );
            return;
        }

        if section.id.is_empty() {
            self.push(WarningKind::MissingSectionId, &path, "section has no id");
        } else if self.ancestors.iter().any(|a| *a == section.id) {
            self.push(
                WarningKind::RepeatedSectionId,
                &path,
                format!("section id '{}' repeats an ancestor", section.id),
            );
            return;
        }

        self.directives(&section.directives, &path);

        self.ancestors.push(section.id.clone());
        match &section.body {
            SectionBody::Empty => {
                self.push(WarningKind::EmptySection, &path, "section has no children")
            }
            SectionBody::Elements(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    self.element(element, &format!("{}/{}", path, index));
                }
            }
            SectionBody::Subsections(children) => {
                for child in children {
                    self.section(child, &path);
                }
            }
        }
        self.ancestors.pop();
    }

    fn element(&mut self, element: &Element, path: &str) {
        self.directives(&element.directives, path);

        let problem = match &element.kind {
            ElementKind::Text(t) if t.text.trim().is_empty() => {
                Some((WarningKind::EmptyText, "text element is empty"))
            }
            ElementKind::List(l) if l.items.is_empty() => {
                Some((WarningKind::EmptyList, "list has no items"))
            }
            ElementKind::Table(t) if t.is_empty() => {
                Some((WarningKind::EmptyTable, "table has no rows"))
            }
            ElementKind::Code(c) if c.code.trim().is_empty() => {
                Some((WarningKind::EmptyCode, "code block is empty"))
            }
            ElementKind::Image(i) if i.url.trim().is_empty() => {
                Some((WarningKind::ImageWithoutUrl, "image has no url"))
            }
            _ => None,
        };
        if let Some((kind, message)) = problem {
            self.push(kind, path, message);
        }
    }

    fn directives(&mut self, directives: &Directives, path: &str) {
        for axis in [Axis::Width, Axis::Height] {
            if let Some(value) = axis.directive(directives) {
                if Dimension::parse(value).is_none() {
                    self.push(
                        WarningKind::InvalidDirective,
                        path,
                        format!("unreadable {:?} directive {:?}; treated as implicit", axis, value),
                    );
                }
            }
        }
    }
}
