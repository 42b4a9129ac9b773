//! Continuation slide synthesis.

use crate::model::{Element, MetaRole, Section, SectionBody, Slide};
use regex::Regex;
use std::sync::OnceLock;

const CONTINUATION_SUFFIX: &str = "_cont";

/// Builds the continuation slides of one origin slide.
///
/// Continuations share the origin's metadata. The first is `<id>_cont`,
/// later ones `<id>_cont_<n>`; titles carry the marker once, followed by
/// the ordinal from the second continuation on.
#[derive(Debug)]
pub(crate) struct ContinuationBuilder {
    template: Slide,
    base_id: String,
    base_title: Option<String>,
    marker: String,
    ordinal: usize,
}

impl ContinuationBuilder {
    pub(crate) fn new(origin: &Slide, marker: &str) -> Self {
        let mut template = origin.clone();
        template.sections.clear();
        template.elements.clear();

        let base_id = strip_id_suffix(&origin.object_id);
        let base_title = origin
            .title
            .as_deref()
            .map(|title| strip_title_marker(title, marker));

        Self {
            template,
            base_id,
            base_title,
            marker: marker.to_string(),
            ordinal: 0,
        }
    }

    /// Number of continuations built so far.
    pub(crate) fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Build the next continuation around `sections`.
    pub(crate) fn next(&mut self, sections: Vec<Section>) -> Slide {
        self.ordinal += 1;
        let suffix = self.suffix();

        let mut slide = self.template.clone();
        slide.object_id = format!("{}{}", self.base_id, suffix);
        slide.is_continuation = true;
        slide.title = self.base_title.as_ref().map(|title| self.title_for(title));
        slide.footer = slide.footer.as_deref().map(|footer| self.footer_for(footer));

        for meta in &mut slide.meta {
            meta.frame = None;
            let text = match meta.role {
                MetaRole::Title => slide.title.clone(),
                MetaRole::Subtitle => slide.subtitle.clone(),
                MetaRole::Footer => slide.footer.clone(),
            };
            if let Some(text) = text {
                meta.text = text;
            }
        }

        slide.sections = sections;
        for section in &mut slide.sections {
            section.clear_geometry();
            retag_section(section, &suffix);
        }

        log::debug!(
            "built continuation '{}' with {} elements",
            slide.object_id,
            slide.element_count()
        );
        slide
    }

    fn suffix(&self) -> String {
        if self.ordinal <= 1 {
            CONTINUATION_SUFFIX.to_string()
        } else {
            format!("{}_{}", CONTINUATION_SUFFIX, self.ordinal)
        }
    }

    fn title_for(&self, base: &str) -> String {
        if self.marker.is_empty() {
            return base.to_string();
        }
        let title = if base.is_empty() {
            self.marker.clone()
        } else {
            format!("{} {}", base, self.marker)
        };
        if self.ordinal >= 2 {
            format!("{} ({})", title, self.ordinal)
        } else {
            title
        }
    }

    fn footer_for(&self, footer: &str) -> String {
        if self.marker.is_empty() || footer.contains(&self.marker) {
            footer.to_string()
        } else if footer.is_empty() {
            self.marker.clone()
        } else {
            format!("{} {}", footer, self.marker)
        }
    }
}

/// Drops a trailing `_cont` or `_cont_<n>` from a slide or element id.
fn strip_id_suffix(id: &str) -> String {
    static SUFFIX: OnceLock<Regex> = OnceLock::new();
    let re = SUFFIX.get_or_init(|| Regex::new(r"_cont(?:_\d+)?$").unwrap());
    re.replace(id, "").into_owned()
}

/// Drops a trailing continuation marker, with its ordinal, from a title.
fn strip_title_marker(title: &str, marker: &str) -> String {
    if marker.is_empty() {
        return title.to_string();
    }
    let re = Regex::new(&format!(r"\s*{}(?:\s*\(\d+\))?\s*$", regex::escape(marker))).unwrap();
    re.replace(title, "").into_owned()
}

fn retag_section(section: &mut Section, suffix: &str) {
    match &mut section.body {
        SectionBody::Empty => {}
        SectionBody::Elements(elements) => {
            for element in elements {
                retag_element(element, suffix);
            }
        }
        SectionBody::Subsections(children) => {
            for child in children {
                retag_section(child, suffix);
            }
        }
    }
}

fn retag_element(element: &mut Element, suffix: &str) {
    if let Some(id) = element.object_id.as_mut() {
        *id = format!("{}{}", strip_id_suffix(id), suffix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Frame, MetaElement};

    fn origin() -> Slide {
        let mut slide = Slide::new("intro")
            .with_title("Intro")
            .with_footer("Acme Corp")
            .with_notes("say hello");
        slide.layout = Some("title_and_body".into());
        slide.background = Some(serde_json::json!({"color": "#003366"}));
        slide
    }

    fn body() -> Vec<Section> {
        vec![Section::content("main")
            .with_elements(vec![Element::text("rest")
                .with_object_id("el_1")
                .with_frame(Frame::new(50.0, 140.0, 620.0, 20.0))])
            .with_frame(Frame::new(50.0, 140.0, 620.0, 20.0))]
    }

    #[test]
    fn test_continuation_ids_and_titles() {
        let mut builder = ContinuationBuilder::new(&origin(), "(continued)");

        let first = builder.next(body());
        assert_eq!(first.object_id, "intro_cont");
        assert_eq!(first.title.as_deref(), Some("Intro (continued)"));
        assert!(first.is_continuation);

        let second = builder.next(body());
        assert_eq!(second.object_id, "intro_cont_2");
        assert_eq!(second.title.as_deref(), Some("Intro (continued) (2)"));
        assert_eq!(builder.ordinal(), 2);
    }

    #[test]
    fn test_marker_never_doubles() {
        let source = Slide::new("intro_cont")
            .with_title("Intro (continued)")
            .with_footer("Acme Corp (continued)");
        let mut builder = ContinuationBuilder::new(&source, "(continued)");
        builder.next(Vec::new());

        let second = builder.next(Vec::new());
        assert_eq!(second.object_id, "intro_cont_2");
        assert_eq!(second.title.as_deref(), Some("Intro (continued) (2)"));
        assert_eq!(second.footer.as_deref(), Some("Acme Corp (continued)"));
    }

    #[test]
    fn test_metadata_copied() {
        let mut builder = ContinuationBuilder::new(&origin(), "(continued)");
        let slide = builder.next(body());
        assert_eq!(slide.footer.as_deref(), Some("Acme Corp (continued)"));
        assert_eq!(slide.notes.as_deref(), Some("say hello"));
        assert_eq!(slide.layout.as_deref(), Some("title_and_body"));
        assert_eq!(slide.background, origin().background);
    }

    #[test]
    fn test_untitled_slide_stays_untitled() {
        let mut builder = ContinuationBuilder::new(&Slide::new("s"), "(continued)");
        let slide = builder.next(body());
        assert!(slide.title.is_none());
        assert!(slide.footer.is_none());
    }

    #[test]
    fn test_geometry_cleared_and_ids_retagged() {
        let mut builder = ContinuationBuilder::new(&origin(), "(continued)");
        let slide = builder.next(body());
        let section = &slide.sections[0];
        assert!(section.frame.is_none());
        assert!(section.elements()[0].frame.is_none());
        assert_eq!(section.elements()[0].object_id.as_deref(), Some("el_1_cont"));

        let slide = builder.next(slide.sections.clone());
        assert_eq!(
            slide.sections[0].elements()[0].object_id.as_deref(),
            Some("el_1_cont_2")
        );
    }

    #[test]
    fn test_meta_text_follows_fields() {
        let mut source = origin();
        source.meta.push(MetaElement::new(MetaRole::Title, "Intro"));
        source.meta[0].frame = Some(Frame::new(50.0, 50.0, 620.0, 40.0));

        let mut builder = ContinuationBuilder::new(&source, "(continued)");
        let slide = builder.next(Vec::new());
        assert_eq!(slide.meta[0].text, "Intro (continued)");
        assert!(slide.meta[0].frame.is_none());
    }

    #[test]
    fn test_marker_with_regex_characters_is_stripped() {
        let source = Slide::new("deck_cont_4").with_title("Plan [cont.*] (4)");
        let mut builder = ContinuationBuilder::new(&source, "[cont.*]");
        let slide = builder.next(Vec::new());
        assert_eq!(slide.object_id, "deck_cont");
        assert_eq!(slide.title.as_deref(), Some("Plan [cont.*]"));
        assert_eq!(strip_id_suffix("el_7_cont_12"), "el_7");
        assert_eq!(strip_id_suffix("contour"), "contour");
    }

    #[test]
    fn test_empty_marker_keeps_title() {
        let mut builder = ContinuationBuilder::new(&origin(), "");
        let slide = builder.next(Vec::new());
        assert_eq!(slide.title.as_deref(), Some("Intro"));
        assert_eq!(slide.footer.as_deref(), Some("Acme Corp"));
    }
}
