//! Plain text outline of a laid-out deck.

use crate::model::{Deck, Element, ElementKind, Frame, Section, SectionBody, Slide};
use std::fmt::Write;

/// Characters of element text shown per line.
const PREVIEW_CHARS: usize = 40;

/// Render a deck as an indented outline with frames.
///
/// One block per slide, listing meta elements, then the section tree with
/// each node's box as `x,y wxh`.
pub fn to_outline(deck: &Deck) -> String {
    let mut output = String::new();
    if let Some(title) = &deck.title {
        let _ = writeln!(output, "# {}", title);
        output.push('\n');
    }
    for (index, slide) in deck.slides.iter().enumerate() {
        write_slide(&mut output, index + 1, slide);
    }
    output.trim_end().to_string()
}

fn write_slide(output: &mut String, number: usize, slide: &Slide) {
    let _ = write!(output, "[{}] {}", number, slide.object_id);
    if slide.is_continuation {
        output.push_str(" (continuation)");
    }
    output.push('\n');

    for meta in &slide.meta {
        let _ = writeln!(
            output,
            "  {:?} \"{}\" {}",
            meta.role,
            preview(&meta.text),
            frame_label(meta.frame)
        );
    }
    for section in &slide.sections {
        write_section(output, section, 1);
    }
    for element in &slide.elements {
        write_element(output, element, 1);
    }
    output.push('\n');
}

fn write_section(output: &mut String, section: &Section, depth: usize) {
    let indent = "  ".repeat(depth);
    let kind = if section.is_row() { "row" } else { "content" };
    let _ = writeln!(
        output,
        "{}{} ({}) {}",
        indent,
        section.id,
        kind,
        frame_label(section.frame)
    );
    match &section.body {
        SectionBody::Empty => {}
        SectionBody::Elements(elements) => {
            for element in elements {
                write_element(output, element, depth + 1);
            }
        }
        SectionBody::Subsections(children) => {
            for child in children {
                write_section(output, child, depth + 1);
            }
        }
    }
}

fn write_element(output: &mut String, element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    let summary = match &element.kind {
        ElementKind::Text(t) => format!("\"{}\"", preview(&t.text)),
        ElementKind::List(l) => format!("{} items", l.total_items()),
        ElementKind::Table(t) => format!("{}x{}", t.row_count(), t.column_count()),
        ElementKind::Code(c) => format!(
            "{} lines{}",
            c.code.lines().count(),
            c.language
                .as_deref()
                .map(|l| format!(" {}", l))
                .unwrap_or_default()
        ),
        ElementKind::Image(i) => i.url.clone(),
    };
    let _ = writeln!(
        output,
        "{}{} {} {}",
        indent,
        element.element_type(),
        summary,
        frame_label(element.frame)
    );
}

fn frame_label(frame: Option<Frame>) -> String {
    match frame {
        Some(f) => format!("@ {:.1},{:.1} {:.1}x{:.1}", f.x, f.y, f.width, f.height),
        None => "@ -".to_string(),
    }
}

fn preview(text: &str) -> String {
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() > PREVIEW_CHARS || text.contains('\n') {
        let cut: String = first.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableBlock;

    #[test]
    fn test_outline_lists_tree() {
        let mut deck = Deck::with_title("Demo");
        let mut slide = Slide::new("s1").with_sections(vec![Section::row("cols")
            .with_subsections(vec![
                Section::content("left").with_elements(vec![Element::text("Hello")
                    .with_frame(Frame::new(50.0, 140.0, 305.0, 20.0))]),
                Section::content("right").with_elements(vec![Element::table(
                    TableBlock::from_strs(&["A", "B"], &[&["1", "2"]]).unwrap(),
                )]),
            ])]);
        slide.is_continuation = true;
        deck.add_slide(slide);

        let outline = to_outline(&deck);
        assert!(outline.starts_with("# Demo"));
        assert!(outline.contains("[1] s1 (continuation)"));
        assert!(outline.contains("  cols (row) @ -"));
        assert!(outline.contains("      text \"Hello\" @ 50.0,140.0 305.0x20.0"));
        assert!(outline.contains("      table 1x2 @ -"));
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("one\ntwo"), "one...");
        let long = "x".repeat(60);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(40)));
    }
}
