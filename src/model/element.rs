//! Content elements.

use super::{Directives, Frame, TableBlock};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default aspect ratio (width / height) for images without one.
pub const DEFAULT_IMAGE_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// A content element inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Type-specific payload
    #[serde(flatten)]
    pub kind: ElementKind,

    /// Element directives
    #[serde(default, skip_serializing_if = "Directives::is_empty")]
    pub directives: Directives,

    /// Position and size, set by layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,

    /// Identifier used by the downstream serializer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,

    /// Whether this element belongs with the next one (tighter spacing)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub related_to_next: bool,
}

/// Element payload, one variant per element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// Paragraph or heading text
    Text(TextBlock),
    /// Bulleted or numbered list
    List(ListBlock),
    /// Table with header row
    Table(TableBlock),
    /// Code block
    Code(CodeBlock),
    /// Image reference
    Image(ImageBlock),
}

/// Element type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Text,
    List,
    Table,
    Code,
    Image,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Text => "text",
            ElementType::List => "list",
            ElementType::Table => "table",
            ElementType::Code => "code",
            ElementType::Image => "image",
        };
        f.write_str(name)
    }
}

/// Text payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Raw text, lines separated by `\n`
    pub text: String,

    /// Formatting spans over character offsets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formatting: Vec<TextFormat>,

    /// Heading level (1-6) when the text is a heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
}

impl TextBlock {
    /// Create plain text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Number of `\n`-separated lines.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

/// A formatting span. Spans may overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFormat {
    /// First character covered
    pub start: usize,
    /// One past the last character covered
    pub end: usize,
    /// Kind of formatting
    pub format: FormatKind,
    /// Extra data (link target, color value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl TextFormat {
    /// Create a span without extra data.
    pub fn new(start: usize, end: usize, format: FormatKind) -> Self {
        Self {
            start,
            end,
            format,
            value: None,
        }
    }
}

/// Formatting kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Link,
    Color,
}

/// List payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListBlock {
    /// Top-level items
    pub items: Vec<ListItem>,

    /// Numbered list
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ordered: bool,

    /// Number of the first item for ordered lists
    #[serde(default = "default_list_start")]
    pub start: usize,
}

fn default_list_start() -> usize {
    1
}

impl ListBlock {
    /// Create an unordered list.
    pub fn new(items: Vec<ListItem>) -> Self {
        Self {
            items,
            ordered: false,
            start: 1,
        }
    }

    /// Create a numbered list.
    pub fn ordered(items: Vec<ListItem>) -> Self {
        Self {
            ordered: true,
            ..Self::new(items)
        }
    }

    /// Total item count including nested children.
    pub fn total_items(&self) -> usize {
        self.items.iter().map(ListItem::count).sum()
    }
}

/// A list item with optional nested items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item text
    pub text: String,

    /// Nesting level, 0 for top-level items
    #[serde(default)]
    pub level: u8,

    /// Nested items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ListItem>,

    /// Formatting spans over the item text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formatting: Vec<TextFormat>,
}

impl ListItem {
    /// Create a top-level item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Add a nested item one level deeper.
    pub fn with_child(mut self, text: impl Into<String>) -> Self {
        let mut child = ListItem::new(text);
        child.level = self.level.saturating_add(1);
        self.children.push(child);
        self
    }

    /// This item plus all nested items.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ListItem::count).sum::<usize>()
    }
}

/// Code payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Source text
    pub code: String,

    /// Language tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Image payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Source URL
    pub url: String,

    /// Alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,

    /// Width / height, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
}

impl ImageBlock {
    /// Usable aspect ratio, falling back to 16:9.
    pub fn aspect(&self) -> f64 {
        self.aspect_ratio
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(DEFAULT_IMAGE_ASPECT_RATIO)
    }
}

impl Element {
    /// Wrap a payload with empty directives and no geometry.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            directives: Directives::default(),
            frame: None,
            object_id: None,
            related_to_next: false,
        }
    }

    /// Create a text element.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Text(TextBlock::new(text)))
    }

    /// Create a heading element.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(ElementKind::Text(TextBlock {
            heading_level: Some(level.clamp(1, 6)),
            ..TextBlock::new(text)
        }))
    }

    /// Create a list element.
    pub fn list(list: ListBlock) -> Self {
        Self::new(ElementKind::List(list))
    }

    /// Create a table element.
    pub fn table(table: TableBlock) -> Self {
        Self::new(ElementKind::Table(table))
    }

    /// Create a code element.
    pub fn code(code: impl Into<String>, language: Option<&str>) -> Self {
        Self::new(ElementKind::Code(CodeBlock {
            code: code.into(),
            language: language.map(str::to_string),
        }))
    }

    /// Create an image element.
    pub fn image(url: impl Into<String>) -> Self {
        Self::new(ElementKind::Image(ImageBlock {
            url: url.into(),
            ..ImageBlock::default()
        }))
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

    /// Set the object id.
    pub fn with_object_id(mut self, id: impl Into<String>) -> Self {
        self.object_id = Some(id.into());
        self
    }

    /// Mark this element as belonging with the next one.
    pub fn related(mut self) -> Self {
        self.related_to_next = true;
        self
    }

    /// The element type tag.
    pub fn element_type(&self) -> ElementType {
        match &self.kind {
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::List(_) => ElementType::List,
            ElementKind::Table(_) => ElementType::Table,
            ElementKind::Code(_) => ElementType::Code,
            ElementKind::Image(_) => ElementType::Image,
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(&self.kind, ElementKind::Text(t) if t.heading_level.is_some())
    }

    /// Check if the element carries no content.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            ElementKind::Text(t) => t.text.trim().is_empty(),
            ElementKind::List(l) => l.items.is_empty(),
            ElementKind::Table(t) => t.is_empty() && !t.has_header(),
            ElementKind::Code(c) => c.code.trim().is_empty(),
            ElementKind::Image(i) => i.url.trim().is_empty(),
        }
    }

    /// Position, if laid out.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.frame.map(|f| f.position())
    }

    /// Size, if laid out.
    pub fn size(&self) -> Option<(f64, f64)> {
        self.frame.map(|f| f.size())
    }

    /// Forget position and size.
    pub fn clear_geometry(&mut self) {
        self.frame = None;
    }
}
