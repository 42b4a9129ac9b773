//! Character-count based height estimator.

use super::Metrics;
use crate::model::{
    CodeBlock, Element, ElementKind, ListBlock, ListItem, MetaElement, MetaRole, TableBlock,
    TextBlock,
};
use serde::{Deserialize, Serialize};

/// Height estimator based on average character widths and fixed line heights.
///
/// All values are in points. The defaults approximate a 14pt body font on a
/// 720x405 slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicMetrics {
    /// Average body character width
    pub char_width: f64,
    /// Body line height
    pub line_height: f64,
    /// Vertical padding above and below a text block
    pub text_padding: f64,
    /// Smallest text block height
    pub min_text_height: f64,
    /// Font size the body values correspond to (for `fontsize` directives)
    pub base_font_size: f64,

    /// Monospace character width
    pub code_char_width: f64,
    /// Code line height
    pub code_line_height: f64,
    /// Padding around a code block
    pub code_padding: f64,
    /// Extra height for the language label
    pub code_label_height: f64,
    /// Smallest code block height
    pub min_code_height: f64,

    /// Indent per list nesting level
    pub list_indent: f64,
    /// Space between list items
    pub list_item_spacing: f64,
    /// Padding around a list
    pub list_padding: f64,
    /// Smallest list height
    pub min_list_height: f64,

    /// Padding inside each table cell
    pub cell_padding: f64,
    /// Narrowest column considered when wrapping cells
    pub min_cell_width: f64,
    /// Extra height around a table
    pub table_padding: f64,
    /// Smallest table height
    pub min_table_height: f64,

    /// Smallest image height
    pub min_image_height: f64,
}

impl Default for HeuristicMetrics {
    fn default() -> Self {
        Self {
            char_width: 5.0,
            line_height: 14.0,
            text_padding: 3.0,
            min_text_height: 18.0,
            base_font_size: 14.0,
            code_char_width: 7.0,
            code_line_height: 16.0,
            code_padding: 10.0,
            code_label_height: 15.0,
            min_code_height: 40.0,
            list_indent: 20.0,
            list_item_spacing: 5.0,
            list_padding: 10.0,
            min_list_height: 30.0,
            cell_padding: 5.0,
            min_cell_width: 20.0,
            table_padding: 10.0,
            min_table_height: 40.0,
            min_image_height: 30.0,
        }
    }
}

/// Typography for one kind of text run.
struct Typography {
    char_width: f64,
    line_height: f64,
    padding: f64,
    min_height: f64,
}

impl HeuristicMetrics {
    /// Create an estimator with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set body character width and line height.
    pub fn with_body_font(mut self, char_width: f64, line_height: f64) -> Self {
        self.char_width = char_width;
        self.line_height = line_height;
        self
    }

    /// Number of visual lines `text` needs in `width` points.
    pub fn line_count(text: &str, width: f64, char_width: f64) -> usize {
        let chars_per_line = ((width.max(1.0) / char_width.max(0.1)).floor() as usize).max(1);
        text.split('\n')
            .map(|line| {
                let len = line.chars().count();
                if len == 0 {
                    1
                } else {
                    len.div_ceil(chars_per_line)
                }
            })
            .sum()
    }

    fn body_typography(&self, scale: f64) -> Typography {
        Typography {
            char_width: self.char_width * scale,
            line_height: self.line_height * scale,
            padding: self.text_padding,
            min_height: self.min_text_height,
        }
    }

    fn heading_scale(level: Option<u8>) -> f64 {
        match level {
            Some(1) => 1.8,
            Some(2) => 1.5,
            Some(3) => 1.3,
            Some(4) => 1.15,
            _ => 1.0,
        }
    }

    fn font_scale(&self, element: &Element) -> Option<f64> {
        element
            .directives
            .style
            .get("fontsize")
            .and_then(|v| v.as_f64().or_else(|| v.as_str()?.trim().parse().ok()))
            .filter(|size| *size > 0.0)
            .map(|size| size / self.base_font_size)
    }

    fn text_height(&self, text: &str, width: f64, typography: &Typography) -> f64 {
        let effective = (width - 4.0).max(10.0);
        let lines = Self::line_count(text, effective, typography.char_width);
        let height = lines as f64 * typography.line_height + typography.padding * 2.0;
        height.max(typography.min_height)
    }

    fn text_block_height(&self, block: &TextBlock, width: f64, font_scale: Option<f64>) -> f64 {
        let scale = font_scale.unwrap_or_else(|| Self::heading_scale(block.heading_level));
        self.text_height(&block.text, width, &self.body_typography(scale))
    }

    fn code_height(&self, block: &CodeBlock, width: f64) -> f64 {
        let inner = (width - self.code_padding * 2.0).max(10.0);
        let lines = Self::line_count(&block.code, inner, self.code_char_width);
        let mut height = lines as f64 * self.code_line_height + self.code_padding * 2.0;
        if block.language.as_deref().is_some_and(|l| !l.is_empty()) {
            height += self.code_label_height;
        }
        height.max(self.min_code_height)
    }

    fn list_item_height(&self, item: &ListItem, width: f64, char_width: f64) -> f64 {
        let indent = self.list_indent * (f64::from(item.level) + 1.0);
        let text_width = (width - indent).max(10.0);
        let lines = Self::line_count(&item.text, text_width, char_width);
        let own = lines as f64 * self.line_height;
        let children: f64 = item
            .children
            .iter()
            .map(|child| self.list_item_height(child, width, char_width) + self.list_item_spacing)
            .sum();
        own + children
    }

    fn list_height(&self, list: &ListBlock, width: f64, scale: f64) -> f64 {
        if list.items.is_empty() {
            return self.min_list_height;
        }
        let char_width = self.char_width * scale;
        let items: f64 = list
            .items
            .iter()
            .map(|item| self.list_item_height(item, width, char_width))
            .sum();
        let spacing = self.list_item_spacing * (list.items.len() - 1) as f64;
        (items + spacing + self.list_padding * 2.0).max(self.min_list_height)
    }

    fn table_row_height(&self, cells: &[String], column_width: f64) -> f64 {
        let inner = (column_width - self.cell_padding * 2.0).max(1.0);
        let lines = cells
            .iter()
            .map(|cell| Self::line_count(cell, inner, self.char_width))
            .max()
            .unwrap_or(1);
        lines as f64 * self.line_height + self.cell_padding * 2.0
    }

    fn table_height(&self, table: &TableBlock, width: f64) -> f64 {
        let columns = table.column_count().max(1);
        let column_width = (width / columns as f64).max(self.min_cell_width);
        let header = if table.has_header() {
            self.table_row_height(table.headers(), column_width)
        } else {
            0.0
        };
        let rows: f64 = table
            .rows()
            .iter()
            .map(|row| self.table_row_height(row, column_width))
            .sum();
        (header + rows + self.table_padding).max(self.min_table_height)
    }

    fn meta_typography(&self, role: MetaRole) -> Typography {
        match role {
            MetaRole::Title => Typography {
                char_width: self.char_width * 1.8,
                line_height: self.line_height * 2.0,
                padding: 5.0,
                min_height: 30.0,
            },
            MetaRole::Subtitle => Typography {
                char_width: self.char_width * 1.4,
                line_height: self.line_height * 1.4,
                padding: 4.0,
                min_height: 24.0,
            },
            MetaRole::Footer => Typography {
                char_width: self.char_width * 0.9,
                line_height: self.line_height * 0.9,
                padding: 2.0,
                min_height: 20.0,
            },
        }
    }
}

impl Metrics for HeuristicMetrics {
    fn height_for(&self, element: &Element, available_width: f64) -> f64 {
        let width = available_width.max(1.0);
        let scale = self.font_scale(element);
        let height = match &element.kind {
            ElementKind::Text(block) => self.text_block_height(block, width, scale),
            ElementKind::Code(block) => self.code_height(block, width),
            ElementKind::List(list) => self.list_height(list, width, scale.unwrap_or(1.0)),
            ElementKind::Table(table) => self.table_height(table, width),
            ElementKind::Image(image) => (width / image.aspect()).max(self.min_image_height),
        };
        log::trace!(
            "estimated {} height {:.1} at width {:.1}",
            element.element_type(),
            height,
            width
        );
        height
    }

    fn meta_height_for(&self, meta: &MetaElement, available_width: f64) -> f64 {
        // Footers may carry HTML comments from the source markdown
        let text = if meta.role == MetaRole::Footer {
            strip_comments(&meta.text)
        } else {
            meta.text.clone()
        };
        self.text_height(
            text.trim(),
            available_width.max(1.0),
            &self.meta_typography(meta.role),
        )
    }
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start..].find("-->") {
            Some(end) => rest = &rest[start + end + 3..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}
