//! Layout directives attached to sections and elements.
//!
//! Directive values are stored as the parser produced them. Interpretation
//! is lenient and happens at layout time: a value that cannot be understood
//! behaves as if it were absent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Style keys that cascade from a section to its children.
pub const INHERITABLE_STYLE_KEYS: &[&str] = &[
    "color",
    "fontsize",
    "font-family",
    "bold",
    "italic",
    "line-spacing",
];

/// A raw directive value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DirectiveValue {
    /// Numeric literal (`0.5`, `300`)
    Number(f64),
    /// String literal (`"50%"`, `"center"`)
    Text(String),
    /// Anything else the parser emitted
    Other(serde_json::Value),
}

impl DirectiveValue {
    /// Numeric reading of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DirectiveValue::Number(n) if n.is_finite() => Some(*n),
            DirectiveValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl From<f64> for DirectiveValue {
    fn from(value: f64) -> Self {
        DirectiveValue::Number(value)
    }
}

impl From<&str> for DirectiveValue {
    fn from(value: &str) -> Self {
        DirectiveValue::Text(value.to_string())
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl HorizontalAlign {
    /// Parse an alignment keyword.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Self::Left),
            "center" | "centre" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "justify" | "justified" => Some(Self::Justify),
            _ => None,
        }
    }

    /// Offset of a box of `width` inside `available` space.
    ///
    /// Justified boxes are placed like left-aligned ones.
    pub fn offset(self, available: f64, width: f64) -> f64 {
        let free = (available - width).max(0.0);
        match self {
            Self::Left | Self::Justify => 0.0,
            Self::Center => free / 2.0,
            Self::Right => free,
        }
    }
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    /// Parse an alignment keyword.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Some(Self::Top),
            "middle" | "center" => Some(Self::Middle),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Offset of content of `height` inside `available` space.
    pub fn offset(self, available: f64, height: f64) -> f64 {
        let free = (available - height).max(0.0);
        match self {
            Self::Top => 0.0,
            Self::Middle => free / 2.0,
            Self::Bottom => free,
        }
    }
}

/// Directive mapping for a section or element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directives {
    /// Width: absolute points, fraction, or percentage string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<DirectiveValue>,

    /// Height: absolute points, fraction, or percentage string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<DirectiveValue>,

    /// Horizontal alignment keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,

    /// Vertical alignment keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valign: Option<String>,

    /// Inner padding in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<DirectiveValue>,

    /// Spacing between children in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<DirectiveValue>,

    /// Pass-through style keys (color, fontsize, ...)
    #[serde(flatten)]
    pub style: BTreeMap<String, serde_json::Value>,
}

impl Directives {
    /// Create an empty directive set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width directive.
    pub fn with_width(mut self, width: impl Into<DirectiveValue>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Set the height directive.
    pub fn with_height(mut self, height: impl Into<DirectiveValue>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Set the horizontal alignment directive.
    pub fn with_align(mut self, align: impl Into<String>) -> Self {
        self.align = Some(align.into());
        self
    }

    /// Set the vertical alignment directive.
    pub fn with_valign(mut self, valign: impl Into<String>) -> Self {
        self.valign = Some(valign.into());
        self
    }

    /// Set the padding directive.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(DirectiveValue::Number(padding));
        self
    }

    /// Set the gap directive.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = Some(DirectiveValue::Number(gap));
        self
    }

    /// Set a pass-through style key.
    pub fn with_style(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.style.insert(key.into(), value);
        self
    }

    /// Check if no directive is set.
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.align.is_none()
            && self.valign.is_none()
            && self.padding.is_none()
            && self.gap.is_none()
            && self.style.is_empty()
    }

    /// Parsed horizontal alignment, if set and valid.
    pub fn horizontal_align(&self) -> Option<HorizontalAlign> {
        self.align.as_deref().and_then(HorizontalAlign::parse)
    }

    /// Parsed vertical alignment, if set and valid.
    pub fn vertical_align(&self) -> Option<VerticalAlign> {
        self.valign.as_deref().and_then(VerticalAlign::parse)
    }

    /// Padding in points; invalid or negative values read as zero.
    pub fn padding_points(&self) -> f64 {
        self.padding
            .as_ref()
            .and_then(DirectiveValue::as_f64)
            .filter(|p| *p > 0.0)
            .unwrap_or(0.0)
    }

    /// Gap in points, if set to a non-negative number.
    pub fn gap_points(&self) -> Option<f64> {
        self.gap
            .as_ref()
            .and_then(DirectiveValue::as_f64)
            .filter(|g| *g >= 0.0)
    }

    /// Copy inheritable directives from `parent` that are not set here.
    pub fn inherit_from(&mut self, parent: &Directives) {
        if self.align.is_none() {
            self.align.clone_from(&parent.align);
        }
        if self.valign.is_none() {
            self.valign.clone_from(&parent.valign);
        }
        for key in INHERITABLE_STYLE_KEYS {
            if let Some(value) = parent.style.get(*key) {
                self.style
                    .entry((*key).to_string())
                    .or_insert_with(|| value.clone());
            }
        }
    }
}
