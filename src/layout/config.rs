//! Page geometry and layout options.

use crate::error::{Error, Result};
use crate::model::Frame;
use serde::{Deserialize, Serialize};

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Same margin on all four sides.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Margins given clockwise from the top.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Page size, margins and fixed zone heights.
///
/// Every value is required. There is no silent default page; use
/// [`PageConfig::widescreen`] to opt into the common 16:9 geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPageConfig")]
pub struct PageConfig {
    width: f64,
    height: f64,
    margins: Margins,
    header_height: f64,
    footer_height: f64,
}

#[derive(Deserialize)]
struct RawPageConfig {
    width: f64,
    height: f64,
    margins: Margins,
    header_height: f64,
    footer_height: f64,
}

impl TryFrom<RawPageConfig> for PageConfig {
    type Error = Error;

    fn try_from(raw: RawPageConfig) -> Result<Self> {
        PageConfig::new(
            raw.width,
            raw.height,
            raw.margins,
            raw.header_height,
            raw.footer_height,
        )
    }
}

/// The three fixed page zones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zones {
    /// Title and subtitle area
    pub header: Frame,
    /// Section tree area
    pub body: Frame,
    /// Footer area
    pub footer: Frame,
}

impl PageConfig {
    /// Create and validate a page geometry.
    pub fn new(
        width: f64,
        height: f64,
        margins: Margins,
        header_height: f64,
        footer_height: f64,
    ) -> Result<Self> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        };
        let non_negative = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, value
                )))
            }
        };

        positive("page width", width)?;
        positive("page height", height)?;
        non_negative("top margin", margins.top)?;
        non_negative("right margin", margins.right)?;
        non_negative("bottom margin", margins.bottom)?;
        non_negative("left margin", margins.left)?;
        non_negative("header height", header_height)?;
        non_negative("footer height", footer_height)?;

        let config = Self {
            width,
            height,
            margins,
            header_height,
            footer_height,
        };
        positive("body width", config.body_width())?;
        positive("body height", config.body_height())?;
        Ok(config)
    }

    /// 720x405 points, 50pt margins, 90pt header, 30pt footer.
    pub fn widescreen() -> Self {
        Self {
            width: 720.0,
            height: 405.0,
            margins: Margins::uniform(50.0),
            header_height: 90.0,
            footer_height: 30.0,
        }
    }

    /// Parse a page geometry from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn header_height(&self) -> f64 {
        self.header_height
    }

    pub fn footer_height(&self) -> f64 {
        self.footer_height
    }

    /// Width between the side margins.
    pub fn body_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    /// Height left for the body after margins and both fixed zones.
    pub fn body_height(&self) -> f64 {
        self.height
            - self.margins.top
            - self.margins.bottom
            - self.header_height
            - self.footer_height
    }

    /// The header, body and footer rectangles.
    pub fn zones(&self) -> Zones {
        let x = self.margins.left;
        let width = self.body_width();
        let header = Frame::new(x, self.margins.top, width, self.header_height);
        let body = Frame::new(x, header.bottom(), width, self.body_height());
        let footer = Frame::new(x, body.bottom(), width, self.footer_height);
        Zones {
            header,
            body,
            footer,
        }
    }
}

/// Spacing constants and traversal limits for the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Space between vertically stacked children
    pub vertical_spacing: f64,

    /// Space between side-by-side children
    pub horizontal_spacing: f64,

    /// Spacing multiplier between related elements
    pub related_spacing_factor: f64,

    /// Space between title and subtitle
    pub meta_spacing: f64,

    /// Padding for sections without a `padding` directive
    pub default_padding: f64,

    /// Smallest share an implicit section receives when space allows
    pub min_implicit_size: f64,

    /// Deepest section nesting that is laid out
    pub max_depth: usize,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set vertical spacing.
    pub fn with_vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing.max(0.0);
        self
    }

    /// Set horizontal spacing.
    pub fn with_horizontal_spacing(mut self, spacing: f64) -> Self {
        self.horizontal_spacing = spacing.max(0.0);
        self
    }

    /// Set the related-element spacing multiplier.
    pub fn with_related_spacing_factor(mut self, factor: f64) -> Self {
        self.related_spacing_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Set title/subtitle spacing.
    pub fn with_meta_spacing(mut self, spacing: f64) -> Self {
        self.meta_spacing = spacing.max(0.0);
        self
    }

    /// Set the padding used when a section has no directive.
    pub fn with_default_padding(mut self, padding: f64) -> Self {
        self.default_padding = padding.max(0.0);
        self
    }

    /// Set the implicit size floor.
    pub fn with_min_implicit_size(mut self, size: f64) -> Self {
        self.min_implicit_size = size.max(0.0);
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            vertical_spacing: 10.0,
            horizontal_spacing: 10.0,
            related_spacing_factor: 0.5,
            meta_spacing: 4.0,
            default_padding: 0.0,
            min_implicit_size: 20.0,
            max_depth: 64,
        }
    }
}
