//! Two-pass slide layout.
//!
//! Pass one walks the section tree bottom-up and gives every node a size.
//! A section resolves its own width and height before descending, so its
//! children know whether their percentage directives refer to a fixed
//! parent or to the page's content area. Pass two walks top-down and turns
//! sizes into absolute positions. Content that does not fit its container
//! is left extending past the container edge; the overflow engine decides
//! what to do with it.

use super::config::{LayoutOptions, PageConfig, Zones};
use super::dimension::{
    parse_dimension, percentage_reference, resolve_dimensions, resolve_single, Axis, Dimension,
};
use crate::metrics::{HeuristicMetrics, Metrics};
use crate::model::{
    Directives, Element, ElementKind, Frame, HorizontalAlign, MetaElement, MetaRole, Section,
    SectionBody, SectionKind, Slide, VerticalAlign,
};
use std::fmt;
use std::sync::Arc;

/// Id of the section synthesized around a slide's loose elements.
pub const IMPLICIT_ROOT_ID: &str = "root";

const META_ROLES: [MetaRole; 3] = [MetaRole::Title, MetaRole::Subtitle, MetaRole::Footer];

/// Positions slide content inside fixed header, body and footer zones.
#[derive(Clone)]
pub struct LayoutEngine {
    page: PageConfig,
    options: LayoutOptions,
    metrics: Arc<dyn Metrics>,
    zones: Zones,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("page", &self.page)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Ancestor path carried through a traversal.
///
/// Stops descent into a section whose id already appears above it, or
/// once the nesting limit is reached.
struct Guard {
    path: Vec<String>,
    max_depth: usize,
    report: bool,
}

impl Guard {
    fn new(max_depth: usize, report: bool) -> Self {
        Self {
            path: Vec::new(),
            max_depth,
            report,
        }
    }

    fn enter(&mut self, id: &str) -> bool {
        if self.path.len() >= self.max_depth {
            if self.report {
                log::warn!(
                    "section '{}' exceeds maximum nesting depth {}; children skipped",
                    id,
                    self.max_depth
                );
            }
            return false;
        }
        if !id.is_empty() && self.path.iter().any(|p| p == id) {
            if self.report {
                log::warn!(
                    "section '{}' repeats an ancestor id ({}); children skipped",
                    id,
                    self.path.join(" > ")
                );
            }
            return false;
        }
        self.path.push(id.to_string());
        true
    }

    fn leave(&mut self) {
        self.path.pop();
    }
}

impl LayoutEngine {
    /// Create an engine with default options and heuristic metrics.
    pub fn new(page: PageConfig) -> Self {
        Self {
            zones: page.zones(),
            page,
            options: LayoutOptions::default(),
            metrics: Arc::new(HeuristicMetrics::default()),
        }
    }

    /// Set layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the height estimator.
    pub fn with_metrics(mut self, metrics: Arc<dyn Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Page geometry.
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// Layout options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Height estimator.
    pub fn metrics(&self) -> &Arc<dyn Metrics> {
        &self.metrics
    }

    /// All three zones.
    pub fn zones(&self) -> Zones {
        self.zones
    }

    pub fn header_zone(&self) -> Frame {
        self.zones.header
    }

    pub fn body_zone(&self) -> Frame {
        self.zones.body
    }

    pub fn footer_zone(&self) -> Frame {
        self.zones.footer
    }

    /// Lay out a slide and return it.
    pub fn layout(&self, slide: Slide) -> Slide {
        let mut slide = slide;
        self.layout_in_place(&mut slide);
        slide
    }

    /// Lay out a slide in place.
    pub fn layout_in_place(&self, slide: &mut Slide) {
        sync_meta(slide);
        self.layout_meta(slide);
        self.layout_body(slide);

        log::debug!(
            "laid out slide '{}': {} sections, content bottom {:.1} of {:.1}",
            slide.object_id,
            slide.sections.len(),
            slide
                .sections
                .iter()
                .filter_map(|s| s.frame)
                .map(|f| f.bottom())
                .fold(self.zones.body.y, f64::max),
            self.zones.body.bottom()
        );
    }

    fn layout_meta(&self, slide: &mut Slide) {
        let fallback = slide.directives.horizontal_align().unwrap_or_default();
        let header = self.zones.header;
        let footer = self.zones.footer;
        let mut cursor = header.y;

        for role in [MetaRole::Title, MetaRole::Subtitle] {
            if let Some(meta) = slide.meta.iter_mut().find(|m| m.role == role) {
                let (width, height) = self.meta_size(meta, header.width);
                let align = meta.directives.horizontal_align().unwrap_or(fallback);
                let x = header.x + align.offset(header.width, width);
                meta.frame = Some(Frame::new(x, cursor, width, height));
                cursor += height + self.options.meta_spacing;
            }
        }
        if cursor - self.options.meta_spacing > header.bottom() {
            log::debug!(
                "title block of slide '{}' runs {:.1}pt past the header zone",
                slide.object_id,
                cursor - self.options.meta_spacing - header.bottom()
            );
        }

        if let Some(meta) = slide.meta.iter_mut().find(|m| m.role == MetaRole::Footer) {
            let (width, mut height) = self.meta_size(meta, footer.width);
            if footer.height > 0.0 {
                height = height.min(footer.height);
            }
            let align = meta.directives.horizontal_align().unwrap_or(fallback);
            let x = footer.x + align.offset(footer.width, width);
            meta.frame = Some(Frame::new(x, footer.bottom() - height, width, height));
        }
    }

    fn meta_size(&self, meta: &MetaElement, zone_width: f64) -> (f64, f64) {
        let width = resolve_single(
            parse_dimension(&meta.directives, Axis::Width),
            zone_width,
            zone_width,
        )
        .unwrap_or(zone_width);
        (width, self.metrics.meta_height_for(meta, width).max(0.0))
    }

    fn layout_body(&self, slide: &mut Slide) {
        if !slide.elements.is_empty() {
            let elements = std::mem::take(&mut slide.elements);
            slide
                .sections
                .push(Section::content(IMPLICIT_ROOT_ID).with_elements(elements));
        }
        if slide.sections.is_empty() {
            return;
        }

        let body = self.zones.body;
        let parent = slide.directives.clone();

        let mut guard = Guard::new(self.options.max_depth, true);
        self.measure_stack(
            &mut slide.sections,
            body.width,
            body.width,
            body.height,
            &parent,
            &mut guard,
        );

        let mut guard = Guard::new(self.options.max_depth, false);
        self.position_stack(
            &mut slide.sections,
            body,
            self.stack_gap(&parent),
            parent.horizontal_align().unwrap_or_default(),
            parent.vertical_align().unwrap_or_default(),
            &mut guard,
        );
    }

    fn stack_gap(&self, directives: &Directives) -> f64 {
        directives
            .gap_points()
            .unwrap_or(self.options.vertical_spacing)
    }

    fn row_gap(&self, directives: &Directives) -> f64 {
        directives
            .gap_points()
            .unwrap_or(self.options.horizontal_spacing)
    }

    fn padding(&self, directives: &Directives) -> f64 {
        if directives.padding.is_some() {
            directives.padding_points()
        } else {
            self.options.default_padding
        }
    }

    fn spacing_after(&self, element: &Element, gap: f64) -> f64 {
        if element.related_to_next || element.is_heading() {
            gap * self.options.related_spacing_factor
        } else {
            gap
        }
    }

    // Pass one: sizes

    fn measure_section(
        &self,
        section: &mut Section,
        width: f64,
        width_fixed: bool,
        height: Option<f64>,
        guard: &mut Guard,
    ) -> f64 {
        if !guard.enter(&section.id) {
            let height = height.unwrap_or(0.0);
            section.frame = Some(Frame::sized(width, height));
            return height;
        }

        let padding = self.padding(&section.directives).min(width / 2.0);
        let content_width = (width - padding * 2.0).max(0.0);
        let content_height = height.map(|h| (h - padding * 2.0).max(0.0));

        let area = self.zones.body;
        let width_ref = percentage_reference(width_fixed, content_width, area.width);
        let height_ref = percentage_reference(
            content_height.is_some(),
            content_height.unwrap_or(0.0),
            area.height,
        );

        let inner = match &mut section.body {
            SectionBody::Empty => 0.0,
            SectionBody::Elements(elements) => {
                self.measure_elements(elements, content_width, height_ref, &section.directives)
            }
            SectionBody::Subsections(children) => match section.kind {
                SectionKind::Row => self.measure_row(
                    children,
                    content_width,
                    content_height,
                    height_ref,
                    &section.directives,
                    guard,
                ),
                SectionKind::Content => self.measure_stack(
                    children,
                    content_width,
                    width_ref,
                    height_ref,
                    &section.directives,
                    guard,
                ),
            },
        };
        guard.leave();

        let height = height.unwrap_or(inner + padding * 2.0);
        section.frame = Some(Frame::sized(width, height));
        height
    }

    /// Sizes vertically stacked sections; returns the stack height.
    fn measure_stack(
        &self,
        children: &mut [Section],
        content_width: f64,
        width_ref: f64,
        height_ref: f64,
        parent: &Directives,
        guard: &mut Guard,
    ) -> f64 {
        if children.is_empty() {
            return 0.0;
        }
        let gap = self.stack_gap(parent);
        for child in children.iter_mut() {
            child.directives.inherit_from(parent);
        }

        // Explicit heights share the reference height; implicit ones are intrinsic
        let heights: Vec<Option<Dimension>> = children
            .iter()
            .map(|c| parse_dimension(&c.directives, Axis::Height))
            .collect();
        let explicit = if heights.iter().any(Option::is_some) {
            resolve_dimensions(&heights, height_ref, gap, self.options.min_implicit_size)
        } else {
            Vec::new()
        };

        let mut total = 0.0;
        for (index, child) in children.iter_mut().enumerate() {
            let width_dim = parse_dimension(&child.directives, Axis::Width);
            let width = resolve_single(width_dim, width_ref, content_width).unwrap_or(content_width);
            let height = heights[index].map(|_| explicit[index]);
            total += self.measure_section(child, width, width_dim.is_some(), height, guard);
        }
        total + gap * (children.len() - 1) as f64
    }

    /// Sizes side-by-side sections; returns the row's content height.
    fn measure_row(
        &self,
        children: &mut [Section],
        content_width: f64,
        content_height: Option<f64>,
        height_ref: f64,
        parent: &Directives,
        guard: &mut Guard,
    ) -> f64 {
        let gap = self.row_gap(parent);
        for child in children.iter_mut() {
            child.directives.inherit_from(parent);
        }

        let dims: Vec<Option<Dimension>> = children
            .iter()
            .map(|c| parse_dimension(&c.directives, Axis::Width))
            .collect();
        let widths = resolve_dimensions(&dims, content_width, gap, self.options.min_implicit_size);

        let mut tallest: f64 = 0.0;
        for (child, width) in children.iter_mut().zip(widths) {
            let height = resolve_single(
                parse_dimension(&child.directives, Axis::Height),
                height_ref,
                height_ref,
            );
            tallest = tallest.max(self.measure_section(child, width, true, height, guard));
        }
        content_height.unwrap_or(tallest)
    }

    /// Sizes stacked elements; returns the stack height.
    fn measure_elements(
        &self,
        elements: &mut [Element],
        content_width: f64,
        height_ref: f64,
        parent: &Directives,
    ) -> f64 {
        let gap = self.stack_gap(parent);
        let count = elements.len();
        let mut total = 0.0;

        for (index, element) in elements.iter_mut().enumerate() {
            element.directives.inherit_from(parent);
            let (width, height) = self.measure_element(element, content_width, height_ref);
            element.frame = Some(Frame::sized(width, height));
            total += height;
            if index + 1 < count {
                total += self.spacing_after(element, gap);
            }
        }
        total
    }

    fn measure_element(&self, element: &Element, content_width: f64, height_ref: f64) -> (f64, f64) {
        let width = resolve_single(
            parse_dimension(&element.directives, Axis::Width),
            content_width,
            content_width,
        )
        .unwrap_or(content_width);

        match &element.kind {
            ElementKind::Image(_) => self.fit_image(element, width, height_ref),
            _ => (width, self.metrics.height_for(element, width).max(0.0)),
        }
    }

    /// Scales an image into its width and height limits, keeping its aspect ratio.
    fn fit_image(&self, element: &Element, width: f64, height_ref: f64) -> (f64, f64) {
        let limit = resolve_single(
            parse_dimension(&element.directives, Axis::Height),
            height_ref,
            height_ref,
        )
        .unwrap_or(height_ref);
        let natural = self.metrics.height_for(element, width).max(0.0);

        if natural > limit && natural > 0.0 {
            let scale = limit / natural;
            (width * scale, limit)
        } else {
            (width, natural)
        }
    }

    // Pass two: positions

    fn position_section(
        &self,
        section: &mut Section,
        x: f64,
        y: f64,
        forced_height: Option<f64>,
        guard: &mut Guard,
    ) {
        let Some(frame) = section.frame else {
            return;
        };
        let mut frame = frame.at(x, y);
        if let Some(height) = forced_height {
            frame.height = height;
        }
        section.frame = Some(frame);

        if !guard.enter(&section.id) {
            return;
        }

        let padding = self.padding(&section.directives).min(frame.width / 2.0);
        let inner = Frame::new(
            x + padding,
            y + padding,
            (frame.width - padding * 2.0).max(0.0),
            (frame.height - padding * 2.0).max(0.0),
        );
        let halign = section.directives.horizontal_align().unwrap_or_default();
        let valign = section.directives.vertical_align().unwrap_or_default();

        match &mut section.body {
            SectionBody::Empty => {}
            SectionBody::Elements(elements) => {
                let gap = self.stack_gap(&section.directives);
                self.position_elements(elements, inner, gap, halign, valign, &section.id);
            }
            SectionBody::Subsections(children) => match section.kind {
                SectionKind::Row => {
                    let gap = self.row_gap(&section.directives);
                    self.position_row(children, inner, gap, halign, guard);
                }
                SectionKind::Content => {
                    let gap = self.stack_gap(&section.directives);
                    self.position_stack(children, inner, gap, halign, valign, guard);
                }
            },
        }
        guard.leave();
    }

    fn position_stack(
        &self,
        children: &mut [Section],
        inner: Frame,
        gap: f64,
        halign: HorizontalAlign,
        valign: VerticalAlign,
        guard: &mut Guard,
    ) {
        let sized: Vec<Frame> = children.iter().filter_map(|c| c.frame).collect();
        let total = sized.iter().map(|f| f.height).sum::<f64>()
            + gap * sized.len().saturating_sub(1) as f64;

        let mut cursor = inner.y + valign.offset(inner.height, total);
        for child in children.iter_mut() {
            let Some(frame) = child.frame else {
                continue;
            };
            let align = child.directives.horizontal_align().unwrap_or(halign);
            let x = inner.x + align.offset(inner.width, frame.width);
            self.position_section(child, x, cursor, None, guard);
            cursor += frame.height + gap;
        }
    }

    fn position_row(
        &self,
        children: &mut [Section],
        inner: Frame,
        gap: f64,
        halign: HorizontalAlign,
        guard: &mut Guard,
    ) {
        let sized: Vec<Frame> = children.iter().filter_map(|c| c.frame).collect();
        let total = sized.iter().map(|f| f.width).sum::<f64>()
            + gap * sized.len().saturating_sub(1) as f64;

        let mut cursor = inner.x + halign.offset(inner.width, total);
        for child in children.iter_mut() {
            let Some(frame) = child.frame else {
                continue;
            };
            self.position_section(child, cursor, inner.y, Some(inner.height), guard);
            cursor += frame.width + gap;
        }
    }

    fn position_elements(
        &self,
        elements: &mut [Element],
        inner: Frame,
        gap: f64,
        halign: HorizontalAlign,
        valign: VerticalAlign,
        section_id: &str,
    ) {
        let count = elements.len();
        let total: f64 = elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let height = element.frame.map(|f| f.height).unwrap_or(0.0);
                if index + 1 < count {
                    height + self.spacing_after(element, gap)
                } else {
                    height
                }
            })
            .sum();

        let mut cursor = inner.y + valign.offset(inner.height, total);
        for (index, element) in elements.iter_mut().enumerate() {
            let spacing = self.spacing_after(element, gap);
            let Some(frame) = element.frame else {
                continue;
            };
            let align = element.directives.horizontal_align().unwrap_or(halign);
            let placed = frame.at(inner.x + align.offset(inner.width, frame.width), cursor);
            if placed.bottom() > inner.bottom() + 0.5 {
                log::debug!(
                    "{} element {} extends {:.1}pt past section '{}'",
                    element.element_type(),
                    index,
                    placed.bottom() - inner.bottom(),
                    section_id
                );
            }
            element.frame = Some(placed);
            cursor += frame.height + spacing;
        }
    }
}

/// Makes the meta list agree with the slide's title, subtitle and footer.
///
/// A meta element without a matching slide field supplies the field's text.
fn sync_meta(slide: &mut Slide) {
    for role in META_ROLES {
        let text = slide.meta_text(role).map(str::to_string);
        let index = slide.meta.iter().position(|m| m.role == role);
        match (text, index) {
            (Some(text), Some(index)) => slide.meta[index].text = text,
            (Some(text), None) => slide.meta.push(MetaElement::new(role, text)),
            (None, Some(index)) => {
                let text = slide.meta[index].text.clone();
                match role {
                    MetaRole::Title => slide.title = Some(text),
                    MetaRole::Subtitle => slide.subtitle = Some(text),
                    MetaRole::Footer => slide.footer = Some(text),
                }
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Directives, ImageBlock, DEFAULT_IMAGE_ASPECT_RATIO};

    fn engine() -> LayoutEngine {
        LayoutEngine::new(PageConfig::widescreen())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn frame(section: &Section) -> Frame {
        section.frame.expect("section was laid out")
    }

    #[test]
    fn test_implicit_root_section() {
        let slide = Slide::new("s1").with_elements(vec![Element::text("Hello")]);
        let slide = engine().layout(slide);

        assert!(slide.elements.is_empty());
        assert_eq!(slide.sections.len(), 1);
        assert_eq!(slide.sections[0].id, IMPLICIT_ROOT_ID);

        let element = &slide.sections[0].elements()[0];
        assert_eq!(element.frame, Some(Frame::new(50.0, 140.0, 620.0, 20.0)));
        assert_eq!(frame(&slide.sections[0]), Frame::new(50.0, 140.0, 620.0, 20.0));
    }

    #[test]
    fn test_row_equal_columns() {
        let row = Section::row("cols").with_subsections(vec![
            Section::content("a").with_elements(vec![Element::text("one")]),
            Section::content("b").with_elements(vec![Element::text("1\n2\n3")]),
            Section::content("c"),
        ]);
        let slide = engine().layout(Slide::new("s").with_sections(vec![row]));

        let row = &slide.sections[0];
        let columns = row.subsections();
        assert_eq!(frame(&columns[0]), Frame::new(50.0, 140.0, 200.0, 48.0));
        assert_eq!(frame(&columns[1]), Frame::new(260.0, 140.0, 200.0, 48.0));
        assert_eq!(frame(&columns[2]), Frame::new(470.0, 140.0, 200.0, 48.0));
        assert_eq!(frame(row).height, 48.0);
    }

    #[test]
    fn test_row_mixed_widths() {
        let row = Section::row("cols").with_subsections(vec![
            Section::content("a").with_directives(Directives::new().with_width(0.3)),
            Section::content("b"),
            Section::content("c").with_directives(Directives::new().with_width("50%")),
        ]);
        let slide = engine().layout(Slide::new("s").with_sections(vec![row]));

        let widths: Vec<f64> = slide.sections[0]
            .subsections()
            .iter()
            .map(|c| frame(c).width)
            .collect();
        assert!(approx(widths[0], 180.0));
        assert!(approx(widths[1], 120.0));
        assert!(approx(widths[2], 300.0));
    }

    #[test]
    fn test_sections_stack_with_spacing() {
        let slide = Slide::new("s").with_sections(vec![
            Section::content("first").with_elements(vec![Element::text("a")]),
            Section::content("second").with_elements(vec![Element::text("b")]),
        ]);
        let slide = engine().layout(slide);

        assert_eq!(frame(&slide.sections[0]).y, 140.0);
        assert_eq!(frame(&slide.sections[1]).y, 170.0);
    }

    #[test]
    fn test_explicit_height_is_not_clamped_to_content() {
        let text = (1..=20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let section = Section::content("fixed")
            .with_directives(Directives::new().with_height(100.0))
            .with_elements(vec![Element::text(text)]);
        let slide = engine().layout(Slide::new("s").with_sections(vec![section]));

        let section = &slide.sections[0];
        assert_eq!(frame(section).height, 100.0);
        let element = section.elements()[0].frame.unwrap();
        assert_eq!(element.height, 20.0 * 14.0 + 6.0);
        assert!(element.bottom() > frame(section).bottom());
    }

    #[test]
    fn test_vertical_middle_alignment() {
        let section = Section::content("centered")
            .with_directives(Directives::new().with_height(100.0).with_valign("middle"))
            .with_elements(vec![Element::text("x")]);
        let slide = engine().layout(Slide::new("s").with_sections(vec![section]));

        let element = slide.sections[0].elements()[0].frame.unwrap();
        assert_eq!(element.y, 140.0 + 40.0);
    }

    #[test]
    fn test_element_width_and_alignment() {
        let section = Section::content("main")
            .with_directives(Directives::new().with_align("right"))
            .with_elements(vec![
                Element::text("narrow").with_directives(Directives::new().with_width(0.5))
            ]);
        let slide = engine().layout(Slide::new("s").with_sections(vec![section]));

        let element = slide.sections[0].elements()[0].frame.unwrap();
        assert_eq!(element.width, 310.0);
        assert_eq!(element.x, 50.0 + 310.0);
    }

    #[test]
    fn test_related_spacing_after_heading() {
        let section = Section::content("main").with_elements(vec![
            Element::heading(3, "Heading"),
            Element::text("body"),
            Element::text("after"),
        ]);
        let slide = engine().layout(Slide::new("s").with_sections(vec![section]));

        let elements = slide.sections[0].elements();
        let heading = elements[0].frame.unwrap();
        let body = elements[1].frame.unwrap();
        let after = elements[2].frame.unwrap();
        assert!(approx(body.y - heading.bottom(), 5.0));
        assert!(approx(after.y - body.bottom(), 10.0));
    }

    #[test]
    fn test_meta_zones() {
        let slide = Slide::new("s")
            .with_title("Quarterly review")
            .with_subtitle("Q3")
            .with_footer("ACME");
        let slide = engine().layout(slide);

        let title = slide.meta(MetaRole::Title).unwrap().frame.unwrap();
        let subtitle = slide.meta(MetaRole::Subtitle).unwrap().frame.unwrap();
        let footer = slide.meta(MetaRole::Footer).unwrap().frame.unwrap();

        assert_eq!(title.y, 50.0);
        assert_eq!(title.height, 38.0);
        assert!(approx(subtitle.y, 92.0));
        assert!(approx(footer.bottom(), 355.0));
        assert!(footer.y >= 325.0);
    }

    #[test]
    fn test_meta_alignment_falls_back_to_slide() {
        let mut slide = Slide::new("s").with_title("Title");
        slide.directives = Directives::new().with_align("center");
        slide.meta.push(
            MetaElement::new(MetaRole::Title, "ignored")
                .with_directives(Directives::new().with_width(0.5)),
        );
        let slide = engine().layout(slide);

        let title = slide.meta(MetaRole::Title).unwrap();
        assert_eq!(title.text, "Title");
        let frame = title.frame.unwrap();
        assert_eq!(frame.width, 310.0);
        assert_eq!(frame.x, 50.0 + 155.0);
    }

    #[test]
    fn test_meta_only_input_fills_slide_fields() {
        let mut slide = Slide::new("s");
        slide.meta.push(MetaElement::new(MetaRole::Footer, "Confidential"));
        let slide = engine().layout(slide);
        assert_eq!(slide.footer.as_deref(), Some("Confidential"));
    }

    #[test]
    fn test_image_fits_body_height() {
        let slide = Slide::new("s").with_elements(vec![Element::image("wide.png")]);
        let slide = engine().layout(slide);

        let image = slide.sections[0].elements()[0].frame.unwrap();
        let natural = 620.0 / DEFAULT_IMAGE_ASPECT_RATIO;
        assert!(approx(image.height, 185.0));
        assert!(approx(image.width, 620.0 * 185.0 / natural));
        assert!(approx(image.width / image.height, DEFAULT_IMAGE_ASPECT_RATIO));
    }

    #[test]
    fn test_image_height_directive() {
        let mut element = Element::image("square.png")
            .with_directives(Directives::new().with_height(100.0));
        if let ElementKind::Image(ImageBlock { aspect_ratio, .. }) = &mut element.kind {
            *aspect_ratio = Some(1.0);
        }
        let slide = engine().layout(Slide::new("s").with_elements(vec![element]));

        let image = slide.sections[0].elements()[0].frame.unwrap();
        assert!(approx(image.height, 100.0));
        assert!(approx(image.width, 100.0));
    }

    #[test]
    fn test_percentage_reference_fixed_and_inferred_parent() {
        let child = || {
            Section::content("child").with_directives(Directives::new().with_height("50%"))
        };
        let fixed = Section::content("fixed")
            .with_directives(Directives::new().with_height(100.0))
            .with_subsections(vec![child()]);
        let inferred = Section::content("inferred").with_subsections(vec![child()]);

        let slide = engine().layout(Slide::new("s").with_sections(vec![fixed]));
        assert!(approx(frame(&slide.sections[0].subsections()[0]).height, 50.0));

        let slide = engine().layout(Slide::new("s").with_sections(vec![inferred]));
        assert!(approx(frame(&slide.sections[0].subsections()[0]).height, 92.5));
    }

    #[test]
    fn test_default_padding_applies_without_directive() {
        let engine = engine().with_options(LayoutOptions::new().with_default_padding(8.0));
        let slide = engine.layout(Slide::new("s").with_sections(vec![
            Section::content("plain").with_elements(vec![Element::text("x")]),
            Section::content("flush")
                .with_directives(Directives::new().with_padding(0.0))
                .with_elements(vec![Element::text("y")]),
        ]));

        assert_eq!(frame(&slide.sections[0]).height, 36.0);
        assert_eq!(slide.sections[0].elements()[0].frame.unwrap().x, 58.0);
        assert_eq!(frame(&slide.sections[1]).height, 20.0);
    }

    #[test]
    fn test_padding_shrinks_content_area() {
        let section = Section::content("padded")
            .with_directives(Directives::new().with_padding(20.0))
            .with_elements(vec![Element::text("x")]);
        let slide = engine().layout(Slide::new("s").with_sections(vec![section]));

        let section = &slide.sections[0];
        assert_eq!(frame(section).height, 60.0);
        let element = section.elements()[0].frame.unwrap();
        assert_eq!(element, Frame::new(70.0, 160.0, 580.0, 20.0));
    }

    #[test]
    fn test_repeated_ancestor_id_is_not_descended() {
        let looped = Section::content("a").with_subsections(vec![Section::content("a")
            .with_elements(vec![Element::text("never placed")])]);
        let slide = engine().layout(Slide::new("s").with_sections(vec![looped]));

        let inner = &slide.sections[0].subsections()[0];
        assert_eq!(frame(inner).height, 0.0);
        assert!(inner.elements()[0].frame.is_none());
    }

    #[test]
    fn test_depth_limit() {
        let mut section = Section::content("leaf").with_elements(vec![Element::text("deep")]);
        for depth in 0..4 {
            section = Section::content(format!("level{}", depth)).with_subsections(vec![section]);
        }
        let engine = engine().with_options(LayoutOptions::new().with_max_depth(2));
        let slide = engine.layout(Slide::new("s").with_sections(vec![section]));

        assert!(slide.sections[0].frame.is_some());
        let mut leaf_frames = Vec::new();
        slide.sections[0].for_each_element(&mut |e| leaf_frames.push(e.frame));
        assert_eq!(leaf_frames, vec![None]);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let slide = Slide::new("s")
            .with_title("Title")
            .with_sections(vec![Section::row("r").with_subsections(vec![
                Section::content("a").with_elements(vec![Element::text("left")]),
                Section::content("b").with_elements(vec![Element::code("fn main() {}", Some("rust"))]),
            ])]);
        let once = engine().layout(slide);
        let twice = engine().layout(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_oversized_content_extends_past_body() {
        let text = (1..=30).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let slide = engine().layout(Slide::new("s").with_elements(vec![Element::text(text)]));
        let section = frame(&slide.sections[0]);
        assert!(section.bottom() > engine().body_zone().bottom());
    }
}
