//! Tiling patterns (`makepattern` / `setpattern`).
//!
//! While a pattern is being defined, the handler redirects all drawing
//! into the pattern's container group. Selecting the pattern emits a
//! `<pattern>` definition holding a copy of that group. Uncolored patterns
//! take their color from `setpattern` and get one definition per color.

use rustc_hash::FxHashMap;

use crate::model::Color;
use crate::svg::{SvgDevice, XmlElement};
use crate::utils::{Matrix, Rect, fmt_num, is_identity, matrix2svg, rect2viewbox};

/// Paint type of a tiling pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintType {
    /// Tile colors are part of the pattern definition (paint type 1)
    Colored,
    /// Tile shapes are painted in the color given to `setpattern` (paint type 2)
    Uncolored,
}

impl PaintType {
    pub const fn from_ps(value: i32) -> Self {
        if value == 1 {
            PaintType::Colored
        } else {
            PaintType::Uncolored
        }
    }
}

/// A tiling pattern and the SVG content of one tile.
#[derive(Debug, Clone)]
pub struct TilingPattern {
    id: i32,
    bbox: Rect,
    xstep: f64,
    ystep: f64,
    paint_type: PaintType,
    matrix: Matrix,
    /// Tile content collected during the definition
    group: XmlElement,
    /// Colors a `<pattern>` element has been emitted for; index K is the
    /// variant with id suffix `-K`
    variants: Vec<Color>,
    /// Paint color of uncolored patterns
    color: Color,
    /// SVG id of the most recently applied variant
    svg_id: String,
}

impl TilingPattern {
    pub fn new(
        id: i32,
        bbox: Rect,
        xstep: f64,
        ystep: f64,
        paint_type: PaintType,
        matrix: Matrix,
    ) -> Self {
        Self {
            id,
            bbox,
            xstep,
            ystep,
            paint_type,
            matrix,
            group: XmlElement::new("g"),
            variants: Vec::new(),
            color: Color::BLACK,
            svg_id: format!("pat{id}"),
        }
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub const fn paint_type(&self) -> PaintType {
        self.paint_type
    }

    pub const fn matrix(&self) -> Matrix {
        self.matrix
    }

    pub const fn bbox(&self) -> Rect {
        self.bbox
    }

    /// Container receiving the tile content.
    pub const fn group(&self) -> &XmlElement {
        &self.group
    }

    pub fn append(&mut self, node: XmlElement) {
        self.group.append(node);
    }

    /// Sets the paint color; only meaningful for uncolored patterns.
    pub const fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// SVG id of the variant selected by the last [`apply`](Self::apply).
    pub fn svg_id(&self) -> &str {
        &self.svg_id
    }

    /// Emits the `<pattern>` definition for the current color unless it
    /// exists already, and makes it the referenced variant.
    pub fn apply<D: SvgDevice>(&mut self, device: &mut D) {
        let color = match self.paint_type {
            PaintType::Colored => Color::BLACK,
            PaintType::Uncolored => self.color,
        };
        let (index, emitted) = match self.variants.iter().position(|c| *c == color) {
            Some(index) => (index, true),
            None => {
                self.variants.push(color);
                (self.variants.len() - 1, false)
            }
        };
        self.svg_id = if index == 0 {
            format!("pat{}", self.id)
        } else {
            format!("pat{}-{}", self.id, index)
        };
        if !emitted {
            device.append_to_defs(self.to_svg(index, color));
        }
    }

    fn to_svg(&self, index: usize, color: Color) -> XmlElement {
        let suffix = self.svg_id.trim_start_matches("pat");
        let (x0, y0, x1, y1) = self.bbox;
        let mut pattern = XmlElement::new("pattern");
        pattern.set_attribute("id", self.svg_id.clone());
        pattern.set_num_attribute("x", x0);
        pattern.set_num_attribute("y", y0);
        pattern.set_num_attribute("width", self.xstep);
        pattern.set_num_attribute("height", self.ystep);
        pattern.set_attribute(
            "viewBox",
            rect2viewbox((x0, y0, x0 + self.xstep, y0 + self.ystep)),
        );
        pattern.set_attribute("patternUnits", "userSpaceOnUse");
        if !is_identity(self.matrix) {
            pattern.set_attribute("patternTransform", matrix2svg(self.matrix));
        }
        if self.xstep < x1 - x0 || self.ystep < y1 - y0 {
            pattern.set_attribute("overflow", "visible");
        }

        let clip_id = format!("pc{suffix}");
        let mut rect = XmlElement::new("rect");
        rect.set_num_attribute("x", x0);
        rect.set_num_attribute("y", y0);
        rect.set_attribute("width", fmt_num(x1 - x0));
        rect.set_attribute("height", fmt_num(y1 - y0));
        let mut clip = XmlElement::new("clipPath").with_attribute("id", clip_id.clone());
        clip.append(rect);
        pattern.append(clip);

        let mut group = self.group.clone();
        group.set_attribute("clip-path", format!("url(#{clip_id})"));
        if self.paint_type == PaintType::Uncolored {
            let color = color.svg_color_string();
            group.set_attribute("fill", color.clone());
            group.set_attribute("stroke", color);
        }
        pattern.append(group);
        tracing::trace!(pattern = %self.svg_id, variant = index, "emitting pattern definition");
        pattern
    }
}

/// Registry of tiling patterns keyed by their PostScript id.
#[derive(Debug, Clone, Default)]
pub struct PatternManager {
    patterns: FxHashMap<i32, TilingPattern>,
}

impl PatternManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pattern, replacing an earlier one with the same id.
    pub fn define(&mut self, pattern: TilingPattern) {
        self.patterns.insert(pattern.id(), pattern);
    }

    pub fn get(&self, id: i32) -> Option<&TilingPattern> {
        self.patterns.get(&id)
    }

    pub fn get_mut(&mut self, id: i32) -> Option<&mut TilingPattern> {
        self.patterns.get_mut(&id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.patterns.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::SvgPage;
    use crate::utils::MATRIX_IDENTITY;

    fn pattern(paint_type: PaintType) -> TilingPattern {
        let mut pattern = TilingPattern::new(
            3,
            (0.0, 0.0, 10.0, 10.0),
            10.0,
            10.0,
            paint_type,
            MATRIX_IDENTITY,
        );
        pattern.append(XmlElement::new("path").with_attribute("d", "M0 0H5V5Z"));
        pattern
    }

    #[test]
    fn test_colored_pattern_is_emitted_once() {
        let mut page = SvgPage::new();
        let mut pat = pattern(PaintType::Colored);
        pat.apply(&mut page);
        pat.apply(&mut page);
        assert_eq!(pat.svg_id(), "pat3");
        assert_eq!(page.defs().children().len(), 1);

        let def = &page.defs().children()[0];
        assert_eq!(def.name(), "pattern");
        assert_eq!(def.attribute("patternUnits"), Some("userSpaceOnUse"));
        assert_eq!(def.attribute("viewBox"), Some("0 0 10 10"));
        assert!(!def.has_attribute("patternTransform"));
        assert!(!def.has_attribute("overflow"));
        let group = &def.children()[1];
        assert_eq!(group.attribute("clip-path"), Some("url(#pc3)"));
        assert!(!group.has_attribute("fill"));
    }

    #[test]
    fn test_uncolored_pattern_variants() {
        let mut page = SvgPage::new();
        let mut pat = pattern(PaintType::Uncolored);
        let red = Color::from_rgb(1.0, 0.0, 0.0);
        let blue = Color::from_rgb(0.0, 0.0, 1.0);
        pat.set_color(red);
        pat.apply(&mut page);
        assert_eq!(pat.svg_id(), "pat3");
        pat.set_color(blue);
        pat.apply(&mut page);
        assert_eq!(pat.svg_id(), "pat3-1");
        pat.set_color(red);
        pat.apply(&mut page);
        assert_eq!(pat.svg_id(), "pat3");
        assert_eq!(page.defs().children().len(), 2);

        let second = &page.defs().children()[1];
        assert_eq!(second.attribute("id"), Some("pat3-1"));
        assert_eq!(second.children()[0].attribute("id"), Some("pc3-1"));
        assert_eq!(second.children()[1].attribute("fill"), Some("blue"));
    }

    #[test]
    fn test_overflow_and_transform() {
        let mut page = SvgPage::new();
        let mut pat = TilingPattern::new(
            1,
            (0.0, 0.0, 10.0, 10.0),
            5.0,
            10.0,
            PaintType::Colored,
            (2.0, 0.0, 0.0, 2.0, 0.0, 0.0),
        );
        pat.apply(&mut page);
        let def = &page.defs().children()[0];
        assert_eq!(def.attribute("overflow"), Some("visible"));
        assert_eq!(def.attribute("patternTransform"), Some("matrix(2 0 0 2 0 0)"));
    }

    #[test]
    fn test_manager() {
        let mut manager = PatternManager::new();
        assert!(manager.is_empty());
        manager.define(pattern(PaintType::Colored));
        assert!(manager.contains(3));
        assert_eq!(manager.get(3).map(|p| p.paint_type()), Some(PaintType::Colored));
        manager.define(pattern(PaintType::Uncolored));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get(3).map(|p| p.paint_type()), Some(PaintType::Uncolored));
    }
}
