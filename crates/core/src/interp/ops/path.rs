//! Path construction and painting operators.
//!
//! Handles: moveto, lineto, curveto, closepath, newpath, querypos, stroke,
//! fill, eofill
//!
//! Path construction:
//! - moveto/lineto/curveto/closepath: Append segments in user space
//! - newpath: Discard the current path
//!
//! Path painting:
//! - stroke: Outline the path with the current line style
//! - fill/eofill: Fill the path (nonzero/even-odd rule)
//!
//! Painted paths are transformed to device space before they are emitted,
//! since the SVG containers they go into carry no transformation.

use crate::interp::handler::PsGraphicsHandler;
use crate::interp::pattern::PaintType;
use crate::model::{Color, LineCap};
use crate::path::GraphicsPath;
use crate::svg::{SvgDevice, XmlElement};
use crate::utils::{Rect, apply_matrix_rect, fmt_num, rect_expand, rect_intersect};

impl<'a, D: SvgDevice> PsGraphicsHandler<'a, D> {
    // ========================================================================
    // Path Construction Operators
    // ========================================================================

    /// Begins a new subpath at the given point.
    ///
    /// PostScript operator: `moveto`
    pub fn do_moveto(&mut self, x: f64, y: f64) {
        self.path.move_to(x, y);
    }

    /// PostScript operator: `lineto`
    pub fn do_lineto(&mut self, x: f64, y: f64) {
        self.path.line_to(x, y);
    }

    /// Appends a cubic Bezier curve from the current point to (x3, y3).
    ///
    /// PostScript operator: `curveto`
    pub fn do_curveto(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.path.cubic_to(x1, y1, x2, y2, x3, y3);
    }

    /// PostScript operator: `closepath`
    pub fn do_closepath(&mut self) {
        self.path.close_path();
    }

    /// Clears the current path.
    ///
    /// A `newpath` issued while drawing (`drawing` is true) keeps a clip
    /// path that `clippath` loaded into the current path.
    ///
    /// PostScript operator: `newpath`
    pub fn do_newpath(&mut self, drawing: bool) {
        if !drawing || !self.clip_stack.clippath_loaded() {
            self.path.clear();
            self.clip_stack.set_clippath_loaded(false);
        }
    }

    /// Records the current point as reported by the interpreter.
    ///
    /// PostScript operator: `querypos`
    pub const fn do_querypos(&mut self, x: f64, y: f64) {
        self.current_point = Some((x, y));
    }

    // ========================================================================
    // Path Painting Operators
    // ========================================================================

    /// Strokes the current path with the current line style.
    ///
    /// A path consisting of a single point is drawn as a dot if round line
    /// caps are selected, and not at all otherwise.
    ///
    /// PostScript operator: `stroke`
    pub fn do_stroke(&mut self) {
        let Some(mut path) = self.take_paint_path() else {
            return;
        };
        path.transform(self.graphicstate.ctm);
        self.prepend_loaded_clip(&mut path);

        let gs = &self.graphicstate;
        let color = self.stroke_color();
        let (mut node, bbox) = if let Some((x, y)) = path.is_dot() {
            if gs.linecap != LineCap::Round {
                return;
            }
            let r = gs.linewidth / 2.0;
            let mut circle = XmlElement::new("circle");
            circle.set_num_attribute("cx", x);
            circle.set_num_attribute("cy", y);
            circle.set_num_attribute("r", r);
            if let Some(color) = color {
                circle.set_attribute("fill", color);
            }
            (circle, Some((x - r, y - r, x + r, y + r)))
        } else {
            let mut elem = XmlElement::new("path");
            elem.set_attribute("d", path.to_svg(self.params.path_format));
            if let Some(color) = color {
                elem.set_attribute("stroke", color);
            }
            elem.set_attribute("fill", "none");
            if gs.linewidth != 1.0 {
                elem.set_num_attribute("stroke-width", gs.linewidth);
            }
            if gs.miterlimit != 4.0 {
                elem.set_num_attribute("stroke-miterlimit", gs.miterlimit);
            }
            if let Some(cap) = gs.linecap.svg_value() {
                elem.set_attribute("stroke-linecap", cap);
            }
            if let Some(join) = gs.linejoin.svg_value() {
                elem.set_attribute("stroke-linejoin", join);
            }
            if gs.opacity < 1.0 {
                elem.set_num_attribute("stroke-opacity", gs.opacity);
            }
            if !gs.dashpattern.is_empty() {
                let dasharray: Vec<String> = gs.dashpattern.iter().map(|v| fmt_num(*v)).collect();
                elem.set_attribute("stroke-dasharray", dasharray.join(","));
                if gs.dashoffset != 0.0 {
                    elem.set_num_attribute("stroke-dashoffset", gs.dashoffset);
                }
            }
            let bbox = path.bbox().map(|b| rect_expand(b, gs.linewidth / 2.0));
            (elem, bbox)
        };
        let bbox = self.assign_clip(&mut node, bbox);
        self.paint(node, bbox);
    }

    /// Fills the current path with the current color or pattern.
    ///
    /// PostScript operators: `fill` (nonzero), `eofill` (even-odd)
    pub fn do_fill(&mut self, evenodd: bool) {
        let Some(mut path) = self.take_paint_path() else {
            return;
        };
        let ctm = self.graphicstate.ctm;
        let bbox = path.bbox().map(|b| apply_matrix_rect(ctm, b));
        path.transform(ctm);
        self.prepend_loaded_clip(&mut path);

        let mut node = XmlElement::new("path");
        node.set_attribute("d", path.to_svg(self.params.path_format));
        if let Some(fill) = self.fill_color() {
            node.set_attribute("fill", fill);
        }
        let bbox = self.assign_clip(&mut node, bbox);
        if evenodd {
            node.set_attribute("fill-rule", "evenodd");
        }
        if self.graphicstate.opacity < 1.0 {
            node.set_num_attribute("fill-opacity", self.graphicstate.opacity);
        }
        self.paint(node, bbox);
    }

    /// Removes the current path for painting. Returns None if there is
    /// nothing to paint.
    fn take_paint_path(&mut self) -> Option<GraphicsPath> {
        self.path.remove_redundant_commands();
        if self.path.is_empty() && !self.clip_stack.clippath_loaded() {
            return None;
        }
        Some(std::mem::take(&mut self.path))
    }

    fn prepend_loaded_clip(&self, path: &mut GraphicsPath) {
        if self.clip_stack.clippath_loaded() {
            if let Some(clip) = self.clip_stack.top() {
                path.prepend(clip);
            }
        }
    }

    /// Attaches the clip path in effect to `node` and returns `bbox`
    /// restricted to the clipped area. An empty clip region leaves no
    /// bounding box.
    fn assign_clip(&mut self, node: &mut XmlElement, bbox: Option<Rect>) -> Option<Rect> {
        let id = self.clip_stack.top_id();
        let Some(clipbox) = self.clip_stack.top().map(GraphicsPath::bbox) else {
            return bbox;
        };
        node.set_attribute("clip-path", format!("url(#clip{id})"));
        self.clip_stack.set_clippath_loaded(false);
        match (bbox, clipbox) {
            (Some(b), Some(c)) => rect_intersect(b, c),
            (None, c) => c,
            (_, None) => None,
        }
    }

    fn paint(&mut self, node: XmlElement, bbox: Option<Rect>) {
        self.append_node(node);
        if let Some(bbox) = bbox {
            self.embed(bbox);
        }
    }

    /// Fill attribute for the current color or pattern. Black is the SVG
    /// default and only written inside colored pattern definitions; inside
    /// uncolored ones the color is inherited from the pattern.
    fn fill_color(&self) -> Option<String> {
        let active = self.graphicstate.pattern.and_then(|id| self.patterns.get(id));
        if let Some(pattern) = active {
            return Some(format!("url(#{})", pattern.svg_id()));
        }
        let color = self.graphicstate.color;
        match self.defined_pattern_type() {
            Some(PaintType::Uncolored) => None,
            Some(PaintType::Colored) => Some(color.svg_color_string()),
            None => (color != Color::BLACK).then(|| color.svg_color_string()),
        }
    }

    fn stroke_color(&self) -> Option<String> {
        match self.defined_pattern_type() {
            Some(PaintType::Uncolored) => None,
            _ => Some(self.graphicstate.color.svg_color_string()),
        }
    }
}
