//! SVG Device - output interface for the graphics handler.
//!
//! The handler emits finished nodes through the `SvgDevice` trait. `SvgPage`
//! is the standard implementation that collects a single page and renders
//! it as a standalone SVG document.

use std::fmt::Write as _;

use super::node::XmlElement;
use crate::utils::{Rect, fmt_num, rect2viewbox, rect_union};

/// SVG Device trait - receives the nodes produced by the graphics handler.
pub trait SvgDevice {
    /// Append a node to the page contents.
    fn append_to_page(&mut self, _node: XmlElement) {}

    /// Append a node to the document's `<defs>` section.
    fn append_to_defs(&mut self, _node: XmlElement) {}

    /// Extend the page bounding box by a rectangle in page coordinates.
    fn embed(&mut self, _bbox: Rect) {}
}

/// A page collecting nodes, definitions and its bounding box.
#[derive(Debug, Clone)]
pub struct SvgPage {
    page: XmlElement,
    defs: XmlElement,
    bbox: Option<Rect>,
}

impl Default for SvgPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgPage {
    pub fn new() -> Self {
        Self {
            page: XmlElement::new("g").with_attribute("id", "page1"),
            defs: XmlElement::new("defs"),
            bbox: None,
        }
    }

    /// Page group holding the drawn shapes.
    pub const fn page(&self) -> &XmlElement {
        &self.page
    }

    pub const fn defs(&self) -> &XmlElement {
        &self.defs
    }

    /// Union of all embedded rectangles, None if nothing was drawn.
    pub const fn bbox(&self) -> Option<Rect> {
        self.bbox
    }

    /// Renders the page as a standalone SVG document whose viewBox is the
    /// page bounding box.
    pub fn to_svg_document(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str("<svg version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\"");
        if let Some(bbox) = self.bbox {
            let _ = write!(
                out,
                " width=\"{}pt\" height=\"{}pt\" viewBox=\"{}\"",
                fmt_num(bbox.2 - bbox.0),
                fmt_num(bbox.3 - bbox.1),
                rect2viewbox(bbox)
            );
        }
        out.push_str(">\n");
        if !self.defs.is_empty() {
            let _ = writeln!(out, "{}", self.defs);
        }
        let _ = writeln!(out, "{}", self.page);
        out.push_str("</svg>\n");
        out
    }
}

impl SvgDevice for SvgPage {
    fn append_to_page(&mut self, node: XmlElement) {
        self.page.append(node);
    }

    fn append_to_defs(&mut self, node: XmlElement) {
        self.defs.append(node);
    }

    fn embed(&mut self, bbox: Rect) {
        self.bbox = Some(self.bbox.map_or(bbox, |b| rect_union(b, bbox)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_accumulates_bbox() {
        let mut page = SvgPage::new();
        assert_eq!(page.bbox(), None);
        page.embed((0.0, 0.0, 10.0, 10.0));
        page.embed((-5.0, 2.0, 3.0, 20.0));
        assert_eq!(page.bbox(), Some((-5.0, 0.0, 10.0, 20.0)));
    }

    #[test]
    fn test_svg_document() {
        let mut page = SvgPage::new();
        page.append_to_defs(XmlElement::new("clipPath").with_attribute("id", "clip1"));
        page.append_to_page(XmlElement::new("path").with_attribute("d", "M0 0H10"));
        page.embed((0.0, 0.0, 10.0, 5.0));
        let doc = page.to_svg_document();
        assert!(doc.contains(r#"viewBox="0 0 10 5""#));
        assert!(doc.contains(r#"<defs><clipPath id="clip1"/></defs>"#));
        assert!(doc.contains(r#"<g id="page1"><path d="M0 0H10"/></g>"#));
        assert!(doc.ends_with("</svg>\n"));
    }
}
