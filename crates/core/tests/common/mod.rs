//! Shared helpers for the integration tests.

#![allow(dead_code)]

use psvg_core::params::ConversionParams;
use psvg_core::svg::{SvgDevice, XmlElement};
use psvg_core::utils::{Rect, rect_union};
use psvg_core::PsGraphicsHandler;

/// Mock device for testing - records the emitted nodes and bounding boxes.
#[derive(Debug, Default)]
pub struct MockDevice {
    pub page: Vec<XmlElement>,
    pub defs: Vec<XmlElement>,
    pub embedded: Vec<Rect>,
}

impl SvgDevice for MockDevice {
    fn append_to_page(&mut self, node: XmlElement) {
        self.page.push(node);
    }

    fn append_to_defs(&mut self, node: XmlElement) {
        self.defs.push(node);
    }

    fn embed(&mut self, bbox: Rect) {
        self.embedded.push(bbox);
    }
}

impl MockDevice {
    /// Union of all embedded rectangles.
    pub fn bbox(&self) -> Option<Rect> {
        self.embedded.iter().copied().reduce(rect_union)
    }

    /// All page nodes with the given name, including nested ones.
    pub fn page_elements(&self, name: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        for node in &self.page {
            if node.name() == name {
                out.push(node);
            }
            out.extend(node.descendants().into_iter().filter(|e| e.name() == name));
        }
        out
    }
}

/// Asserts that two rectangles agree up to rounding errors.
pub fn assert_rect_eq(actual: Rect, expected: Rect) {
    let eq = |a: f64, b: f64| (a - b).abs() < 1e-6;
    assert!(
        eq(actual.0, expected.0)
            && eq(actual.1, expected.1)
            && eq(actual.2, expected.2)
            && eq(actual.3, expected.3),
        "expected {expected:?}, got {actual:?}"
    );
}

/// Runs `f` on a handler writing to a fresh mock device and returns the device.
pub fn run_with<F>(params: ConversionParams, f: F) -> MockDevice
where
    F: FnOnce(&mut PsGraphicsHandler<'_, MockDevice>),
{
    let mut device = MockDevice::default();
    {
        let mut handler = PsGraphicsHandler::new(&mut device, params);
        f(&mut handler);
    }
    device
}

/// Runs `f` with default conversion parameters.
pub fn run<F>(f: F) -> MockDevice
where
    F: FnOnce(&mut PsGraphicsHandler<'_, MockDevice>),
{
    run_with(ConversionParams::default(), f)
}

/// Appends a closed rectangle to the current path.
pub fn rect(handler: &mut PsGraphicsHandler<'_, MockDevice>, x1: f64, y1: f64, x2: f64, y2: f64) {
    handler.do_moveto(x1, y1);
    handler.do_lineto(x2, y1);
    handler.do_lineto(x2, y2);
    handler.do_lineto(x1, y2);
    handler.do_closepath();
}
