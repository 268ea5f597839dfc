//! Color operators.
//!
//! Handles: setgray, setrgbcolor, setcmykcolor, sethsbcolor
//!
//! Colors are converted to RGB right away. Selecting a color deselects the
//! active pattern.

use crate::interp::handler::PsGraphicsHandler;
use crate::model::Color;
use crate::svg::SvgDevice;

impl<'a, D: SvgDevice> PsGraphicsHandler<'a, D> {
    /// PostScript operator: `setgray`
    pub fn do_setgray(&mut self, gray: f64) {
        self.set_color(Color::from_gray(gray));
    }

    /// PostScript operator: `setrgbcolor`
    pub fn do_setrgbcolor(&mut self, r: f64, g: f64, b: f64) {
        self.set_color(Color::from_rgb(r, g, b));
    }

    /// PostScript operator: `setcmykcolor`
    pub fn do_setcmykcolor(&mut self, c: f64, m: f64, y: f64, k: f64) {
        self.set_color(Color::from_cmyk(c, m, y, k));
    }

    /// PostScript operator: `sethsbcolor`
    pub fn do_sethsbcolor(&mut self, h: f64, s: f64, b: f64) {
        self.set_color(Color::from_hsb(h, s, b));
    }

    const fn set_color(&mut self, color: Color) {
        self.graphicstate.pattern = None;
        self.graphicstate.color = color;
    }
}
