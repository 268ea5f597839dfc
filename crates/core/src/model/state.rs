//! Graphics state tracked while processing the operator stream.

use super::color::Color;
use crate::utils::{MATRIX_IDENTITY, Matrix};

/// Line cap style (`setlinecap`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub const fn from_ps(value: i32) -> Self {
        match value {
            1 => LineCap::Round,
            2 => LineCap::Square,
            _ => LineCap::Butt,
        }
    }

    /// SVG attribute value, None for the SVG default (`butt`).
    pub const fn svg_value(self) -> Option<&'static str> {
        match self {
            LineCap::Butt => None,
            LineCap::Round => Some("round"),
            LineCap::Square => Some("square"),
        }
    }
}

/// Line join style (`setlinejoin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub const fn from_ps(value: i32) -> Self {
        match value {
            1 => LineJoin::Round,
            2 => LineJoin::Bevel,
            _ => LineJoin::Miter,
        }
    }

    /// SVG attribute value, None for the SVG default (`miter`).
    pub const fn svg_value(self) -> Option<&'static str> {
        match self {
            LineJoin::Miter => None,
            LineJoin::Round => Some("round"),
            LineJoin::Bevel => Some("bevel"),
        }
    }
}

/// Container receiving the shapes produced by paint operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawTarget {
    /// Top-level page group; shapes update the page bounding box.
    #[default]
    Page,
    /// Private container of the tiling pattern with the given id.
    Pattern(i32),
    /// Isolated group (e.g. an included EPS figure).
    Group,
}

impl DrawTarget {
    /// True if shapes go into a private container that absorbs them without
    /// propagating their bounding boxes to the page.
    pub const fn is_private(self) -> bool {
        !matches!(self, DrawTarget::Page)
    }
}

/// Graphics state - transform, color, line style and drawing target.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Current transformation matrix
    pub ctm: Matrix,
    /// Current color (stroke and fill share it, as in PostScript)
    pub color: Color,
    /// Line width for stroke operations
    pub linewidth: f64,
    pub linecap: LineCap,
    pub linejoin: LineJoin,
    pub miterlimit: f64,
    /// Dash pattern lengths; empty means solid lines
    pub dashpattern: Vec<f64>,
    pub dashoffset: f64,
    /// Opacity in [0, 1]
    pub opacity: f64,
    /// Id of the active tiling pattern, if any
    pub pattern: Option<i32>,
    /// Where produced shapes are appended
    pub target: DrawTarget,
    /// Horizontal and vertical scale factors and rotation cosine reported by
    /// `applyscalevals`; used to scale line widths and dash lengths.
    pub scalevals: (f64, f64, f64),
}

impl GraphicsState {
    /// Create new graphics state with PostScript default values.
    pub fn new() -> Self {
        Self {
            ctm: MATRIX_IDENTITY,
            color: Color::BLACK,
            linewidth: 1.0,
            linecap: LineCap::Butt,
            linejoin: LineJoin::Miter,
            miterlimit: 4.0,
            dashpattern: Vec::new(),
            dashoffset: 0.0,
            opacity: 1.0,
            pattern: None,
            target: DrawTarget::Page,
            scalevals: (1.0, 1.0, 1.0),
        }
    }

    /// Scales a length given in user units by the factors of `applyscalevals`.
    pub fn scale_length(&self, v: f64) -> f64 {
        let (sx, sy, _) = self.scalevals;
        v * (sx.abs() * sy.abs()).sqrt()
    }
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self::new()
    }
}
