//! psvg - Converts PostScript graphics operator streams into SVG.
//!
//! A PostScript interpreter reports the drawing operators it executes to a
//! [`PsGraphicsHandler`], which keeps the painting state and emits flat SVG
//! shapes, clip paths and patterns through an [`SvgDevice`]. Smooth mesh
//! shadings are tessellated into flat-colored segments.

pub mod error;
pub mod interp;
pub mod model;
pub mod params;
pub mod path;
pub mod shading;
pub mod svg;
pub mod trace;
pub mod utils;

pub use error::{PsError, Result};
pub use interp::{ClippingStack, Operator, PsGraphicsHandler};
pub use params::{ConversionParams, ShadingParams};
pub use path::{GraphicsPath, PathFormat, PathIntersector, WindingRule};
pub use svg::{SvgDevice, SvgPage, XmlElement};
pub use trace::{TraceFormat, TraceOp};
