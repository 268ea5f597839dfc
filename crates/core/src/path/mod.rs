//! Path geometry.
//!
//! - `builder` - Path construction, simplification and serialization (GraphicsPath)
//! - `clipper` - Polygon intersection of clip paths (PathIntersector)

pub mod builder;
pub mod clipper;

pub use builder::{GraphicsPath, PathFormat, PathSegment, WindingRule};
pub use clipper::PathIntersector;
