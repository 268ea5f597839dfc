//! Model types - colors and graphics state.
//!
//! - `color` - RGB colors and shading color spaces (Color, ColorSpace)
//! - `state` - Graphics state (GraphicsState, LineCap, LineJoin, DrawTarget)

pub mod color;
pub mod state;

// Re-export main types for convenience
pub use color::{Color, ColorSpace, Components};
pub use state::{DrawTarget, GraphicsState, LineCap, LineJoin};
