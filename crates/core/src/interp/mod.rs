//! Graphics operator interpretation.
//!
//! This module contains:
//! - `handler`: The state machine receiving the interpreter's operators
//! - `operator`: Names of the supported operators
//! - `clip_stack`: Clip paths of nested gsave/save levels
//! - `pattern`: Tiling pattern definitions
//! - `ops`: Operator implementations by category

pub mod clip_stack;
pub mod handler;
pub mod operator;
pub mod ops;
pub mod pattern;

// Re-export main types for convenience
pub use clip_stack::{ClippingStack, UNMARKED};
pub use handler::PsGraphicsHandler;
pub use operator::Operator;
pub use pattern::{PaintType, PatternManager, TilingPattern};
