//! SVG output tree.
//!
//! - `node` - Element nodes with ordered attributes (XmlElement)
//! - `device` - Output interface and the page collecting the result (SvgDevice, SvgPage)

pub mod device;
pub mod node;

pub use device::{SvgDevice, SvgPage};
pub use node::XmlElement;
