//! Operator implementations by category.
//!
//! Operators are grouped by category:
//! - `path` - Path construction and painting (moveto, lineto, curveto, closepath, newpath, querypos, stroke, fill, eofill)
//! - `clip` - Clipping (clip, eoclip, clippath, initclip)
//! - `graphics_state` - State stack, transforms and line style (gsave, grestore, grestoreall, save, restore, setmatrix, scale, translate, rotate, applyscalevals, setlinewidth, setlinecap, setlinejoin, setmiterlimit, setdash, setopacityalpha)
//! - `color` - Colors (setgray, setrgbcolor, setcmykcolor, sethsbcolor)
//! - `pattern` - Patterns and isolated groups (makepattern, setpattern, begingroup, endgroup)
//! - `shading` - Mesh shadings (shfill)

mod clip;
mod color;
mod graphics_state;
mod path;
mod pattern;
mod shading;

// Note: each file defines an impl block for PsGraphicsHandler,
// so no pub use is needed - the methods are automatically available on the type.
