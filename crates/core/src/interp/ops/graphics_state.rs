//! Graphics state operators.
//!
//! Handles: gsave, grestore, grestoreall, save, restore, setmatrix, scale,
//! translate, rotate, applyscalevals, setlinewidth, setlinecap, setlinejoin,
//! setmiterlimit, setdash, setopacityalpha
//!
//! - gsave/grestore/save/restore: Only the clip path stack is kept here;
//!   the interpreter reports restored state values through the regular
//!   operators.
//! - setmatrix/scale/translate/rotate: Transformation matrix. PostScript
//!   left-multiplies elementary transformations onto the matrix.
//! - setlinewidth ... setopacityalpha: Line style and opacity

use crate::interp::clip_stack::UNMARKED;
use crate::interp::handler::PsGraphicsHandler;
use crate::model::{LineCap, LineJoin};
use crate::svg::SvgDevice;
use crate::utils::{Matrix, mult_matrix, rotation_matrix, scaling_matrix, translation_matrix};

impl<'a, D: SvgDevice> PsGraphicsHandler<'a, D> {
    // ========================================================================
    // State Stack
    // ========================================================================

    /// PostScript operator: `gsave`
    pub fn do_gsave(&mut self) {
        self.clip_stack.dup(UNMARKED);
    }

    /// PostScript operator: `grestore`
    pub fn do_grestore(&mut self) {
        self.clip_stack.pop(UNMARKED, false);
    }

    /// Restores the state of the innermost `save`, or the bottom state if
    /// there is none.
    ///
    /// PostScript operator: `grestoreall`
    pub fn do_grestoreall(&mut self) {
        self.clip_stack.pop(UNMARKED, true);
    }

    /// Saves the state under the interpreter's id of the save object.
    ///
    /// PostScript operator: `save`
    pub fn do_save(&mut self, id: i32) {
        self.clip_stack.dup(id);
    }

    /// Restores the state saved under `id`, discarding any unbalanced
    /// `gsave` states above it.
    ///
    /// PostScript operator: `restore`
    pub fn do_restore(&mut self, id: i32) {
        self.clip_stack.pop(id, false);
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    /// Replaces the transformation matrix.
    ///
    /// PostScript operator: `setmatrix`
    pub const fn do_setmatrix(&mut self, matrix: Matrix) {
        self.graphicstate.ctm = matrix;
    }

    /// PostScript operator: `scale`
    pub fn do_scale(&mut self, sx: f64, sy: f64) {
        self.concat(scaling_matrix(sx, sy));
    }

    /// PostScript operator: `translate`
    pub fn do_translate(&mut self, tx: f64, ty: f64) {
        self.concat(translation_matrix(tx, ty));
    }

    /// Rotates the user space counter-clockwise by `angle` degrees.
    ///
    /// PostScript operator: `rotate`
    pub fn do_rotate(&mut self, angle: f64) {
        self.concat(rotation_matrix(angle));
    }

    fn concat(&mut self, matrix: Matrix) {
        self.graphicstate.ctm = mult_matrix(matrix, self.graphicstate.ctm);
    }

    /// Sets the scale factors applied to line widths and dash lengths.
    ///
    /// Operator: `applyscalevals`
    pub const fn do_applyscalevals(&mut self, sx: f64, sy: f64, cos: f64) {
        self.graphicstate.scalevals = (sx, sy, cos);
    }

    // ========================================================================
    // Line Style
    // ========================================================================

    /// Sets the line width. Width 0 (thinnest line) becomes 0.5.
    ///
    /// PostScript operator: `setlinewidth`
    pub fn do_setlinewidth(&mut self, linewidth: f64) {
        let linewidth = if linewidth == 0.0 { 0.5 } else { linewidth };
        self.graphicstate.linewidth = self.graphicstate.scale_length(linewidth);
    }

    /// PostScript operator: `setlinecap`
    pub const fn do_setlinecap(&mut self, linecap: i32) {
        self.graphicstate.linecap = LineCap::from_ps(linecap);
    }

    /// PostScript operator: `setlinejoin`
    pub const fn do_setlinejoin(&mut self, linejoin: i32) {
        self.graphicstate.linejoin = LineJoin::from_ps(linejoin);
    }

    /// PostScript operator: `setmiterlimit`
    pub const fn do_setmiterlimit(&mut self, miterlimit: f64) {
        self.graphicstate.miterlimit = miterlimit;
    }

    /// Sets the dash lengths and the offset into the dash pattern. An empty
    /// pattern selects solid lines.
    ///
    /// PostScript operator: `setdash`
    pub fn do_setdash(&mut self, pattern: &[f64], offset: f64) {
        let gs = &self.graphicstate;
        let dashpattern = pattern.iter().map(|v| gs.scale_length(*v)).collect();
        let dashoffset = gs.scale_length(offset);
        self.graphicstate.dashpattern = dashpattern;
        self.graphicstate.dashoffset = dashoffset;
    }

    /// Sets the opacity used for stroking and filling.
    ///
    /// Operator: `setopacityalpha`
    pub fn do_setopacityalpha(&mut self, alpha: f64) {
        self.graphicstate.opacity = alpha.clamp(0.0, 1.0);
    }
}
