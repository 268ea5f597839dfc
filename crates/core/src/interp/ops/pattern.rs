//! Pattern and group operators.
//!
//! Handles: makepattern, setpattern, begingroup, endgroup
//!
//! - makepattern: Starts (type 1) or ends (type 0) a tiling pattern
//!   definition. Drawing in between goes into the pattern's container.
//! - setpattern: Selects a pattern as the current fill
//! - begingroup/endgroup: Collect drawing in an isolated group that is
//!   placed on the page with its own transformation

use crate::error::{PsError, Result};
use crate::interp::handler::PsGraphicsHandler;
use crate::interp::pattern::{PaintType, TilingPattern};
use crate::model::{Color, DrawTarget};
use crate::svg::{SvgDevice, XmlElement};
use crate::utils::{Matrix, create_matrix, is_identity, matrix2svg, mult_matrix};

impl<'a, D: SvgDevice> PsGraphicsHandler<'a, D> {
    /// Starts or ends a pattern definition.
    ///
    /// Operands: `type id`, for tiling patterns (type 1) followed by
    /// `llx lly urx ury xstep ystep painttype [a b c d e f]`.
    ///
    /// PostScript operator: `makepattern`
    pub fn do_makepattern(&mut self, operands: &[f64]) -> Result<()> {
        let [pattern_type, id, ..] = *operands else {
            return Err(PsError::MissingOperands {
                op: "makepattern",
                expected: 2,
                got: operands.len(),
            });
        };
        let (pattern_type, id) = (pattern_type as i32, id as i32);
        match pattern_type {
            0 => {
                if matches!(self.graphicstate.target, DrawTarget::Pattern(_)) {
                    self.graphicstate.target = self.target_stack.pop().unwrap_or_default();
                }
            }
            1 => {
                if operands.len() < 9 {
                    return Err(PsError::MissingOperands {
                        op: "makepattern",
                        expected: 9,
                        got: operands.len(),
                    });
                }
                let bbox = (operands[2], operands[3], operands[4], operands[5]);
                let (xstep, ystep) = (operands[6], operands[7]);
                let paint_type = PaintType::from_ps(operands[8] as i32);
                let matrix = mult_matrix(create_matrix(operands, 9), self.graphicstate.ctm);
                tracing::debug!(id, ?paint_type, "defining tiling pattern");
                self.patterns.define(TilingPattern::new(
                    id, bbox, xstep, ystep, paint_type, matrix,
                ));
                self.target_stack.push(self.graphicstate.target);
                self.graphicstate.target = DrawTarget::Pattern(id);
            }
            2 => tracing::debug!(id, "shading patterns are not supported"),
            other => tracing::debug!(id, pattern_type = other, "ignoring unknown pattern type"),
        }
        Ok(())
    }

    /// Selects the pattern `id` as the current fill. Uncolored patterns are
    /// painted in `color`. An unknown id deselects the current pattern.
    ///
    /// PostScript operator: `setpattern`
    pub fn do_setpattern(&mut self, id: i32, color: Color) {
        let Some(pattern) = self.patterns.get_mut(id) else {
            self.graphicstate.pattern = None;
            return;
        };
        if pattern.paint_type() == PaintType::Uncolored {
            pattern.set_color(color);
        }
        pattern.apply(&mut *self.device);
        self.graphicstate.pattern = Some(id);
    }

    /// Redirects drawing into a new isolated group.
    pub fn begin_group(&mut self) {
        self.target_stack.push(self.graphicstate.target);
        self.groups.push(XmlElement::new("g"));
        self.graphicstate.target = DrawTarget::Group;
    }

    /// Ends the innermost group and places it, transformed by `matrix`,
    /// into the enclosing container. Empty groups are dropped.
    pub fn end_group(&mut self, matrix: Matrix) {
        if self.graphicstate.target != DrawTarget::Group {
            tracing::debug!("endgroup without matching begingroup");
            return;
        }
        self.graphicstate.target = self.target_stack.pop().unwrap_or_default();
        let Some(mut group) = self.groups.pop() else {
            return;
        };
        if group.is_empty() {
            return;
        }
        if !is_identity(matrix) {
            group.set_attribute("transform", matrix2svg(matrix));
        }
        self.append_node(group);
    }
}
