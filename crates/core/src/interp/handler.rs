//! PostScript graphics handler.
//!
//! `PsGraphicsHandler` receives the drawing operators executed by a
//! PostScript interpreter, one operator and its numeric operands at a time,
//! and turns them into SVG nodes emitted through an [`SvgDevice`].
//!
//! The operators themselves are implemented by category in `interp::ops`.

use crate::error::{PsError, Result};
use crate::interp::clip_stack::ClippingStack;
use crate::interp::operator::Operator;
use crate::interp::pattern::{PaintType, PatternManager};
use crate::model::{Color, DrawTarget, GraphicsState};
use crate::params::ConversionParams;
use crate::path::{GraphicsPath, PathIntersector};
use crate::svg::{SvgDevice, XmlElement};
use crate::trace::TraceOp;
use crate::utils::{Point, Rect, create_matrix};

/// Converts a stream of PostScript graphics operators into SVG nodes.
///
/// The handler keeps the state PostScript would keep for painting: the
/// current path, the graphics state, the clip path stack and the defined
/// patterns. The graphics state is not saved by `gsave`; the interpreter
/// reports the restored values through the regular operators.
pub struct PsGraphicsHandler<'a, D: SvgDevice> {
    /// Output device receiving page content, definitions and bounding boxes
    pub(crate) device: &'a mut D,
    pub(crate) params: ConversionParams,
    pub(crate) graphicstate: GraphicsState,
    /// Current path being constructed
    pub(crate) path: GraphicsPath,
    pub(crate) clip_stack: ClippingStack,
    pub(crate) intersector: PathIntersector,
    pub(crate) patterns: PatternManager,
    /// Targets to return to when a pattern definition or group ends
    pub(crate) target_stack: Vec<DrawTarget>,
    /// Open isolated groups, innermost last
    pub(crate) groups: Vec<XmlElement>,
    /// Last current point reported by `querypos`
    pub(crate) current_point: Option<Point>,
}

impl<'a, D: SvgDevice> PsGraphicsHandler<'a, D> {
    /// Create a new handler writing to `device`.
    pub fn new(device: &'a mut D, params: ConversionParams) -> Self {
        Self {
            device,
            params,
            graphicstate: GraphicsState::new(),
            path: GraphicsPath::new(),
            clip_stack: ClippingStack::new(),
            intersector: PathIntersector::new(params.curve_flatness),
            patterns: PatternManager::new(),
            target_stack: Vec::new(),
            groups: Vec::new(),
            current_point: None,
        }
    }

    pub const fn params(&self) -> &ConversionParams {
        &self.params
    }

    pub const fn graphicstate(&self) -> &GraphicsState {
        &self.graphicstate
    }

    /// Path under construction.
    pub const fn path(&self) -> &GraphicsPath {
        &self.path
    }

    pub const fn clip_stack(&self) -> &ClippingStack {
        &self.clip_stack
    }

    pub const fn patterns(&self) -> &PatternManager {
        &self.patterns
    }

    pub const fn current_point(&self) -> Option<Point> {
        self.current_point
    }

    pub fn device(&self) -> &D {
        &*self.device
    }

    /// Executes the operator `name` with the given operands.
    ///
    /// The operands are consumed on success. Unknown operators and
    /// operators with too few operands leave the state and the operands
    /// untouched.
    pub fn execute(&mut self, name: &str, operands: &mut Vec<f64>) -> Result<()> {
        let op =
            Operator::from_name(name).ok_or_else(|| PsError::UnknownOperator(name.to_string()))?;
        self.execute_operator(op, operands)
    }

    /// Typed variant of [`execute`](Self::execute).
    pub fn execute_operator(&mut self, op: Operator, operands: &mut Vec<f64>) -> Result<()> {
        let expected = op.min_operands();
        if operands.len() < expected {
            return Err(PsError::MissingOperands {
                op: op.name(),
                expected,
                got: operands.len(),
            });
        }
        tracing::trace!(op = op.name(), operands = ?operands, "executing operator");
        let args = std::mem::take(operands);
        self.dispatch_operator(op, &args)
    }

    /// Executes recorded operators, continuing after failing ones.
    ///
    /// Returns the errors together with the line of the failing operator.
    pub fn replay<I>(&mut self, ops: I) -> Vec<(usize, PsError)>
    where
        I: IntoIterator<Item = TraceOp>,
    {
        let mut errors = Vec::new();
        for TraceOp { line, op, mut args } in ops {
            if let Err(err) = self.execute(&op, &mut args) {
                errors.push((line, err));
            }
        }
        errors
    }

    fn dispatch_operator(&mut self, op: Operator, p: &[f64]) -> Result<()> {
        match op {
            // Path construction
            Operator::Moveto => self.do_moveto(p[0], p[1]),
            Operator::Lineto => self.do_lineto(p[0], p[1]),
            Operator::Curveto => self.do_curveto(p[0], p[1], p[2], p[3], p[4], p[5]),
            Operator::Closepath => self.do_closepath(),
            Operator::Newpath => self.do_newpath(p.first().is_some_and(|v| *v > 0.0)),
            Operator::Querypos => self.do_querypos(p[0], p[1]),

            // Painting
            Operator::Stroke => self.do_stroke(),
            Operator::Fill => self.do_fill(false),
            Operator::Eofill => self.do_fill(true),
            Operator::Shfill => return self.do_shfill(p),

            // Clipping
            Operator::Clip => self.do_clip(false),
            Operator::Eoclip => self.do_clip(true),
            Operator::Clippath => self.do_clippath(),
            Operator::Initclip => self.do_initclip(),

            // Graphics state stack
            Operator::Gsave => self.do_gsave(),
            Operator::Grestore => self.do_grestore(),
            Operator::Grestoreall => self.do_grestoreall(),
            Operator::Save => self.do_save(p[0] as i32),
            Operator::Restore => self.do_restore(p[0] as i32),

            // Transformations
            Operator::Setmatrix => self.do_setmatrix(create_matrix(p, 0)),
            Operator::Scale => self.do_scale(p[0], p[1]),
            Operator::Translate => self.do_translate(p[0], p[1]),
            Operator::Rotate => self.do_rotate(p[0]),
            Operator::Applyscalevals => self.do_applyscalevals(p[0], p[1], p[2]),

            // Color and line style
            Operator::Setgray => self.do_setgray(p[0]),
            Operator::Setrgbcolor => self.do_setrgbcolor(p[0], p[1], p[2]),
            Operator::Setcmykcolor => self.do_setcmykcolor(p[0], p[1], p[2], p[3]),
            Operator::Sethsbcolor => self.do_sethsbcolor(p[0], p[1], p[2]),
            Operator::Setlinewidth => self.do_setlinewidth(p[0]),
            Operator::Setlinecap => self.do_setlinecap(p[0] as i32),
            Operator::Setlinejoin => self.do_setlinejoin(p[0] as i32),
            Operator::Setmiterlimit => self.do_setmiterlimit(p[0]),
            Operator::Setdash => {
                if let Some((offset, pattern)) = p.split_last() {
                    self.do_setdash(pattern, *offset);
                }
            }
            Operator::Setopacityalpha => self.do_setopacityalpha(p[0]),

            // Patterns
            Operator::Makepattern => return self.do_makepattern(p),
            Operator::Setpattern => {
                let color = match p {
                    [_, r, g, b] => Color::from_rgb(*r, *g, *b),
                    _ => Color::BLACK,
                };
                self.do_setpattern(p[0] as i32, color);
            }

            // Isolated groups
            Operator::Begingroup => self.begin_group(),
            Operator::Endgroup => self.end_group(create_matrix(p, 0)),
        }
        Ok(())
    }

    /// Appends a node to the container of the current drawing target.
    pub(crate) fn append_node(&mut self, node: XmlElement) {
        match self.graphicstate.target {
            DrawTarget::Page => self.device.append_to_page(node),
            DrawTarget::Pattern(id) => match self.patterns.get_mut(id) {
                Some(pattern) => pattern.append(node),
                None => self.device.append_to_page(node),
            },
            DrawTarget::Group => match self.groups.last_mut() {
                Some(group) => group.append(node),
                None => self.device.append_to_page(node),
            },
        }
    }

    /// Extends the page bounding box unless drawing into a private container.
    pub(crate) fn embed(&mut self, bbox: Rect) {
        if !self.graphicstate.target.is_private() {
            self.device.embed(bbox);
        }
    }

    /// Paint type of the pattern currently being defined, if any.
    pub(crate) fn defined_pattern_type(&self) -> Option<PaintType> {
        match self.graphicstate.target {
            DrawTarget::Pattern(id) => self.patterns.get(id).map(|p| p.paint_type()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::SvgPage;

    #[test]
    fn test_unknown_operator_leaves_operands() {
        let mut page = SvgPage::new();
        let mut handler = PsGraphicsHandler::new(&mut page, ConversionParams::default());
        let mut operands = vec![1.0, 2.0];
        let result = handler.execute("show", &mut operands);
        assert!(matches!(result, Err(PsError::UnknownOperator(name)) if name == "show"));
        assert_eq!(operands, vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_operands() {
        let mut page = SvgPage::new();
        let mut handler = PsGraphicsHandler::new(&mut page, ConversionParams::default());
        let mut operands = vec![1.0];
        let result = handler.execute("lineto", &mut operands);
        assert!(matches!(
            result,
            Err(PsError::MissingOperands {
                op: "lineto",
                expected: 2,
                got: 1
            })
        ));
        assert!(handler.path().is_empty());
    }

    #[test]
    fn test_execute_consumes_operands() {
        let mut page = SvgPage::new();
        let mut handler = PsGraphicsHandler::new(&mut page, ConversionParams::default());
        let mut operands = vec![3.0, 4.0];
        handler.execute("moveto", &mut operands).unwrap();
        assert!(operands.is_empty());
        assert_eq!(handler.path().len(), 1);
    }

    #[test]
    fn test_setpattern_unknown_id() {
        let mut page = SvgPage::new();
        let mut handler = PsGraphicsHandler::new(&mut page, ConversionParams::default());
        // unknown pattern ids clear the active pattern
        handler.graphicstate.pattern = Some(7);
        handler.execute("setpattern", &mut vec![7.0, 1.0, 0.0, 0.0]).unwrap();
        assert_eq!(handler.graphicstate().pattern, None);
    }
}
