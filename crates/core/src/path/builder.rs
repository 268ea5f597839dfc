//! Graphics path accumulated from path construction operators.
//!
//! A single `GraphicsPath` is shared by the whole operator stream: path
//! construction operators append to it, paint and clip operators consume it
//! and the handler clears it afterwards.

use smallvec::SmallVec;

use crate::utils::{
    EPSILON, Matrix, Point, Rect, apply_matrix_pt, approx_eq, fmt_num, point_eq, rect_union,
};

/// Path segment for graphics operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Move to point (x, y)
    MoveTo(f64, f64),
    /// Line to point (x, y)
    LineTo(f64, f64),
    /// Cubic bezier curve (x1, y1, x2, y2, x3, y3)
    CurveTo(f64, f64, f64, f64, f64, f64),
    /// Close path
    ClosePath,
}

/// Rule deciding which points lie inside a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindingRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl WindingRule {
    pub const fn from_evenodd(evenodd: bool) -> Self {
        if evenodd {
            WindingRule::EvenOdd
        } else {
            WindingRule::NonZero
        }
    }

    /// Whether a point with the given winding number is inside.
    pub const fn contains(self, winding: i32) -> bool {
        match self {
            WindingRule::NonZero => winding != 0,
            WindingRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Coordinate mode of serialized SVG path data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFormat {
    /// Uppercase commands with absolute coordinates
    #[default]
    Absolute,
    /// Lowercase commands with coordinates relative to the current point
    Relative,
}

/// A path made of move/line/curve/close segments plus a winding rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicsPath {
    segments: Vec<PathSegment>,
    winding_rule: WindingRule,
}

impl GraphicsPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_winding_rule(winding_rule: WindingRule) -> Self {
        Self {
            segments: Vec::new(),
            winding_rule,
        }
    }

    /// Closed rectangle spanned by two corners.
    pub fn from_rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let mut path = Self::new();
        path.move_to(x1, y1);
        path.line_to(x2, y1);
        path.line_to(x2, y2);
        path.line_to(x1, y2);
        path.close_path();
        path
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub const fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    pub const fn set_winding_rule(&mut self, rule: WindingRule) {
        self.winding_rule = rule;
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.segments.push(PathSegment::MoveTo(x, y));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.segments.push(PathSegment::LineTo(x, y));
    }

    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.segments
            .push(PathSegment::CurveTo(x1, y1, x2, y2, x3, y3));
    }

    /// Closes the current subpath. Ignored unless a subpath has been started.
    pub fn close_path(&mut self) {
        if self
            .segments
            .iter()
            .any(|s| matches!(s, PathSegment::MoveTo(..)))
        {
            self.segments.push(PathSegment::ClosePath);
        }
    }

    /// Drops segments that don't contribute to the geometry.
    ///
    /// Removes zero-length lines and curves, collapses consecutive movetos,
    /// drops closepaths that don't close anything and trailing movetos. A
    /// path consisting of a single point is reduced to one moveto, which
    /// [`is_dot`](Self::is_dot) then reports.
    pub fn remove_redundant_commands(&mut self) {
        let mut out: Vec<PathSegment> = Vec::with_capacity(self.segments.len());
        let mut current: Option<Point> = None;
        let mut start: Option<Point> = None;
        for seg in self.segments.drain(..) {
            match seg {
                PathSegment::MoveTo(x, y) => {
                    if matches!(out.last(), Some(PathSegment::MoveTo(..))) {
                        out.pop();
                    }
                    out.push(seg);
                    current = Some((x, y));
                    start = current;
                }
                PathSegment::LineTo(x, y) => {
                    if current.is_some_and(|p| point_eq(p, (x, y))) {
                        continue;
                    }
                    out.push(seg);
                    current = Some((x, y));
                }
                PathSegment::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    if current.is_some_and(|p| {
                        point_eq(p, (x1, y1)) && point_eq(p, (x2, y2)) && point_eq(p, (x3, y3))
                    }) {
                        continue;
                    }
                    out.push(seg);
                    current = Some((x3, y3));
                }
                PathSegment::ClosePath => {
                    if matches!(
                        out.last(),
                        None | Some(PathSegment::MoveTo(..)) | Some(PathSegment::ClosePath)
                    ) {
                        continue;
                    }
                    out.push(seg);
                    current = start;
                }
            }
        }
        while out.len() > 1 && matches!(out.last(), Some(PathSegment::MoveTo(..))) {
            out.pop();
        }
        self.segments = out;
    }

    /// Returns the point if the path degenerates to a single point.
    pub fn is_dot(&self) -> Option<Point> {
        let Some(PathSegment::MoveTo(x, y)) = self.segments.first() else {
            return None;
        };
        let p = (*x, *y);
        let same = |q: Point| point_eq(p, q);
        self.segments[1..]
            .iter()
            .all(|seg| match *seg {
                PathSegment::MoveTo(x, y) | PathSegment::LineTo(x, y) => same((x, y)),
                PathSegment::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    same((x1, y1)) && same((x2, y2)) && same((x3, y3))
                }
                PathSegment::ClosePath => true,
            })
            .then_some(p)
    }

    /// Exact bounding box of the path, including curve extrema.
    ///
    /// Returns None for an empty path.
    pub fn bbox(&self) -> Option<Rect> {
        let mut bbox: Option<Rect> = None;
        let mut extend = |p: Point| {
            let r = (p.0, p.1, p.0, p.1);
            bbox = Some(bbox.map_or(r, |b| rect_union(b, r)));
        };
        let mut current = (0.0, 0.0);
        let mut start = (0.0, 0.0);
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(x, y) => {
                    extend((x, y));
                    current = (x, y);
                    start = current;
                }
                PathSegment::LineTo(x, y) => {
                    extend((x, y));
                    current = (x, y);
                }
                PathSegment::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    let (p0, p1, p2, p3) = (current, (x1, y1), (x2, y2), (x3, y3));
                    extend(p3);
                    for t in cubic_extrema(p0, p1, p2, p3) {
                        extend(cubic_point(p0, p1, p2, p3, t));
                    }
                    current = p3;
                }
                PathSegment::ClosePath => current = start,
            }
        }
        bbox
    }

    /// Applies an affine transformation to all points of the path.
    pub fn transform(&mut self, m: Matrix) {
        let tf = |x: f64, y: f64| apply_matrix_pt(m, (x, y));
        for seg in &mut self.segments {
            *seg = match *seg {
                PathSegment::MoveTo(x, y) => {
                    let (x, y) = tf(x, y);
                    PathSegment::MoveTo(x, y)
                }
                PathSegment::LineTo(x, y) => {
                    let (x, y) = tf(x, y);
                    PathSegment::LineTo(x, y)
                }
                PathSegment::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    let (x1, y1) = tf(x1, y1);
                    let (x2, y2) = tf(x2, y2);
                    let (x3, y3) = tf(x3, y3);
                    PathSegment::CurveTo(x1, y1, x2, y2, x3, y3)
                }
                PathSegment::ClosePath => PathSegment::ClosePath,
            };
        }
    }

    /// Returns a transformed copy of the path.
    pub fn transformed(&self, m: Matrix) -> Self {
        let mut path = self.clone();
        path.transform(m);
        path
    }

    /// Inserts the segments of another path in front of this one.
    pub fn prepend(&mut self, other: &GraphicsPath) {
        let mut segments = other.segments.clone();
        segments.append(&mut self.segments);
        self.segments = segments;
    }

    /// Serializes the path to SVG path data.
    pub fn to_svg(&self, format: PathFormat) -> String {
        let relative = format == PathFormat::Relative;
        let mut out = String::new();
        let mut current = (0.0, 0.0);
        let mut start = (0.0, 0.0);
        let cmd = |c: char| if relative { c.to_ascii_lowercase() } else { c };
        for seg in &self.segments {
            let (dx, dy) = if relative { current } else { (0.0, 0.0) };
            match *seg {
                PathSegment::MoveTo(x, y) => {
                    write_command(&mut out, cmd('M'), &[x - dx, y - dy]);
                    current = (x, y);
                    start = current;
                }
                PathSegment::LineTo(x, y) => {
                    if approx_eq(y, current.1, EPSILON) {
                        write_command(&mut out, cmd('H'), &[x - dx]);
                    } else if approx_eq(x, current.0, EPSILON) {
                        write_command(&mut out, cmd('V'), &[y - dy]);
                    } else {
                        write_command(&mut out, cmd('L'), &[x - dx, y - dy]);
                    }
                    current = (x, y);
                }
                PathSegment::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    write_command(
                        &mut out,
                        cmd('C'),
                        &[x1 - dx, y1 - dy, x2 - dx, y2 - dy, x3 - dx, y3 - dy],
                    );
                    current = (x3, y3);
                }
                PathSegment::ClosePath => {
                    out.push(cmd('Z'));
                    current = start;
                }
            }
        }
        out
    }

    /// Approximates the path by polygons, one per subpath.
    ///
    /// Every contour is implicitly closed. Curves are subdivided so that the
    /// polygon deviates from the curve by at most `tolerance`.
    pub fn flatten(&self, tolerance: f64) -> Vec<Vec<Point>> {
        let mut contours = Vec::new();
        let mut contour: Vec<Point> = Vec::new();
        let mut current = (0.0, 0.0);
        let mut start = (0.0, 0.0);
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(x, y) => {
                    if contour.len() > 1 {
                        contours.push(std::mem::take(&mut contour));
                    }
                    contour.clear();
                    contour.push((x, y));
                    current = (x, y);
                    start = current;
                }
                PathSegment::LineTo(x, y) => {
                    if contour.is_empty() {
                        contour.push(current);
                    }
                    contour.push((x, y));
                    current = (x, y);
                }
                PathSegment::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    if contour.is_empty() {
                        contour.push(current);
                    }
                    flatten_cubic(current, (x1, y1), (x2, y2), (x3, y3), tolerance, &mut contour);
                    current = (x3, y3);
                }
                PathSegment::ClosePath => {
                    if contour.len() > 1 {
                        contours.push(std::mem::take(&mut contour));
                    }
                    contour.clear();
                    current = start;
                }
            }
        }
        if contour.len() > 1 {
            contours.push(contour);
        }
        contours
    }
}

fn write_command(out: &mut String, cmd: char, values: &[f64]) {
    out.push(cmd);
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&fmt_num(*v));
    }
}

/// Point on a cubic bezier curve at parameter t.
pub(crate) fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}

/// Parameters in (0, 1) where a cubic curve has a horizontal or vertical tangent.
fn cubic_extrema(p0: Point, p1: Point, p2: Point, p3: Point) -> SmallVec<[f64; 4]> {
    let mut ts = SmallVec::new();
    for (v0, v1, v2, v3) in [(p0.0, p1.0, p2.0, p3.0), (p0.1, p1.1, p2.1, p3.1)] {
        // derivative / 3 = a t^2 + b t + c
        let a = -v0 + 3.0 * v1 - 3.0 * v2 + v3;
        let b = 2.0 * (v0 - 2.0 * v1 + v2);
        let c = v1 - v0;
        if a.abs() < EPSILON {
            if b.abs() > EPSILON {
                ts.push(-c / b);
            }
        } else {
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sq = disc.sqrt();
                ts.push((-b + sq) / (2.0 * a));
                ts.push((-b - sq) / (2.0 * a));
            }
        }
    }
    ts.retain(|t| *t > 0.0 && *t < 1.0);
    ts
}

fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point, tolerance: f64, out: &mut Vec<Point>) {
    let dd1 = (p0.0 - 2.0 * p1.0 + p2.0).hypot(p0.1 - 2.0 * p1.1 + p2.1);
    let dd2 = (p1.0 - 2.0 * p2.0 + p3.0).hypot(p1.1 - 2.0 * p2.1 + p3.1);
    let dd = dd1.max(dd2);
    let tolerance = tolerance.max(EPSILON);
    let n = ((0.75 * dd / tolerance).sqrt().ceil() as usize).clamp(1, 256);
    for i in 1..=n {
        out.push(cubic_point(p0, p1, p2, p3, i as f64 / n as f64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_redundant_commands() {
        let mut path = GraphicsPath::new();
        path.move_to(1.0, 1.0);
        path.move_to(0.0, 0.0);
        path.line_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.cubic_to(10.0, 0.0, 10.0, 0.0, 10.0, 0.0);
        path.close_path();
        path.close_path();
        path.move_to(3.0, 3.0);
        path.remove_redundant_commands();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::MoveTo(0.0, 0.0),
                PathSegment::LineTo(10.0, 0.0),
                PathSegment::ClosePath,
            ]
        );
    }

    #[test]
    fn test_single_point_becomes_dot() {
        let mut path = GraphicsPath::new();
        path.move_to(5.0, 5.0);
        path.line_to(5.0, 5.0);
        path.close_path();
        path.remove_redundant_commands();
        assert_eq!(path.len(), 1);
        assert_eq!(path.is_dot(), Some((5.0, 5.0)));

        let mut line = GraphicsPath::new();
        line.move_to(0.0, 0.0);
        line.line_to(1.0, 0.0);
        assert_eq!(line.is_dot(), None);
    }

    #[test]
    fn test_close_without_moveto_is_ignored() {
        let mut path = GraphicsPath::new();
        path.close_path();
        assert!(path.is_empty());
    }

    #[test]
    fn test_bbox_includes_curve_extrema() {
        let mut path = GraphicsPath::new();
        path.move_to(0.0, 0.0);
        path.cubic_to(0.0, 10.0, 10.0, 10.0, 10.0, 0.0);
        let (x0, y0, x1, y1) = path.bbox().unwrap();
        assert_eq!((x0, y0, x1), (0.0, 0.0, 10.0));
        assert!(approx_eq(y1, 7.5, 1e-9));
        assert_eq!(GraphicsPath::new().bbox(), None);
    }

    #[test]
    fn test_to_svg_absolute_and_relative() {
        let mut path = GraphicsPath::new();
        path.move_to(1.0, 2.0);
        path.line_to(11.0, 2.0);
        path.line_to(11.0, 12.0);
        path.line_to(3.0, 4.0);
        path.close_path();
        assert_eq!(path.to_svg(PathFormat::Absolute), "M1 2H11V12L3 4Z");
        assert_eq!(path.to_svg(PathFormat::Relative), "m1 2h10v10l-8 -8z");
        assert_eq!(GraphicsPath::new().to_svg(PathFormat::Absolute), "");
    }

    #[test]
    fn test_transform_and_prepend() {
        let mut clip = GraphicsPath::from_rect(0.0, 0.0, 1.0, 1.0);
        clip.transform((2.0, 0.0, 0.0, 2.0, 1.0, 1.0));
        assert_eq!(clip.bbox(), Some((1.0, 1.0, 3.0, 3.0)));

        let mut path = GraphicsPath::new();
        path.move_to(5.0, 5.0);
        path.line_to(6.0, 6.0);
        path.prepend(&clip);
        assert_eq!(path.len(), clip.len() + 2);
        assert_eq!(path.segments()[0], PathSegment::MoveTo(1.0, 1.0));
    }

    #[test]
    fn test_flatten_closes_contours() {
        let mut path = GraphicsPath::from_rect(0.0, 0.0, 4.0, 4.0);
        path.move_to(10.0, 10.0);
        path.cubic_to(10.0, 20.0, 20.0, 20.0, 20.0, 10.0);
        let contours = path.flatten(0.1);
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].len(), 4);
        assert!(contours[1].len() > 4);
        assert_eq!(*contours[1].last().unwrap(), (20.0, 10.0));
    }
}
