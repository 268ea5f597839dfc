//! Geometry helpers shared by the path, clipping and shading code.
//!
//! Provides:
//! - Geometric types (Point, Rect, Matrix)
//! - Matrix construction and composition in PostScript order
//! - Bounding box arithmetic
//! - Number formatting for SVG attribute values

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// Number of decimal places written to SVG attribute values.
pub const DECIMAL_PLACES: usize = 4;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A rectangle defined by (x0, y0, x1, y1) with x0 <= x1 and y0 <= y1.
pub type Rect = (f64, f64, f64, f64);

/// A 6-element affine transformation matrix (a, b, c, d, e, f).
///
/// The components follow the PostScript operand order `[a b c d e f]`, which
/// denotes the row-vector matrix `[[a,b,0],[c,d,0],[e,f,1]]`. Applied to
/// column vectors the same tuple is the matrix `[[a,c,e],[b,d,f],[0,0,1]]`,
/// so a point (x, y) maps to (ax + cy + e, bx + dy + f).
pub type Matrix = (f64, f64, f64, f64, f64, f64);

/// Identity transformation matrix.
pub const MATRIX_IDENTITY: Matrix = (1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Compares two points for approximate equality.
#[inline]
pub fn point_eq(p: Point, q: Point) -> bool {
    approx_eq(p.0, q.0, EPSILON) && approx_eq(p.1, q.1, EPSILON)
}

/// Multiplies two matrices: result = m1 * m0.
/// This applies m1 first, then m0.
///
/// PostScript composes operators by left-multiplication (`CTM' = T × CTM`),
/// so `mult_matrix(t, ctm)` is the new CTM after applying `t`.
pub fn mult_matrix(m1: Matrix, m0: Matrix) -> Matrix {
    let (a1, b1, c1, d1, e1, f1) = m1;
    let (a0, b0, c0, d0, e0, f0) = m0;
    (
        a0 * a1 + c0 * b1,
        b0 * a1 + d0 * b1,
        a0 * c1 + c0 * d1,
        b0 * c1 + d0 * d1,
        a0 * e1 + c0 * f1 + e0,
        b0 * e1 + d0 * f1 + f0,
    )
}

/// Scaling matrix.
pub const fn scaling_matrix(sx: f64, sy: f64) -> Matrix {
    (sx, 0.0, 0.0, sy, 0.0, 0.0)
}

/// Translation matrix.
pub const fn translation_matrix(tx: f64, ty: f64) -> Matrix {
    (1.0, 0.0, 0.0, 1.0, tx, ty)
}

/// Rotation matrix for a counter-clockwise rotation given in degrees.
pub fn rotation_matrix(degrees: f64) -> Matrix {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    (cos, sin, -sin, cos, 0.0, 0.0)
}

/// Builds a matrix from six values in PostScript order, starting at `start`.
///
/// Missing trailing components are taken from the identity matrix, so a
/// truncated operand list still yields a usable transformation.
pub fn create_matrix(values: &[f64], start: usize) -> Matrix {
    let identity = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    let mut m = identity;
    for (i, slot) in m.iter_mut().enumerate() {
        if let Some(v) = values.get(start + i) {
            *slot = *v;
        }
    }
    (m[0], m[1], m[2], m[3], m[4], m[5])
}

/// Returns true if the matrix is the identity.
pub fn is_identity(m: Matrix) -> bool {
    let (a, b, c, d, e, f) = m;
    approx_eq(a, 1.0, EPSILON)
        && approx_eq(b, 0.0, EPSILON)
        && approx_eq(c, 0.0, EPSILON)
        && approx_eq(d, 1.0, EPSILON)
        && approx_eq(e, 0.0, EPSILON)
        && approx_eq(f, 0.0, EPSILON)
}

/// Applies a matrix to a point.
pub fn apply_matrix_pt(m: Matrix, v: Point) -> Point {
    let (a, b, c, d, e, f) = m;
    let (x, y) = v;
    (a * x + c * y + e, b * x + d * y + f)
}

/// Applies a matrix to a rectangle.
///
/// Note that the result is not a rotated rectangle, but a rectangle with the same
/// orientation that tightly fits the outside of the rotated content.
pub fn apply_matrix_rect(m: Matrix, rect: Rect) -> Rect {
    let (x0, y0, x1, y1) = rect;
    get_bound([
        apply_matrix_pt(m, (x0, y0)),
        apply_matrix_pt(m, (x1, y0)),
        apply_matrix_pt(m, (x1, y1)),
        apply_matrix_pt(m, (x0, y1)),
    ])
}

/// Computes the bounding box of a set of points.
///
/// Returns an inverted infinite box for an empty input; callers that care
/// should check for emptiness first.
pub fn get_bound<I: IntoIterator<Item = Point>>(pts: I) -> Rect {
    let mut x0 = f64::INFINITY;
    let mut y0 = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    let mut y1 = f64::NEG_INFINITY;
    for (x, y) in pts {
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x);
        y1 = y1.max(y);
    }
    (x0, y0, x1, y1)
}

/// Smallest rectangle enclosing both rectangles.
pub fn rect_union(a: Rect, b: Rect) -> Rect {
    (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3))
}

/// Intersection of two rectangles, or None if they don't overlap.
pub fn rect_intersect(a: Rect, b: Rect) -> Option<Rect> {
    let r = (a.0.max(b.0), a.1.max(b.1), a.2.min(b.2), a.3.min(b.3));
    (r.0 <= r.2 && r.1 <= r.3).then_some(r)
}

/// Grows a rectangle by `margin` on every side.
pub fn rect_expand(r: Rect, margin: f64) -> Rect {
    (r.0 - margin, r.1 - margin, r.2 + margin, r.3 + margin)
}

/// Formats a number for use in SVG output.
///
/// Rounds to [`DECIMAL_PLACES`] and strips trailing zeros, so `10.0` becomes
/// `"10"` and `-0.00001` becomes `"0"`.
pub fn fmt_num(v: f64) -> String {
    let mut s = format!("{:.*}", DECIMAL_PLACES, v);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

/// Formats a matrix as an SVG `matrix(...)` transform.
pub fn matrix2svg(m: Matrix) -> String {
    let (a, b, c, d, e, f) = m;
    format!(
        "matrix({} {} {} {} {} {})",
        fmt_num(a),
        fmt_num(b),
        fmt_num(c),
        fmt_num(d),
        fmt_num(e),
        fmt_num(f)
    )
}

/// Formats a rectangle as an SVG `viewBox` value (x y width height).
pub fn rect2viewbox(r: Rect) -> String {
    format!(
        "{} {} {} {}",
        fmt_num(r.0),
        fmt_num(r.1),
        fmt_num(r.2 - r.0),
        fmt_num(r.3 - r.1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mult_matrix_applies_first_argument_first() {
        // translate then scale: (1,1) -> (3,1) -> (6,2)
        let m = mult_matrix(translation_matrix(2.0, 0.0), scaling_matrix(2.0, 2.0));
        assert_eq!(apply_matrix_pt(m, (1.0, 1.0)), (6.0, 2.0));
    }

    #[test]
    fn test_create_matrix_pads_with_identity() {
        assert_eq!(create_matrix(&[2.0, 0.0], 0), (2.0, 0.0, 0.0, 1.0, 0.0, 0.0));
        assert_eq!(
            create_matrix(&[9.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 1),
            (1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
        );
    }

    #[test]
    fn test_rotation_matrix_quarter_turn() {
        let (x, y) = apply_matrix_pt(rotation_matrix(90.0), (1.0, 0.0));
        assert!(approx_eq(x, 0.0, 1e-12));
        assert!(approx_eq(y, 1.0, 1e-12));
    }

    #[test]
    fn test_rect_intersect() {
        assert_eq!(
            rect_intersect((0.0, 0.0, 10.0, 10.0), (5.0, 5.0, 15.0, 15.0)),
            Some((5.0, 5.0, 10.0, 10.0))
        );
        assert_eq!(rect_intersect((0.0, 0.0, 1.0, 1.0), (2.0, 2.0, 3.0, 3.0)), None);
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(-0.00001), "0");
        assert_eq!(fmt_num(1.23456), "1.2346");
        assert_eq!(fmt_num(-2.5), "-2.5");
    }
}
