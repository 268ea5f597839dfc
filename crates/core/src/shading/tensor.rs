//! Coons and tensor-product patches (shading types 6 and 7).
//!
//! Both are stored in tensor form: a 4x4 grid of control points `p[i][j]`
//! where `i` follows the u and `j` the v parameter direction. Coons patches
//! get their four inner points computed from the boundary curves.

use super::{MAX_DEPTH, average, colors_within, enlarge_segment, mix, polyline_length};
use crate::model::{Color, ColorSpace, Components};
use crate::params::ShadingParams;
use crate::path::GraphicsPath;
use crate::utils::Point;

/// Grid positions of the boundary points in mesh data order.
const BOUNDARY: [(usize, usize); 12] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 3),
    (2, 3),
    (3, 3),
    (3, 2),
    (3, 1),
    (3, 0),
    (2, 0),
    (1, 0),
];

/// Grid positions of the inner points of a tensor patch in mesh data order.
const INNER: [(usize, usize); 4] = [(1, 1), (1, 2), (2, 2), (2, 1)];

type Grid = [[Point; 4]; 4];

fn split_cubic(p: [Point; 4]) -> ([Point; 4], [Point; 4]) {
    let mid = |a: Point, b: Point| ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
    let p01 = mid(p[0], p[1]);
    let p12 = mid(p[1], p[2]);
    let p23 = mid(p[2], p[3]);
    let p012 = mid(p01, p12);
    let p123 = mid(p12, p23);
    let m = mid(p012, p123);
    ([p[0], p01, p012, m], [m, p123, p23, p[3]])
}

/// Inner control point next to `corner` of a Coons patch (PDF Reference 4.6.3):
/// `(-4 corner + 6 (near) - 2 (far corners) + 3 (far edges) - opposite) / 9`.
fn coons_point(corner: Point, near: [Point; 2], far: [Point; 2], edges: [Point; 2], opposite: Point) -> Point {
    let coord = |f: fn(Point) -> f64| {
        (-4.0 * f(corner) + 6.0 * (f(near[0]) + f(near[1])) - 2.0 * (f(far[0]) + f(far[1]))
            + 3.0 * (f(edges[0]) + f(edges[1]))
            - f(opposite))
            / 9.0
    };
    (coord(|p| p.0), coord(|p| p.1))
}

fn coons_inner(p: &mut Grid) {
    let g = *p;
    p[1][1] = coons_point(g[0][0], [g[0][1], g[1][0]], [g[0][3], g[3][0]], [g[3][1], g[1][3]], g[3][3]);
    p[1][2] = coons_point(g[0][3], [g[0][2], g[1][3]], [g[0][0], g[3][3]], [g[3][2], g[1][0]], g[3][0]);
    p[2][1] = coons_point(g[3][0], [g[3][1], g[2][0]], [g[3][3], g[0][0]], [g[0][1], g[2][3]], g[0][3]);
    p[2][2] = coons_point(g[3][3], [g[3][2], g[2][3]], [g[3][0], g[0][3]], [g[0][2], g[2][0]], g[0][0]);
}

/// A patch in tensor-product form with its four corner colors.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorPatch {
    points: Grid,
    /// Colors at p00, p03, p33 and p30
    colors: [Components; 4],
    color_space: ColorSpace,
}

impl TensorPatch {
    /// Creates a patch from its 16 control points in mesh data order.
    pub fn new(points: &[Point; 16], colors: [Components; 4], color_space: ColorSpace) -> Self {
        let mut grid = [[(0.0, 0.0); 4]; 4];
        for (k, &(i, j)) in BOUNDARY.iter().chain(INNER.iter()).enumerate() {
            grid[i][j] = points[k];
        }
        Self {
            points: grid,
            colors,
            color_space,
        }
    }

    /// Creates a Coons patch from its 12 boundary points in mesh data order.
    pub fn coons(points: &[Point; 12], colors: [Components; 4], color_space: ColorSpace) -> Self {
        let mut grid = [[(0.0, 0.0); 4]; 4];
        for (k, &(i, j)) in BOUNDARY.iter().enumerate() {
            grid[i][j] = points[k];
        }
        coons_inner(&mut grid);
        Self {
            points: grid,
            colors,
            color_space,
        }
    }

    /// Prefixes the data of a patch with the edge it shares with `previous`.
    ///
    /// The slices must hold the number of values required for `edgeflag`.
    fn with_shared_edge(
        edgeflag: i32,
        points: &[Point],
        colors: &[Components],
        previous: Option<&TensorPatch>,
    ) -> (Vec<Point>, Vec<Components>) {
        match (edgeflag, previous) {
            (1..=3, Some(prev)) => {
                let (edge, corners) = prev.edge(edgeflag as usize);
                let mut all_points = edge.to_vec();
                all_points.extend_from_slice(points);
                let mut all_colors = corners.to_vec();
                all_colors.extend_from_slice(colors);
                (all_points, all_colors)
            }
            _ => (points.to_vec(), colors.to_vec()),
        }
    }

    pub(crate) fn from_coons_data(
        edgeflag: i32,
        points: &[Point],
        colors: &[Components],
        color_space: ColorSpace,
        previous: Option<&TensorPatch>,
    ) -> Self {
        let (points, colors) = Self::with_shared_edge(edgeflag, points, colors, previous);
        let points: [Point; 12] = std::array::from_fn(|k| points.get(k).copied().unwrap_or_default());
        Self::coons(&points, corner_colors(colors), color_space)
    }

    pub(crate) fn from_tensor_data(
        edgeflag: i32,
        points: &[Point],
        colors: &[Components],
        color_space: ColorSpace,
        previous: Option<&TensorPatch>,
    ) -> Self {
        let (points, colors) = Self::with_shared_edge(edgeflag, points, colors, previous);
        let points: [Point; 16] = std::array::from_fn(|k| points.get(k).copied().unwrap_or_default());
        Self::new(&points, corner_colors(colors), color_space)
    }

    /// Control point at grid position (i, j).
    pub fn point(&self, i: usize, j: usize) -> Point {
        self.points[i][j]
    }

    /// Corner colors in the order c00, c03, c33, c30.
    pub fn colors(&self) -> &[Components; 4] {
        &self.colors
    }

    pub const fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Boundary edge shared with a following patch of the given edge flag,
    /// together with the colors at its ends.
    fn edge(&self, edgeflag: usize) -> ([Point; 4], [Components; 2]) {
        let idx = |k: usize| {
            let (i, j) = BOUNDARY[k % 12];
            self.points[i][j]
        };
        let start = 3 * edgeflag;
        (
            [idx(start), idx(start + 1), idx(start + 2), idx(start + 3)],
            [
                self.colors[edgeflag % 4].clone(),
                self.colors[(edgeflag + 1) % 4].clone(),
            ],
        )
    }

    /// Closed path along the four boundary curves.
    pub fn boundary_path(&self) -> GraphicsPath {
        let p = &self.points;
        let mut path = GraphicsPath::new();
        path.move_to(p[0][0].0, p[0][0].1);
        for k in [1, 4, 7, 10] {
            let (a, b, c) = (BOUNDARY[k], BOUNDARY[k + 1], BOUNDARY[(k + 2) % 12]);
            let (a, b, c) = (p[a.0][a.1], p[b.0][b.1], p[c.0][c.1]);
            path.cubic_to(a.0, a.1, b.0, b.1, c.0, c.1);
        }
        path.close_path();
        path
    }

    /// Exact bounding box of the boundary curves.
    pub fn bbox(&self) -> crate::utils::Rect {
        let (x, y) = self.points[0][0];
        self.boundary_path().bbox().unwrap_or((x, y, x, y))
    }

    /// Longest boundary control polygon; an upper bound of the curve lengths.
    fn max_edge_length(&self) -> f64 {
        let p = &self.points;
        let edges = [
            [p[0][0], p[0][1], p[0][2], p[0][3]],
            [p[0][3], p[1][3], p[2][3], p[3][3]],
            [p[3][3], p[3][2], p[3][1], p[3][0]],
            [p[3][0], p[2][0], p[1][0], p[0][0]],
        ];
        edges
            .iter()
            .map(|e| polyline_length(e))
            .fold(0.0, f64::max)
    }

    /// Splits the patch at u = 1/2.
    fn split_u(&self) -> (Self, Self) {
        let mut lo = [[(0.0, 0.0); 4]; 4];
        let mut hi = [[(0.0, 0.0); 4]; 4];
        for j in 0..4 {
            let column = [
                self.points[0][j],
                self.points[1][j],
                self.points[2][j],
                self.points[3][j],
            ];
            let (a, b) = split_cubic(column);
            for i in 0..4 {
                lo[i][j] = a[i];
                hi[i][j] = b[i];
            }
        }
        let [c00, c03, c33, c30] = &self.colors;
        let m0 = mix(c00, c30);
        let m1 = mix(c03, c33);
        (
            self.with_parts(lo, [c00.clone(), c03.clone(), m1.clone(), m0.clone()]),
            self.with_parts(hi, [m0, m1, c33.clone(), c30.clone()]),
        )
    }

    /// Splits the patch at v = 1/2.
    fn split_v(&self) -> (Self, Self) {
        let mut lo = [[(0.0, 0.0); 4]; 4];
        let mut hi = [[(0.0, 0.0); 4]; 4];
        for i in 0..4 {
            let (a, b) = split_cubic(self.points[i]);
            lo[i] = a;
            hi[i] = b;
        }
        let [c00, c03, c33, c30] = &self.colors;
        let n0 = mix(c00, c03);
        let n1 = mix(c30, c33);
        (
            self.with_parts(lo, [c00.clone(), n0.clone(), n1.clone(), c30.clone()]),
            self.with_parts(hi, [n0, c03.clone(), c33.clone(), n1]),
        )
    }

    fn with_parts(&self, points: Grid, colors: [Components; 4]) -> Self {
        Self {
            points,
            colors,
            color_space: self.color_space,
        }
    }

    /// Subdivides the patch into flat-colored segments.
    pub fn approximate<F>(&self, params: &ShadingParams, callback: &mut F)
    where
        F: FnMut(&GraphicsPath, Color),
    {
        self.subdivide(params, 0, callback);
    }

    fn subdivide<F>(&self, params: &ShadingParams, depth: u32, callback: &mut F)
    where
        F: FnMut(&GraphicsPath, Color),
    {
        if colors_within(&self.colors, params.simplify_delta)
            || depth >= MAX_DEPTH
            || self.max_edge_length() <= params.segment_size
        {
            let mut path = self.boundary_path();
            if params.overlap {
                enlarge_segment(&mut path);
            }
            callback(&path, self.color_space.to_rgb(&average(&self.colors)));
            return;
        }
        let (left, right) = self.split_u();
        for half in [left, right] {
            let (lower, upper) = half.split_v();
            lower.subdivide(params, depth + 1, callback);
            upper.subdivide(params, depth + 1, callback);
        }
    }
}

fn corner_colors(colors: Vec<Components>) -> [Components; 4] {
    let mut it = colors.into_iter();
    std::array::from_fn(|_| it.next().unwrap_or_default())
}
