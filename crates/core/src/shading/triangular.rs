//! Triangular patches of free-form (type 4) and lattice-form (type 5) meshes.

use super::{MAX_DEPTH, average, colors_within, enlarge_segment, mix};
use crate::model::{Color, ColorSpace, Components};
use crate::params::ShadingParams;
use crate::path::GraphicsPath;
use crate::utils::{Point, Rect, get_bound};

/// A triangle with a color at each vertex; colors vary linearly in between.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularPatch {
    vertices: [Point; 3],
    colors: [Components; 3],
    color_space: ColorSpace,
}

impl TriangularPatch {
    pub fn new(vertices: [Point; 3], colors: [Components; 3], color_space: ColorSpace) -> Self {
        Self {
            vertices,
            colors,
            color_space,
        }
    }

    /// Builds a triangle from mesh data. With edge flag 1 the triangle
    /// continues the edge (vb, vc) of the previous triangle (va, vb, vc),
    /// with edge flag 2 the edge (va, vc); the data then holds the new
    /// vertex only.
    pub(crate) fn from_data(
        edgeflag: i32,
        points: &[Point],
        colors: &[Components],
        color_space: ColorSpace,
        previous: Option<&TriangularPatch>,
    ) -> Self {
        let point = |k: usize| points.get(k).copied().unwrap_or_default();
        let color = |k: usize| colors.get(k).cloned().unwrap_or_default();
        match (edgeflag, previous) {
            (1 | 2, Some(prev)) => {
                let keep = if edgeflag == 1 { 1 } else { 0 };
                Self::new(
                    [prev.vertices[keep], prev.vertices[2], point(0)],
                    [prev.colors[keep].clone(), prev.colors[2].clone(), color(0)],
                    color_space,
                )
            }
            _ => Self::new(
                [point(0), point(1), point(2)],
                [color(0), color(1), color(2)],
                color_space,
            ),
        }
    }

    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    pub fn colors(&self) -> &[Components; 3] {
        &self.colors
    }

    pub const fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn bbox(&self) -> Rect {
        get_bound(self.vertices)
    }

    fn path(&self) -> GraphicsPath {
        let [a, b, c] = self.vertices;
        let mut path = GraphicsPath::new();
        path.move_to(a.0, a.1);
        path.line_to(b.0, b.1);
        path.line_to(c.0, c.1);
        path.close_path();
        path
    }

    fn max_edge_length(&self) -> f64 {
        let [a, b, c] = self.vertices;
        let len = |p: Point, q: Point| (q.0 - p.0).hypot(q.1 - p.1);
        len(a, b).max(len(b, c)).max(len(c, a))
    }

    /// Subdivides the triangle into flat-colored segments.
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
            let mut path = self.path();
            if params.overlap {
                enlarge_segment(&mut path);
            }
            callback(&path, self.color_space.to_rgb(&average(&self.colors)));
            return;
        }
        let [a, b, c] = self.vertices;
        let [ca, cb, cc] = &self.colors;
        let mid = |p: Point, q: Point| ((p.0 + q.0) / 2.0, (p.1 + q.1) / 2.0);
        let (ab, bc, ca_) = (mid(a, b), mid(b, c), mid(c, a));
        let (cab, cbc, cca) = (mix(ca, cb), mix(cb, cc), mix(cc, ca));
        let children = [
            ([a, ab, ca_], [ca.clone(), cab.clone(), cca.clone()]),
            ([ab, b, bc], [cab.clone(), cb.clone(), cbc.clone()]),
            ([ca_, bc, c], [cca.clone(), cbc.clone(), cc.clone()]),
            ([ab, bc, ca_], [cab, cbc, cca]),
        ];
        for (vertices, colors) in children {
            Self::new(vertices, colors, self.color_space).subdivide(params, depth + 1, callback);
        }
    }
}
