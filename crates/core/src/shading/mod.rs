//! Shading meshes (shading types 4 to 7).
//!
//! Smooth shadings can't be expressed in SVG, so every patch of a mesh is
//! subdivided into flat-colored segments small enough to approximate the
//! color gradient.
//!
//! - `reader` - Reads patches from the operand stream of `shfill` (MeshReader)
//! - `tensor` - Coons and tensor-product patches (TensorPatch)
//! - `triangular` - Free-form and lattice triangles (TriangularPatch)

pub mod reader;
pub mod tensor;
pub mod triangular;

pub use reader::MeshReader;
pub use tensor::TensorPatch;
pub use triangular::TriangularPatch;

use crate::error::{PsError, Result};
use crate::model::{Color, ColorSpace, Components};
use crate::params::ShadingParams;
use crate::path::GraphicsPath;
use crate::utils::{Point, Rect, mult_matrix, scaling_matrix, translation_matrix};

/// Maximum subdivision depth of a single patch.
pub(crate) const MAX_DEPTH: u32 = 8;

/// Mesh shading types handled by `shfill`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingType {
    /// Type 4
    FreeFormTriangular,
    /// Type 5
    LatticeTriangular,
    /// Type 6
    Coons,
    /// Type 7
    TensorProduct,
}

impl ShadingType {
    /// Maps the numeric shading type, None for unsupported types.
    pub const fn from_ps(id: i32) -> Option<Self> {
        match id {
            4 => Some(ShadingType::FreeFormTriangular),
            5 => Some(ShadingType::LatticeTriangular),
            6 => Some(ShadingType::Coons),
            7 => Some(ShadingType::TensorProduct),
            _ => None,
        }
    }

    pub const fn id(self) -> i32 {
        match self {
            ShadingType::FreeFormTriangular => 4,
            ShadingType::LatticeTriangular => 5,
            ShadingType::Coons => 6,
            ShadingType::TensorProduct => 7,
        }
    }

    /// Largest edge flag a patch of this type accepts.
    pub const fn max_edgeflag(self) -> i32 {
        match self {
            ShadingType::FreeFormTriangular => 2,
            ShadingType::LatticeTriangular => 0,
            ShadingType::Coons | ShadingType::TensorProduct => 3,
        }
    }
}

/// A single patch of a shading mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadingPatch {
    FreeFormTriangular(TriangularPatch),
    LatticeTriangular(TriangularPatch),
    Coons(TensorPatch),
    TensorProduct(TensorPatch),
}

impl ShadingPatch {
    /// Number of points read from the mesh data for a patch with the given
    /// edge flag.
    pub const fn num_points(kind: ShadingType, edgeflag: i32) -> usize {
        match (kind, edgeflag) {
            (ShadingType::FreeFormTriangular | ShadingType::LatticeTriangular, 0) => 3,
            (ShadingType::FreeFormTriangular | ShadingType::LatticeTriangular, _) => 1,
            (ShadingType::Coons, 0) => 12,
            (ShadingType::Coons, _) => 8,
            (ShadingType::TensorProduct, 0) => 16,
            (ShadingType::TensorProduct, _) => 12,
        }
    }

    /// Number of colors read from the mesh data for a patch with the given
    /// edge flag.
    pub const fn num_colors(kind: ShadingType, edgeflag: i32) -> usize {
        match (kind, edgeflag) {
            (ShadingType::FreeFormTriangular | ShadingType::LatticeTriangular, 0) => 3,
            (ShadingType::FreeFormTriangular | ShadingType::LatticeTriangular, _) => 1,
            (_, 0) => 4,
            _ => 2,
        }
    }

    /// Checks that a patch with `edgeflag` can follow `previous`.
    pub fn check_edgeflag(
        kind: ShadingType,
        edgeflag: i32,
        previous: Option<&ShadingPatch>,
    ) -> Result<()> {
        if !(0..=kind.max_edgeflag()).contains(&edgeflag) {
            return Err(PsError::InvalidShading(format!(
                "edge flag {edgeflag} not allowed in shading type {}",
                kind.id()
            )));
        }
        if edgeflag > 0 {
            match previous {
                None => {
                    return Err(PsError::InvalidShading(format!(
                        "edge flag {edgeflag} without preceding patch"
                    )));
                }
                Some(prev) if prev.shading_type() != kind => {
                    return Err(PsError::InvalidShading(
                        "preceding patch is of a different type".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Builds a patch from the values read for it.
    ///
    /// With a non-zero edge flag the shared edge is taken from `previous`
    /// and `points`/`colors` hold only the remaining data.
    pub fn new(
        kind: ShadingType,
        color_space: ColorSpace,
        edgeflag: i32,
        points: &[Point],
        colors: &[Components],
        previous: Option<&ShadingPatch>,
    ) -> Result<Self> {
        Self::check_edgeflag(kind, edgeflag, previous)?;
        let npoints = Self::num_points(kind, edgeflag);
        let ncolors = Self::num_colors(kind, edgeflag);
        if points.len() != npoints || colors.len() != ncolors {
            return Err(PsError::InvalidShading(format!(
                "expected {npoints} points and {ncolors} colors, got {} and {}",
                points.len(),
                colors.len()
            )));
        }
        let patch = match kind {
            ShadingType::FreeFormTriangular | ShadingType::LatticeTriangular => {
                let prev = previous.and_then(ShadingPatch::as_triangular);
                let tri = TriangularPatch::from_data(edgeflag, points, colors, color_space, prev);
                if kind == ShadingType::FreeFormTriangular {
                    ShadingPatch::FreeFormTriangular(tri)
                } else {
                    ShadingPatch::LatticeTriangular(tri)
                }
            }
            ShadingType::Coons => {
                let prev = previous.and_then(ShadingPatch::as_tensor);
                ShadingPatch::Coons(TensorPatch::from_coons_data(
                    edgeflag,
                    points,
                    colors,
                    color_space,
                    prev,
                ))
            }
            ShadingType::TensorProduct => {
                let prev = previous.and_then(ShadingPatch::as_tensor);
                ShadingPatch::TensorProduct(TensorPatch::from_tensor_data(
                    edgeflag,
                    points,
                    colors,
                    color_space,
                    prev,
                ))
            }
        };
        Ok(patch)
    }

    pub const fn shading_type(&self) -> ShadingType {
        match self {
            ShadingPatch::FreeFormTriangular(_) => ShadingType::FreeFormTriangular,
            ShadingPatch::LatticeTriangular(_) => ShadingType::LatticeTriangular,
            ShadingPatch::Coons(_) => ShadingType::Coons,
            ShadingPatch::TensorProduct(_) => ShadingType::TensorProduct,
        }
    }

    pub const fn color_space(&self) -> ColorSpace {
        match self {
            ShadingPatch::FreeFormTriangular(t) | ShadingPatch::LatticeTriangular(t) => {
                t.color_space()
            }
            ShadingPatch::Coons(t) | ShadingPatch::TensorProduct(t) => t.color_space(),
        }
    }

    fn as_triangular(&self) -> Option<&TriangularPatch> {
        match self {
            ShadingPatch::FreeFormTriangular(t) | ShadingPatch::LatticeTriangular(t) => Some(t),
            _ => None,
        }
    }

    fn as_tensor(&self) -> Option<&TensorPatch> {
        match self {
            ShadingPatch::Coons(t) | ShadingPatch::TensorProduct(t) => Some(t),
            _ => None,
        }
    }

    /// Exact bounding box of the patch boundary in user space.
    pub fn bbox(&self) -> Rect {
        match self {
            ShadingPatch::FreeFormTriangular(t) | ShadingPatch::LatticeTriangular(t) => t.bbox(),
            ShadingPatch::Coons(t) | ShadingPatch::TensorProduct(t) => t.bbox(),
        }
    }

    /// Subdivides the patch into flat-colored segments and passes each one
    /// to `callback`.
    pub fn approximate<F>(&self, params: &ShadingParams, callback: &mut F)
    where
        F: FnMut(&GraphicsPath, Color),
    {
        match self {
            ShadingPatch::FreeFormTriangular(t) | ShadingPatch::LatticeTriangular(t) => {
                t.approximate(params, callback)
            }
            ShadingPatch::Coons(t) | ShadingPatch::TensorProduct(t) => {
                t.approximate(params, callback)
            }
        }
    }
}

/// Component-wise mean of two colors.
pub(crate) fn mix(a: &Components, b: &Components) -> Components {
    a.iter().zip(b.iter()).map(|(x, y)| (x + y) / 2.0).collect()
}

/// Component-wise mean of a set of colors.
pub(crate) fn average(colors: &[Components]) -> Components {
    let n = colors.len().max(1) as f64;
    let len = colors.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..len)
        .map(|k| colors.iter().map(|c| c[k]).sum::<f64>() / n)
        .collect()
}

/// True if no color component varies by more than `delta`.
pub(crate) fn colors_within(colors: &[Components], delta: f64) -> bool {
    let len = colors.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..len).all(|k| {
        let (lo, hi) = colors
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c[k]), hi.max(c[k]))
            });
        hi - lo <= delta
    })
}

/// Length of a polyline through the given points.
pub(crate) fn polyline_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
        .sum()
}

/// Enlarges a segment about the center of its bounding box by 1% of its
/// size, at least 0.01 units on every side.
pub(crate) fn enlarge_segment(path: &mut GraphicsPath) {
    let Some((x0, y0, x1, y1)) = path.bbox() else {
        return;
    };
    let size = (x1 - x0).max(y1 - y0);
    if size <= 0.0 {
        return;
    }
    let margin = (size * 0.01).max(0.01);
    let scale = (size + 2.0 * margin) / size;
    let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    let m = mult_matrix(
        mult_matrix(translation_matrix(-cx, -cy), scaling_matrix(scale, scale)),
        translation_matrix(cx, cy),
    );
    path.transform(m);
}
