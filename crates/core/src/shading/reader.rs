//! Sequential reader for the mesh data of `shfill`.

use smallvec::SmallVec;

use super::{ShadingPatch, ShadingType};
use crate::error::{PsError, Result};
use crate::model::{ColorSpace, Components};
use crate::utils::Point;

/// Cursor over the numeric mesh data of a shading.
///
/// Every read fails with [`PsError::IncompleteShadingData`] once the data
/// is exhausted.
#[derive(Debug, Clone)]
pub struct MeshReader<'a> {
    data: &'a [f64],
    pos: usize,
}

impl<'a> MeshReader<'a> {
    pub const fn new(data: &'a [f64]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of values not read yet.
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let value = self
            .data
            .get(self.pos)
            .copied()
            .ok_or(PsError::IncompleteShadingData)?;
        self.pos += 1;
        Ok(value)
    }

    pub fn read_int(&mut self) -> Result<i32> {
        Ok(self.read_f64()? as i32)
    }

    pub fn read_point(&mut self) -> Result<Point> {
        let x = self.read_f64()?;
        let y = self.read_f64()?;
        Ok((x, y))
    }

    /// Reads the components of one color in `color_space`.
    pub fn read_color(&mut self, color_space: ColorSpace) -> Result<Components> {
        (0..color_space.ncomponents())
            .map(|_| self.read_f64())
            .collect()
    }

    /// Reads the next patch of a free-form, Coons or tensor-product mesh.
    ///
    /// Triangles are encoded as `flag x y color` per vertex; the flags of
    /// the second and third vertex are skipped. Coons and tensor patches are
    /// encoded as `flag`, all points, then all colors.
    pub fn read_patch(
        &mut self,
        kind: ShadingType,
        color_space: ColorSpace,
        previous: Option<&ShadingPatch>,
    ) -> Result<ShadingPatch> {
        let edgeflag = self.read_int()?;
        ShadingPatch::check_edgeflag(kind, edgeflag, previous)?;
        let npoints = ShadingPatch::num_points(kind, edgeflag);
        let ncolors = ShadingPatch::num_colors(kind, edgeflag);
        let mut points: SmallVec<[Point; 16]> = SmallVec::new();
        let mut colors: SmallVec<[Components; 4]> = SmallVec::new();
        match kind {
            ShadingType::FreeFormTriangular | ShadingType::LatticeTriangular => {
                for i in 0..npoints {
                    if i > 0 {
                        self.read_f64()?;
                    }
                    points.push(self.read_point()?);
                    colors.push(self.read_color(color_space)?);
                }
            }
            ShadingType::Coons | ShadingType::TensorProduct => {
                for _ in 0..npoints {
                    points.push(self.read_point()?);
                }
                for _ in 0..ncolors {
                    colors.push(self.read_color(color_space)?);
                }
            }
        }
        ShadingPatch::new(kind, color_space, edgeflag, &points, &colors, previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_past_end() {
        let data = [1.0, 2.0, 3.0];
        let mut reader = MeshReader::new(&data);
        assert_eq!(reader.read_point().unwrap(), (1.0, 2.0));
        assert_eq!(reader.remaining(), 1);
        assert!(matches!(
            reader.read_point(),
            Err(PsError::IncompleteShadingData)
        ));
    }

    #[test]
    fn test_read_triangles() {
        #[rustfmt::skip]
        let data = [
            0.0, 0.0, 0.0, 0.1,
            0.0, 10.0, 0.0, 0.2,
            0.0, 0.0, 10.0, 0.3,
            1.0, 10.0, 10.0, 0.4,
        ];
        let mut reader = MeshReader::new(&data);
        let kind = ShadingType::FreeFormTriangular;
        let first = reader.read_patch(kind, ColorSpace::Gray, None).unwrap();
        let second = reader
            .read_patch(kind, ColorSpace::Gray, Some(&first))
            .unwrap();
        assert!(reader.is_empty());
        let ShadingPatch::FreeFormTriangular(tri) = second else {
            panic!("expected a triangle");
        };
        assert_eq!(tri.vertices(), &[(10.0, 0.0), (0.0, 10.0), (10.0, 10.0)]);
    }

    #[test]
    fn test_read_coons_patch() {
        let mut data = vec![0.0];
        for k in 0..12 {
            data.extend([k as f64, 0.0]);
        }
        data.extend([0.0, 0.25, 0.5, 1.0]);
        let mut reader = MeshReader::new(&data);
        let patch = reader
            .read_patch(ShadingType::Coons, ColorSpace::Gray, None)
            .unwrap();
        assert!(reader.is_empty());
        let ShadingPatch::Coons(coons) = patch else {
            panic!("expected a Coons patch");
        };
        assert_eq!(coons.point(3, 0), (9.0, 0.0));
        assert_eq!(coons.colors()[3].as_slice(), &[1.0]);
    }

    #[test]
    fn test_edge_flag_without_predecessor() {
        let data = [2.0, 0.0, 0.0, 0.5];
        let mut reader = MeshReader::new(&data);
        let result = reader.read_patch(ShadingType::FreeFormTriangular, ColorSpace::Gray, None);
        assert!(matches!(result, Err(PsError::InvalidShading(_))));
    }

    #[test]
    fn test_truncated_patch() {
        let data = [0.0, 0.0, 0.0, 0.5, 0.0, 1.0];
        let mut reader = MeshReader::new(&data);
        let result = reader.read_patch(ShadingType::FreeFormTriangular, ColorSpace::Gray, None);
        assert!(matches!(result, Err(PsError::IncompleteShadingData)));
    }
}
