//! Shading operator.
//!
//! Handles: shfill
//!
//! Mesh shadings (types 4 to 7) are tessellated into flat-colored segments.
//! The segments of one `shfill` call are collected in a `<g>` carrying the
//! clip path in effect.

use crate::error::{PsError, Result};
use crate::interp::clip_stack::UNMARKED;
use crate::interp::handler::PsGraphicsHandler;
use crate::model::{Color, ColorSpace, Components};
use crate::path::{GraphicsPath, PathFormat};
use crate::shading::{MeshReader, ShadingPatch, ShadingType, TriangularPatch};
use crate::svg::{SvgDevice, XmlElement};
use crate::utils::{Matrix, Point, Rect, apply_matrix_rect};

/// Optional leading fields of the `shfill` mesh data.
struct ShadingHeader {
    /// Background color; parsed but not painted
    background: Option<Components>,
    bbox: Option<Rect>,
}

impl ShadingHeader {
    fn read(reader: &mut MeshReader<'_>, color_space: ColorSpace) -> Result<Self> {
        let background = if reader.read_f64()? != 0.0 {
            Some(reader.read_color(color_space)?)
        } else {
            None
        };
        let bbox = if reader.read_f64()? != 0.0 {
            let (x1, y1) = reader.read_point()?;
            let (x2, y2) = reader.read_point()?;
            Some((x1, y1, x2, y2))
        } else {
            None
        };
        Ok(Self { background, bbox })
    }
}

/// A lattice vertex with its color.
type Vertex = (Point, Components);

impl<'a, D: SvgDevice> PsGraphicsHandler<'a, D> {
    /// Paints a mesh shading.
    ///
    /// Operands: `type colorspace bgflag [bgcolor] bboxflag [x1 y1 x2 y2]`
    /// followed by the mesh data. Calls with fewer than 9 operands are
    /// ignored. Malformed mesh data stops the processing of the remaining
    /// patches; segments emitted before are kept.
    ///
    /// PostScript operator: `shfill`
    pub fn do_shfill(&mut self, operands: &[f64]) -> Result<()> {
        if operands.len() < 9 {
            return Ok(());
        }
        let type_id = operands[0] as i32;
        let kind = ShadingType::from_ps(type_id).ok_or(PsError::UnsupportedShading(type_id))?;
        let color_space = ColorSpace::from_ps_id(operands[1] as i32);
        let mut reader = MeshReader::new(&operands[2..]);
        let header = match ShadingHeader::read(&mut reader, color_space) {
            Ok(header) => header,
            Err(err) => {
                tracing::warn!(shading = type_id, "PostScript error: {err}");
                return Ok(());
            }
        };

        tracing::trace!(
            shading = type_id,
            background = ?header.background,
            bbox = ?header.bbox,
            "processing shading"
        );
        if let Some((x1, y1, x2, y2)) = header.bbox {
            self.clip_stack.dup(UNMARKED);
            self.clip_path(GraphicsPath::from_rect(x1, y1, x2, y2), false);
        }
        let result = match kind {
            ShadingType::LatticeTriangular => {
                self.process_lattice_triangular_patch_mesh(color_space, &mut reader)
            }
            _ => self.process_sequential_patch_mesh(kind, color_space, &mut reader),
        };
        if let Err(err) = result {
            tracing::warn!(shading = type_id, "PostScript error: {err}");
        }
        if header.bbox.is_some() {
            self.clip_stack.pop(UNMARKED, false);
        }
        Ok(())
    }

    /// Processes free-form triangular, Coons and tensor-product meshes,
    /// whose patches can be read one after another.
    fn process_sequential_patch_mesh(
        &mut self,
        kind: ShadingType,
        color_space: ColorSpace,
        reader: &mut MeshReader<'_>,
    ) -> Result<()> {
        let ctm = self.graphicstate.ctm;
        let format = self.params.path_format;
        let shading = self.params.shading;
        let mut group = self.shading_group();
        let mut previous: Option<ShadingPatch> = None;
        let mut result = Ok(());
        while !reader.is_empty() {
            let patch = match reader.read_patch(kind, color_space, previous.as_ref()) {
                Ok(patch) => patch,
                Err(err) => {
                    result = Err(err);
                    break;
                }
            };
            patch.approximate(&shading, &mut |path, color| {
                group.append(segment_node(path, color, ctm, format));
            });
            self.embed(apply_matrix_rect(ctm, patch.bbox()));
            previous = Some(patch);
        }
        self.finish_shading_group(group);
        result
    }

    /// Processes a lattice-form triangular mesh. Each pair of adjacent
    /// vertex rows forms two triangles per column.
    ///
    /// Unlike a draw-only pass, every triangle also reports its bbox to the
    /// page, so lattice meshes extend the page bbox the same way the
    /// patches of sequential meshes do.
    fn process_lattice_triangular_patch_mesh(
        &mut self,
        color_space: ColorSpace,
        reader: &mut MeshReader<'_>,
    ) -> Result<()> {
        let vertices_per_row = reader.read_int()?;
        if vertices_per_row < 2 {
            return Ok(());
        }
        let width = vertices_per_row as usize;
        let read_row = |reader: &mut MeshReader<'_>| -> Result<Vec<Vertex>> {
            (0..width)
                .map(|_| -> Result<Vertex> {
                    Ok((reader.read_point()?, reader.read_color(color_space)?))
                })
                .collect()
        };

        let ctm = self.graphicstate.ctm;
        let format = self.params.path_format;
        let shading = self.params.shading;
        let mut row1 = read_row(reader)?;
        let mut group = self.shading_group();
        let mut result = Ok(());
        while !reader.is_empty() {
            let row2 = match read_row(reader) {
                Ok(row) => row,
                Err(err) => {
                    result = Err(err);
                    break;
                }
            };
            for i in 0..width - 1 {
                let (v1, v2) = (&row1[i], &row1[i + 1]);
                let (v3, v4) = (&row2[i], &row2[i + 1]);
                for [a, b, c] in [[v1, v2, v3], [v2, v3, v4]] {
                    let patch = TriangularPatch::new(
                        [a.0, b.0, c.0],
                        [a.1.clone(), b.1.clone(), c.1.clone()],
                        color_space,
                    );
                    patch.approximate(&shading, &mut |path, color| {
                        group.append(segment_node(path, color, ctm, format));
                    });
                    self.embed(apply_matrix_rect(ctm, patch.bbox()));
                }
            }
            row1 = row2;
        }
        self.finish_shading_group(group);
        result
    }

    fn shading_group(&self) -> XmlElement {
        let mut group = XmlElement::new("g");
        let clip_id = self.clip_stack.top_id();
        if clip_id > 0 {
            group.set_attribute("clip-path", format!("url(#clip{clip_id})"));
        }
        group
    }

    fn finish_shading_group(&mut self, group: XmlElement) {
        if !group.is_empty() {
            self.append_node(group);
        }
    }
}

/// Builds the node of a single segment given in user space.
fn segment_node(path: &GraphicsPath, color: Color, ctm: Matrix, format: PathFormat) -> XmlElement {
    let mut node = XmlElement::new("path");
    node.set_attribute("d", path.transformed(ctm).to_svg(format));
    node.set_attribute("fill", color.svg_color_string());
    node
}
