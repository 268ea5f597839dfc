//! Conversion parameters.
//!
//! Contains ConversionParams and ShadingParams for controlling how paint,
//! clip and shading operators are turned into SVG geometry.

use crate::path::PathFormat;

/// Parameters for shading mesh tessellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParams {
    /// Maximum extent of a flat-colored segment, in device units. Smaller
    /// values produce smoother gradients and more output.
    pub segment_size: f64,

    /// If adjacent segments should slightly overlap to hide hairline seams.
    pub overlap: bool,

    /// Regions whose corner colors differ by at most this value in every
    /// component are emitted as a single segment.
    pub simplify_delta: f64,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            segment_size: 20.0,
            overlap: false,
            simplify_delta: 0.01,
        }
    }
}

impl ShadingParams {
    /// Creates new shading parameters with the specified values.
    ///
    /// # Panics
    /// Panics if segment_size is not positive or simplify_delta is negative.
    pub fn new(segment_size: f64, overlap: bool, simplify_delta: f64) -> Self {
        assert!(segment_size > 0.0, "segment_size must be positive");
        assert!(simplify_delta >= 0.0, "simplify_delta must not be negative");
        Self {
            segment_size,
            overlap,
            simplify_delta,
        }
    }
}

/// Parameters for a conversion session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionParams {
    /// If successive clip paths should be intersected geometrically. When
    /// false, nested clips are expressed by chaining `clip-path` references.
    pub compute_clip_intersections: bool,

    /// Shading mesh tessellation settings.
    pub shading: ShadingParams,

    /// Maximum deviation of the polygons curves are flattened to before
    /// clip paths are intersected.
    pub curve_flatness: f64,

    /// Coordinate mode of emitted path data.
    pub path_format: PathFormat,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            compute_clip_intersections: false,
            shading: ShadingParams::default(),
            curve_flatness: 0.01,
            path_format: PathFormat::Absolute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ConversionParams::default();
        assert!(!params.compute_clip_intersections);
        assert_eq!(params.shading.segment_size, 20.0);
        assert!(!params.shading.overlap);
        assert_eq!(params.shading.simplify_delta, 0.01);
        assert_eq!(params.path_format, PathFormat::Absolute);
    }

    #[test]
    #[should_panic(expected = "segment_size must be positive")]
    fn test_shading_params_rejects_zero_segment_size() {
        ShadingParams::new(0.0, false, 0.01);
    }
}
