//! Color values and the color spaces used by shading meshes.

use smallvec::SmallVec;

/// Color components in a shading color space (1, 3 or 4 values).
pub type Components = SmallVec<[f64; 4]>;

/// Color space of shading data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    Gray,
    #[default]
    Rgb,
    Cmyk,
}

impl ColorSpace {
    /// Maps the numeric color space tag of `shfill` (1=gray, 3=rgb, 4=cmyk).
    ///
    /// Unknown tags fall back to RGB.
    pub const fn from_ps_id(id: i32) -> Self {
        match id {
            1 => ColorSpace::Gray,
            4 => ColorSpace::Cmyk,
            _ => ColorSpace::Rgb,
        }
    }

    /// Number of color components.
    pub const fn ncomponents(self) -> usize {
        match self {
            ColorSpace::Gray => 1,
            ColorSpace::Rgb => 3,
            ColorSpace::Cmyk => 4,
        }
    }

    /// Converts components of this color space to an RGB color.
    pub fn to_rgb(self, c: &[f64]) -> Color {
        let get = |i: usize| c.get(i).copied().unwrap_or(0.0);
        match self {
            ColorSpace::Gray => Color::from_gray(get(0)),
            ColorSpace::Rgb => Color::from_rgb(get(0), get(1), get(2)),
            ColorSpace::Cmyk => Color::from_cmyk(get(0), get(1), get(2), get(3)),
        }
    }
}

/// Named SVG colors that are shorter than their hex notation.
const NAMED_COLORS: [(u8, u8, u8, &str); 10] = [
    (0x00, 0x00, 0x00, "black"),
    (0xff, 0xff, 0xff, "white"),
    (0xff, 0x00, 0x00, "red"),
    (0x00, 0x00, 0xff, "blue"),
    (0x00, 0x80, 0x00, "green"),
    (0x00, 0xff, 0x00, "lime"),
    (0xff, 0xff, 0x00, "yellow"),
    (0x80, 0x80, 0x80, "gray"),
    (0x80, 0x00, 0x80, "purple"),
    (0xff, 0xa5, 0x00, "orange"),
];

/// An opaque RGB color with components in [0, 1].
///
/// Equality compares the 8-bit quantized components, which is the precision
/// of the SVG output.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn from_gray(g: f64) -> Self {
        let g = g.clamp(0.0, 1.0);
        Self { r: g, g, b: g }
    }

    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// CMYK to RGB as defined for `setcmykcolor` (PLRM 7.2.4).
    pub fn from_cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self::from_rgb(
            1.0 - (c + k).min(1.0),
            1.0 - (m + k).min(1.0),
            1.0 - (y + k).min(1.0),
        )
    }

    /// HSB (hue, saturation, brightness; all in [0, 1]) to RGB.
    pub fn from_hsb(h: f64, s: f64, v: f64) -> Self {
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::from_gray(v);
        }
        let h = (h.rem_euclid(1.0)) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as i32 {
            0 => Self::from_rgb(v, t, p),
            1 => Self::from_rgb(q, v, p),
            2 => Self::from_rgb(p, v, t),
            3 => Self::from_rgb(p, q, v),
            4 => Self::from_rgb(t, p, v),
            _ => Self::from_rgb(v, p, q),
        }
    }

    /// Components quantized to 8 bits.
    pub fn to_bytes(self) -> (u8, u8, u8) {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// SVG color string: a color name where one is shorter, `#rrggbb` otherwise.
    pub fn svg_color_string(self) -> String {
        let (r, g, b) = self.to_bytes();
        if let Some((_, _, _, name)) = NAMED_COLORS
            .iter()
            .find(|(nr, ng, nb, _)| (*nr, *ng, *nb) == (r, g, b))
        {
            return (*name).to_string();
        }
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Color {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_color_string() {
        assert_eq!(Color::from_rgb(1.0, 0.0, 0.0).svg_color_string(), "red");
        assert_eq!(Color::BLACK.svg_color_string(), "black");
        assert_eq!(Color::from_rgb(0.2, 0.4, 0.6).svg_color_string(), "#336699");
    }

    #[test]
    fn test_cmyk_and_hsb_conversion() {
        assert_eq!(Color::from_cmyk(0.0, 1.0, 1.0, 0.0), Color::from_rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::from_cmyk(0.0, 0.0, 0.0, 1.0), Color::BLACK);
        assert_eq!(Color::from_hsb(0.0, 1.0, 1.0), Color::from_rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::from_hsb(2.0 / 3.0, 1.0, 1.0), Color::from_rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_colorspace_to_rgb() {
        assert_eq!(ColorSpace::Gray.to_rgb(&[1.0]), Color::WHITE);
        assert_eq!(ColorSpace::from_ps_id(4).ncomponents(), 4);
        assert_eq!(ColorSpace::from_ps_id(7), ColorSpace::Rgb);
    }
}
