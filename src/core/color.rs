use nalgebra::Vector3;

/// An 8-bit RGB color, the unit the whole pipeline trades in.
///
/// Channel arithmetic follows the classic fixed-function convention:
/// multiplying two colors renormalizes by 255, so white times white is
/// still white rather than an overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel multiply with implicit /255 normalization.
    pub fn modulate(self, other: Rgb) -> Rgb {
        Rgb {
            r: ((self.r as u16 * other.r as u16) / 255) as u8,
            g: ((self.g as u16 * other.g as u16) / 255) as u8,
            b: ((self.b as u16 * other.b as u16) / 255) as u8,
        }
    }
}

/// Floating-point color accumulator used while summing lighting terms and
/// interpolating vertex colors. Channels live in the [0, 255] domain and
/// are clamped when converted back to `Rgb`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSum(pub Vector3<f32>);

impl ColorSum {
    pub fn zero() -> Self {
        Self(Vector3::zeros())
    }

    /// Adds `a ⊙ b` scaled by `factor` (the shape of a diffuse or
    /// specular lighting term).
    pub fn add_modulated(&mut self, a: Rgb, b: Rgb, factor: f32) {
        self.0.x += a.r as f32 * b.r as f32 / 255.0 * factor;
        self.0.y += a.g as f32 * b.g as f32 / 255.0 * factor;
        self.0.z += a.b as f32 * b.b as f32 / 255.0 * factor;
    }

    pub fn add_rgb(&mut self, color: Rgb) {
        self.0 += Vector3::new(color.r as f32, color.g as f32, color.b as f32);
    }

    /// Adds `color` scaled by `factor` (barycentric interpolation shape).
    pub fn add_scaled(&mut self, color: Rgb, factor: f32) {
        self.0.x += color.r as f32 * factor;
        self.0.y += color.g as f32 * factor;
        self.0.z += color.b as f32 * factor;
    }

    pub fn to_rgb(self) -> Rgb {
        // Round, don't truncate: barycentric weights summing to 1 +- ulp
        // must reproduce a uniform vertex color exactly.
        Rgb {
            r: self.0.x.clamp(0.0, 255.0).round() as u8,
            g: self.0.y.clamp(0.0, 255.0).round() as u8,
            b: self.0.z.clamp(0.0, 255.0).round() as u8,
        }
    }
}
