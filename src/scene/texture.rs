use crate::core::color::Rgb;
use image::RgbImage;
use log::info;
use std::fmt;
use std::path::Path;

/// A 2D RGB texture map, sampled nearest-neighbor by the pixel stage.
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();
        let image = image::open(path_ref)
            .map_err(|e| format!("Failed to load texture: {}", e))?
            .to_rgb8();

        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref,
            image.width(),
            image.height()
        );

        Ok(Self { image })
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Nearest-neighbor lookup. UV coordinates are clamped to [0, 1] and
    /// scaled by the texture dimensions; v = 0 addresses the bottom row
    /// (texcoords are y-up, image rows are y-down).
    pub fn sample(&self, u: f32, v: f32) -> Rgb {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = (u * (self.image.width() - 1) as f32).round() as u32;
        let y = ((1.0 - v) * (self.image.height() - 1) as f32).round() as u32;

        let pixel = self.image.get_pixel(x, y);
        Rgb::new(pixel[0], pixel[1], pixel[2])
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}
