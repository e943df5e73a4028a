use crate::core::color::Rgb;
use crate::scene::texture::Texture;
use std::sync::Arc;

/// Phong material parameters.
///
/// Constructed once per scene object and shared read-only with the
/// rasterizer for the duration of a frame.
#[derive(Debug, Clone)]
pub struct Material {
    pub ambient: Rgb,
    pub diffuse: Rgb,
    pub specular: Rgb,
    /// Phong exponent, must be >= 0.
    pub shininess: f32,
    /// Optional diffuse texture, modulated into the lit color when
    /// texturing is enabled.
    pub texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Rgb::new(26, 26, 26),
            diffuse: Rgb::new(204, 204, 204),
            specular: Rgb::WHITE,
            shininess: 32.0,
            texture: None,
        }
    }
}
