use crate::core::surface::{FrameBuffer, Surface};
use image::ImageBuffer;
use std::path::Path;

/// Saves a framebuffer to an image file; the format follows the file
/// extension.
pub fn save_framebuffer(framebuffer: &FrameBuffer, path: &str) -> Result<(), String> {
    let mut img_buf = ImageBuffer::new(
        framebuffer.pixel_width() as u32,
        framebuffer.pixel_height() as u32,
    );

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        let color = framebuffer.get_pixel(x as usize, y as usize);
        *pixel = image::Rgb([color.r, color.g, color.b]);
    }

    img_buf
        .save(Path::new(path))
        .map_err(|e| format!("Failed to save image to '{}': {}", path, e))
}
