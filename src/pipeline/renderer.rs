use crate::core::clip::ClipBox;
use crate::core::color::Rgb;
use crate::core::depth::DepthBuffer;
use crate::core::math::transform::{extend_point, ndc_to_screen, to_cartesian};
use crate::core::rasterizer::{self, Winding};
use crate::core::surface::Surface;
use crate::pipeline::vertex::VertexStage;
use crate::scene::light::PointLight;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use log::debug;
use nalgebra::{Matrix4, Point3};

/// Pipeline toggles, settable between frames (never mid-triangle).
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub ambient: bool,
    pub diffuse: bool,
    pub specular: bool,
    pub texturing: bool,
    /// Triangles whose screen winding differs from this are culled.
    pub visible_winding: Winding,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            ambient: true,
            diffuse: true,
            specular: true,
            texturing: true,
            visible_winding: Winding::CounterClockwise,
        }
    }
}

/// Everything a draw call needs besides the mesh and material: the
/// transform chain and the frame's camera and light state, passed
/// explicitly rather than kept as renderer fields.
pub struct DrawContext<'a> {
    /// Full model-view-projection transform into clip space.
    pub model_to_clip: Matrix4<f32>,
    /// Model-to-world transform, for lighting positions and normals.
    pub model_to_world: Matrix4<f32>,
    /// Camera position in world space.
    pub eye: Point3<f32>,
    pub lights: &'a [PointLight],
}

/// The rasterizer front end. Owns the settings and the frame-scoped
/// depth buffer; all drawing happens through a `Frame` bracket.
pub struct Renderer {
    pub settings: RenderSettings,
    depth: DepthBuffer,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            settings: RenderSettings::default(),
            depth: DepthBuffer::new(0, 0),
        }
    }

    /// Opens a frame bracket on the target surface: locks it, clears the
    /// color to `clear_color` and resets the depth buffer.
    ///
    /// The returned `Frame` is the only handle that can draw; dropping it
    /// unlocks the surface. The mutable borrows make a second bracket on
    /// the same renderer or surface impossible until then.
    pub fn begin_frame<'a, S: Surface>(
        &'a mut self,
        surface: &'a mut S,
        clear_color: Rgb,
    ) -> Frame<'a, S> {
        surface.lock();
        surface.clear(clear_color);
        self.depth
            .reset(surface.pixel_width(), surface.pixel_height());

        debug!(
            "frame begun: {}x{} target",
            surface.pixel_width(),
            surface.pixel_height()
        );

        Frame {
            renderer: self,
            surface,
        }
    }
}

/// An open frame bracket. Draw calls live here and nowhere else; the
/// surface stays locked until the bracket is dropped.
pub struct Frame<'a, S: Surface> {
    renderer: &'a mut Renderer,
    surface: &'a mut S,
}

impl<S: Surface> Frame<'_, S> {
    /// Draws a mesh through the full pipeline: vertex stage, winding
    /// cull, scanline fill with depth test.
    pub fn draw_mesh(&mut self, mesh: &Mesh, material: &Material, context: &DrawContext) {
        let settings = self.renderer.settings;
        let stage = VertexStage {
            model_to_clip: context.model_to_clip,
            model_to_world: context.model_to_world,
            eye: context.eye,
            lights: context.lights,
            material,
            settings: &settings,
            viewport: (
                self.surface.pixel_width() as f32,
                self.surface.pixel_height() as f32,
            ),
        };

        let texture = if settings.texturing {
            material.texture.as_deref()
        } else {
            None
        };

        for triangle in &mesh.triangles {
            let Some(prepared) = stage.prepare_triangle(mesh, triangle) else {
                continue;
            };

            let [a, b, c] = prepared.screen_points();
            let winding = rasterizer::winding_of(a, b, c);
            if winding == Winding::Indeterminate || winding != settings.visible_winding {
                continue;
            }

            rasterizer::fill_triangle(self.surface, &mut self.renderer.depth, &prepared, texture);
        }
    }

    /// Draws the mesh's edges as lines, clipped to the NDC box with the
    /// Cohen-Sutherland clipper before the viewport mapping. An overlay
    /// pass: no lighting, no depth test.
    pub fn draw_wireframe(&mut self, mesh: &Mesh, model_to_clip: &Matrix4<f32>, color: Rgb) {
        let clip_box = ClipBox::default();
        let width = self.surface.pixel_width() as f32;
        let height = self.surface.pixel_height() as f32;

        for (i, j) in mesh.edges() {
            let a4 = model_to_clip * extend_point(&mesh.positions[i]);
            let b4 = model_to_clip * extend_point(&mesh.positions[j]);
            let (Some(a), Some(b)) = (to_cartesian(&a4), to_cartesian(&b4)) else {
                continue;
            };
            let Some((ca, cb)) = clip_box.clip_segment(a, b) else {
                continue;
            };

            let pa = ndc_to_screen(ca.x, ca.y, width, height);
            let pb = ndc_to_screen(cb.x, cb.y, width, height);
            self.draw_line(
                pa.x as i32,
                pa.y as i32,
                pb.x as i32,
                pb.y as i32,
                color,
            );
        }
    }

    /// Bresenham line with per-pixel bounds checks.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let width = self.surface.pixel_width() as i32;
        let height = self.surface.pixel_height() as i32;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if x >= 0 && x < width && y >= 0 && y < height {
                self.surface.set_pixel(x as usize, y as usize, color);
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl<S: Surface> Drop for Frame<'_, S> {
    fn drop(&mut self) {
        self.surface.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface double that records the lock/clear/unlock sequence.
    struct TracingSurface {
        events: Vec<&'static str>,
    }

    impl Surface for TracingSurface {
        fn pixel_width(&self) -> usize {
            4
        }
        fn pixel_height(&self) -> usize {
            4
        }
        fn lock(&mut self) {
            self.events.push("lock");
        }
        fn unlock(&mut self) {
            self.events.push("unlock");
        }
        fn clear(&mut self, _color: Rgb) {
            self.events.push("clear");
        }
        fn set_pixel(&mut self, _x: usize, _y: usize, _color: Rgb) {
            self.events.push("set");
        }
        fn get_pixel(&self, _x: usize, _y: usize) -> Rgb {
            Rgb::BLACK
        }
    }

    #[test]
    fn frame_bracket_locks_clears_and_unlocks() {
        let mut surface = TracingSurface { events: Vec::new() };
        let mut renderer = Renderer::new();

        {
            let _frame = renderer.begin_frame(&mut surface, Rgb::BLACK);
        }

        assert_eq!(surface.events, vec!["lock", "clear", "unlock"]);
    }

    #[test]
    fn unlock_runs_even_without_draw_calls_on_early_return() {
        let mut surface = TracingSurface { events: Vec::new() };
        let mut renderer = Renderer::new();

        fn render(renderer: &mut Renderer, surface: &mut TracingSurface) -> Result<(), String> {
            let _frame = renderer.begin_frame(surface, Rgb::BLACK);
            Err("mid-frame failure".to_string())
        }

        let _ = render(&mut renderer, &mut surface);
        assert_eq!(surface.events.last(), Some(&"unlock"));
    }
}
