use crate::core::color::{ColorSum, Rgb};
use crate::core::math::transform::{extend_direction, extend_point, ndc_to_screen, to_cartesian};
use crate::core::rasterizer::{PreparedTriangle, PreparedVertex};
use crate::pipeline::renderer::RenderSettings;
use crate::scene::light::PointLight;
use crate::scene::material::Material;
use crate::scene::mesh::{IndexedTriangle, Mesh};
use nalgebra::{Matrix4, Point3, Vector3};

/// The fixed vertex stage: transforms mesh corners into screen space and
/// evaluates the Phong illumination model once per vertex.
///
/// Pure per-draw-call state; no side effects beyond the returned
/// `PreparedTriangle`.
pub struct VertexStage<'a> {
    pub model_to_clip: Matrix4<f32>,
    pub model_to_world: Matrix4<f32>,
    /// Camera position in world space, for the specular eye vector.
    pub eye: Point3<f32>,
    pub lights: &'a [PointLight],
    pub material: &'a Material,
    pub settings: &'a RenderSettings,
    /// Target surface dimensions in pixels.
    pub viewport: (f32, f32),
}

impl VertexStage<'_> {
    /// Runs the vertex stage on one mesh triangle.
    ///
    /// Returns `None` when any corner lands too close to the w = 0 plane
    /// for the homogeneous divide to be meaningful; the triangle is
    /// skipped whole rather than rasterized with infinities.
    pub fn prepare_triangle(
        &self,
        mesh: &Mesh,
        triangle: &IndexedTriangle,
    ) -> Option<PreparedTriangle> {
        let mut vertices = [PreparedVertex::default(); 3];

        for corner in 0..3 {
            let position = mesh.positions[triangle.positions[corner]];
            let normal = mesh.normals[triangle.normals[corner]];
            let texcoord = mesh.texcoords[triangle.texcoords[corner]];

            let clip = self.model_to_clip * extend_point(&position);
            let ndc = to_cartesian(&clip)?;
            let screen = ndc_to_screen(ndc.x, ndc.y, self.viewport.0, self.viewport.1);

            let world_position = self.model_to_world.transform_point(&position);
            // Normals are directions, not points: w = 0 keeps the
            // translation column out of the transform.
            let world_normal = (self.model_to_world * extend_direction(&normal))
                .xyz()
                .normalize();

            vertices[corner] = PreparedVertex {
                x: screen.x,
                y: screen.y,
                // Post-divide z, unmapped: the depth value.
                z: ndc.z,
                u: texcoord.x,
                v: texcoord.y,
                color: self.shade_vertex(&world_position, &world_normal),
            };
        }

        Some(PreparedTriangle { vertices })
    }

    /// Phong illumination at one vertex: ambient + per-light diffuse and
    /// specular terms, each independently switchable, accumulated per
    /// channel and clamped to [0, 255].
    fn shade_vertex(&self, world_position: &Point3<f32>, normal: &Vector3<f32>) -> Rgb {
        let mut sum = ColorSum::zero();

        if self.settings.ambient {
            sum.add_rgb(self.material.ambient);
        }

        if !self.settings.diffuse && !self.settings.specular {
            return sum.to_rgb();
        }

        for light in self.lights {
            let to_light = light.position - world_position;
            let distance = to_light.norm();
            let light_dir = to_light / distance;
            let attenuation = light.attenuation_at(distance);

            if self.settings.diffuse {
                let lambert = light_dir.dot(normal).max(0.0);
                if lambert > 0.0 {
                    sum.add_modulated(
                        light.color,
                        self.material.diffuse,
                        lambert * attenuation,
                    );
                }
            }

            if self.settings.specular {
                let eye_dir = (self.eye - world_position).normalize();
                let reflected = normal * (2.0 * normal.dot(&light_dir)) - light_dir;
                let highlight = eye_dir.dot(&reflected).max(0.0);
                if highlight > 0.0 {
                    sum.add_modulated(
                        light.color,
                        self.material.specular,
                        highlight.powf(self.material.shininess) * attenuation,
                    );
                }
            }
        }

        sum.to_rgb()
    }
}
