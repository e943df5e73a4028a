use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// The scene camera.
///
/// All fields are plain mutable state; the view and projection matrices
/// are pure functions of them and are recomputed on every call. Callers
/// recompute once per frame and reuse the result across all objects in
/// that frame — frame-to-frame camera motion is the normal case, so
/// nothing is cached.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Horizontal field of view in radians, in (0, pi).
    pub fov: f32,
    /// Height over width of the target surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            target: Point3::new(0.0, 0.0, -1.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new(position: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Self {
        Self {
            position,
            target,
            up,
            ..Default::default()
        }
    }

    /// World-to-view matrix for the current eye/target/up. Fails when the
    /// look-at basis is degenerate (see `TransformFactory::look_at`).
    pub fn view_matrix(&self) -> Result<Matrix4<f32>, String> {
        TransformFactory::look_at(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        TransformFactory::perspective(self.near, self.far, self.fov, self.aspect)
    }
}
