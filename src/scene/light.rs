use crate::core::color::Rgb;
use nalgebra::{Point3, Vector3};

/// A point light radiating in all directions from a world-space position.
#[derive(Debug, Clone)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub color: Rgb,
    /// Attenuation coefficients (constant, linear, quadratic). The
    /// default (1, 0, 0) means no falloff with distance.
    pub attenuation: (f32, f32, f32),
}

impl PointLight {
    pub fn new(position: Point3<f32>, color: Rgb) -> Self {
        Self {
            position,
            color,
            attenuation: (1.0, 0.0, 0.0),
        }
    }

    /// Direction from the surface point to the light, normalized.
    pub fn direction_from(&self, surface_point: &Point3<f32>) -> Vector3<f32> {
        (self.position - surface_point).normalize()
    }

    /// Intensity factor arriving at a point `distance` away:
    /// 1 / (c + l*d + q*d^2).
    pub fn attenuation_at(&self, distance: f32) -> f32 {
        let (c, l, q) = self.attenuation;
        1.0 / (c + l * distance + q * distance * distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-6;

    #[test]
    fn default_attenuation_ignores_distance() {
        let light = PointLight::new(Point3::origin(), Rgb::WHITE);
        assert!((light.attenuation_at(1.0) - 1.0).abs() < TOL);
        assert!((light.attenuation_at(250.0) - 1.0).abs() < TOL);
    }

    #[test]
    fn linear_attenuation_is_inverse_to_distance() {
        let mut light = PointLight::new(Point3::origin(), Rgb::WHITE);
        light.attenuation = (0.0, 1.0, 0.0);

        assert!((light.attenuation_at(2.0) - 0.5).abs() < TOL);
        assert!((light.attenuation_at(4.0) - 0.25).abs() < TOL);
    }

    #[test]
    fn quadratic_attenuation_falls_off_with_the_square() {
        let mut light = PointLight::new(Point3::origin(), Rgb::WHITE);
        light.attenuation = (0.0, 0.0, 1.0);
        assert!((light.attenuation_at(3.0) - 1.0 / 9.0).abs() < TOL);
    }

    #[test]
    fn direction_points_at_the_light() {
        let light = PointLight::new(Point3::new(0.0, 5.0, 0.0), Rgb::WHITE);
        let dir = light.direction_from(&Point3::origin());
        assert!((dir - Vector3::new(0.0, 1.0, 0.0)).norm() < TOL);
    }
}
