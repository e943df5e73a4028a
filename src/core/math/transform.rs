use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

const EPSILON: f32 = 1e-6;

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating the transformation matrices used by the pipeline.
/// Manually implemented to keep full control over the coordinate
/// conventions the rasterizer depends on.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Creates a View matrix from an eye position, a target point and an
    /// up vector.
    ///
    /// The camera basis is built forward-handed (z points at the target),
    /// assembled into the camera's world matrix and inverted. Everything
    /// in front of the camera therefore has positive view-space z, which
    /// the projection below turns into the "larger post-divide z is
    /// nearer" depth ordering the rasterizer relies on.
    ///
    /// Fails if eye and target coincide, or if `up` is parallel to the
    /// viewing direction (the basis degenerates).
    pub fn look_at(
        eye: &Point3<f32>,
        target: &Point3<f32>,
        up: &Vector3<f32>,
    ) -> Result<Matrix4<f32>, String> {
        let forward = target - eye;
        if forward.norm() < EPSILON {
            return Err("look-at: eye and target coincide".to_string());
        }
        let z_axis = forward.normalize();

        let side = z_axis.cross(up);
        if side.norm() < EPSILON {
            return Err("look-at: up vector is parallel to the viewing direction".to_string());
        }
        let x_axis = side.normalize();
        let y_axis = x_axis.cross(&z_axis).normalize();

        // Camera world matrix: basis vectors and eye position as columns.
        let world = Matrix4::new(
            x_axis.x, y_axis.x, z_axis.x, eye.x,
            x_axis.y, y_axis.y, z_axis.y, eye.y,
            x_axis.z, y_axis.z, z_axis.z, eye.z,
            0.0,      0.0,      0.0,      1.0,
        );

        world
            .try_inverse()
            .ok_or_else(|| "look-at: camera world matrix is not invertible".to_string())
    }

    /// Creates a perspective projection matrix.
    ///
    /// `fov` is the horizontal field of view in radians and must lie in
    /// (0, pi); `aspect` is height over width; `near` and `far` must be
    /// positive with `near < far`. These are caller preconditions, the
    /// projection terms are undefined outside them.
    pub fn perspective(near: f32, far: f32, fov: f32, aspect: f32) -> Matrix4<f32> {
        let e = 1.0 / (fov / 2.0).tan();

        Matrix4::new(
            e,   0.0,        0.0,                       0.0,
            0.0, e / aspect, 0.0,                       0.0,
            0.0, 0.0,        -(far + near) / (far - near), -(2.0 * far * near) / (far - near),
            0.0, 0.0,        -1.0,                      0.0,
        )
    }
}

//=================================
// Homogeneous coordinate helpers
//=================================

/// Extends a 3D point to homogeneous coordinates with w = 1.
#[inline]
pub fn extend_point(p: &Point3<f32>) -> Vector4<f32> {
    p.to_homogeneous()
}

/// Extends a 3D direction to homogeneous coordinates with w = 0.
/// Directions are not translated, only rotated and scaled.
#[inline]
pub fn extend_direction(v: &Vector3<f32>) -> Vector4<f32> {
    v.to_homogeneous()
}

/// Homogeneous divide: collapses a 4D vector back to a Cartesian point.
/// Returns `None` when w is too close to zero for the division to mean
/// anything.
#[inline]
pub fn to_cartesian(v: &Vector4<f32>) -> Option<Point3<f32>> {
    if v.w.abs() < EPSILON {
        return None;
    }
    Some(Point3::new(v.x / v.w, v.y / v.w, v.z / v.w))
}

/// Maps NDC x,y in [-1, 1] to pixel coordinates. The post-divide z is
/// intentionally left untouched by this mapping; the rasterizer uses it
/// directly as its depth value.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new((ndc_x + 1.0) * 0.5 * width, (ndc_y + 1.0) * 0.5 * height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    #[test]
    fn extend_then_to_cartesian_round_trips() {
        let p = Point3::new(1.5, -2.0, 3.25);
        let extended = extend_point(&p);
        assert_eq!(extended.w, 1.0);

        let back = to_cartesian(&extended).unwrap();
        assert!((back - p).norm() < TOL);
    }

    #[test]
    fn to_cartesian_divides_by_w() {
        let v = Vector4::new(2.0, 4.0, 6.0, 2.0);
        let p = to_cartesian(&v).unwrap();
        assert!((p - Point3::new(1.0, 2.0, 3.0)).norm() < TOL);
    }

    #[test]
    fn to_cartesian_rejects_zero_w() {
        let v = Vector4::new(1.0, 2.0, 3.0, 0.0);
        assert!(to_cartesian(&v).is_none());
    }

    #[test]
    fn extend_direction_has_zero_w() {
        let v = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(extend_direction(&v).w, 0.0);
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let eye = Point3::new(3.0, 3.0, 5.0);
        let view = TransformFactory::look_at(
            &eye,
            &Point3::origin(),
            &Vector3::new(0.0, 1.0, 0.0),
        )
        .unwrap();

        let eye_in_view = view * extend_point(&eye);
        assert!(eye_in_view.x.abs() < 1e-4);
        assert!(eye_in_view.y.abs() < 1e-4);
        assert!(eye_in_view.z.abs() < 1e-4);
    }

    #[test]
    fn look_at_puts_target_on_positive_z() {
        let eye = Point3::new(0.0, 0.0, -5.0);
        let target = Point3::origin();
        let view =
            TransformFactory::look_at(&eye, &target, &Vector3::new(0.0, 1.0, 0.0)).unwrap();

        let target_in_view = view * extend_point(&target);
        assert!(target_in_view.x.abs() < TOL);
        assert!(target_in_view.y.abs() < TOL);
        assert!((target_in_view.z - 5.0).abs() < 1e-4);
    }

    #[test]
    fn look_at_rejects_parallel_up() {
        let result = TransformFactory::look_at(
            &Point3::new(0.0, 5.0, 0.0),
            &Point3::origin(),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn look_at_rejects_coincident_eye_and_target() {
        let result = TransformFactory::look_at(
            &Point3::new(1.0, 2.0, 3.0),
            &Point3::new(1.0, 2.0, 3.0),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn perspective_terms_match_the_frustum() {
        let near = 1.0;
        let far = 100.0;
        let proj = TransformFactory::perspective(near, far, std::f32::consts::FRAC_PI_2, 1.0);

        assert!((proj[(0, 0)] - 1.0).abs() < TOL);
        assert!((proj[(1, 1)] - 1.0).abs() < TOL);
        assert!((proj[(2, 2)] + 101.0 / 99.0).abs() < TOL);
        assert!((proj[(2, 3)] + 200.0 / 99.0).abs() < TOL);
        assert!((proj[(3, 2)] + 1.0).abs() < TOL);
        assert!(proj[(3, 3)].abs() < TOL);
    }

    #[test]
    fn rotation_x_quarter_turn() {
        let m = TransformFactory::rotation_x(std::f32::consts::FRAC_PI_2);
        let v = m * extend_direction(&Vector3::new(0.0, 1.0, 0.0));
        assert!(v.x.abs() < TOL);
        assert!(v.y.abs() < TOL);
        assert!((v.z - 1.0).abs() < TOL);
    }

    #[test]
    fn ndc_mapping_covers_the_surface() {
        let low = ndc_to_screen(-1.0, -1.0, 200.0, 100.0);
        let high = ndc_to_screen(1.0, 1.0, 200.0, 100.0);
        let mid = ndc_to_screen(0.0, 0.0, 200.0, 100.0);

        assert_eq!((low.x, low.y), (0.0, 0.0));
        assert_eq!((high.x, high.y), (200.0, 100.0));
        assert_eq!((mid.x, mid.y), (100.0, 50.0));
    }
}
