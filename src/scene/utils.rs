use crate::scene::mesh::Mesh;
use nalgebra::Point3;

/// Translates and scales the mesh positions so the model is centered at
/// the origin and fits roughly within [-1, 1] on its largest axis.
///
/// Returns the original center and the scaling factor used.
pub fn normalize_and_center_mesh(mesh: &mut Mesh) -> (Point3<f32>, f32) {
    if mesh.positions.is_empty() {
        return (Point3::origin(), 1.0);
    }

    let mut min_bound = Point3::new(f32::MAX, f32::MAX, f32::MAX);
    let mut max_bound = Point3::new(f32::MIN, f32::MIN, f32::MIN);

    for position in &mesh.positions {
        min_bound.x = min_bound.x.min(position.x);
        min_bound.y = min_bound.y.min(position.y);
        min_bound.z = min_bound.z.min(position.z);

        max_bound.x = max_bound.x.max(position.x);
        max_bound.y = max_bound.y.max(position.y);
        max_bound.z = max_bound.z.max(position.z);
    }

    let center = nalgebra::center(&min_bound, &max_bound);
    let extent = max_bound - min_bound;
    let max_dimension = extent.x.max(extent.y).max(extent.z);

    // Fit within [-1, 1] with a little padding.
    let scale_factor = if max_dimension > 1e-6 {
        1.8 / max_dimension
    } else {
        1.0
    };

    for position in &mut mesh.positions {
        *position = Point3::from((*position - center) * scale_factor);
    }

    (center, scale_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn offset_cube_is_recentred() {
        let mut mesh = Mesh::cube(4.0);
        for position in &mut mesh.positions {
            *position += Vector3::new(10.0, -3.0, 7.0);
        }

        let (center, scale) = normalize_and_center_mesh(&mut mesh);
        assert!((center - Point3::new(10.0, -3.0, 7.0)).norm() < 1e-5);
        assert!((scale - 0.45).abs() < 1e-5);

        let max_coord = mesh
            .positions
            .iter()
            .flat_map(|p| [p.x.abs(), p.y.abs(), p.z.abs()])
            .fold(0.0f32, f32::max);
        assert!(max_coord <= 1.0 + 1e-5);
    }
}
