use nalgebra::{Point2, Vector3};

const EPSILON: f32 = 1e-6;

/// Twice the signed area of triangle (a, b, c), via the shoelace formula.
#[inline]
pub fn doubled_signed_area(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Calculates the barycentric weights (fa, fb, fc) of point `p` with
/// respect to triangle (a, b, c).
///
/// Each weight is the ratio of the signed area of the sub-triangle formed
/// by `p` and the opposite pair of vertices to the total triangle area,
/// clamped to at most 1. When rounding at a triangle edge pushes the sum
/// above 1, the smallest weight is recomputed from the other two so the
/// weights stay a valid blend.
///
/// Returns `None` for a degenerate (near zero area) triangle.
pub fn barycentric_weights(
    p: Point2<f32>,
    a: Point2<f32>,
    b: Point2<f32>,
    c: Point2<f32>,
) -> Option<Vector3<f32>> {
    let total = doubled_signed_area(a, b, c);
    if total.abs() < EPSILON {
        return None;
    }
    let inv_total = 1.0 / total;

    let mut fa = (doubled_signed_area(p, b, c) * inv_total).min(1.0);
    let mut fb = (doubled_signed_area(a, p, c) * inv_total).min(1.0);
    let mut fc = (doubled_signed_area(a, b, p) * inv_total).min(1.0);

    if fa + fb + fc > 1.0 {
        if fa <= fb && fa <= fc {
            fa = 1.0 - fb - fc;
        } else if fb <= fa && fb <= fc {
            fb = 1.0 - fa - fc;
        } else {
            fc = 1.0 - fa - fb;
        }
    }

    Some(Vector3::new(fa, fb, fc))
}
