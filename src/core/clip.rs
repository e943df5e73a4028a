use nalgebra::Point3;

// Outcode bits, one per face of the clip box.
const UNDER_X: u8 = 1 << 0;
const ABOVE_X: u8 = 1 << 1;
const UNDER_Y: u8 = 1 << 2;
const ABOVE_Y: u8 = 1 << 3;
const UNDER_Z: u8 = 1 << 4;
const ABOVE_Z: u8 = 1 << 5;

/// Cohen-Sutherland segment clipping against an axis-aligned box.
///
/// Used as an optional pre-rasterization stage by the wireframe pass;
/// the scanline core itself clamps spans to the surface instead of
/// clipping. The default box is the NDC cube [-1, 1]^3.
#[derive(Debug, Clone, Copy)]
pub struct ClipBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Default for ClipBox {
    fn default() -> Self {
        Self {
            min: Point3::new(-1.0, -1.0, -1.0),
            max: Point3::new(1.0, 1.0, 1.0),
        }
    }
}

impl ClipBox {
    /// Region code of a point: one bit per violated box face.
    fn outcode(&self, p: &Point3<f32>) -> u8 {
        let mut code = 0;
        if p.x < self.min.x {
            code |= UNDER_X;
        }
        if p.x > self.max.x {
            code |= ABOVE_X;
        }
        if p.y < self.min.y {
            code |= UNDER_Y;
        }
        if p.y > self.max.y {
            code |= ABOVE_Y;
        }
        if p.z < self.min.z {
            code |= UNDER_Z;
        }
        if p.z > self.max.z {
            code |= ABOVE_Z;
        }
        code
    }

    /// Clips segment (a, b) against the box.
    ///
    /// Returns the clipped endpoints in their original order, or `None`
    /// when the segment lies entirely outside.
    pub fn clip_segment(
        &self,
        mut a: Point3<f32>,
        mut b: Point3<f32>,
    ) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut swapped = false;

        loop {
            let mut code_a = self.outcode(&a);
            let code_b = self.outcode(&b);

            if code_a | code_b == 0 {
                // Both inside.
                return if swapped { Some((b, a)) } else { Some((a, b)) };
            }

            if code_a & code_b != 0 {
                // Both beyond the same face.
                return None;
            }

            // Make `a` the endpoint that is outside.
            if code_a == 0 {
                std::mem::swap(&mut a, &mut b);
                code_a = self.outcode(&a);
                swapped = !swapped;
            }

            let direction = b - a;

            let t = if code_a & UNDER_X != 0 {
                (self.min.x - a.x) / direction.x
            } else if code_a & ABOVE_X != 0 {
                (self.max.x - a.x) / direction.x
            } else if code_a & UNDER_Y != 0 {
                (self.min.y - a.y) / direction.y
            } else if code_a & ABOVE_Y != 0 {
                (self.max.y - a.y) / direction.y
            } else if code_a & UNDER_Z != 0 {
                (self.min.z - a.z) / direction.z
            } else {
                (self.max.z - a.z) / direction.z
            };

            a += direction * t;
        }
    }
}
