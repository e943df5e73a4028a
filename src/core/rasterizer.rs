use crate::core::color::{ColorSum, Rgb};
use crate::core::depth::DepthBuffer;
use crate::core::math::interpolation::{barycentric_weights, doubled_signed_area};
use crate::core::surface::Surface;
use crate::scene::texture::Texture;
use nalgebra::Point2;
use std::cmp::Ordering;

/// Screen-space triangles with |2*area| below this are degenerate.
const WINDING_EPSILON: f32 = 1e-6;

/// Rotational order of a triangle's vertices in screen space, classified
/// from the sign of the shoelace sum over raw pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Area below epsilon: degenerate, never rendered.
    Indeterminate,
}

/// Classifies the winding of a screen-space triangle.
pub fn winding_of(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> Winding {
    let area2 = doubled_signed_area(a, b, c);
    if area2.abs() < WINDING_EPSILON {
        Winding::Indeterminate
    } else if area2 > 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::Clockwise
    }
}

/// A mesh corner after the vertex stage: screen-space position, the
/// unmapped post-divide depth, texture coordinates and the finalized
/// per-vertex color.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreparedVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
    pub color: Rgb,
}

/// Working triangle owned by a single rasterization call and discarded
/// after it.
#[derive(Debug, Clone, Copy)]
pub struct PreparedTriangle {
    pub vertices: [PreparedVertex; 3],
}

impl PreparedTriangle {
    pub fn screen_points(&self) -> [Point2<f32>; 3] {
        [
            Point2::new(self.vertices[0].x, self.vertices[0].y),
            Point2::new(self.vertices[1].x, self.vertices[1].y),
            Point2::new(self.vertices[2].x, self.vertices[2].y),
        ]
    }
}

/// One triangle edge in the scanline table.
///
/// `y_start`/`y_end` are the ceilings of the upper and lower endpoint
/// rows; `x` is the x position at the upper endpoint and advances by
/// `slope` once per scanline.
#[derive(Debug, Clone, Copy)]
struct EdgeEntry {
    y_start: i32,
    y_end: i32,
    x: f32,
    slope: f32,
}

fn build_edge(a: &PreparedVertex, b: &PreparedVertex) -> Option<EdgeEntry> {
    let (top, bottom) = if a.y <= b.y { (a, b) } else { (b, a) };

    let y_start = top.y.ceil() as i32;
    let y_end = bottom.y.ceil() as i32;
    if y_start == y_end {
        // Horizontal after rounding: contributes no scan entries.
        return None;
    }

    Some(EdgeEntry {
        y_start,
        y_end,
        x: top.x,
        slope: (bottom.x - top.x) / (bottom.y - top.y),
    })
}

/// Scanline-fills a prepared triangle with depth testing, barycentric
/// color interpolation and optional nearest-neighbor texturing.
///
/// Classic active-edge-table polygon fill specialized to triangles: at
/// any interior scanline exactly zero or two edges are active, sorted by
/// x and paired into a span. Spans are clamped to the surface rather
/// than clipped. Fragments with post-divide z <= 1 are behind the camera
/// under the pipeline's projection convention and are rejected before
/// the depth test.
pub fn fill_triangle<S: Surface>(
    surface: &mut S,
    depth: &mut DepthBuffer,
    triangle: &PreparedTriangle,
    texture: Option<&Texture>,
) {
    let width = surface.pixel_width() as i32;
    let height = surface.pixel_height() as i32;
    if width == 0 || height == 0 {
        return;
    }

    let [v0, v1, v2] = &triangle.vertices;
    let [a, b, c] = triangle.screen_points();

    let mut edges: Vec<EdgeEntry> = Vec::with_capacity(3);
    edges.extend(build_edge(v0, v1));
    edges.extend(build_edge(v1, v2));
    edges.extend(build_edge(v2, v0));
    if edges.len() < 2 {
        return;
    }
    edges.sort_by_key(|e| e.y_start);

    let sweep_start = edges.iter().map(|e| e.y_start).min().unwrap_or(0).max(0);
    let sweep_end = edges
        .iter()
        .map(|e| e.y_end)
        .max()
        .unwrap_or(-1)
        .min(height - 1);

    let mut active: Vec<EdgeEntry> = Vec::with_capacity(3);
    let mut next_edge = 0;

    for y in sweep_start..=sweep_end {
        while next_edge < edges.len() && edges[next_edge].y_start <= y {
            let mut edge = edges[next_edge];
            if y > edge.y_start {
                // Sweep start was clamped to the surface: catch the edge
                // up to the current scanline.
                edge.x += edge.slope * (y - edge.y_start) as f32;
            }
            active.push(edge);
            next_edge += 1;
        }
        active.retain(|e| e.y_end > y);
        active.sort_by(|p, q| p.x.partial_cmp(&q.x).unwrap_or(Ordering::Equal));

        for pair in active.chunks_exact(2) {
            let span_start = pair[0].x.max(0.0).ceil() as i32;
            let span_end = pair[1].x.min((width - 1) as f32).floor() as i32;

            for x in span_start..=span_end {
                let p = Point2::new(x as f32, y as f32);
                let Some(weights) = barycentric_weights(p, a, b, c) else {
                    continue;
                };

                let z = weights.x * v0.z + weights.y * v1.z + weights.z * v2.z;
                if z <= 1.0 {
                    continue;
                }
                if !depth.test_and_set(x as usize, y as usize, z) {
                    continue;
                }

                let mut sum = ColorSum::zero();
                sum.add_scaled(v0.color, weights.x);
                sum.add_scaled(v1.color, weights.y);
                sum.add_scaled(v2.color, weights.z);
                let mut color = sum.to_rgb();

                if let Some(texture) = texture {
                    let u = (weights.x * v0.u + weights.y * v1.u + weights.z * v2.u)
                        .clamp(0.0, 1.0);
                    let v = (weights.x * v0.v + weights.y * v1.v + weights.z * v2.v)
                        .clamp(0.0, 1.0);
                    color = color.modulate(texture.sample(u, v));
                }

                surface.set_pixel(x as usize, y as usize, color);
            }
        }

        for edge in active.iter_mut() {
            edge.x += edge.slope;
        }
    }
}
