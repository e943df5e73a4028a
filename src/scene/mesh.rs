use nalgebra::{Point3, Vector2, Vector3};
use std::collections::HashSet;

/// Per-corner indices of one triangle into the mesh attribute arrays.
///
/// The three index triples are independent: a corner's position, normal
/// and texcoord indices need not coincide, mirroring the face records of
/// the OBJ format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedTriangle {
    pub positions: [usize; 3],
    pub normals: [usize; 3],
    pub texcoords: [usize; 3],
}

/// An indexed triangle mesh with separate position, normal and texcoord
/// arrays.
///
/// Every index is validated against its array at construction time;
/// the rasterizer assumes a validated mesh and does no per-frame bounds
/// re-checking beyond array access.
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub texcoords: Vec<Vector2<f32>>,
    pub triangles: Vec<IndexedTriangle>,
}

impl Mesh {
    /// Builds a mesh, rejecting any triangle whose indices fall outside
    /// their respective arrays. Out-of-range indices are a load-time data
    /// error, not a render-time one.
    pub fn new(
        positions: Vec<Point3<f32>>,
        normals: Vec<Vector3<f32>>,
        texcoords: Vec<Vector2<f32>>,
        triangles: Vec<IndexedTriangle>,
    ) -> Result<Self, String> {
        for (i, triangle) in triangles.iter().enumerate() {
            for corner in 0..3 {
                if triangle.positions[corner] >= positions.len() {
                    return Err(format!(
                        "triangle {}: position index {} out of bounds ({} positions)",
                        i,
                        triangle.positions[corner],
                        positions.len()
                    ));
                }
                if triangle.normals[corner] >= normals.len() {
                    return Err(format!(
                        "triangle {}: normal index {} out of bounds ({} normals)",
                        i,
                        triangle.normals[corner],
                        normals.len()
                    ));
                }
                if triangle.texcoords[corner] >= texcoords.len() {
                    return Err(format!(
                        "triangle {}: texcoord index {} out of bounds ({} texcoords)",
                        i,
                        triangle.texcoords[corner],
                        texcoords.len()
                    ));
                }
            }
        }

        Ok(Self {
            positions,
            normals,
            texcoords,
            triangles,
        })
    }

    /// Unique undirected position-index edges, for the wireframe pass.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for triangle in &self.triangles {
            let [i, j, k] = triangle.positions;
            for (a, b) in [(i, j), (j, k), (k, i)] {
                let edge = (a.min(b), a.max(b));
                if seen.insert(edge) {
                    edges.push(edge);
                }
            }
        }
        edges
    }

    /// A single triangle facing the -z direction, usable as a fallback
    /// when a model fails to load.
    pub fn test_triangle() -> Self {
        let positions = vec![
            Point3::new(0.0, 0.5, 0.0),
            Point3::new(0.5, -0.5, 0.0),
            Point3::new(-0.5, -0.5, 0.0),
        ];
        let normals = vec![Vector3::new(0.0, 0.0, -1.0)];
        let texcoords = vec![
            Vector2::new(0.5, 1.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 0.0),
        ];
        let triangles = vec![IndexedTriangle {
            positions: [0, 1, 2],
            normals: [0, 0, 0],
            texcoords: [0, 1, 2],
        }];

        Self {
            positions,
            normals,
            texcoords,
            triangles,
        }
    }

    /// An axis-aligned cube of the given edge length centered at the
    /// origin. Faces are wound so that outward-facing triangles are
    /// visible under the default culling direction; each face reuses the
    /// shared corner positions with its own normal, the multi-index
    /// layout an OBJ cube has.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;

        let positions = vec![
            Point3::new(-h, -h, -h), // 0
            Point3::new(h, -h, -h),  // 1
            Point3::new(h, h, -h),   // 2
            Point3::new(-h, h, -h),  // 3
            Point3::new(-h, -h, h),  // 4
            Point3::new(h, -h, h),   // 5
            Point3::new(h, h, h),    // 6
            Point3::new(-h, h, h),   // 7
        ];
        let normals = vec![
            Vector3::new(0.0, 0.0, -1.0), // 0: front
            Vector3::new(0.0, 0.0, 1.0),  // 1: back
            Vector3::new(-1.0, 0.0, 0.0), // 2: left
            Vector3::new(1.0, 0.0, 0.0),  // 3: right
            Vector3::new(0.0, -1.0, 0.0), // 4: bottom
            Vector3::new(0.0, 1.0, 0.0),  // 5: top
        ];
        let texcoords = vec![
            Vector2::new(0.0, 0.0), // 0
            Vector2::new(1.0, 0.0), // 1
            Vector2::new(1.0, 1.0), // 2
            Vector2::new(0.0, 1.0), // 3
        ];

        // Two triangles per face: (quad corners a, b, c) and (b, d, c).
        let faces: [([usize; 3], [usize; 3], usize); 6] = [
            ([3, 2, 0], [2, 1, 0], 0), // front  (z = -h)
            ([6, 7, 5], [7, 4, 5], 1), // back   (z = +h)
            ([7, 3, 4], [3, 0, 4], 2), // left   (x = -h)
            ([2, 6, 1], [6, 5, 1], 3), // right  (x = +h)
            ([0, 1, 4], [1, 5, 4], 4), // bottom (y = -h)
            ([7, 6, 3], [6, 2, 3], 5), // top    (y = +h)
        ];

        let mut triangles = Vec::with_capacity(12);
        for (first, second, normal) in faces {
            triangles.push(IndexedTriangle {
                positions: first,
                normals: [normal; 3],
                texcoords: [3, 2, 0],
            });
            triangles.push(IndexedTriangle {
                positions: second,
                normals: [normal; 3],
                texcoords: [2, 1, 0],
            });
        }

        Self {
            positions,
            normals,
            texcoords,
            triangles,
        }
    }
}
