use crate::scene::mesh::{IndexedTriangle, Mesh};
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file into a multi-index `Mesh`.
///
/// Faces keep their independent position/texcoord/normal index triples
/// (`single_index` stays off); tobj already translates the format's
/// 1-based indices to 0-based. All indices are validated by `Mesh::new`
/// before the mesh reaches the rasterizer.
pub fn load_obj(path: &str) -> Result<Mesh, String> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(format!("File not found: {}", path));
    }

    info!("Loading OBJ file: {}", path);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path_obj, &load_options)
        .map_err(|e| format!("Failed to load OBJ: {}", e))?;

    let mut positions: Vec<Point3<f32>> = Vec::new();
    let mut normals: Vec<Vector3<f32>> = Vec::new();
    let mut texcoords: Vec<Vector2<f32>> = Vec::new();
    let mut triangles: Vec<IndexedTriangle> = Vec::new();

    for model in models {
        let mesh = &model.mesh;

        // Attribute arrays of all sub-models are merged; face indices are
        // shifted by the sizes before this model was appended.
        let position_offset = positions.len();
        let normal_offset = normals.len();
        let texcoord_offset = texcoords.len();

        for p in mesh.positions.chunks_exact(3) {
            positions.push(Point3::new(p[0], p[1], p[2]));
        }
        for n in mesh.normals.chunks_exact(3) {
            normals.push(Vector3::new(n[0], n[1], n[2]));
        }
        for t in mesh.texcoords.chunks_exact(2) {
            texcoords.push(Vector2::new(t[0], t[1]));
        }

        let has_normals = !mesh.normals.is_empty() && !mesh.normal_indices.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty() && !mesh.texcoord_indices.is_empty();

        let fallback_normal = if has_normals {
            None
        } else {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 1, 0).",
                model.name
            );
            normals.push(Vector3::new(0.0, 1.0, 0.0));
            Some(normals.len() - 1)
        };
        let fallback_texcoord = if has_texcoords {
            None
        } else {
            texcoords.push(Vector2::zeros());
            Some(texcoords.len() - 1)
        };

        for (face, chunk) in mesh.indices.chunks_exact(3).enumerate() {
            let mut triangle = IndexedTriangle {
                positions: [0; 3],
                normals: [0; 3],
                texcoords: [0; 3],
            };

            for corner in 0..3 {
                triangle.positions[corner] = position_offset + chunk[corner] as usize;
                triangle.normals[corner] = match fallback_normal {
                    Some(idx) => idx,
                    None => normal_offset + mesh.normal_indices[face * 3 + corner] as usize,
                };
                triangle.texcoords[corner] = match fallback_texcoord {
                    Some(idx) => idx,
                    None => texcoord_offset + mesh.texcoord_indices[face * 3 + corner] as usize,
                };
            }

            triangles.push(triangle);
        }
    }

    let mesh = Mesh::new(positions, normals, texcoords, triangles)?;

    info!(
        "OBJ loaded successfully. Positions: {}, triangles: {}",
        mesh.positions.len(),
        mesh.triangles.len()
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp_obj(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn multi_index_faces_survive_loading() {
        // A quad's worth of attributes where position, texcoord and
        // normal indices diverge on purpose.
        let path = write_temp_obj(
            "softrender_multi_index.obj",
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             vt 0 0\n\
             vt 1 0\n\
             vt 0 1\n\
             vn 0 0 -1\n\
             f 1/1/1 2/3/1 3/2/1\n",
        );

        let mesh = load_obj(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.texcoords.len(), 3);
        assert_eq!(mesh.normals.len(), 1);
        assert_eq!(mesh.triangles.len(), 1);

        let triangle = mesh.triangles[0];
        assert_eq!(triangle.positions, [0, 1, 2]);
        assert_eq!(triangle.texcoords, [0, 2, 1]);
        assert_eq!(triangle.normals, [0, 0, 0]);
    }

    #[test]
    fn missing_normals_get_a_fallback() {
        let path = write_temp_obj(
            "softrender_no_normals.obj",
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             f 1 2 3\n",
        );

        let mesh = load_obj(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(mesh.normals.len(), 1);
        assert_eq!(mesh.normals[0], Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.triangles[0].normals, [0, 0, 0]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_obj("definitely/not/here.obj").is_err());
    }
}
