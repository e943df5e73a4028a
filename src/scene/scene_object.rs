use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use nalgebra::Matrix4;

/// One mesh instance in the scene with its material and model transform.
pub struct SceneObject {
    pub mesh: Mesh,
    pub material: Material,
    pub transform: Matrix4<f32>,
}

impl SceneObject {
    pub fn new(mesh: Mesh, material: Material, transform: Matrix4<f32>) -> Self {
        Self {
            mesh,
            material,
            transform,
        }
    }
}
