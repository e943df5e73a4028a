use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::scene_object::SceneObject;

/// Holds all scene resources required to render a frame.
pub struct RenderContext {
    pub camera: Camera,
    pub lights: Vec<PointLight>,
    pub objects: Vec<SceneObject>,
}
