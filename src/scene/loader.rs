use crate::core::color::Rgb;
use crate::core::math::transform::TransformFactory;
use crate::core::rasterizer::Winding;
use crate::io::config::{Config, RenderConfig};
use crate::io::obj_loader::load_obj;
use crate::pipeline::renderer::RenderSettings;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::light::PointLight;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::Texture;
use crate::scene::utils::normalize_and_center_mesh;
use log::{error, info, warn};
use nalgebra::{Matrix4, Point3, Vector3};
use std::sync::Arc;

fn rgb(channels: [u8; 3]) -> Rgb {
    Rgb::new(channels[0], channels[1], channels[2])
}

/// Translates the config's pipeline block into renderer settings.
pub fn render_settings(render: &RenderConfig) -> Result<RenderSettings, String> {
    let visible_winding = match render.visible_winding.as_str() {
        "clockwise" | "cw" => Winding::Clockwise,
        "counterclockwise" | "ccw" => Winding::CounterClockwise,
        other => {
            return Err(format!(
                "unknown winding direction '{}', expected 'clockwise' or 'counterclockwise'",
                other
            ));
        }
    };

    Ok(RenderSettings {
        ambient: render.ambient,
        diffuse: render.diffuse,
        specular: render.specular,
        texturing: render.texturing,
        visible_winding,
    })
}

/// Initial resource loading (heavy I/O). Returns a RenderContext ready
/// for rendering.
pub fn init_scene(config: &Config) -> Result<RenderContext, String> {
    // 1. Camera. The projection's aspect parameter is height over width.
    let mut camera = Camera::new(
        Point3::from(config.camera.position),
        Point3::from(config.camera.target),
        Vector3::from(config.camera.up),
    );
    camera.fov = config.camera.fov.to_radians();
    camera.aspect = config.render.height as f32 / config.render.width as f32;
    camera.near = config.camera.near;
    camera.far = config.camera.far;

    // 2. Lights.
    let mut lights: Vec<PointLight> = config
        .lights
        .iter()
        .map(|l| {
            let mut light = PointLight::new(Point3::from(l.position), rgb(l.color));
            light.attenuation = (l.attenuation[0], l.attenuation[1], l.attenuation[2]);
            light
        })
        .collect();

    if lights.is_empty() {
        warn!("No lights configured; adding a white light at the camera.");
        lights.push(PointLight::new(camera.position, Rgb::WHITE));
    }

    // 3. Objects.
    let mut objects: Vec<SceneObject> = Vec::new();

    if config.objects.is_empty() {
        info!("No objects configured; showing the built-in cube.");
        objects.push(SceneObject::new(
            Mesh::cube(2.0),
            Material::default(),
            Matrix4::identity(),
        ));
    }

    for obj_conf in &config.objects {
        let mesh = match load_obj(&obj_conf.path) {
            Ok(mut mesh) => {
                if obj_conf.normalize {
                    normalize_and_center_mesh(&mut mesh);
                }
                mesh
            }
            Err(e) => {
                error!(
                    "Error loading model '{}': {}. Using fallback triangle.",
                    obj_conf.path, e
                );
                Mesh::test_triangle()
            }
        };

        let mut material = Material {
            shininess: obj_conf.shininess,
            ..Default::default()
        };
        if let Some(c) = obj_conf.ambient {
            material.ambient = rgb(c);
        }
        if let Some(c) = obj_conf.diffuse {
            material.diffuse = rgb(c);
        }
        if let Some(c) = obj_conf.specular {
            material.specular = rgb(c);
        }
        if let Some(path) = &obj_conf.texture {
            match Texture::load(path) {
                Ok(texture) => material.texture = Some(Arc::new(texture)),
                Err(e) => warn!("Failed to load texture '{}': {}", path, e),
            }
        }

        let translation = TransformFactory::translation(&Vector3::from(obj_conf.position));
        let rotation = TransformFactory::rotation_x(obj_conf.rotation[0].to_radians())
            * TransformFactory::rotation_y(obj_conf.rotation[1].to_radians())
            * TransformFactory::rotation_z(obj_conf.rotation[2].to_radians());
        let scale = TransformFactory::scaling_nonuniform(&Vector3::from(obj_conf.scale));

        objects.push(SceneObject::new(
            mesh,
            material,
            translation * rotation * scale,
        ));
    }

    info!(
        "Scene initialized with {} objects and {} lights.",
        objects.len(),
        lights.len()
    );

    Ok(RenderContext {
        camera,
        lights,
        objects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::Config;

    #[test]
    fn default_config_yields_a_renderable_scene() {
        let config = Config::default();
        let context = init_scene(&config).unwrap();

        assert_eq!(context.objects.len(), 1);
        assert_eq!(context.objects[0].mesh.triangles.len(), 12);
        assert_eq!(context.lights.len(), 1);
        assert!(context.camera.view_matrix().is_ok());
    }

    #[test]
    fn winding_strings_are_validated() {
        let mut render = RenderConfig::default();
        assert_eq!(
            render_settings(&render).unwrap().visible_winding,
            Winding::CounterClockwise
        );

        render.visible_winding = "cw".to_string();
        assert_eq!(
            render_settings(&render).unwrap().visible_winding,
            Winding::Clockwise
        );

        render.visible_winding = "widdershins".to_string();
        assert!(render_settings(&render).is_err());
    }
}
