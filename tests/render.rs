//! Full-pipeline tests: whole frames rendered through the public API.

use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use softrender::core::color::Rgb;
use softrender::core::surface::{FrameBuffer, Surface};
use softrender::pipeline::renderer::{DrawContext, RenderSettings, Renderer};
use softrender::scene::camera::Camera;
use softrender::scene::light::PointLight;
use softrender::scene::material::Material;
use softrender::scene::mesh::{IndexedTriangle, Mesh};
use softrender::scene::texture::Texture;
use std::sync::Arc;

const SIZE: usize = 200;

fn background() -> Rgb {
    Rgb::new(8, 8, 8)
}

/// The reference scenario camera: at (0,0,-5) looking at the origin,
/// square viewport, 90 degree horizontal field of view.
fn scenario_camera() -> Camera {
    let mut camera = Camera::new(
        Point3::new(0.0, 0.0, -5.0),
        Point3::origin(),
        Vector3::new(0.0, 1.0, 0.0),
    );
    camera.fov = std::f32::consts::FRAC_PI_2;
    camera.aspect = 1.0;
    camera
}

/// A unit quad in the z = `z` plane facing -z, wound to be visible under
/// the default culling direction.
fn facing_quad(z: f32) -> Mesh {
    let h = 0.5;
    Mesh::new(
        vec![
            Point3::new(-h, -h, z),
            Point3::new(h, -h, z),
            Point3::new(h, h, z),
            Point3::new(-h, h, z),
        ],
        vec![Vector3::new(0.0, 0.0, -1.0)],
        vec![Vector2::new(0.5, 0.5)],
        vec![
            IndexedTriangle {
                positions: [3, 2, 0],
                normals: [0, 0, 0],
                texcoords: [0, 0, 0],
            },
            IndexedTriangle {
                positions: [2, 1, 0],
                normals: [0, 0, 0],
                texcoords: [0, 0, 0],
            },
        ],
    )
    .unwrap()
}

fn render_objects(
    settings: RenderSettings,
    camera: &Camera,
    lights: &[PointLight],
    objects: &[(&Mesh, &Material)],
) -> FrameBuffer {
    let mut framebuffer = FrameBuffer::new(SIZE, SIZE);
    let mut renderer = Renderer::new();
    renderer.settings = settings;

    let view = camera.view_matrix().unwrap();
    let projection = camera.projection_matrix();

    let mut frame = renderer.begin_frame(&mut framebuffer, background());
    for (mesh, material) in objects {
        let draw = DrawContext {
            model_to_clip: projection * view,
            model_to_world: Matrix4::identity(),
            eye: camera.position,
            lights,
        };
        frame.draw_mesh(mesh, material, &draw);
    }
    drop(frame);

    framebuffer
}

fn lit_pixels(fb: &FrameBuffer) -> Vec<(usize, usize)> {
    let mut lit = Vec::new();
    for y in 0..fb.pixel_height() {
        for x in 0..fb.pixel_width() {
            if fb.get_pixel(x, y) != background() {
                lit.push((x, y));
            }
        }
    }
    lit
}

#[test]
fn cube_scenario_produces_a_central_silhouette() {
    let camera = scenario_camera();
    let lights = [PointLight::new(camera.position, Rgb::WHITE)];
    let cube = Mesh::cube(1.0);
    let material = Material::default();

    let fb = render_objects(
        RenderSettings::default(),
        &camera,
        &lights,
        &[(&cube, &material)],
    );

    // Light-toned pixels at the center...
    let center = fb.get_pixel(100, 100);
    assert!(center.r >= 150 && center.g >= 150 && center.b >= 150);

    // ...background at the corners...
    for corner in [(5, 5), (195, 5), (5, 195), (195, 195)] {
        assert_eq!(fb.get_pixel(corner.0, corner.1), background());
    }

    // ...and every lit pixel inside the expected rectangle. The front
    // face spans ndc +-1/9, i.e. pixels ~89..111.
    let lit = lit_pixels(&fb);
    assert!(lit.len() > 300, "only {} pixels lit", lit.len());
    for (x, y) in lit {
        assert!((88..=112).contains(&x) && (88..=112).contains(&y));
    }
}

#[test]
fn depth_test_is_order_independent() {
    let camera = scenario_camera();
    let lights = [PointLight::new(camera.position, Rgb::WHITE)];

    // Flat ambient colors so the test sees exact values.
    let settings = RenderSettings {
        diffuse: false,
        specular: false,
        ..Default::default()
    };

    let near_quad = facing_quad(0.0); // 5 units from the camera
    let far_quad = facing_quad(2.0); // 7 units from the camera
    let red = Material {
        ambient: Rgb::new(200, 0, 0),
        ..Default::default()
    };
    let blue = Material {
        ambient: Rgb::new(0, 0, 200),
        ..Default::default()
    };

    let near_first = render_objects(
        settings,
        &camera,
        &lights,
        &[(&near_quad, &red), (&far_quad, &blue)],
    );
    let far_first = render_objects(
        settings,
        &camera,
        &lights,
        &[(&far_quad, &blue), (&near_quad, &red)],
    );

    assert_eq!(near_first.get_pixel(100, 100), Rgb::new(200, 0, 0));
    assert_eq!(far_first.get_pixel(100, 100), Rgb::new(200, 0, 0));
}

#[test]
fn exactly_one_of_a_triangle_and_its_reverse_renders() {
    let camera = scenario_camera();
    let lights = [PointLight::new(camera.position, Rgb::WHITE)];
    let settings = RenderSettings {
        diffuse: false,
        specular: false,
        ..Default::default()
    };
    let material = Material::default();

    let forward = Mesh::test_triangle();
    let mut reversed = Mesh::test_triangle();
    reversed.triangles[0].positions = [0, 2, 1];

    let forward_lit = lit_pixels(&render_objects(
        settings,
        &camera,
        &lights,
        &[(&forward, &material)],
    ))
    .len();
    let reversed_lit = lit_pixels(&render_objects(
        settings,
        &camera,
        &lights,
        &[(&reversed, &material)],
    ))
    .len();

    assert!(
        (forward_lit > 0) != (reversed_lit > 0),
        "forward {} / reversed {} lit pixels",
        forward_lit,
        reversed_lit
    );
}

#[test]
fn disabling_every_lighting_term_draws_black_geometry() {
    let camera = scenario_camera();
    let lights = [PointLight::new(camera.position, Rgb::WHITE)];
    let settings = RenderSettings {
        ambient: false,
        diffuse: false,
        specular: false,
        ..Default::default()
    };
    let cube = Mesh::cube(1.0);
    let material = Material::default();

    let fb = render_objects(settings, &camera, &lights, &[(&cube, &material)]);

    // Still rasterized (covers the background), but shaded black.
    assert_eq!(fb.get_pixel(100, 100), Rgb::BLACK);
    assert_ne!(fb.get_pixel(100, 100), background());
}

#[test]
fn texture_modulates_the_lit_color_only_when_enabled() {
    let camera = scenario_camera();
    let lights = [PointLight::new(camera.position, Rgb::WHITE)];

    let mut image = image::RgbImage::new(2, 2);
    for pixel in image.pixels_mut() {
        *pixel = image::Rgb([0, 255, 0]);
    }
    let quad = facing_quad(0.0);
    let material = Material {
        ambient: Rgb::WHITE,
        texture: Some(Arc::new(Texture::from_image(image))),
        ..Default::default()
    };

    let textured = RenderSettings {
        diffuse: false,
        specular: false,
        ..Default::default()
    };
    let untextured = RenderSettings {
        texturing: false,
        ..textured
    };

    let with_texture = render_objects(textured, &camera, &lights, &[(&quad, &material)]);
    assert_eq!(with_texture.get_pixel(100, 100), Rgb::new(0, 255, 0));

    let without_texture = render_objects(untextured, &camera, &lights, &[(&quad, &material)]);
    assert_eq!(without_texture.get_pixel(100, 100), Rgb::WHITE);
}

#[test]
fn wireframe_overlays_the_silhouette_region() {
    let camera = scenario_camera();
    let cube = Mesh::cube(1.0);
    let wire = Rgb::new(255, 0, 255);

    let mut framebuffer = FrameBuffer::new(SIZE, SIZE);
    let mut renderer = Renderer::new();
    let view = camera.view_matrix().unwrap();
    let model_to_clip = camera.projection_matrix() * view;

    {
        let mut frame = renderer.begin_frame(&mut framebuffer, background());
        frame.draw_wireframe(&cube, &model_to_clip, wire);
    }

    let wire_pixels: Vec<(usize, usize)> = lit_pixels(&framebuffer)
        .into_iter()
        .filter(|&(x, y)| framebuffer.get_pixel(x, y) == wire)
        .collect();

    assert!(wire_pixels.len() > 40);
    for (x, y) in wire_pixels {
        assert!((87..=113).contains(&x) && (87..=113).contains(&y));
    }
}
