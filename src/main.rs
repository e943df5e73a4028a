use clap::Parser;
use log::{error, info};
use softrender::core::color::Rgb;
use softrender::core::surface::FrameBuffer;
use softrender::io::config::Config;
use softrender::io::image::save_framebuffer;
use softrender::pipeline::renderer::{DrawContext, Renderer};
use softrender::scene::loader::{init_scene, render_settings};

/// Headless software rasterizer: renders a TOML-described scene to an
/// image file.
#[derive(Parser, Debug)]
#[command(name = "softrender")]
#[command(about = "CPU-only scanline rasterizer")]
struct Cli {
    /// Scene description (TOML). Renders a built-in cube scene when
    /// omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Override the output image path from the config.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading scene config: {path}");
            Config::load(path)?
        }
        None => {
            info!("No config given; using the built-in scene.");
            Config::default()
        }
    };

    let context = init_scene(&config)?;

    // View and projection are recomputed once per frame and shared by
    // every object in it.
    let view = context.camera.view_matrix()?;
    let projection = context.camera.projection_matrix();

    let mut framebuffer = FrameBuffer::new(config.render.width, config.render.height);
    let mut renderer = Renderer::new();
    renderer.settings = render_settings(&config.render)?;

    let background = Rgb::new(
        config.render.background[0],
        config.render.background[1],
        config.render.background[2],
    );
    let wire_color = Rgb::new(
        config.render.wireframe_color[0],
        config.render.wireframe_color[1],
        config.render.wireframe_color[2],
    );

    {
        let mut frame = renderer.begin_frame(&mut framebuffer, background);

        for object in &context.objects {
            let model_to_clip = projection * view * object.transform;
            let draw = DrawContext {
                model_to_clip,
                model_to_world: object.transform,
                eye: context.camera.position,
                lights: &context.lights,
            };

            frame.draw_mesh(&object.mesh, &object.material, &draw);

            if config.render.wireframe {
                frame.draw_wireframe(&object.mesh, &model_to_clip, wire_color);
            }
        }
    }

    let output = cli.output.as_ref().unwrap_or(&config.render.output);
    save_framebuffer(&framebuffer, output)?;
    info!("Render saved to {output}");

    Ok(())
}
