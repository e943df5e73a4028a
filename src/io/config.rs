use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scene description for the headless binary, loaded from TOML.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            lights: vec![LightConfig {
                position: [2.0, 3.0, -6.0],
                color: [255, 255, 255],
                attenuation: default_attenuation(),
            }],
            // Empty: the scene loader falls back to the built-in cube.
            objects: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_background")]
    pub background: [u8; 3],

    // --- Pipeline toggles ---
    #[serde(default = "default_true")]
    pub ambient: bool,
    #[serde(default = "default_true")]
    pub diffuse: bool,
    #[serde(default = "default_true")]
    pub specular: bool,
    #[serde(default = "default_true")]
    pub texturing: bool,
    #[serde(default = "default_winding")]
    pub visible_winding: String, // "counterclockwise" or "clockwise"

    // --- Debug overlay ---
    #[serde(default = "default_false")]
    pub wireframe: bool,
    #[serde(default = "default_wire_color")]
    pub wireframe_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            background: default_background(),
            ambient: true,
            diffuse: true,
            specular: true,
            texturing: true,
            visible_winding: default_winding(),
            wireframe: false,
            wireframe_color: default_wire_color(),
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    800
}
fn default_output() -> String {
    "render.png".to_string()
}
fn default_background() -> [u8; 3] {
    [25, 25, 35]
}
fn default_winding() -> String {
    "counterclockwise".to_string()
}
fn default_wire_color() -> [u8; 3] {
    [255, 255, 255]
}
fn default_white() -> [u8; 3] {
    [255, 255, 255]
}
fn default_false() -> bool {
    false
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Horizontal field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            up: default_up(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 1.5, -5.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    60.0
}
fn default_near() -> f32 {
    1.0
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    pub position: [f32; 3],
    #[serde(default = "default_white")]
    pub color: [u8; 3],
    /// (constant, linear, quadratic) coefficients.
    #[serde(default = "default_attenuation")]
    pub attenuation: [f32; 3],
}

fn default_attenuation() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

#[derive(Debug, Deserialize)]
pub struct ObjectConfig {
    pub path: String,

    // --- Transform ---
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler rotation in degrees, applied X then Y then Z.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Recenter and rescale the mesh to fit the unit box after loading.
    #[serde(default = "default_true")]
    pub normalize: bool,

    // --- Material ---
    pub ambient: Option<[u8; 3]>,
    pub diffuse: Option<[u8; 3]>,
    pub specular: Option<[u8; 3]>,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
    pub texture: Option<String>,
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_shininess() -> f32 {
    32.0
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
