use crate::pipeline::settings::{RenderSettings, ShadingMode};
use crate::scene::mesh::PrimitiveTopology;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default = "default_objects")]
    pub objects: Vec<ObjectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            objects: default_objects(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Simulated seconds between frames, drives the rotation.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,

    // --- Toggles ---
    #[serde(default = "default_shading_mode")]
    pub shading_mode: String,
    #[serde(default = "default_true")]
    pub use_normal_map: bool,
    #[serde(default)]
    pub show_depth: bool,
    #[serde(default)]
    pub show_bounding_box: bool,
    #[serde(default)]
    pub uniform_clear_color: bool,
    #[serde(default = "default_true")]
    pub rotation_enabled: bool,
    /// Radians per second about the object's Y axis.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            frames: default_frames(),
            frame_time: default_frame_time(),
            shading_mode: default_shading_mode(),
            use_normal_map: true,
            show_depth: false,
            show_bounding_box: false,
            uniform_clear_color: false,
            rotation_enabled: true,
            rotation_speed: default_rotation_speed(),
        }
    }
}

impl RenderConfig {
    /// Initial toggle state for the renderer.
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            shading_mode: ShadingMode::parse_or_default(&self.shading_mode),
            use_normal_map: self.use_normal_map,
            show_depth: self.show_depth,
            show_bounding_box: self.show_bounding_box,
            uniform_clear_color: self.uniform_clear_color,
            rotation_enabled: self.rotation_enabled,
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_frames() -> usize {
    1
}
fn default_frame_time() -> f32 {
    1.0 / 30.0
}
fn default_shading_mode() -> String {
    "combined".to_string()
}
fn default_rotation_speed() -> f32 {
    1.0
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_camera_target")]
    pub target: [f32; 3],
    #[serde(default = "default_camera_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_projection")]
    pub projection: String,
    #[serde(default = "default_ortho_height")]
    pub ortho_height: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            target: default_camera_target(),
            up: default_camera_up(),
            fov: default_fov(),
            projection: default_projection(),
            ortho_height: default_ortho_height(),
            near: default_near(),
            far: default_far(),
        }
    }
}

/// Camera projection selected by `[camera] projection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

impl CameraConfig {
    pub fn projection_kind(&self) -> ProjectionKind {
        match self.projection.to_lowercase().as_str() {
            "perspective" => ProjectionKind::Perspective,
            "orthographic" | "ortho" => ProjectionKind::Orthographic,
            other => {
                warn!("Unknown projection '{}', using perspective", other);
                ProjectionKind::Perspective
            }
        }
    }
}

fn default_camera_target() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}
fn default_camera_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_projection() -> String {
    "perspective".to_string()
}
fn default_ortho_height() -> f32 {
    40.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    /// Direction the light travels; normalized on load.
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            intensity: default_light_intensity(),
            shininess: default_shininess(),
        }
    }
}

fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_light_intensity() -> f32 {
    7.0
}
fn default_shininess() -> f32 {
    25.0
}

#[derive(Debug, Deserialize)]
pub struct ObjectConfig {
    /// OBJ file. Without one a procedural quad of `size` is used.
    pub path: Option<String>,
    #[serde(default = "default_quad_size")]
    pub size: f32,
    /// Applies to procedural geometry only; OBJ files are always triangle lists.
    #[serde(default = "default_topology")]
    pub topology: String,

    // --- Transform ---
    #[serde(default = "default_object_position")]
    pub position: [f32; 3],
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],

    // --- Material Textures ---
    pub diffuse_texture: Option<String>,
    pub normal_texture: Option<String>,
    pub gloss_texture: Option<String>,
    pub specular_texture: Option<String>,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            path: None,
            size: default_quad_size(),
            topology: default_topology(),
            position: default_object_position(),
            rotation: [0.0, 0.0, 0.0],
            scale: default_scale(),
            diffuse_texture: None,
            normal_texture: None,
            gloss_texture: None,
            specular_texture: None,
        }
    }
}

impl ObjectConfig {
    pub fn topology(&self) -> PrimitiveTopology {
        match self.topology.to_lowercase().replace(['-', '_'], "").as_str() {
            "trianglelist" | "list" => PrimitiveTopology::TriangleList,
            "trianglestrip" | "strip" => PrimitiveTopology::TriangleStrip,
            other => {
                warn!("Unknown topology '{}', using triangle list", other);
                PrimitiveTopology::TriangleList
            }
        }
    }
}

fn default_objects() -> Vec<ObjectConfig> {
    vec![ObjectConfig::default()]
}
fn default_quad_size() -> f32 {
    20.0
}
fn default_topology() -> String {
    "triangle-strip".to_string()
}
fn default_object_position() -> [f32; 3] {
    [0.0, 0.0, 50.0]
}
fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
