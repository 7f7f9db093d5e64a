use crate::core::math::transform::TransformFactory;
use crate::io::config::{CameraConfig, Config, ObjectConfig, ProjectionKind};
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::Texture;
use log::{error, info, warn};
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

const CHECKER_LIGHT: [u8; 3] = [220, 220, 220];
const CHECKER_DARK: [u8; 3] = [60, 60, 160];

pub fn build_camera(camera: &CameraConfig, width: usize, height: usize) -> Camera {
    let position = Point3::from(camera.position);
    let target = Point3::from(camera.target);
    let up = Vector3::from(camera.up);
    let aspect_ratio = width.max(1) as f32 / height.max(1) as f32;

    match camera.projection_kind() {
        ProjectionKind::Orthographic => Camera::new_orthographic(
            position,
            target,
            up,
            camera.ortho_height,
            aspect_ratio,
            camera.near,
            camera.far,
        ),
        ProjectionKind::Perspective => Camera::new_perspective(
            position,
            target,
            up,
            camera.fov.to_radians(),
            aspect_ratio,
            camera.near,
            camera.far,
        ),
    }
}

/// Loads a texture channel, logging and leaving it unbound on failure.
fn load_channel(path: Option<&str>, channel: &str) -> Option<Arc<Texture>> {
    let path = path?;
    match Texture::load(path) {
        Ok(tex) => Some(Arc::new(tex)),
        Err(e) => {
            warn!("Failed to load {} texture '{}': {}", channel, path, e);
            None
        }
    }
}

/// Builds one object: OBJ mesh when configured and loadable, procedural quad otherwise.
pub fn build_scene_object(obj_conf: &ObjectConfig) -> SceneObject {
    let loaded = obj_conf.path.as_deref().and_then(|path| match load_obj(path) {
        Ok(mesh) => Some(mesh),
        Err(e) => {
            error!("Error loading model '{}': {}. Using fallback mesh.", path, e);
            None
        }
    });
    let procedural = loaded.is_none();

    let mut mesh = loaded.unwrap_or_else(|| Mesh::create_quad_strip(obj_conf.size));
    if procedural {
        mesh.topology = obj_conf.topology();
    }

    let mut material = Material {
        diffuse_map: load_channel(obj_conf.diffuse_texture.as_deref(), "diffuse"),
        normal_map: load_channel(obj_conf.normal_texture.as_deref(), "normal"),
        gloss_map: load_channel(obj_conf.gloss_texture.as_deref(), "gloss"),
        specular_map: load_channel(obj_conf.specular_texture.as_deref(), "specular"),
    };
    if procedural && material.diffuse_map.is_none() {
        material.diffuse_map = Some(Arc::new(Texture::checkerboard(
            256,
            8,
            CHECKER_LIGHT,
            CHECKER_DARK,
        )));
    }

    let transform = TransformFactory::world(
        &Vector3::from(obj_conf.position),
        &Vector3::from(obj_conf.rotation),
        &Vector3::from(obj_conf.scale),
    );

    SceneObject::new(mesh, material, transform)
}

/// Initial resource loading (Heavy I/O). Returns a RenderContext.
///
/// Asset failures are logged and replaced by fallbacks; this never fails.
pub fn init_scene_resources(config: &Config) -> RenderContext {
    let camera = build_camera(&config.camera, config.render.width, config.render.height);

    let light = DirectionalLight::new(
        Vector3::from(config.light.direction),
        config.light.intensity,
    );

    let scene_objects: Vec<SceneObject> = config.objects.iter().map(build_scene_object).collect();

    info!("Scene initialized with {} objects.", scene_objects.len());

    RenderContext {
        camera,
        light,
        shininess: config.light.shininess,
        scene_objects,
    }
}
