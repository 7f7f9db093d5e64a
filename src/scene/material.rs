use crate::scene::texture::Texture;
use std::sync::Arc;

/// Texture channels bound to a mesh.
///
/// Every channel is optional; shaders ask whether a channel is present
/// instead of relying on empty defaults.
#[derive(Debug, Clone, Default)]
pub struct Material {
    pub diffuse_map: Option<Arc<Texture>>,
    pub normal_map: Option<Arc<Texture>>,
    /// Only the red channel is read, as a scale on the shininess exponent.
    pub gloss_map: Option<Arc<Texture>>,
    pub specular_map: Option<Arc<Texture>>,
}

impl Material {
    pub fn with_diffuse(diffuse: Arc<Texture>) -> Self {
        Self {
            diffuse_map: Some(diffuse),
            ..Default::default()
        }
    }
}
