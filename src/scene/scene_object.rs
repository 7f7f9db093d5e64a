use crate::core::math::transform::TransformFactory;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use nalgebra::Matrix4;

/// Represents an instance of a mesh in the scene with its own transformation.
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

    /// Spins the object about its own Y axis (applied in model space).
    pub fn rotate_y(&mut self, angle_rad: f32) {
        self.transform *= TransformFactory::rotation_y(angle_rad);
    }
}
