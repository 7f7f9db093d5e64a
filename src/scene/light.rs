use nalgebra::Vector3;

/// A light source that is infinitely far away (e.g., Sun).
/// Rays are parallel.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    /// Direction the light travels, normalized.
    pub direction: Vector3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vector3::new(0.577, -0.577, 0.577), 7.0)
    }
}
