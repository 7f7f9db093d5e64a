use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// Represents a single vertex in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector (xyz) for Normal Mapping.
    pub tangent: Vector3<f32>,
    /// Texture coordinates (UV).
    pub uv: Vector2<f32>,
}

impl Vertex {
    pub fn new(
        position: Point3<f32>,
        normal: Vector3<f32>,
        tangent: Vector3<f32>,
        uv: Vector2<f32>,
    ) -> Self {
        Self {
            position,
            normal,
            tangent,
            uv,
        }
    }
}

/// Output of the vertex transform stage.
///
/// `position.xyz` is already divided by `position.w`; `w` itself is kept
/// for perspective-correct interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOut {
    pub position: Vector4<f32>,
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}

impl Default for VertexOut {
    fn default() -> Self {
        Self {
            position: Vector4::zeros(),
            uv: Vector2::zeros(),
            normal: Vector3::zeros(),
            tangent: Vector3::zeros(),
            view_direction: Vector3::zeros(),
        }
    }
}

/// Interpolated attributes of one covered pixel.
/// `position` holds (screen x, screen y, depth, perspective w).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelOut {
    pub position: Vector4<f32>,
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}

/// Normalizes `v`, returning the zero vector for (near) zero input instead of NaN.
#[inline]
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}
