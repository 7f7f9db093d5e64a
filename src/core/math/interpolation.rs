use nalgebra::{Point2, Vector2, Vector3};
use std::ops::{Add, Div, Mul};

const EPSILON: f32 = 1e-6;

/// 2D cross product (z component of the 3D cross product).
#[inline(always)]
pub fn cross_2d(a: &Vector2<f32>, b: &Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Screen-space edges of a triangle plus its signed double area.
///
/// Edges run v0→v1, v1→v2, v2→v0; the area is `cross(e12, e20)`.
#[derive(Debug, Clone, Copy)]
pub struct TriangleEdges {
    pub vertices: [Point2<f32>; 3],
    pub edge01: Vector2<f32>,
    pub edge12: Vector2<f32>,
    pub edge20: Vector2<f32>,
    pub inverse_area: f32,
}

impl TriangleEdges {
    /// Returns `None` for zero-area or non-finite triangles.
    pub fn new(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> Option<Self> {
        let edge01 = v1 - v0;
        let edge12 = v2 - v1;
        let edge20 = v0 - v2;

        let area = cross_2d(&edge12, &edge20);
        if !area.is_finite() || area.abs() < EPSILON {
            return None;
        }

        Some(Self {
            vertices: [v0, v1, v2],
            edge01,
            edge12,
            edge20,
            inverse_area: 1.0 / area,
        })
    }

    /// Evaluates the three edge functions for `p` as (c01, c12, c20).
    #[inline]
    pub fn edge_functions(&self, p: Point2<f32>) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices;
        Vector3::new(
            cross_2d(&self.edge01, &(p - v0)),
            cross_2d(&self.edge12, &(p - v1)),
            cross_2d(&self.edge20, &(p - v2)),
        )
    }

    /// Barycentric weights for (v0, v1, v2), or `None` when `p` is outside.
    ///
    /// Inside means every edge function is >= 0, so only one winding passes.
    #[inline]
    pub fn weights(&self, p: Point2<f32>) -> Option<Vector3<f32>> {
        let c = self.edge_functions(p);
        if !is_inside_triangle(&c) {
            return None;
        }
        Some(Vector3::new(c.y, c.z, c.x) * self.inverse_area)
    }
}

/// True when all three edge functions are non-negative.
#[inline(always)]
pub fn is_inside_triangle(edge_functions: &Vector3<f32>) -> bool {
    edge_functions.x >= 0.0 && edge_functions.y >= 0.0 && edge_functions.z >= 0.0
}

/// Interpolates a per-vertex scalar by its reciprocal: `1 / Σ weight_i / value_i`.
///
/// Used for both the depth (`z`) and the perspective term (`w`).
#[inline]
pub fn interpolate_reciprocal(weights: &Vector3<f32>, values: [f32; 3]) -> f32 {
    1.0 / (weights.x / values[0] + weights.y / values[1] + weights.z / values[2])
}

/// Perspective-correct attribute interpolation:
/// `(Σ weight_i * attr_i / w_i) * interpolated_w`.
#[inline]
pub fn perspective_correct<T>(
    weights: &Vector3<f32>,
    attributes: [T; 3],
    w: [f32; 3],
    interpolated_w: f32,
) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T> + Div<f32, Output = T>,
{
    (attributes[0] * weights.x / w[0]
        + attributes[1] * weights.y / w[1]
        + attributes[2] * weights.z / w[2])
        * interpolated_w
}
