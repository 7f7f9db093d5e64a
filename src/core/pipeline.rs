use crate::core::geometry::PixelOut;
use nalgebra::Vector3;

/// The programmable pixel stage of the pipeline.
///
/// Vertex processing is fixed-function (see `vertex_stage`); only the color of
/// a covered pixel is up to the implementation. Shading must not mutate
/// shared state: the same pixel attributes always produce the same color.
pub trait PixelShader {
    /// Computes the color for one pixel from its interpolated attributes.
    ///
    /// The returned color may exceed 1.0; the rasterizer applies max-to-one
    /// before quantizing.
    fn shade(&self, pixel: &PixelOut) -> Vector3<f32>;
}

impl<F> PixelShader for F
where
    F: Fn(&PixelOut) -> Vector3<f32>,
{
    fn shade(&self, pixel: &PixelOut) -> Vector3<f32> {
        self(pixel)
    }
}
