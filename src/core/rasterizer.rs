use crate::core::assembler::Triangle;
use crate::core::color::{max_to_one, remap};
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::PixelOut;
use crate::core::math::interpolation::{
    TriangleEdges, interpolate_reciprocal, perspective_correct,
};
use crate::core::pipeline::PixelShader;
use log::trace;
use nalgebra::{Point2, Vector3, Vector4};

/// Depth window stretched to full grey range by the depth visualization.
pub const DEPTH_VIEW_MIN: f32 = 0.997;
pub const DEPTH_VIEW_MAX: f32 = 1.0;

/// The Rasterizer is responsible for drawing prepared triangles onto the FrameBuffer.
#[derive(Debug, Clone, Default)]
pub struct Rasterizer {
    /// Output remapped depth as grey instead of shading.
    pub show_depth: bool,
    /// Paint each triangle's bounding box white instead of its pixels.
    pub show_bounding_box: bool,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan-converts one triangle. Never writes outside its bounding box.
    pub fn rasterize_triangle<S: PixelShader + ?Sized>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        triangle: &Triangle,
    ) {
        // 1. Coarse culling: any vertex outside the device volume drops the triangle
        if triangle.is_culled() {
            trace!("Triangle culled by frustum test");
            return;
        }

        let (xs, ys) = triangle.bounding_box.pixel_ranges();

        // Debug view: fill the whole box
        if self.show_bounding_box {
            let white = Vector3::new(1.0, 1.0, 1.0);
            for px in xs {
                for py in ys.clone() {
                    framebuffer.set_pixel(px, py, white);
                }
            }
            return;
        }

        // 2. Edge setup
        let [s0, s1, s2] = triangle.screen;
        let Some(edges) = TriangleEdges::new(s0, s1, s2) else {
            trace!("Zero-area triangle skipped");
            return;
        };

        let [v0, v1, v2] = &triangle.vertices;
        let z_values = [v0.position.z, v1.position.z, v2.position.z];
        let w_values = [v0.position.w, v1.position.w, v2.position.w];

        // 3. Pixel Loop
        for px in xs {
            for py in ys.clone() {
                let pixel_center = Point2::new(px as f32 + 0.5, py as f32 + 0.5);

                let Some(weights) = edges.weights(pixel_center) else {
                    continue;
                };

                // Depth is interpolated by its reciprocal, then tested and written before shading
                let depth = interpolate_reciprocal(&weights, z_values);
                if !framebuffer.depth_test_and_update(px, py, depth) {
                    continue;
                }

                let color = if self.show_depth {
                    let grey = remap(depth, DEPTH_VIEW_MIN, DEPTH_VIEW_MAX);
                    Vector3::new(grey, grey, grey)
                } else {
                    let pixel = interpolate_pixel(triangle, &weights, px, py, depth, w_values);
                    shader.shade(&pixel)
                };

                framebuffer.set_pixel(px, py, max_to_one(color));
            }
        }
    }
}

/// Perspective-correct interpolation of every attribute for one pixel.
fn interpolate_pixel(
    triangle: &Triangle,
    weights: &Vector3<f32>,
    px: usize,
    py: usize,
    depth: f32,
    w_values: [f32; 3],
) -> PixelOut {
    let [v0, v1, v2] = &triangle.vertices;
    let w = interpolate_reciprocal(weights, w_values);

    let normal = perspective_correct(weights, [v0.normal, v1.normal, v2.normal], w_values, w);

    PixelOut {
        position: Vector4::new(px as f32, py as f32, depth, w),
        uv: perspective_correct(weights, [v0.uv, v1.uv, v2.uv], w_values, w),
        normal: crate::core::geometry::normalize_or_zero(normal),
        tangent: perspective_correct(weights, [v0.tangent, v1.tangent, v2.tangent], w_values, w),
        view_direction: perspective_correct(
            weights,
            [v0.view_direction, v1.view_direction, v2.view_direction],
            w_values,
            w,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bounding_box::BoundingBox;
    use crate::core::color::unpack_rgb;
    use crate::core::geometry::VertexOut;
    use approx::assert_relative_eq;

    const CLEAR: [u8; 3] = [0, 0, 0];

    fn framebuffer() -> FrameBuffer {
        let mut fb = FrameBuffer::new(16, 16);
        fb.clear(Vector3::zeros(), f32::MAX);
        fb
    }

    fn flat_triangle(depth: f32, w: f32) -> Triangle {
        let screen = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ];
        let vertex = |uv: (f32, f32)| VertexOut {
            position: Vector4::new(0.0, 0.0, depth, w),
            uv: nalgebra::Vector2::new(uv.0, uv.1),
            normal: Vector3::new(0.0, 0.0, -1.0),
            ..Default::default()
        };
        Triangle {
            vertices: [vertex((0.0, 0.0)), vertex((1.0, 0.0)), vertex((0.0, 1.0))],
            outside_frustum: [false; 3],
            bounding_box: BoundingBox::from_triangle(&screen, 16, 16),
            screen,
        }
    }

    fn red(_: &PixelOut) -> Vector3<f32> {
        Vector3::new(1.0, 0.0, 0.0)
    }

    #[test]
    fn interior_pixels_get_depth_and_color() {
        let mut fb = framebuffer();
        Rasterizer::new().rasterize_triangle(&mut fb, &red, &flat_triangle(0.5, 1.0));

        for (x, y) in [(0, 0), (1, 1), (4, 4), (8, 0), (0, 8), (2, 6)] {
            assert_relative_eq!(fb.get_depth(x, y).unwrap(), 0.5, epsilon = 1e-6);
            assert_eq!(fb.get_pixel(x, y), Some([255, 0, 0]));
        }

        for (x, y) in [(9, 9), (12, 3), (5, 14)] {
            assert_eq!(fb.get_depth(x, y), Some(f32::MAX));
            assert_eq!(fb.get_pixel(x, y), Some(CLEAR));
        }
    }

    #[test]
    fn equal_depth_does_not_overwrite() {
        let mut fb = framebuffer();
        let rasterizer = Rasterizer::new();
        rasterizer.rasterize_triangle(&mut fb, &red, &flat_triangle(0.5, 1.0));

        let blue = |_: &PixelOut| Vector3::new(0.0, 0.0, 1.0);
        rasterizer.rasterize_triangle(&mut fb, &blue, &flat_triangle(0.5, 1.0));
        assert_eq!(fb.get_pixel(2, 2), Some([255, 0, 0]));

        rasterizer.rasterize_triangle(&mut fb, &blue, &flat_triangle(0.25, 1.0));
        assert_eq!(fb.get_pixel(2, 2), Some([0, 0, 255]));
        assert_relative_eq!(fb.get_depth(2, 2).unwrap(), 0.25, epsilon = 1e-6);
    }

    #[test]
    fn depth_outside_unit_range_is_discarded() {
        let mut fb = framebuffer();
        Rasterizer::new().rasterize_triangle(&mut fb, &red, &flat_triangle(1.5, 1.0));
        assert_eq!(fb.get_pixel(2, 2), Some(CLEAR));
        assert_eq!(fb.get_depth(2, 2), Some(f32::MAX));
    }

    #[test]
    fn culled_triangle_writes_nothing() {
        let mut fb = framebuffer();
        let mut tri = flat_triangle(0.5, 1.0);
        tri.outside_frustum[2] = true;

        let rasterizer = Rasterizer {
            show_bounding_box: true,
            ..Default::default()
        };
        rasterizer.rasterize_triangle(&mut fb, &red, &tri);
        assert!(fb.depth_buffer.iter().all(|&d| d == f32::MAX));
        assert!(fb.color_buffer.iter().all(|&c| unpack_rgb(c) == CLEAR));
    }

    #[test]
    fn bounding_box_view_fills_box_only() {
        let mut fb = framebuffer();
        let rasterizer = Rasterizer {
            show_bounding_box: true,
            ..Default::default()
        };
        let tri = flat_triangle(0.5, 1.0);
        rasterizer.rasterize_triangle(&mut fb, &red, &tri);

        // Margins accumulate per update: x spans [0, 12), y spans [0, 11).
        assert_eq!(fb.get_pixel(11, 10), Some([255, 255, 255]));
        assert_eq!(fb.get_pixel(9, 9), Some([255, 255, 255]));
        assert_eq!(fb.get_pixel(12, 0), Some(CLEAR));
        assert_eq!(fb.get_pixel(0, 11), Some(CLEAR));
        assert_eq!(fb.get_depth(9, 9), Some(f32::MAX));
    }

    #[test]
    fn depth_view_outputs_remapped_grey() {
        let mut fb = framebuffer();
        let rasterizer = Rasterizer {
            show_depth: true,
            ..Default::default()
        };
        rasterizer.rasterize_triangle(&mut fb, &red, &flat_triangle(0.99865, 1.0));

        let expected = (remap(0.99865, DEPTH_VIEW_MIN, DEPTH_VIEW_MAX) * 255.0) as u8;
        assert_eq!(fb.get_pixel(3, 3), Some([expected; 3]));
        assert_relative_eq!(fb.get_depth(3, 3).unwrap(), 0.99865, epsilon = 1e-6);
        assert_eq!(fb.get_depth(9, 9), Some(f32::MAX));
    }

    #[test]
    fn attributes_are_interpolated_per_pixel() {
        let tri = flat_triangle(0.5, 2.0);
        let edges = TriangleEdges::new(tri.screen[0], tri.screen[1], tri.screen[2]).unwrap();
        let weights = edges.weights(Point2::new(2.5, 4.5)).unwrap();
        let pixel = interpolate_pixel(&tri, &weights, 2, 4, 0.5, [2.0; 3]);

        assert_relative_eq!(pixel.uv, nalgebra::Vector2::new(0.25, 0.45), epsilon = 1e-5);
        assert_relative_eq!(pixel.position.w, 2.0, epsilon = 1e-5);
        assert_relative_eq!(pixel.normal, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn varying_depth_and_w_are_interpolated_in_perspective() {
        let mut tri = flat_triangle(0.5, 1.0);
        for (vertex, (z, w)) in tri.vertices.iter_mut().zip([(0.2, 1.0), (0.5, 2.0), (0.8, 4.0)]) {
            vertex.position.z = z;
            vertex.position.w = w;
        }

        let mut fb = framebuffer();
        let uv_as_color = |p: &PixelOut| Vector3::new(p.uv.x, p.uv.y, 0.0);
        Rasterizer::new().rasterize_triangle(&mut fb, &uv_as_color, &tri);

        // Pixel (2, 4) samples at (2.5, 4.5) with weights (0.3, 0.25, 0.45).
        assert_relative_eq!(fb.get_depth(2, 4).unwrap(), 1.0 / 2.5625, epsilon = 1e-5);

        // uv = (0.2326, 0.2093); an affine blend would give (0.25, 0.45).
        let u = ((0.125_f32 / 0.5375) * 255.0) as u8;
        let v = ((0.1125_f32 / 0.5375) * 255.0) as u8;
        assert_eq!((u, v), (59, 53));
        assert_eq!(fb.get_pixel(2, 4), Some([u, v, 0]));
    }

    #[test]
    fn shader_sees_interpolated_uv() {
        let mut fb = framebuffer();
        let uv_as_color = |p: &PixelOut| Vector3::new(p.uv.x, p.uv.y, 0.0);
        Rasterizer::new().rasterize_triangle(&mut fb, &uv_as_color, &flat_triangle(0.5, 1.0));

        // Pixel (0, 0) samples at (0.5, 0.5): uv = (0.05, 0.05).
        let expected = (0.05_f32 * 255.0) as u8;
        assert_eq!(fb.get_pixel(0, 0), Some([expected, expected, 0]));
    }
}
