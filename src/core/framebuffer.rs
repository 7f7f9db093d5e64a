use crate::core::color::{pack_rgb, unpack_rgb};
use nalgebra::Vector3;

/// Packed colors plus a parallel depth buffer.
///
/// Owned by the renderer for its whole lifetime and reset at the start of
/// every frame. All writes happen on the rendering thread through `&mut self`.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,

    /// 0xAARRGGBB per pixel, row-major.
    pub color_buffer: Vec<u32>,

    /// One depth value per pixel. Smaller is closer.
    pub depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![pack_rgb(Vector3::zeros()); size],
            depth_buffer: vec![f32::MAX; size],
        }
    }

    /// Fills the color buffer with `color` and the depth buffer with `depth`.
    pub fn clear(&mut self, color: Vector3<f32>, depth: f32) {
        self.color_buffer.fill(pack_rgb(color));
        self.depth_buffer.fill(depth);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Strict less-than depth test.
    ///
    /// Writes `new_depth` and returns true when it lies in [0, 1] and is
    /// strictly closer than the stored value. Equal depth loses.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) || !(0.0..=1.0).contains(&new_depth) {
            return false;
        }
        let idx = self.index(x, y);
        if new_depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = new_depth;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Vector3<f32>) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.color_buffer[idx] = pack_rgb(color);
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(unpack_rgb(self.color_buffer[self.index(x, y)]))
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }
}
