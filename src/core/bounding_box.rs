use nalgebra::Point2;

/// Screen-space integer bounds of a triangle, clamped to the framebuffer.
///
/// A fresh box holds the sentinel `min = i32::MAX, max = -i32::MAX` so that an
/// un-updated box is recognizably empty. Each update call applies the margin
/// again, so the effective margin grows with the number of updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
    margin: i32,
    clamp_x: i32,
    clamp_y: i32,
}

impl BoundingBox {
    pub const MARGIN: i32 = 1;

    pub fn new(screen_width: usize, screen_height: usize) -> Self {
        Self {
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: -i32::MAX,
            max_y: -i32::MAX,
            margin: Self::MARGIN,
            clamp_x: i32::try_from(screen_width).unwrap_or(i32::MAX),
            clamp_y: i32::try_from(screen_height).unwrap_or(i32::MAX),
        }
    }

    /// Builds the box of a triangle: three `update_min` then three `update_max` calls.
    pub fn from_triangle(points: &[Point2<f32>; 3], screen_width: usize, screen_height: usize) -> Self {
        let mut bbox = Self::new(screen_width, screen_height);
        for p in points {
            bbox.update_min(p);
        }
        for p in points {
            bbox.update_max(p);
        }
        bbox
    }

    pub fn update_min(&mut self, point: &Point2<f32>) {
        self.min_x = self.min_x.min(point.x as i32).saturating_sub(self.margin).clamp(0, self.clamp_x);
        self.min_y = self.min_y.min(point.y as i32).saturating_sub(self.margin).clamp(0, self.clamp_y);
    }

    pub fn update_max(&mut self, point: &Point2<f32>) {
        self.max_x = self.max_x.max(point.x as i32).saturating_add(self.margin).clamp(0, self.clamp_x);
        self.max_y = self.max_y.max(point.y as i32).saturating_add(self.margin).clamp(0, self.clamp_y);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Half-open pixel ranges `[min, max)` on both axes.
    pub fn pixel_ranges(&self) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        if self.is_empty() {
            return (0..0, 0..0);
        }
        (
            self.min_x as usize..self.max_x as usize,
            self.min_y as usize..self.max_y as usize,
        )
    }
}
