use crate::core::bounding_box::BoundingBox;
use crate::core::geometry::VertexOut;
use crate::scene::camera::Camera;
use crate::scene::mesh::PrimitiveTopology;
use nalgebra::Point2;

/// A triangle prepared for rasterization. Built and dropped per primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub screen: [Point2<f32>; 3],
    pub vertices: [VertexOut; 3],
    pub outside_frustum: [bool; 3],
    pub bounding_box: BoundingBox,
}

impl Triangle {
    #[inline]
    pub fn is_culled(&self) -> bool {
        self.outside_frustum.iter().any(|&outside| outside)
    }
}

/// Starting offset into the index buffer plus whether the winding is flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveStart {
    pub offset: usize,
    pub flip: bool,
}

/// Enumerates the primitives an index buffer of `index_count` entries describes.
///
/// Lists step by three and drop a trailing partial group. Strips slide by one
/// and flip every odd primitive so all triangles keep the same orientation.
pub fn primitive_starts(
    topology: PrimitiveTopology,
    index_count: usize,
) -> impl Iterator<Item = PrimitiveStart> {
    let (count, step, alternate) = match topology {
        PrimitiveTopology::TriangleList => (index_count / 3, 3, false),
        PrimitiveTopology::TriangleStrip => (index_count.saturating_sub(2), 1, true),
    };

    (0..count).map(move |n| {
        let offset = n * step;
        PrimitiveStart {
            offset,
            flip: alternate && offset % 2 == 1,
        }
    })
}

/// Resolves the three vertex indices of a primitive.
///
/// A flipped primitive swaps its second and third index.
#[inline]
pub fn resolve_indices(indices: &[u32], start: PrimitiveStart) -> [usize; 3] {
    let i = start.offset;
    let (second, third) = if start.flip { (i + 2, i + 1) } else { (i + 1, i + 2) };
    [
        indices[i] as usize,
        indices[second] as usize,
        indices[third] as usize,
    ]
}

/// Screen dimensions and camera shared by every triangle of a frame.
pub struct TriangleAssembler<'a> {
    pub camera: &'a Camera,
    pub width: usize,
    pub height: usize,
}

impl<'a> TriangleAssembler<'a> {
    pub fn new(camera: &'a Camera, width: usize, height: usize) -> Self {
        Self {
            camera,
            width,
            height,
        }
    }

    /// Builds the triangle starting at `start`, or `None` if two of its indices coincide.
    ///
    /// Frustum rejection is only recorded in `outside_frustum`; the rasterizer
    /// decides what to do with it.
    pub fn assemble(
        &self,
        indices: &[u32],
        start: PrimitiveStart,
        screen: &[Point2<f32>],
        vertices_out: &[VertexOut],
    ) -> Option<Triangle> {
        let [i0, i1, i2] = resolve_indices(indices, start);
        if i0 == i1 || i1 == i2 || i2 == i0 {
            return None;
        }

        let screen = [screen[i0], screen[i1], screen[i2]];
        let vertices = [vertices_out[i0], vertices_out[i1], vertices_out[i2]];
        let outside_frustum = vertices.map(|v| self.camera.is_outside_frustum(&v.position));

        Some(Triangle {
            bounding_box: BoundingBox::from_triangle(&screen, self.width, self.height),
            screen,
            vertices,
            outside_frustum,
        })
    }
}
