use crate::core::geometry::{Vertex, VertexOut};
use nalgebra::{Point3, Vector2, Vector3};

/// Rule for grouping an index buffer into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Independent triples.
    #[default]
    TriangleList,
    /// Sliding window of three with alternating winding.
    TriangleStrip,
}

/// A collection of vertices and indices representing a 3D object.
pub struct Mesh {
    /// Model-space vertices. Immutable after construction.
    vertices: Vec<Vertex>,
    /// Indices into `vertices`, every one smaller than the vertex count.
    indices: Vec<u32>,
    pub topology: PrimitiveTopology,
    /// Output of the vertex transform stage, rewritten every frame.
    vertices_out: Vec<VertexOut>,
}

impl Mesh {
    /// Fails if any index points past the vertex array.
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        topology: PrimitiveTopology,
    ) -> Result<Self, String> {
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(format!(
                "Index {} out of range for mesh with {} vertices",
                bad,
                vertices.len()
            ));
        }

        let vertex_count = vertices.len();
        Ok(Self {
            vertices,
            indices,
            topology,
            vertices_out: Vec::with_capacity(vertex_count),
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertices_out(&self) -> &[VertexOut] {
        &self.vertices_out
    }

    /// Source vertices alongside the output array the vertex stage rewrites.
    pub(crate) fn transform_buffers(&mut self) -> (&[Vertex], &mut Vec<VertexOut>) {
        (&self.vertices, &mut self.vertices_out)
    }

    /// Creates a single triangle facing the -Z direction (towards a camera at the origin).
    ///
    /// Vertices are clockwise as seen by that camera.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::new(1.0, 0.0, 0.0);
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.5, 0.0), normal, tangent, Vector2::new(0.5, 0.0)),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), normal, tangent, Vector2::new(1.0, 1.0)),
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), normal, tangent, Vector2::new(0.0, 1.0)),
        ];

        Self {
            vertices_out: Vec::with_capacity(vertices.len()),
            vertices,
            indices: vec![0, 1, 2],
            topology: PrimitiveTopology::TriangleList,
        }
    }

    /// Creates a `size` x `size` quad in the XY plane as a four-index triangle strip.
    pub fn create_quad_strip(size: f32) -> Self {
        let h = size / 2.0;
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::new(1.0, 0.0, 0.0);
        let vertices = vec![
            Vertex::new(Point3::new(-h, h, 0.0), normal, tangent, Vector2::new(0.0, 0.0)),
            Vertex::new(Point3::new(h, h, 0.0), normal, tangent, Vector2::new(1.0, 0.0)),
            Vertex::new(Point3::new(-h, -h, 0.0), normal, tangent, Vector2::new(0.0, 1.0)),
            Vertex::new(Point3::new(h, -h, 0.0), normal, tangent, Vector2::new(1.0, 1.0)),
        ];

        Self {
            vertices_out: Vec::with_capacity(vertices.len()),
            vertices,
            indices: vec![0, 1, 2, 3],
            topology: PrimitiveTopology::TriangleStrip,
        }
    }
}
