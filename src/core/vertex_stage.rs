use crate::core::geometry::{VertexOut, normalize_or_zero};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Point2};

/// Transforms every vertex of `mesh` from model space to NDC.
///
/// The mesh's output array is cleared and fully rewritten; its length always
/// matches the vertex count afterwards.
pub fn transform_vertices(mesh: &mut Mesh, world: &Matrix4<f32>, camera: &Camera) {
    let world_view_projection = camera.projection_matrix() * camera.view_matrix() * world;
    let world_3x3 = world.fixed_view::<3, 3>(0, 0).into_owned();

    let (vertices, vertices_out) = mesh.transform_buffers();

    vertices_out.clear();
    vertices_out.reserve(vertices.len());

    for vertex in vertices.iter() {
        let clip = world_view_projection * vertex.position.to_homogeneous();

        vertices_out.push(VertexOut {
            position: apply_perspective_division(&clip),
            uv: vertex.uv,
            normal: normalize_or_zero(world_3x3 * vertex.normal),
            tangent: normalize_or_zero(world_3x3 * vertex.tangent),
            // Clip-space direction of the vertex, taken before the divide.
            view_direction: normalize_or_zero(clip.xyz()),
        });
    }
}

/// Maps NDC positions to pixel coordinates (origin top-left, +Y down).
pub fn project_to_screen(vertices_out: &[VertexOut], width: usize, height: usize) -> Vec<Point2<f32>> {
    vertices_out
        .iter()
        .map(|v| ndc_to_screen(v.position.x, v.position.y, width as f32, height as f32))
        .collect()
}
