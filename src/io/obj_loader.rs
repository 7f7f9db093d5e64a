use crate::core::geometry::{Vertex, normalize_or_zero};
use crate::scene::mesh::{Mesh, PrimitiveTopology};
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file into a single triangle-list Mesh.
///
/// OBJ data is right-handed; positions and normals get their z negated, `v`
/// is flipped and each face's winding is reversed so front faces stay
/// clockwise on screen. Tangents are derived from the UV layout.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }

    info!("Loading OBJ file: {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, _materials) =
        tobj::load_obj(path, &load_options).map_err(|e| format!("Failed to load OBJ: {}", e))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Sub-meshes are merged; indices are offset by the vertices already added.
    for model in models {
        let mesh = &model.mesh;
        let index_offset = vertices.len() as u32;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = mesh.normals.len() == mesh.positions.len();
        let has_texcoords = mesh.texcoords.len() / 2 == num_vertices;

        if !has_normals {
            warn!("Mesh '{}' is missing normals. Using (0, 0, -1).", model.name);
        }
        if !has_texcoords {
            warn!("Mesh '{}' is missing texture coordinates.", model.name);
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                -mesh.positions[i * 3 + 2],
            );

            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    -mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::new(0.0, 0.0, -1.0)
            };

            let uv = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            vertices.push(Vertex::new(position, normal, Vector3::zeros(), uv));
        }

        for face in mesh.indices.chunks_exact(3) {
            indices.extend_from_slice(&[
                face[0] + index_offset,
                face[2] + index_offset,
                face[1] + index_offset,
            ]);
        }
    }

    compute_tangents(&mut vertices, &indices);

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        vertices.len(),
        indices.len()
    );

    Mesh::new(vertices, indices, PrimitiveTopology::TriangleList)
}

/// Accumulates per-face UV tangents onto each vertex, then orthogonalizes
/// them against the normal (Gram-Schmidt).
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vector3::zeros(); vertices.len()];

    for face in indices.chunks_exact(3) {
        let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];
        if i0 >= vertices.len() || i1 >= vertices.len() || i2 >= vertices.len() {
            continue;
        }
        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);

        let edge0 = v1.position - v0.position;
        let edge1 = v2.position - v0.position;
        let duv0 = v1.uv - v0.uv;
        let duv1 = v2.uv - v0.uv;

        let det = duv0.x * duv1.y - duv1.x * duv0.y;
        if det.abs() < f32::EPSILON {
            continue;
        }

        let tangent = (edge0 * duv1.y - edge1 * duv0.y) / det;
        for i in [i0, i1, i2] {
            accumulated[i] += tangent;
        }
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let n = vertex.normal;
        let orthogonal = normalize_or_zero(tangent - n * n.dot(&tangent));
        vertex.tangent = if orthogonal == Vector3::zeros() {
            any_perpendicular(&n)
        } else {
            orthogonal
        };
    }
}

/// A unit vector perpendicular to `n`, for vertices without usable UVs.
fn any_perpendicular(n: &Vector3<f32>) -> Vector3<f32> {
    let helper = if n.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    normalize_or_zero(helper - n * n.dot(&helper))
}
