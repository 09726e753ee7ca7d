//! # Render Conversion
//!
//! Flattens a mesh into plain position/index buffers for an external
//! renderer. Not part of the subdivision logic; it only consumes its output.

use crate::handles::FaceId;
use crate::mesh::Mesh;

/// Flat render data: positions grouped by 3 floats, plus an index buffer
/// (triangle list or line list depending on the producing function).
#[derive(Debug, Clone, Default)]
pub struct RenderBuffers {
    pub positions: Vec<f32>,
    pub indices: Vec<u16>,
}

fn flatten_positions(mesh: &Mesh) -> Vec<f32> {
    let mut positions = Vec::with_capacity(mesh.n_vertices() * 3);
    for p in &mesh.points {
        positions.push(p.x);
        positions.push(p.y);
        positions.push(p.z);
    }
    positions
}

/// Fan every face into a triangle list, wound consistently outward
/// relative to the mesh barycenter.
///
/// Faces whose edge loop does not chain into a single cycle are skipped,
/// never fatal. Indices are `u16`; meshes at this scale stay well under
/// that limit.
pub fn triangle_buffers(mesh: &Mesh) -> RenderBuffers {
    let mut ret = RenderBuffers {
        positions: flatten_positions(mesh),
        indices: Vec::new(),
    };

    let bary = mesh.barycenter();
    for i in 0..mesh.n_faces() {
        let walk = mesh.face_vertex_loop(FaceId::from_usize(i), bary);
        if walk.len() < 3 {
            continue;
        }

        for j in 1..walk.len() - 1 {
            ret.indices.push(walk[0].idx() as u16);
            ret.indices.push(walk[j].idx() as u16);
            ret.indices.push(walk[j + 1].idx() as u16);
        }
    }

    ret
}

/// Emit the edge list as a line list (wireframe view)
pub fn wireframe_buffers(mesh: &Mesh) -> RenderBuffers {
    let mut ret = RenderBuffers {
        positions: flatten_positions(mesh),
        indices: Vec::with_capacity(mesh.n_edges() * 2),
    };

    for edge in &mesh.edges {
        ret.indices.push(edge.vertices[0].idx() as u16);
        ret.indices.push(edge.vertices[1].idx() as u16);
    }

    ret
}
