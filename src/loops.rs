//! # Loop Subdivision
//!
//! Triangle-oriented subdivision, generalized to arbitrary polygon faces by
//! fanning the face's edge points into one central face.
//!
//! ## Algorithm Overview
//!
//! 1. **Data pass**: recompute every vertex first with the valence mask
//!    `(1 - n*alpha)*v + alpha*sum(neighbors)`, then compute every edge
//!    point as `3/8*(v1' + v2') + sum(opposite vertices')/8` where the
//!    primed positions are the *already recomputed* vertex points.
//! 2. **Assembly pass**: per old face with k edges, k corner triangles
//!    `[edge point, vertex point, next edge point]` plus one central face
//!    over the k edge points (the classic 1-to-4 triangle split for k = 3).
//!
//! The opposite-vertex sum is divided by a fixed 8 even when a boundary edge
//! has a single opposite vertex. Switching to a boundary-aware divisor would
//! change output geometry, so the fixed divisor is kept and pinned by a test.
//!
//! ## References
//!
//! - Loop, C. (1987). "Smooth Subdivision Surfaces Based on Triangles".

use crate::geometry::{loop_alpha, Point};
use crate::handles::{EdgeId, FaceId, VertexId};
use crate::mesh::Mesh;

/// Per-pass derived state for Loop subdivision: edge/vertex point tables
/// plus the lazy used tables. Built from one mesh, consumed by one
/// assembly pass.
pub struct LoopData {
    edge_points: Vec<Point>,
    vertex_points: Vec<Point>,

    used_edge_points: Vec<VertexId>,
    used_vertex_points: Vec<VertexId>,
}

impl LoopData {
    /// Precompute every derived point for `mesh`
    pub fn new(mesh: &Mesh) -> Self {
        let mut data = Self {
            edge_points: Vec::with_capacity(mesh.n_edges()),
            vertex_points: Vec::with_capacity(mesh.n_vertices()),
            used_edge_points: vec![VertexId::invalid(); mesh.n_edges()],
            used_vertex_points: vec![VertexId::invalid(); mesh.n_vertices()],
        };
        data.build(mesh);
        data
    }

    fn build(&mut self, mesh: &Mesh) {
        // Vertex points first: edge points are built from the recomputed
        // positions, not the input positions.
        for i in 0..mesh.n_vertices() {
            self.vertex_points.push(compute_vertex_point(mesh, VertexId::from_usize(i)));
        }

        for i in 0..mesh.n_edges() {
            let ep = self.compute_edge_point(mesh, EdgeId::from_usize(i));
            self.edge_points.push(ep);
        }
    }

    /// Edge point for `edge_id`; zero point for an out-of-range id
    pub fn edge_point(&self, edge_id: EdgeId) -> Point {
        self.edge_points
            .get(edge_id.idx_usize())
            .copied()
            .unwrap_or(Point::ZERO)
    }

    /// Recomputed vertex point for `vert_id`; zero point for an
    /// out-of-range id
    pub fn vertex_point(&self, vert_id: VertexId) -> Point {
        self.vertex_points
            .get(vert_id.idx_usize())
            .copied()
            .unwrap_or(Point::ZERO)
    }

    /// `3/8 * (v1' + v2') + (sum of opposite vertex points) / 8`.
    ///
    /// The opposite vertices are, for each face touching the edge, the face
    /// vertex that is neither endpoint (1 for a boundary edge, 2 interior).
    fn compute_edge_point(&self, mesh: &Mesh, edge_id: EdgeId) -> Point {
        let Some(edge) = mesh.edges.get(edge_id.idx_usize()) else {
            return Point::ZERO;
        };

        let [v1_id, v2_id] = edge.vertices;
        let endpoints = self.vertex_point(v1_id) + self.vertex_point(v2_id);

        let mut opposite = Point::ZERO;
        for face_id in mesh.connected_faces_to_edge(edge_id) {
            let face = &mesh.faces[face_id.idx_usize()];
            if let Some(&other) = face
                .vertices
                .iter()
                .find(|&&v| v != v1_id && v != v2_id)
            {
                opposite += self.vertex_point(other);
            }
        }

        // Fixed divisor of 8 regardless of the opposite-vertex count.
        endpoints * (3.0 / 8.0) + opposite / 8.0
    }

    fn emit_edge_point(&mut self, edge_id: EdgeId, out: &mut Mesh) -> VertexId {
        let i = edge_id.idx_usize();
        if i >= self.used_edge_points.len() {
            return VertexId::invalid();
        }
        if !self.used_edge_points[i].is_valid() {
            self.used_edge_points[i] = out.add_vertex(self.edge_points[i]);
        }
        self.used_edge_points[i]
    }

    fn emit_vertex_point(&mut self, vert_id: VertexId, out: &mut Mesh) -> VertexId {
        let i = vert_id.idx_usize();
        if !vert_id.is_valid() || i >= self.used_vertex_points.len() {
            return VertexId::invalid();
        }
        if !self.used_vertex_points[i].is_valid() {
            self.used_vertex_points[i] = out.add_vertex(self.vertex_points[i]);
        }
        self.used_vertex_points[i]
    }
}

/// `(1 - n*alpha(n)) * v + alpha(n) * sum(neighbor positions)`
fn compute_vertex_point(mesh: &Mesh, vert_id: VertexId) -> Point {
    let Some(v) = mesh.point(vert_id) else {
        return Point::ZERO;
    };

    let neighbors = mesh.connected_vertices(vert_id);
    let alpha = loop_alpha(neighbors.len());

    let mut ret = v * (1.0 - neighbors.len() as f32 * alpha);
    for neighbor in neighbors {
        ret += mesh.point(neighbor).unwrap_or(Point::ZERO) * alpha;
    }
    ret
}

/// Emit the corner triangle for the (edge0, edge1) pair of a face:
/// `[edge point 0, shared vertex point, edge point 1]`.
/// Returns the output id of edge point 1 for the central-face ring.
fn connect_corner(
    mesh: &Mesh,
    data: &mut LoopData,
    edge0_id: EdgeId,
    edge1_id: EdgeId,
    out: &mut Mesh,
) -> VertexId {
    let shared = mesh.edges[edge0_id.idx_usize()].shared_vertex(&mesh.edges[edge1_id.idx_usize()]);

    let ep0 = data.emit_edge_point(edge0_id, out);
    let vp = data.emit_vertex_point(shared, out);
    let ep1 = data.emit_edge_point(edge1_id, out);

    out.add_face(&[ep0, vp, ep1]);
    ep1
}

fn connect_face(mesh: &Mesh, data: &mut LoopData, face_id: FaceId, out: &mut Mesh) {
    let face = &mesh.faces[face_id.idx_usize()];
    let k = face.edges.len();
    if k == 0 {
        return;
    }

    // Corner pairs visited as (last, first), (0, 1), ..., (k-2, k-1); the
    // returned ids build the edge-point ring starting at edge 0's point.
    let mut ring = Vec::with_capacity(k);
    ring.push(connect_corner(mesh, data, face.edges[k - 1], face.edges[0], out));
    for i in 0..k - 1 {
        ring.push(connect_corner(mesh, data, face.edges[i], face.edges[i + 1], out));
    }

    // Central face over the edge points, rotated so edge i of the new face
    // connects ring slots (i-1, i) around the old loop.
    let mut central = Vec::with_capacity(k);
    central.push(ring[k - 1]);
    central.extend_from_slice(&ring[..k - 1]);
    out.add_face(&central);
}

/// Run one Loop pass over `mesh` and return the refined mesh.
///
/// Pure and deterministic; feed the output back in for further passes.
pub fn loop_subdivide(mesh: &Mesh) -> Mesh {
    let degree_sum: usize = mesh.faces.iter().map(|f| f.edges.len()).sum();
    let mut out = Mesh::with_capacity(
        mesh.n_edges() + mesh.n_vertices(),
        2 * mesh.n_edges() + degree_sum,
        degree_sum + mesh.n_faces(),
    );

    let mut data = LoopData::new(mesh);
    for i in 0..mesh.n_faces() {
        connect_face(mesh, &mut data, FaceId::from_usize(i), &mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::{generate_tetrahedron, generate_triangulated_cube};
    use approx::assert_relative_eq;

    #[test]
    fn test_triangulated_cube_counts() {
        let cube = generate_triangulated_cube();
        assert_eq!(cube.n_vertices(), 8);
        assert_eq!(cube.n_edges(), 18);
        assert_eq!(cube.n_faces(), 12);

        let refined = loop_subdivide(&cube);

        // 18 edge points + 8 vertex points.
        assert_eq!(refined.n_vertices(), 26);
        // 1-to-4 split.
        assert_eq!(refined.n_faces(), 48);
        assert_eq!(refined.n_edges(), 72);
        assert!(refined.faces.iter().all(|f| f.vertices.len() == 3));

        assert_eq!(
            refined.n_vertices() as i64 - refined.n_edges() as i64 + refined.n_faces() as i64,
            2
        );
    }

    #[test]
    fn test_tetrahedron_counts() {
        let tet = generate_tetrahedron();
        let refined = loop_subdivide(&tet);

        assert_eq!(refined.n_vertices(), tet.n_edges() + tet.n_vertices());
        assert_eq!(refined.n_faces(), 4 * tet.n_faces());
        assert!(refined.faces.iter().all(|f| f.vertices.len() == 3));
    }

    #[test]
    fn test_vertex_rule_valence_three() {
        // Tetrahedron vertices have valence 3, so alpha = 3/16 and
        // new = (1 - 9/16) v + 3/16 * sum(neighbors).
        let tet = generate_tetrahedron();
        let data = LoopData::new(&tet);

        let v0 = VertexId::new(0);
        let expected = tet.point(v0).map(|p| p * (7.0 / 16.0)).unwrap_or(Point::ZERO)
            + tet
                .connected_vertices(v0)
                .iter()
                .filter_map(|&n| tet.point(n))
                .fold(Point::ZERO, |acc, p| acc + p)
                * (3.0 / 16.0);

        let got = data.vertex_point(v0);
        assert_relative_eq!(got.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(got.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(got.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn test_edge_rule_uses_recomputed_positions() {
        let tet = generate_tetrahedron();
        let data = LoopData::new(&tet);

        let edge = tet.edges[0];
        let v1 = data.vertex_point(edge.vertices[0]);
        let v2 = data.vertex_point(edge.vertices[1]);

        // Both opposite vertices exist in a closed triangle mesh.
        let mut opposite = Point::ZERO;
        for face_id in tet.connected_faces_to_edge(EdgeId::new(0)) {
            let face = &tet.faces[face_id.idx_usize()];
            for &v in &face.vertices {
                if v != edge.vertices[0] && v != edge.vertices[1] {
                    opposite += data.vertex_point(v);
                }
            }
        }

        let expected = (v1 + v2) * (3.0 / 8.0) + opposite / 8.0;
        let got = data.edge_point(EdgeId::new(0));
        assert_relative_eq!(got.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(got.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(got.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn test_boundary_edge_keeps_fixed_divisor() {
        // Single triangle: every edge has exactly one opposite vertex, and
        // the sum is still divided by 8.
        let mut mesh = Mesh::new();
        let v0 = mesh.add_vertex(glam::vec3(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(glam::vec3(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(glam::vec3(0.0, 1.0, 0.0));
        mesh.add_face(&[v0, v1, v2]);

        let data = LoopData::new(&mesh);
        let edge = mesh.edges[0];
        let expected = (data.vertex_point(edge.vertices[0]) + data.vertex_point(edge.vertices[1]))
            * (3.0 / 8.0)
            + data.vertex_point(v2) / 8.0;

        assert_eq!(data.edge_point(EdgeId::new(0)), expected);
    }

    #[test]
    fn test_out_of_range_lookup_is_zero() {
        let tet = generate_tetrahedron();
        let data = LoopData::new(&tet);

        assert_eq!(data.edge_point(EdgeId::new(99)), Point::ZERO);
        assert_eq!(data.vertex_point(VertexId::new(99)), Point::ZERO);
    }

    #[test]
    fn test_central_face_has_parallel_loops() {
        let cube = generate_triangulated_cube();
        let refined = loop_subdivide(&cube);

        for (i, face) in refined.faces.iter().enumerate() {
            assert_eq!(face.vertices.len(), face.edges.len(), "face {}", i);
            let n = face.vertices.len();
            for j in 0..n {
                let expect =
                    crate::mesh::Edge::new(face.vertices[j], face.vertices[(j + 1) % n]);
                assert_eq!(refined.edges[face.edges[j].idx_usize()], expect);
            }
        }
    }
}
