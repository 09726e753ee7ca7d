//! # Kobbelt Subdivision
//!
//! Dual/connectivity scheme built around old vertices rather than old faces.
//!
//! ## Algorithm Overview
//!
//! 1. **Data pass**: one face point (centroid) per old face and one
//!    recomputed vertex point `(1 - alpha)*v + (alpha/n)*sum(neighbors)` per
//!    old vertex, with `alpha = (1/9)(4 - 2 cos(2pi/n))`.
//! 2. **Assembly pass**: for each old vertex and each of its incident edges,
//!    emit one face `[vertex point, face points of the faces touching that
//!    edge]` -- a triangle for an interior edge of a manifold mesh. Every
//!    interior old edge ends up shared by the two faces emitted from its two
//!    endpoints, so the output closes up over closed input.
//!
//! Boundary edges touch a single face; their dual face would collapse to a
//! two-sided polygon and is skipped, so open input loses its rim (the
//! scheme is primarily meant for closed meshes).
//!
//! ## References
//!
//! - Kobbelt, L. (1996). "Interpolatory subdivision on open quadrilateral
//!   nets with arbitrary topology".

use crate::geometry::{centroid, kobbelt_alpha, Point};
use crate::handles::{FaceId, VertexId};
use crate::mesh::Mesh;

/// Per-pass derived state for Kobbelt subdivision: face centroids and
/// vertex points (no edge points), plus the lazy used tables.
pub struct KobbeltData {
    face_points: Vec<Point>,
    vertex_points: Vec<Point>,

    used_face_points: Vec<VertexId>,
    used_vertex_points: Vec<VertexId>,
}

impl KobbeltData {
    /// Precompute every derived point for `mesh`
    pub fn new(mesh: &Mesh) -> Self {
        let mut data = Self {
            face_points: Vec::with_capacity(mesh.n_faces()),
            vertex_points: Vec::with_capacity(mesh.n_vertices()),
            used_face_points: vec![VertexId::invalid(); mesh.n_faces()],
            used_vertex_points: vec![VertexId::invalid(); mesh.n_vertices()],
        };
        data.build(mesh);
        data
    }

    fn build(&mut self, mesh: &Mesh) {
        for i in 0..mesh.n_faces() {
            self.face_points.push(compute_face_point(mesh, FaceId::from_usize(i)));
        }

        for i in 0..mesh.n_vertices() {
            self.vertex_points.push(compute_vertex_point(mesh, VertexId::from_usize(i)));
        }
    }

    /// Face point for `face_id`; zero point for an out-of-range id
    pub fn face_point(&self, face_id: FaceId) -> Point {
        self.face_points
            .get(face_id.idx_usize())
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

    fn emit_face_point(&mut self, face_id: FaceId, out: &mut Mesh) -> VertexId {
        let i = face_id.idx_usize();
        if i >= self.used_face_points.len() {
            return VertexId::invalid();
        }
        if !self.used_face_points[i].is_valid() {
            self.used_face_points[i] = out.add_vertex(self.face_points[i]);
        }
        self.used_face_points[i]
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

/// Centroid of a face's vertex positions; zero point for an
/// out-of-range id
fn compute_face_point(mesh: &Mesh, face_id: FaceId) -> Point {
    let Some(face) = mesh.faces.get(face_id.idx_usize()) else {
        return Point::ZERO;
    };

    let points: Vec<Point> = face
        .vertices
        .iter()
        .filter_map(|&v| mesh.point(v))
        .collect();
    centroid(&points)
}

/// `(1 - alpha) * v + (alpha / n) * sum(neighbor positions)`
fn compute_vertex_point(mesh: &Mesh, vert_id: VertexId) -> Point {
    let Some(v) = mesh.point(vert_id) else {
        return Point::ZERO;
    };

    let neighbors = mesh.connected_vertices(vert_id);
    let n = neighbors.len() as f32;
    let alpha = kobbelt_alpha(neighbors.len());

    let sum = neighbors
        .iter()
        .filter_map(|&nv| mesh.point(nv))
        .fold(Point::ZERO, |acc, p| acc + p);

    v * (1.0 - alpha) + sum * (alpha / n)
}

/// Emit the dual-like faces around one old vertex: one face per incident
/// edge, ringed by the face points of the faces touching that edge.
fn connect_vertex(mesh: &Mesh, data: &mut KobbeltData, vert_id: VertexId, out: &mut Mesh) {
    let edge_ids = mesh.connected_edges(vert_id);
    if edge_ids.is_empty() {
        return;
    }

    let vp = data.emit_vertex_point(vert_id, out);

    for edge_id in edge_ids {
        let face_ids = mesh.connected_faces_to_edge(edge_id);
        // A boundary edge touches one face; its dual face would be a
        // degenerate two-sided polygon.
        if face_ids.len() < 2 {
            continue;
        }

        let mut ring = Vec::with_capacity(1 + face_ids.len());
        ring.push(vp);
        for face_id in face_ids {
            ring.push(data.emit_face_point(face_id, out));
        }
        out.add_face(&ring);
    }
}

/// Run one Kobbelt pass over `mesh` and return the refined mesh.
///
/// Pure and deterministic; feed the output back in for further passes.
pub fn kobbelt_subdivide(mesh: &Mesh) -> Mesh {
    let incidence_sum: usize = mesh.faces.iter().map(|f| f.vertices.len()).sum();
    let mut out = Mesh::with_capacity(
        mesh.n_vertices() + mesh.n_faces(),
        incidence_sum + mesh.n_edges(),
        2 * mesh.n_edges(),
    );

    let mut data = KobbeltData::new(mesh);
    for i in 0..mesh.n_vertices() {
        connect_vertex(mesh, &mut data, VertexId::from_usize(i), &mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::{generate_cube, generate_icosahedron, generate_pyramid};
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_counts() {
        let cube = generate_cube();
        let refined = kobbelt_subdivide(&cube);

        // 8 vertex points + 6 face points.
        assert_eq!(refined.n_vertices(), 14);
        // One triangle per (vertex, incident edge) pair: 2 per old edge.
        assert_eq!(refined.n_faces(), 24);
        // vertex-to-face-point edges (8 * 3) + one face-to-face edge per
        // old edge (12).
        assert_eq!(refined.n_edges(), 36);
        assert!(refined.faces.iter().all(|f| f.vertices.len() == 3));

        assert_eq!(
            refined.n_vertices() as i64 - refined.n_edges() as i64 + refined.n_faces() as i64,
            2
        );
    }

    #[test]
    fn test_cube_output_is_closed() {
        let cube = generate_cube();
        let refined = kobbelt_subdivide(&cube);

        for i in 0..refined.n_edges() {
            let faces = refined.connected_faces_to_edge(crate::handles::EdgeId::from_usize(i));
            assert_eq!(faces.len(), 2, "edge {} not shared by 2 faces", i);
        }
    }

    #[test]
    fn test_pyramid_non_quad_faces() {
        // Mixed quad/triangle input, apex valence 4, base corners valence 3.
        let pyramid = generate_pyramid();
        let refined = kobbelt_subdivide(&pyramid);

        assert_eq!(refined.n_vertices(), pyramid.n_vertices() + pyramid.n_faces());
        assert_eq!(refined.n_faces(), 2 * pyramid.n_edges());
        assert!(refined.faces.iter().all(|f| f.vertices.len() == 3));
    }

    #[test]
    fn test_icosahedron_high_valence() {
        // Every icosahedron vertex has valence 5.
        let ico = generate_icosahedron();
        let refined = kobbelt_subdivide(&ico);

        assert_eq!(refined.n_vertices(), 12 + 20);
        assert_eq!(refined.n_faces(), 2 * 30);
        assert_eq!(
            refined.n_vertices() as i64 - refined.n_edges() as i64 + refined.n_faces() as i64,
            2
        );
    }

    #[test]
    fn test_vertex_rule() {
        let cube = generate_cube();
        let data = KobbeltData::new(&cube);

        let v0 = VertexId::new(0);
        let alpha = kobbelt_alpha(3);
        let sum = cube
            .connected_vertices(v0)
            .iter()
            .filter_map(|&n| cube.point(n))
            .fold(Point::ZERO, |acc, p| acc + p);
        let expected = cube.point(v0).map(|p| p * (1.0 - alpha)).unwrap_or(Point::ZERO)
            + sum * (alpha / 3.0);

        let got = data.vertex_point(v0);
        assert_relative_eq!(got.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(got.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(got.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn test_out_of_range_lookup_is_zero() {
        let cube = generate_cube();
        let data = KobbeltData::new(&cube);

        assert_eq!(data.face_point(FaceId::new(99)), Point::ZERO);
        assert_eq!(data.vertex_point(VertexId::new(99)), Point::ZERO);
    }

    #[test]
    fn test_boundary_edges_are_skipped() {
        // A single quad has only boundary edges; the pass emits the four
        // vertex points but no faces.
        let mut mesh = Mesh::new();
        let v0 = mesh.add_vertex(glam::vec3(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(glam::vec3(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(glam::vec3(1.0, 1.0, 0.0));
        let v3 = mesh.add_vertex(glam::vec3(0.0, 1.0, 0.0));
        mesh.add_face(&[v0, v1, v2, v3]);

        let refined = kobbelt_subdivide(&mesh);
        assert_eq!(refined.n_faces(), 0);
        assert_eq!(refined.n_vertices(), 4);
    }
}
