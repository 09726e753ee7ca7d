//! # Catmull-Clark Subdivision
//!
//! Quad-oriented subdivision that works on arbitrary polygon faces.
//!
//! ## Algorithm Overview
//!
//! 1. **Data pass**: for every old face compute a face point (centroid),
//!    for every old edge an edge point (mean of the endpoints and every
//!    adjacent face point) and a plain midpoint, and for every old vertex
//!    the recomputed vertex point `Q + R + v(n-3)/n`.
//! 2. **Assembly pass**: for every old face emit one quad per corner:
//!    `[face point, edge point, vertex point, next edge point]`. Derived
//!    points enter the output mesh lazily, exactly once, through the used
//!    tables; edges are deduplicated through the output mesh's edge scan.
//!
//! A cube (8V / 12E / 6F) becomes 26 vertices and 24 quads in one pass.
//!
//! ## References
//!
//! - Catmull, E., Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes".

use crate::geometry::{centroid, edge_midpoint, Point};
use crate::handles::{EdgeId, FaceId, VertexId};
use crate::mesh::Mesh;

/// Per-pass derived state for Catmull-Clark: one point table per old-mesh
/// element kind, plus the lazy old-id -> output-vertex used tables.
///
/// Built from one input mesh, consumed by exactly one assembly pass.
pub struct CatmullData {
    face_points: Vec<Point>,
    edge_points: Vec<Point>,
    mid_points: Vec<Point>,
    vertex_points: Vec<Point>,

    used_face_points: Vec<VertexId>,
    used_edge_points: Vec<VertexId>,
    used_vertex_points: Vec<VertexId>,
}

impl CatmullData {
    /// Precompute every derived point for `mesh`
    pub fn new(mesh: &Mesh) -> Self {
        let mut data = Self {
            face_points: Vec::with_capacity(mesh.n_faces()),
            edge_points: Vec::with_capacity(mesh.n_edges()),
            mid_points: Vec::with_capacity(mesh.n_edges()),
            vertex_points: Vec::with_capacity(mesh.n_vertices()),
            used_face_points: vec![VertexId::invalid(); mesh.n_faces()],
            used_edge_points: vec![VertexId::invalid(); mesh.n_edges()],
            used_vertex_points: vec![VertexId::invalid(); mesh.n_vertices()],
        };
        data.build(mesh);
        data
    }

    fn build(&mut self, mesh: &Mesh) {
        for i in 0..mesh.n_edges() {
            let ep = self.compute_edge_point(mesh, EdgeId::from_usize(i));
            self.edge_points.push(ep);
            let mp = self.compute_mid_point(mesh, EdgeId::from_usize(i));
            self.mid_points.push(mp);
        }

        for i in 0..mesh.n_faces() {
            self.face_points.push(compute_face_point(mesh, FaceId::from_usize(i)));
        }

        for i in 0..mesh.n_vertices() {
            let vp = self.compute_vertex_point(mesh, VertexId::from_usize(i));
            self.vertex_points.push(vp);
        }
    }

    /// Face point for `face_id`; zero point for an out-of-range id
    pub fn face_point(&self, face_id: FaceId) -> Point {
        self.face_points
            .get(face_id.idx_usize())
            .copied()
            .unwrap_or(Point::ZERO)
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

    /// Mean of the 2 endpoints plus the face point of every face touching
    /// the edge: 4 points for an interior edge of a quad mesh, 2 for a
    /// boundary edge.
    fn compute_edge_point(&self, mesh: &Mesh, edge_id: EdgeId) -> Point {
        let Some(edge) = mesh.edges.get(edge_id.idx_usize()) else {
            return Point::ZERO;
        };

        let mut sum = mesh.point(edge.vertices[0]).unwrap_or(Point::ZERO)
            + mesh.point(edge.vertices[1]).unwrap_or(Point::ZERO);
        let mut count = 2.0f32;

        for face_id in mesh.connected_faces_to_edge(edge_id) {
            sum += compute_face_point(mesh, face_id);
            count += 1.0;
        }

        sum / count
    }

    fn compute_mid_point(&self, mesh: &Mesh, edge_id: EdgeId) -> Point {
        let Some(edge) = mesh.edges.get(edge_id.idx_usize()) else {
            return Point::ZERO;
        };

        edge_midpoint(
            mesh.point(edge.vertices[0]).unwrap_or(Point::ZERO),
            mesh.point(edge.vertices[1]).unwrap_or(Point::ZERO),
        )
    }

    /// Full Catmull-Clark vertex rule for valence `n` and incident face
    /// count `f`:
    ///
    /// ```text
    /// R = (sum of incident edge midpoints) * 2/n^2
    /// Q = (sum of incident face points) / (n * f)
    /// new = Q + R + v * (n-3)/n
    /// ```
    ///
    /// The division placement matters on non-quad meshes and is kept
    /// exactly as written.
    fn compute_vertex_point(&self, mesh: &Mesh, vert_id: VertexId) -> Point {
        let Some(v) = mesh.point(vert_id) else {
            return Point::ZERO;
        };

        let edge_ids = mesh.connected_edges(vert_id);
        let n = edge_ids.len() as f32;

        let mut r = Point::ZERO;
        for edge_id in &edge_ids {
            r += self.mid_points[edge_id.idx_usize()];
        }
        r *= 2.0 / (n * n);

        let face_ids = mesh.connected_faces(vert_id);
        let f = face_ids.len() as f32;

        let mut q = Point::ZERO;
        for face_id in &face_ids {
            q += self.face_points[face_id.idx_usize()];
        }
        q /= n * f;

        q + r + v * ((n - 3.0) / n)
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

/// Emit the corner quad for the (edge0, edge1) pair of a face:
/// `[face point, edge point 0, shared vertex point, edge point 1]`
fn connect_corner(
    mesh: &Mesh,
    data: &mut CatmullData,
    face_point: VertexId,
    edge0_id: EdgeId,
    edge1_id: EdgeId,
    out: &mut Mesh,
) {
    let shared = mesh.edges[edge0_id.idx_usize()].shared_vertex(&mesh.edges[edge1_id.idx_usize()]);

    let ep0 = data.emit_edge_point(edge0_id, out);
    let vp = data.emit_vertex_point(shared, out);
    let ep1 = data.emit_edge_point(edge1_id, out);

    out.add_face(&[face_point, ep0, vp, ep1]);
}

fn connect_face(mesh: &Mesh, data: &mut CatmullData, face_id: FaceId, out: &mut Mesh) {
    let face = &mesh.faces[face_id.idx_usize()];
    let k = face.edges.len();
    if k == 0 {
        return;
    }

    let fp = data.emit_face_point(face_id, out);

    // Corner pairs visited as (last, first), (0, 1), ..., (k-2, k-1).
    connect_corner(mesh, data, fp, face.edges[k - 1], face.edges[0], out);
    for i in 0..k - 1 {
        connect_corner(mesh, data, fp, face.edges[i], face.edges[i + 1], out);
    }
}

/// Run one Catmull-Clark pass over `mesh` and return the refined mesh.
///
/// Pure and deterministic; feed the output back in for further passes.
pub fn catmull_clark(mesh: &Mesh) -> Mesh {
    let degree_sum: usize = mesh.faces.iter().map(|f| f.edges.len()).sum();
    let mut out = Mesh::with_capacity(
        mesh.n_faces() + mesh.n_edges() + mesh.n_vertices(),
        degree_sum + 2 * mesh.n_edges(),
        degree_sum,
    );

    let mut data = CatmullData::new(mesh);
    for i in 0..mesh.n_faces() {
        connect_face(mesh, &mut data, FaceId::from_usize(i), &mut out);
    }

    out
}
