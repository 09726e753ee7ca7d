//! # Mesh Model
//!
//! Shared polygon-mesh representation used by every subdivision scheme:
//! a vertex position list, an edge list (unordered vertex pairs) and a face
//! list where each face carries *parallel* vertex/edge loops.
//!
//! Adjacency is recovered by linear scans over the element lists rather than
//! through a prebuilt index. Meshes at the target scale are small, and the
//! scan contract keeps element identity exact (symmetric edge equality,
//! exact float equality for points) with no hashing involved.
//!
//! The model does not validate manifoldness; adjacency queries on
//! non-manifold input give undefined results.

use crate::geometry::Point;
use crate::handles::{EdgeId, FaceId, VertexId};

/// An unordered pair of vertex ids.
///
/// Equality is symmetric: `(a, b) == (b, a)`.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Edge {
    pub vertices: [VertexId; 2],
}

impl Edge {
    /// Create an edge connecting two vertices
    #[inline]
    pub fn new(v0: VertexId, v1: VertexId) -> Self {
        Self { vertices: [v0, v1] }
    }

    /// Check whether the edge touches the given vertex
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices[0] == v || self.vertices[1] == v
    }

    /// Swap the endpoint order in place
    #[inline]
    pub fn swap(&mut self) {
        self.vertices.swap(0, 1);
    }

    /// Vertex shared with another edge, or the invalid id if the edges
    /// do not touch
    pub fn shared_vertex(&self, other: &Edge) -> VertexId {
        if other.contains(self.vertices[0]) {
            self.vertices[0]
        } else if other.contains(self.vertices[1]) {
            self.vertices[1]
        } else {
            VertexId::invalid()
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.vertices[0] == other.vertices[0] && self.vertices[1] == other.vertices[1])
            || (self.vertices[0] == other.vertices[1] && self.vertices[1] == other.vertices[0])
    }
}

/// A polygon face: an ordered vertex loop and a parallel ordered edge loop.
///
/// Invariant: `vertices.len() == edges.len()`, and `edges[i]` resolves
/// (through the owning mesh) to the pair `{vertices[i], vertices[(i+1) % n]}`.
#[derive(Debug, Clone, Default, Eq)]
pub struct Face {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
}

impl Face {
    /// Create a face from explicit parallel loops
    pub fn new(vertices: Vec<VertexId>, edges: Vec<EdgeId>) -> Self {
        Self { vertices, edges }
    }
}

fn is_id_multiset_equal<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|id| a.iter().filter(|x| *x == id).count() == b.iter().filter(|x| *x == id).count())
}

/// Orientation-independent equality: the vertex and edge id multisets match.
/// Used by structural tests, not by mesh construction.
impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        is_id_multiset_equal(&self.vertices, &other.vertices)
            && is_id_multiset_equal(&self.edges, &other.edges)
    }
}

/// A polygon mesh with append-only element lists.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with pre-sized element lists
    pub fn with_capacity(n_vertices: usize, n_edges: usize, n_faces: usize) -> Self {
        Self {
            points: Vec::with_capacity(n_vertices),
            edges: Vec::with_capacity(n_edges),
            faces: Vec::with_capacity(n_faces),
        }
    }

    /// Number of vertices
    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.points.len()
    }

    /// Number of edges
    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Append a vertex and return its id
    pub fn add_vertex(&mut self, point: Point) -> VertexId {
        self.points.push(point);
        VertexId::from_usize(self.points.len() - 1)
    }

    /// Position of a vertex, `None` for an out-of-range id
    #[inline]
    pub fn point(&self, v: VertexId) -> Option<Point> {
        self.points.get(v.idx_usize()).copied()
    }

    /// First edge comparing equal (symmetric match) to `edge`, or `None`.
    ///
    /// Linear scan by design; must be consulted before inserting an edge so
    /// a mesh never holds two edges over the same vertex pair.
    pub fn find_edge(&self, edge: &Edge) -> Option<EdgeId> {
        self.edges
            .iter()
            .position(|e| e == edge)
            .map(EdgeId::from_usize)
    }

    /// Id of `edge` if present, otherwise append it and return the new id
    pub fn find_or_add_edge(&mut self, edge: Edge) -> EdgeId {
        match self.find_edge(&edge) {
            Some(id) => id,
            None => {
                self.edges.push(edge);
                EdgeId::from_usize(self.edges.len() - 1)
            }
        }
    }

    /// Append a face over an ordered vertex loop, deriving the parallel edge
    /// loop through [`Mesh::find_or_add_edge`]
    pub fn add_face(&mut self, vertices: &[VertexId]) -> FaceId {
        let n = vertices.len();
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            edges.push(self.find_or_add_edge(Edge::new(vertices[i], vertices[(i + 1) % n])));
        }
        self.faces.push(Face::new(vertices.to_vec(), edges));
        FaceId::from_usize(self.faces.len() - 1)
    }

    /// All vertex ids sharing an edge with `v`, in edge-list order;
    /// empty for an invalid id
    pub fn connected_vertices(&self, v: VertexId) -> Vec<VertexId> {
        if !v.is_valid() {
            return Vec::new();
        }

        let mut ret = Vec::new();
        for edge in &self.edges {
            if edge.vertices[0] == v {
                ret.push(edge.vertices[1]);
            } else if edge.vertices[1] == v {
                ret.push(edge.vertices[0]);
            }
        }
        ret
    }

    /// Indices of all edges incident to `v`, in edge-list order
    pub fn connected_edges(&self, v: VertexId) -> Vec<EdgeId> {
        if !v.is_valid() {
            return Vec::new();
        }

        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.contains(v))
            .map(|(i, _)| EdgeId::from_usize(i))
            .collect()
    }

    /// Indices of all faces whose vertex loop contains `v`
    pub fn connected_faces(&self, v: VertexId) -> Vec<FaceId> {
        if !v.is_valid() {
            return Vec::new();
        }

        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.vertices.contains(&v))
            .map(|(i, _)| FaceId::from_usize(i))
            .collect()
    }

    /// Indices of all faces whose edge loop contains `e`.
    ///
    /// Exactly 2 for an interior edge of a closed manifold, 1 for a
    /// boundary edge.
    pub fn connected_faces_to_edge(&self, e: EdgeId) -> Vec<FaceId> {
        if !e.is_valid() {
            return Vec::new();
        }

        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.edges.contains(&e))
            .map(|(i, _)| FaceId::from_usize(i))
            .collect()
    }

    /// Mean of all vertex positions; zero for an empty mesh
    pub fn barycenter(&self) -> Point {
        crate::geometry::centroid(&self.points)
    }

    /// Reorder a face's edge loop into a single continuous vertex walk.
    ///
    /// Starts from an arbitrary edge and repeatedly picks the next edge in
    /// the face's remaining set sharing the current endpoint (a chain-walk
    /// over the face's own edges only, not the whole mesh). Returns an empty
    /// `Vec` if the edges do not chain into exactly one closed loop.
    ///
    /// Winding convention: the cross product of the loop's first two edge
    /// vectors is dotted against the vector from the first vertex to
    /// `reference` (a face or mesh centroid); a positive dot means the loop
    /// faces the reference point and gets reversed so output loops wind
    /// consistently outward.
    pub fn face_vertex_loop(&self, face_id: FaceId, reference: Point) -> Vec<VertexId> {
        let Some(face) = self.faces.get(face_id.idx_usize()) else {
            return Vec::new();
        };
        if face.edges.len() < 3 {
            return Vec::new();
        }

        let mut remaining: Vec<Edge> = Vec::with_capacity(face.edges.len());
        for e in &face.edges {
            match self.edges.get(e.idx_usize()) {
                Some(edge) => remaining.push(*edge),
                None => return Vec::new(),
            }
        }

        let first = remaining.remove(0);
        let mut walk = vec![first.vertices[0], first.vertices[1]];
        let mut search = first.vertices[1];

        while !remaining.is_empty() {
            let Some(pos) = remaining.iter().position(|e| e.contains(search)) else {
                return Vec::new();
            };
            let mut current = remaining.remove(pos);
            if current.vertices[0] != search {
                current.swap();
            }
            walk.push(current.vertices[1]);
            search = current.vertices[1];
        }

        // A single closed cycle ends back at the starting vertex.
        if walk.last() != walk.first() {
            return Vec::new();
        }
        walk.pop();

        let (Some(p0), Some(p1), Some(p2)) =
            (self.point(walk[0]), self.point(walk[1]), self.point(walk[2]))
        else {
            return Vec::new();
        };

        let normal = (p1 - p0).cross(p2 - p1);
        if normal.dot(reference - p0) > 0.0 {
            walk.reverse();
        }

        walk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::generate_cube;

    fn v(idx: u32) -> VertexId {
        VertexId::new(idx)
    }

    #[test]
    fn test_edge_symmetric_equality() {
        assert_eq!(Edge::new(v(0), v(1)), Edge::new(v(1), v(0)));
        assert_ne!(Edge::new(v(0), v(1)), Edge::new(v(0), v(2)));
    }

    #[test]
    fn test_edge_shared_vertex() {
        let a = Edge::new(v(0), v(1));
        let b = Edge::new(v(1), v(2));
        let c = Edge::new(v(3), v(4));

        assert_eq!(a.shared_vertex(&b), v(1));
        assert!(!a.shared_vertex(&c).is_valid());
    }

    #[test]
    fn test_face_multiset_equality() {
        let a = Face::new(vec![v(0), v(1), v(2)], vec![EdgeId::new(0), EdgeId::new(1), EdgeId::new(2)]);
        let b = Face::new(vec![v(2), v(0), v(1)], vec![EdgeId::new(1), EdgeId::new(2), EdgeId::new(0)]);
        let c = Face::new(vec![v(0), v(1), v(3)], vec![EdgeId::new(0), EdgeId::new(1), EdgeId::new(2)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_add_face_builds_parallel_loops() {
        let mut mesh = Mesh::new();
        let v0 = mesh.add_vertex(glam::vec3(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(glam::vec3(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(glam::vec3(0.5, 1.0, 0.0));
        let v3 = mesh.add_vertex(glam::vec3(1.5, 1.0, 0.0));

        mesh.add_face(&[v0, v1, v2]);
        mesh.add_face(&[v1, v3, v2]);

        // Shared edge v1-v2 must be deduplicated.
        assert_eq!(mesh.n_edges(), 5);
        for face in &mesh.faces {
            assert_eq!(face.vertices.len(), face.edges.len());
        }
        for (i, face) in mesh.faces.iter().enumerate() {
            let n = face.vertices.len();
            for j in 0..n {
                let expect = Edge::new(face.vertices[j], face.vertices[(j + 1) % n]);
                let stored = mesh.edges[face.edges[j].idx_usize()];
                assert_eq!(stored, expect, "face {} slot {}", i, j);
            }
        }
    }

    #[test]
    fn test_find_edge_symmetric() {
        let mut mesh = Mesh::new();
        let v0 = mesh.add_vertex(glam::vec3(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(glam::vec3(1.0, 0.0, 0.0));
        let e = mesh.find_or_add_edge(Edge::new(v0, v1));

        assert_eq!(mesh.find_edge(&Edge::new(v1, v0)), Some(e));
        assert_eq!(mesh.find_or_add_edge(Edge::new(v1, v0)), e);
        assert_eq!(mesh.n_edges(), 1);
    }

    #[test]
    fn test_connected_queries_on_cube() {
        let cube = generate_cube();

        for i in 0..cube.n_vertices() {
            let vid = VertexId::from_usize(i);
            assert_eq!(cube.connected_vertices(vid).len(), 3);
            assert_eq!(cube.connected_edges(vid).len(), 3);
            assert_eq!(cube.connected_faces(vid).len(), 3);
        }

        for i in 0..cube.n_edges() {
            assert_eq!(cube.connected_faces_to_edge(EdgeId::from_usize(i)).len(), 2);
        }
    }

    #[test]
    fn test_connected_queries_invalid_id() {
        let cube = generate_cube();
        assert!(cube.connected_vertices(VertexId::invalid()).is_empty());
        assert!(cube.connected_edges(VertexId::invalid()).is_empty());
        assert!(cube.connected_faces(VertexId::invalid()).is_empty());
        assert!(cube.connected_faces_to_edge(EdgeId::invalid()).is_empty());
    }

    #[test]
    fn test_face_vertex_loop_closed_cube() {
        let cube = generate_cube();
        let bary = cube.barycenter();

        for i in 0..cube.n_faces() {
            let walk = cube.face_vertex_loop(FaceId::from_usize(i), bary);
            assert_eq!(walk.len(), 4, "face {} did not chain", i);
        }
    }

    #[test]
    fn test_face_vertex_loop_broken_face() {
        let mut mesh = Mesh::new();
        let v0 = mesh.add_vertex(glam::vec3(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(glam::vec3(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(glam::vec3(0.5, 1.0, 0.0));
        let v3 = mesh.add_vertex(glam::vec3(2.0, 2.0, 0.0));

        // Three edges that do not chain into a cycle.
        let e0 = mesh.find_or_add_edge(Edge::new(v0, v1));
        let e1 = mesh.find_or_add_edge(Edge::new(v1, v2));
        let e2 = mesh.find_or_add_edge(Edge::new(v3, v0));
        mesh.faces.push(Face::new(vec![v0, v1, v2], vec![e0, e1, e2]));

        assert!(mesh
            .face_vertex_loop(FaceId::new(0), glam::Vec3::ZERO)
            .is_empty());
    }

    #[test]
    fn test_face_vertex_loop_out_of_range() {
        let cube = generate_cube();
        assert!(cube
            .face_vertex_loop(FaceId::new(99), glam::Vec3::ZERO)
            .is_empty());
    }
}
