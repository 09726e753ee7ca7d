//! # Subdivision Driver
//!
//! Scheme selection, optional input validation and pass statistics on top
//! of the per-scheme passes in [`crate::catmull`], [`crate::loops`] and
//! [`crate::kobbelt`].
//!
//! The per-scheme passes themselves are total functions and never fail;
//! validation here catches the inputs the schemes are numerically undefined
//! on (isolated vertices) or that break the face invariant, before a pass
//! silently produces NaN positions or skewed topology.

use crate::catmull::catmull_clark;
use crate::handles::{FaceId, VertexId};
use crate::kobbelt::kobbelt_subdivide;
use crate::loops::loop_subdivide;
use crate::mesh::Mesh;
use log::debug;

/// Errors for subdivision operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubdivisionError {
    /// Mesh has no faces
    EmptyMesh,
    /// Vertex with no incident edge (valence masks divide by the valence)
    IsolatedVertex(VertexId),
    /// Face whose parallel vertex/edge loops disagree or reference
    /// out-of-range elements
    MalformedFace(FaceId),
}

impl std::fmt::Display for SubdivisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMesh => write!(f, "Mesh is empty or has no faces"),
            Self::IsolatedVertex(v) => write!(f, "Vertex {} has no incident edges", v),
            Self::MalformedFace(id) => write!(f, "Face {} has inconsistent vertex/edge loops", id),
        }
    }
}

impl std::error::Error for SubdivisionError {}

/// Result type for subdivision operations
pub type SubdivisionResult<T> = Result<T, SubdivisionError>;

/// The available subdivision schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Quad-oriented Catmull-Clark (any polygon input)
    CatmullClark,
    /// Triangle-oriented Loop (generalized to polygons)
    Loop,
    /// Dual-like Kobbelt connectivity scheme
    Kobbelt,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CatmullClark => write!(f, "catmull-clark"),
            Self::Loop => write!(f, "loop"),
            Self::Kobbelt => write!(f, "kobbelt"),
        }
    }
}

/// Element counts before and after a pass
#[derive(Debug, Clone, Copy)]
pub struct SubdivisionStats {
    pub input_vertices: usize,
    pub input_edges: usize,
    pub input_faces: usize,
    pub output_vertices: usize,
    pub output_edges: usize,
    pub output_faces: usize,
}

impl SubdivisionStats {
    /// Collect counts from an input/output mesh pair
    pub fn from_meshes(input: &Mesh, output: &Mesh) -> Self {
        Self {
            input_vertices: input.n_vertices(),
            input_edges: input.n_edges(),
            input_faces: input.n_faces(),
            output_vertices: output.n_vertices(),
            output_edges: output.n_edges(),
            output_faces: output.n_faces(),
        }
    }
}

impl std::fmt::Display for SubdivisionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subdivision: {}V {}E {}F -> {}V {}E {}F",
            self.input_vertices,
            self.input_edges,
            self.input_faces,
            self.output_vertices,
            self.output_edges,
            self.output_faces
        )
    }
}

/// Check a mesh against the preconditions of the subdivision passes.
///
/// Rejects empty meshes, isolated vertices and faces whose parallel loops
/// disagree in length, reference out-of-range elements, or list an edge
/// that does not connect the matching consecutive vertex pair.
/// Manifoldness is *not* checked; non-manifold input gives undefined
/// adjacency, not an error.
pub fn validate_for_subdivision(mesh: &Mesh) -> SubdivisionResult<()> {
    if mesh.n_faces() == 0 {
        return Err(SubdivisionError::EmptyMesh);
    }

    for (i, face) in mesh.faces.iter().enumerate() {
        let face_id = FaceId::from_usize(i);
        let n = face.vertices.len();
        if n != face.edges.len() || n == 0 {
            return Err(SubdivisionError::MalformedFace(face_id));
        }
        for j in 0..n {
            let (v0, v1) = (face.vertices[j], face.vertices[(j + 1) % n]);
            if v0.idx_usize() >= mesh.n_vertices() || v1.idx_usize() >= mesh.n_vertices() {
                return Err(SubdivisionError::MalformedFace(face_id));
            }
            let Some(edge) = mesh.edges.get(face.edges[j].idx_usize()) else {
                return Err(SubdivisionError::MalformedFace(face_id));
            };
            if *edge != crate::mesh::Edge::new(v0, v1) {
                return Err(SubdivisionError::MalformedFace(face_id));
            }
        }
    }

    for i in 0..mesh.n_vertices() {
        let v = VertexId::from_usize(i);
        if mesh.connected_edges(v).is_empty() {
            return Err(SubdivisionError::IsolatedVertex(v));
        }
    }

    Ok(())
}

/// Validate `mesh`, then run one pass of `scheme` over it
pub fn subdivide(mesh: &Mesh, scheme: Scheme) -> SubdivisionResult<Mesh> {
    validate_for_subdivision(mesh)?;

    let out = match scheme {
        Scheme::CatmullClark => catmull_clark(mesh),
        Scheme::Loop => loop_subdivide(mesh),
        Scheme::Kobbelt => kobbelt_subdivide(mesh),
    };

    debug!("{} pass: {}", scheme, SubdivisionStats::from_meshes(mesh, &out));
    Ok(out)
}

/// Run `iterations` passes of `scheme`, feeding each output back in.
///
/// Each pass is validated; zero iterations returns a clone of the input
/// (still validated).
pub fn subdivide_times(mesh: &Mesh, scheme: Scheme, iterations: usize) -> SubdivisionResult<Mesh> {
    validate_for_subdivision(mesh)?;

    let mut current = mesh.clone();
    for _ in 0..iterations {
        current = subdivide(&current, scheme)?;
    }
    Ok(current)
}
