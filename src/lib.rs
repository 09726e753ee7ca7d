//! # PolyMesh - Polygon Mesh Subdivision
//!
//! Three classical subdivision schemes over a shared polygon-mesh model:
//! Catmull-Clark (quad-oriented), Loop (triangle-oriented) and a
//! Kobbelt-style dual/connectivity scheme.
//!
//! Every scheme runs in two phases over an immutable input mesh: a data
//! pass precomputing the new point per old face/edge/vertex, then an
//! assembly pass that rebuilds topology append-only, deduplicating shared
//! vertices and edges through lazy "used" tables and linear edge scans.
//!
//! ## Quick Start
//!
//! ```rust
//! use polymesh::{generate_cube, subdivide, triangle_buffers, Scheme};
//!
//! let cube = generate_cube();
//! let refined = subdivide(&cube, Scheme::CatmullClark).unwrap();
//! assert_eq!(refined.n_faces(), 24);
//!
//! let buffers = triangle_buffers(&refined);
//! assert_eq!(buffers.positions.len(), refined.n_vertices() * 3);
//! ```

// Re-export types
pub use catmull::{catmull_clark, CatmullData};
pub use geometry::{centroid, edge_midpoint, kobbelt_alpha, loop_alpha, Point};
pub use handles::{EdgeId, FaceId, VertexId};
pub use kobbelt::{kobbelt_subdivide, KobbeltData};
pub use loops::{loop_subdivide, LoopData};
pub use mesh::{Edge, Face, Mesh};
pub use render::{triangle_buffers, wireframe_buffers, RenderBuffers};
pub use subdivision::{
    subdivide, subdivide_times, validate_for_subdivision, Scheme, SubdivisionError,
    SubdivisionResult, SubdivisionStats,
};
pub use test_data::*;

mod catmull;
mod geometry;
mod handles;
mod kobbelt;
mod loops;
mod mesh;
mod render;
mod subdivision;
mod test_data;
