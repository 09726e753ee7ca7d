//! # Test Data Generator
//!
//! Hand-authored meshes for tests, demos and benchmarks.

use crate::mesh::Mesh;

/// Unit cube centered at the origin: 8 vertices, 12 edges, 6 quad faces
pub fn generate_cube() -> Mesh {
    let mut mesh = Mesh::new();

    let v = [
        mesh.add_vertex(glam::vec3(-1.0, -1.0, -1.0)),
        mesh.add_vertex(glam::vec3( 1.0, -1.0, -1.0)),
        mesh.add_vertex(glam::vec3( 1.0,  1.0, -1.0)),
        mesh.add_vertex(glam::vec3(-1.0,  1.0, -1.0)),
        mesh.add_vertex(glam::vec3(-1.0, -1.0,  1.0)),
        mesh.add_vertex(glam::vec3( 1.0, -1.0,  1.0)),
        mesh.add_vertex(glam::vec3( 1.0,  1.0,  1.0)),
        mesh.add_vertex(glam::vec3(-1.0,  1.0,  1.0)),
    ];

    mesh.add_face(&[v[0], v[1], v[2], v[3]]); // back
    mesh.add_face(&[v[4], v[5], v[6], v[7]]); // front
    mesh.add_face(&[v[0], v[1], v[5], v[4]]); // bottom
    mesh.add_face(&[v[2], v[3], v[7], v[6]]); // top
    mesh.add_face(&[v[0], v[3], v[7], v[4]]); // left
    mesh.add_face(&[v[1], v[2], v[6], v[5]]); // right

    mesh
}

/// The same cube with every quad split in two: 8 vertices, 18 edges,
/// 12 triangular faces
pub fn generate_triangulated_cube() -> Mesh {
    let mut mesh = Mesh::new();

    let v = [
        mesh.add_vertex(glam::vec3(-1.0, -1.0, -1.0)),
        mesh.add_vertex(glam::vec3( 1.0, -1.0, -1.0)),
        mesh.add_vertex(glam::vec3( 1.0,  1.0, -1.0)),
        mesh.add_vertex(glam::vec3(-1.0,  1.0, -1.0)),
        mesh.add_vertex(glam::vec3(-1.0, -1.0,  1.0)),
        mesh.add_vertex(glam::vec3( 1.0, -1.0,  1.0)),
        mesh.add_vertex(glam::vec3( 1.0,  1.0,  1.0)),
        mesh.add_vertex(glam::vec3(-1.0,  1.0,  1.0)),
    ];

    let faces = [
        [0, 1, 2], [0, 2, 3], // back
        [4, 5, 6], [4, 6, 7], // front
        [0, 1, 5], [0, 5, 4], // bottom
        [2, 3, 7], [2, 7, 6], // top
        [0, 3, 7], [0, 7, 4], // left
        [1, 2, 6], [1, 6, 5], // right
    ];

    for face in &faces {
        mesh.add_face(&[v[face[0]], v[face[1]], v[face[2]]]);
    }

    mesh
}

/// Regular tetrahedron: 4 vertices, 6 edges, 4 triangular faces
pub fn generate_tetrahedron() -> Mesh {
    let mut mesh = Mesh::new();

    let a = mesh.add_vertex(glam::vec3( 1.0,  1.0,  1.0));
    let b = mesh.add_vertex(glam::vec3(-1.0, -1.0,  1.0));
    let c = mesh.add_vertex(glam::vec3(-1.0,  1.0, -1.0));
    let d = mesh.add_vertex(glam::vec3( 1.0, -1.0, -1.0));

    mesh.add_face(&[a, b, c]);
    mesh.add_face(&[a, c, d]);
    mesh.add_face(&[a, d, b]);
    mesh.add_face(&[b, d, c]);

    mesh
}

/// Square pyramid, mixed quad/triangle faces: 5 vertices, 8 edges, 5 faces
pub fn generate_pyramid() -> Mesh {
    let mut mesh = Mesh::new();

    let base0 = mesh.add_vertex(glam::vec3(-1.0, -1.0, 0.0));
    let base1 = mesh.add_vertex(glam::vec3( 1.0, -1.0, 0.0));
    let base2 = mesh.add_vertex(glam::vec3( 1.0,  1.0, 0.0));
    let base3 = mesh.add_vertex(glam::vec3(-1.0,  1.0, 0.0));
    let apex = mesh.add_vertex(glam::vec3( 0.0,  0.0, 2.0));

    mesh.add_face(&[base0, base1, base2, base3]);
    mesh.add_face(&[base0, base1, apex]);
    mesh.add_face(&[base1, base2, apex]);
    mesh.add_face(&[base2, base3, apex]);
    mesh.add_face(&[base3, base0, apex]);

    mesh
}

/// Unit icosahedron, every vertex valence 5: 12 vertices, 30 edges,
/// 20 triangular faces
pub fn generate_icosahedron() -> Mesh {
    let mut mesh = Mesh::new();

    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let v = [
        mesh.add_vertex(glam::vec3(-1.0,  t,  0.0).normalize()),
        mesh.add_vertex(glam::vec3( 1.0,  t,  0.0).normalize()),
        mesh.add_vertex(glam::vec3(-1.0, -t,  0.0).normalize()),
        mesh.add_vertex(glam::vec3( 1.0, -t,  0.0).normalize()),
        mesh.add_vertex(glam::vec3( 0.0, -1.0,  t).normalize()),
        mesh.add_vertex(glam::vec3( 0.0,  1.0,  t).normalize()),
        mesh.add_vertex(glam::vec3( 0.0, -1.0, -t).normalize()),
        mesh.add_vertex(glam::vec3( 0.0,  1.0, -t).normalize()),
        mesh.add_vertex(glam::vec3( t,  0.0, -1.0).normalize()),
        mesh.add_vertex(glam::vec3( t,  0.0,  1.0).normalize()),
        mesh.add_vertex(glam::vec3(-t,  0.0, -1.0).normalize()),
        mesh.add_vertex(glam::vec3(-t,  0.0,  1.0).normalize()),
    ];

    let faces = [
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    for face in &faces {
        mesh.add_face(&[v[face[0]], v[face[1]], v[face[2]]]);
    }

    mesh
}
