use polymesh::{generate_cube, subdivide, triangle_buffers, wireframe_buffers, Scheme};

fn main() {
    env_logger::init();

    let cube = generate_cube();
    let refined = match subdivide(&cube, Scheme::CatmullClark) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("subdivision failed: {}", e);
            return;
        }
    };

    let tris = triangle_buffers(&refined);
    println!(
        "triangles: {} positions, {} indices ({} tris)",
        tris.positions.len() / 3,
        tris.indices.len(),
        tris.indices.len() / 3
    );

    let lines = wireframe_buffers(&refined);
    println!(
        "wireframe: {} positions, {} indices ({} segments)",
        lines.positions.len() / 3,
        lines.indices.len(),
        lines.indices.len() / 2
    );
}
