use polymesh::{generate_cube, generate_triangulated_cube, subdivide_times, Scheme};

fn main() {
    env_logger::init();

    let iterations = 2;

    for (name, mesh, scheme) in [
        ("cube / catmull-clark", generate_cube(), Scheme::CatmullClark),
        ("cube / kobbelt", generate_cube(), Scheme::Kobbelt),
        (
            "triangulated cube / loop",
            generate_triangulated_cube(),
            Scheme::Loop,
        ),
    ] {
        println!("{}", name);
        println!(
            "  input:  V={}, E={}, F={}",
            mesh.n_vertices(),
            mesh.n_edges(),
            mesh.n_faces()
        );

        match subdivide_times(&mesh, scheme, iterations) {
            Ok(refined) => println!(
                "  after {} passes: V={}, E={}, F={}",
                iterations,
                refined.n_vertices(),
                refined.n_edges(),
                refined.n_faces()
            ),
            Err(e) => println!("  error: {}", e),
        }
    }
}
