//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/two_spheres.xml

use std::env;

use orb_core::load_scene;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-file>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/two_spheres.xml");
        println!("  cargo run --example inspect_scene -- scenes/two_spheres.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            let bg = scene.background_color;
            println!("\n=== Scene ===");
            println!("Background: ({:.0}, {:.0}, {:.0})", bg.x, bg.y, bg.z);
            println!("Vertices: {}", scene.vertex_count());
            println!("Materials: {}", scene.material_count());

            println!("\n--- Cameras ---");
            for (i, camera) in scene.cameras.iter().enumerate() {
                let marker = if i == 0 { " (rendered)" } else { "" };
                println!(
                    "  [{}] {}x{} at ({:.2}, {:.2}, {:.2}) -> {:?}{}",
                    i,
                    camera.image_width,
                    camera.image_height,
                    camera.position.x,
                    camera.position.y,
                    camera.position.z,
                    camera.image_name,
                    marker
                );
            }

            println!("\n--- Spheres ---");
            for (i, sphere) in scene.spheres.iter().enumerate() {
                match scene.sphere_center(i) {
                    Ok(c) => println!(
                        "  [{}] r={:.2} at ({:.2}, {:.2}, {:.2}), material {}",
                        i, sphere.radius, c.x, c.y, c.z, sphere.material_id
                    ),
                    Err(e) => println!("  [{}] invalid: {}", i, e),
                }
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
