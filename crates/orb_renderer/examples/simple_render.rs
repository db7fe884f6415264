//! Simple ray casting example.
//!
//! Builds a small scene in code, renders it and saves it in PPM format.

use orb_core::{Camera, Material, NearPlane, Scene, Sphere};
use orb_renderer::{render, render_pixel, PinholeCamera, PixelBuffer, RenderConfig, Vec3};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("Orb Ray Caster - Simple Example");
    println!("===============================");

    let scene = build_scene();
    println!("Scene has {} spheres", scene.sphere_count());

    let config = RenderConfig::default().with_parallel(true);

    let start = std::time::Instant::now();
    let output = render(&scene, &config).expect("Failed to render scene");
    println!(
        "Rendered {}x{} in {:?} ({} of {} pixels hit)",
        output.image.width,
        output.image.height,
        start.elapsed(),
        output.stats.hits,
        output.stats.pixels
    );

    // Spot-check the center pixel without rendering the whole frame
    let camera = PinholeCamera::new(scene.primary_camera().expect("Scene has a camera"));
    let (cx, cy) = (camera.image_width() / 2, camera.image_height() / 2);
    let center = render_pixel(&camera, &scene, cx, cy).expect("Failed to render pixel");
    assert_eq!(center, output.image.get(cx, cy));
    println!("Center pixel ({}, {}) = {:?}", cx, cy, center);

    let filename = "output.ppm";
    save_ppm(&output.image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let mut scene = Scene::new(Vec3::new(0.0, 40.0, 80.0));
    let material = scene.add_material(Material::new(Vec3::new(200.0, 50.0, 50.0)));

    // A row of spheres receding from the camera
    for i in 0..5 {
        let center = Vec3::new(-3.0 + 1.5 * i as f32, 0.0, -2.0 * i as f32);
        let vertex = scene.add_vertex(center);
        scene.add_sphere(Sphere::new(vertex, 0.6, material));
    }

    scene.add_camera(Camera::new(
        Vec3::new(0.0, 0.0, 6.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::Y,
        NearPlane::new(-1.0, 1.0, -0.75, 0.75),
        1.5,
        640,
        480,
    ));

    scene
}

fn save_ppm(image: &PixelBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.as_bytes().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    writer.flush()
}
