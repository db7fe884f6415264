//! orb Core - Scene model and scene file loading.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `Camera`, `Sphere`, `Material`
//! - **Scene files**: XML and JSON loading
//!
//! # Example
//!
//! ```ignore
//! use orb_core::load_scene;
//!
//! let scene = load_scene("scene.xml")?;
//! let camera = scene.primary_camera()?;
//! println!("{} spheres, {}x{}",
//!     scene.sphere_count(),
//!     camera.image_width,
//!     camera.image_height);
//! ```

pub mod format;
pub mod scene;

// Re-export commonly used types
pub use format::{load_scene, load_scene_from_json, load_scene_from_xml, LoadError, LoadResult};
pub use scene::{Camera, Material, NearPlane, Scene, SceneError, SceneResult, Sphere};
