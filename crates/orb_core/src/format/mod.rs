//! Scene file support for orb.
//!
//! Two formats are understood:
//!
//! - **XML**: the element-based scene description (cameras, materials,
//!   vertex pool, objects). Lights, meshes and triangles are accepted and
//!   skipped.
//! - **JSON**: a direct serde mapping of [`Scene`](crate::Scene).
//!
//! # Example
//!
//! ```ignore
//! use orb_core::format::load_scene;
//!
//! let scene = load_scene("scenes/simple.xml")?;
//! println!("Loaded {} spheres", scene.sphere_count());
//! ```

mod loader;
mod xml;

pub use loader::*;
pub use xml::{parse_xml, ParseError, ParseResult, XmlElement, XmlParser};
