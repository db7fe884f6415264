//! Orb renderer - sphere ray caster
//!
//! Casts one ray per pixel from a pinhole camera and paints every pixel
//! that hits a sphere flat white. Pixels that miss show the scene's
//! background color.

mod camera;
mod error;
mod hittable;
mod renderer;
mod sphere;

pub use camera::PinholeCamera;
pub use error::{RenderError, RenderResult};
pub use hittable::{nearest_hit, resolve_color, shade, Hit, HIT_COLOR, MAX_DISTANCE};
pub use renderer::{
    color_to_rgb, render, render_pixel, render_with_camera, PixelBuffer, RenderConfig,
    RenderOutput, RenderStats,
};
pub use sphere::SphereGeometry;

/// Re-export the math types used in the public API
pub use orb_math::{Interval, Ray, Vec3};
