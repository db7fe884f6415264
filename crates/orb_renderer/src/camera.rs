//! Camera ray generation.
//!
//! Maps each pixel of the output image to a ray from the eye through the
//! pixel's center on the near plane.

use crate::{Ray, RenderError, RenderResult};
use orb_core::Camera;
use orb_math::Vec3;

/// A scene camera with its image-plane basis precomputed.
#[derive(Debug, Clone)]
pub struct PinholeCamera {
    position: Vec3,
    up: Vec3,

    // Right vector of the image plane (up x -gaze), not renormalized
    u: Vec3,
    // Top-left corner of the image plane
    q: Vec3,

    plane_width: f32,
    plane_height: f32,

    image_width: u32,
    image_height: u32,
}

impl PinholeCamera {
    /// Derive the image plane from a scene camera.
    ///
    /// `gaze` and `up` are used as given, so they should already be unit
    /// length and orthogonal.
    pub fn new(camera: &Camera) -> Self {
        let plane = camera.near_plane;

        // Plane center, right vector and top-left anchor
        let m = camera.position + camera.gaze * camera.near_distance;
        let u = camera.up.cross(-camera.gaze);
        let q = m + u * plane.left + camera.up * plane.top;

        Self {
            position: camera.position,
            up: camera.up,
            u,
            q,
            plane_width: plane.width(),
            plane_height: plane.height(),
            image_width: camera.image_width,
            image_height: camera.image_height,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Generate the ray through the center of pixel (x, y).
    ///
    /// Pixel rows grow downwards while `up` points up, hence the
    /// subtraction along `up`.
    pub fn get_ray(&self, x: u32, y: u32) -> RenderResult<Ray> {
        if x >= self.image_width || y >= self.image_height {
            return Err(RenderError::PixelOutOfBounds {
                x,
                y,
                width: self.image_width,
                height: self.image_height,
            });
        }

        let s_u = (x as f32 + 0.5) * self.plane_width / self.image_width as f32;
        let s_v = (y as f32 + 0.5) * self.plane_height / self.image_height as f32;

        let s = self.q + self.u * s_u - self.up * s_v;
        let d = s - self.position;

        let direction = d
            .try_normalize()
            .ok_or(RenderError::DegenerateRay { x, y })?;

        Ok(Ray::new(self.position, direction))
    }
}
