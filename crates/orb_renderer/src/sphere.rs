//! Ray-sphere intersection.

use crate::Ray;
use orb_core::{Scene, SceneResult};
use orb_math::Vec3;

/// A sphere with its center resolved from the scene's vertex pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    pub center: Vec3,
    pub radius: f32,
}

impl SphereGeometry {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Resolve the sphere at `index` in `scene`.
    pub fn from_scene(scene: &Scene, index: usize) -> SceneResult<Self> {
        let center = scene.sphere_center(index)?;
        let radius = scene.sphere(index)?.radius;
        Ok(Self::new(center, radius))
    }

    /// Smaller root of the ray-sphere quadratic, or `None` if the ray
    /// misses.
    ///
    /// Solves `a*t² + b*t + c = 0` with
    /// `a = d·d`, `b = 2 d·(o - center)`, `c = |o - center|² - r²`.
    /// The returned root may be zero or negative (sphere behind or around
    /// the origin); range checks are left to the caller.
    pub fn smallest_root(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().dot(ray.direction());
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let delta = b * b - 4.0 * a * c;
        if delta < 0.0 {
            return None;
        }

        let sqrt_delta = delta.sqrt();
        let t1 = (-b + sqrt_delta) / (2.0 * a);
        let t2 = (-b - sqrt_delta) / (2.0 * a);

        Some(if t1 < t2 { t1 } else { t2 })
    }
}
