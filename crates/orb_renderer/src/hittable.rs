//! Nearest-hit selection and pixel color resolution.

use crate::{Ray, RenderResult, SphereGeometry};
use orb_core::Scene;
use orb_math::{Interval, Vec3};

/// Hits at or beyond this distance are ignored.
pub const MAX_DISTANCE: f32 = 99_999.0;

/// Color painted for any pixel whose ray hits a sphere.
pub const HIT_COLOR: Vec3 = Vec3::splat(255.0);

/// Record of the nearest ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray
    pub t: f32,
    /// Index of the sphere in `Scene::spheres`
    pub sphere_index: usize,
    /// Diffuse color of the sphere's material
    pub diffuse: Vec3,
}

/// Find the nearest sphere in front of the ray origin.
///
/// Spheres are tested in list order and a candidate replaces the current
/// best only when strictly closer, so on an exact tie the earlier sphere
/// is kept.
pub fn nearest_hit(ray: &Ray, scene: &Scene) -> RenderResult<Option<Hit>> {
    let mut ray_t = Interval::new(0.0, MAX_DISTANCE);
    let mut nearest = None;

    for sphere_index in 0..scene.spheres.len() {
        let sphere = SphereGeometry::from_scene(scene, sphere_index)?;
        let Some(t) = sphere.smallest_root(ray) else {
            continue;
        };

        if ray_t.surrounds(t) {
            ray_t = ray_t.with_max(t);
            nearest = Some(Hit {
                t,
                sphere_index,
                diffuse: scene.sphere_material(sphere_index)?.diffuse,
            });
        }
    }

    Ok(nearest)
}

/// Color for a (possibly missing) hit.
///
/// Any hit paints flat white whatever its material; a miss shows the
/// background.
pub fn shade(hit: Option<&Hit>, scene: &Scene) -> Vec3 {
    match hit {
        Some(_) => HIT_COLOR,
        None => scene.background_color,
    }
}

/// Compute the color seen by a ray.
pub fn resolve_color(ray: &Ray, scene: &Scene) -> RenderResult<Vec3> {
    let hit = nearest_hit(ray, scene)?;
    Ok(shade(hit.as_ref(), scene))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderError;
    use orb_core::{Material, SceneError, Sphere};

    const BACKGROUND: Vec3 = Vec3::new(12.0, 34.0, 56.0);

    fn scene_with(spheres: &[(Vec3, f32, Vec3)]) -> Scene {
        let mut scene = Scene::new(BACKGROUND);
        for &(center, radius, diffuse) in spheres {
            let v = scene.add_vertex(center);
            let m = scene.add_material(Material::new(diffuse));
            scene.add_sphere(Sphere::new(v, radius, m));
        }
        scene
    }

    fn down_z() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_miss_is_background() {
        let scene = scene_with(&[(Vec3::new(10.0, 0.0, 0.0), 1.0, Vec3::X)]);

        assert_eq!(nearest_hit(&down_z(), &scene), Ok(None));
        assert_eq!(resolve_color(&down_z(), &scene), Ok(BACKGROUND));
    }

    #[test]
    fn test_empty_scene_is_background() {
        let scene = Scene::new(BACKGROUND);
        assert_eq!(resolve_color(&down_z(), &scene), Ok(BACKGROUND));
    }

    #[test]
    fn test_flat_white_hit() {
        let red = Vec3::new(255.0, 0.0, 0.0);
        let scene = scene_with(&[(Vec3::ZERO, 1.0, red)]);

        let hit = nearest_hit(&down_z(), &scene).unwrap().unwrap();
        assert_eq!(hit, Hit { t: 4.0, sphere_index: 0, diffuse: red });

        // The material color is discarded
        assert_eq!(resolve_color(&down_z(), &scene), Ok(HIT_COLOR));
    }

    #[test]
    fn test_nearest_sphere_wins() {
        let near = Vec3::new(1.0, 0.0, 0.0);
        let far = Vec3::new(0.0, 1.0, 0.0);
        let scene = scene_with(&[
            (Vec3::new(0.0, 0.0, -10.0), 1.0, far),
            (Vec3::ZERO, 1.0, near),
        ]);

        let hit = nearest_hit(&down_z(), &scene).unwrap().unwrap();
        assert_eq!(hit.sphere_index, 1);
        assert_eq!(hit.diffuse, near);
        assert_eq!(hit.t, 4.0);
    }

    #[test]
    fn test_tie_keeps_first_listed_sphere() {
        let first = Vec3::new(1.0, 2.0, 3.0);
        let second = Vec3::new(4.0, 5.0, 6.0);
        let scene = scene_with(&[(Vec3::ZERO, 1.0, first), (Vec3::ZERO, 1.0, second)]);

        let hit = nearest_hit(&down_z(), &scene).unwrap().unwrap();
        assert_eq!(hit.sphere_index, 0);
        assert_eq!(hit.diffuse, first);
    }

    #[test]
    fn test_tangent_hit_counts() {
        let scene = scene_with(&[(Vec3::new(1.0, 0.0, 0.0), 1.0, Vec3::ONE)]);

        let hit = nearest_hit(&down_z(), &scene).unwrap().unwrap();
        assert_eq!(hit.t, 5.0);
        assert_eq!(resolve_color(&down_z(), &scene), Ok(HIT_COLOR));
    }

    #[test]
    fn test_behind_and_enclosing_spheres_are_rejected() {
        let scene = scene_with(&[
            // Behind the origin
            (Vec3::new(0.0, 0.0, 10.0), 1.0, Vec3::ONE),
            // Origin inside: only the negative root is considered
            (Vec3::new(0.0, 0.0, 5.0), 2.0, Vec3::ONE),
        ]);

        assert_eq!(resolve_color(&down_z(), &scene), Ok(BACKGROUND));
    }

    #[test]
    fn test_hits_beyond_max_distance_are_ignored() {
        let scene = scene_with(&[(Vec3::new(0.0, 0.0, -200_000.0), 1.0, Vec3::ONE)]);
        assert_eq!(nearest_hit(&down_z(), &scene), Ok(None));
    }

    #[test]
    fn test_missing_vertex_is_an_error() {
        let mut scene = Scene::new(BACKGROUND);
        scene.add_material(Material::new(Vec3::ONE));
        scene.add_sphere(Sphere::new(7, 1.0, 0));

        assert_eq!(
            resolve_color(&down_z(), &scene),
            Err(RenderError::Scene(SceneError::VertexOutOfRange {
                sphere: 0,
                id: 7,
                len: 0
            }))
        );
    }

    #[test]
    fn test_missing_material_is_an_error_on_hit() {
        let mut scene = Scene::new(BACKGROUND);
        let v = scene.add_vertex(Vec3::ZERO);
        scene.add_sphere(Sphere::new(v, 1.0, 3));

        assert_eq!(
            nearest_hit(&down_z(), &scene),
            Err(RenderError::Scene(SceneError::MaterialOutOfRange {
                sphere: 0,
                id: 3,
                len: 0
            }))
        );
    }
}
