//! Scene model for orb.
//!
//! A scene is a flat, index-addressed description: a vertex pool, spheres
//! that point into it, a material list, cameras and a background color.
//! It is built once (by a loader or by hand) and only read while rendering.

use orb_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a scene refers to data it does not contain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene has no camera")]
    EmptyCameraList,

    #[error("Sphere {sphere} references vertex {id}, but the vertex pool has {len} entries")]
    VertexOutOfRange { sphere: usize, id: usize, len: usize },

    #[error("Sphere {sphere} references material {id}, but the scene has {len} materials")]
    MaterialOutOfRange { sphere: usize, id: usize, len: usize },

    #[error("Sphere index {index} out of range ({len} spheres)")]
    SphereOutOfRange { index: usize, len: usize },
}

/// Result type for scene lookups.
pub type SceneResult<T> = Result<T, SceneError>;

/// Surface description. Only the diffuse reflectance is used.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse reflectance, 0-255 per channel
    pub diffuse: Vec3,
}

impl Material {
    pub fn new(diffuse: Vec3) -> Self {
        Self { diffuse }
    }
}

/// A sphere whose center lives in the scene's vertex pool.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Index into `Scene::vertex_data`
    pub center_vertex_id: usize,
    pub radius: f32,
    /// Index into `Scene::materials`
    pub material_id: usize,
}

impl Sphere {
    pub fn new(center_vertex_id: usize, radius: f32, material_id: usize) -> Self {
        Self {
            center_vertex_id,
            radius,
            material_id,
        }
    }
}

/// Extent of the image plane, in camera space units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearPlane {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl NearPlane {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Horizontal extent (right - left).
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent (top - bottom).
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Pinhole camera as declared by the scene.
///
/// `gaze` and `up` are expected to be unit length and orthogonal; nothing
/// renormalizes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub gaze: Vec3,
    pub up: Vec3,
    pub near_plane: NearPlane,
    /// Distance from the eye to the image plane
    pub near_distance: f32,
    pub image_width: u32,
    pub image_height: u32,
    /// Output file name declared by the scene (may be empty)
    #[serde(default)]
    pub image_name: String,
}

impl Camera {
    /// Create a camera with an unnamed output image.
    pub fn new(
        position: Vec3,
        gaze: Vec3,
        up: Vec3,
        near_plane: NearPlane,
        near_distance: f32,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        Self {
            position,
            gaze,
            up,
            near_plane,
            near_distance,
            image_width,
            image_height,
            image_name: String::new(),
        }
    }

    /// Set the output image name.
    pub fn with_image_name(mut self, name: impl Into<String>) -> Self {
        self.image_name = name.into();
        self
    }
}

/// A complete scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Color of pixels whose ray hits nothing, 0-255 per channel
    #[serde(default)]
    pub background_color: Vec3,

    /// Shared vertex pool, addressed by `Sphere::center_vertex_id`
    #[serde(default)]
    pub vertex_data: Vec<Vec3>,

    #[serde(default)]
    pub spheres: Vec<Sphere>,

    #[serde(default)]
    pub materials: Vec<Material>,

    /// All declared cameras. Only the first one is rendered.
    #[serde(default)]
    pub cameras: Vec<Camera>,
}

impl Scene {
    /// Create an empty scene with the given background color.
    pub fn new(background_color: Vec3) -> Self {
        Self {
            background_color,
            ..Default::default()
        }
    }

    /// Add a vertex to the pool and return its index.
    pub fn add_vertex(&mut self, position: Vec3) -> usize {
        self.vertex_data.push(position);
        self.vertex_data.len() - 1
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add a sphere and return its index.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    /// Add a camera and return its index.
    pub fn add_camera(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    /// The camera that gets rendered.
    ///
    /// Scenes may declare several cameras; only the first is ever used.
    pub fn primary_camera(&self) -> SceneResult<&Camera> {
        self.cameras.first().ok_or(SceneError::EmptyCameraList)
    }

    /// Mutable access to the primary camera (e.g. to override resolution).
    pub fn primary_camera_mut(&mut self) -> SceneResult<&mut Camera> {
        self.cameras.first_mut().ok_or(SceneError::EmptyCameraList)
    }

    /// Get a sphere by index.
    pub fn sphere(&self, index: usize) -> SceneResult<&Sphere> {
        self.spheres.get(index).ok_or(SceneError::SphereOutOfRange {
            index,
            len: self.spheres.len(),
        })
    }

    /// World-space center of the sphere at `index`.
    pub fn sphere_center(&self, index: usize) -> SceneResult<Vec3> {
        let sphere = self.sphere(index)?;
        self.vertex_data
            .get(sphere.center_vertex_id)
            .copied()
            .ok_or(SceneError::VertexOutOfRange {
                sphere: index,
                id: sphere.center_vertex_id,
                len: self.vertex_data.len(),
            })
    }

    /// Material of the sphere at `index`.
    pub fn sphere_material(&self, index: usize) -> SceneResult<&Material> {
        let sphere = self.sphere(index)?;
        self.materials
            .get(sphere.material_id)
            .ok_or(SceneError::MaterialOutOfRange {
                sphere: index,
                id: sphere.material_id,
                len: self.materials.len(),
            })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_data.len()
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }
}
