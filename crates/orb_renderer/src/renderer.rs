//! Render loop.
//!
//! Casts one ray per pixel, row by row from the top, and writes the
//! resolved color as three bytes into a flat RGB buffer.

use crate::hittable::{nearest_hit, shade};
use crate::{PinholeCamera, RenderError, RenderResult};
use orb_core::Scene;
use orb_math::Vec3;
use rayon::prelude::*;

/// Render configuration.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Render rows on the rayon thread pool instead of one after another.
    /// The output is identical either way, and so is the error: rows are
    /// checked in order, so the first failing pixel is the one a
    /// sequential render would stop at.
    pub parallel: bool,
}

impl RenderConfig {
    /// Enable or disable row-parallel rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Counters gathered while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Pixels rendered
    pub pixels: u64,
    /// Pixels whose ray hit a sphere
    pub hits: u64,
}

impl RenderStats {
    /// Pixels that show the background.
    pub fn misses(&self) -> u64 {
        self.pixels - self.hits
    }
}

/// 8-bit RGB image, row-major from the top-left pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// Three bytes (R, G, B) per pixel
    pub samples: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black.
    ///
    /// Fails with `ImageTooLarge` when the byte count overflows or the
    /// allocation is refused.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let too_large = || RenderError::ImageTooLarge { width, height };

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(too_large)?;

        let mut samples = Vec::new();
        samples.try_reserve_exact(len).map_err(|_| too_large())?;
        samples.resize(len, 0);

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.samples[i], self.samples[i + 1], self.samples[i + 2]]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.samples[i..i + 3].copy_from_slice(&rgb);
    }

    /// Raw RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.samples
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    fn row_len(&self) -> usize {
        self.width as usize * 3
    }
}

/// A rendered image and the stats collected while producing it.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: PixelBuffer,
    pub stats: RenderStats,
}

/// Convert a 0-255 color to bytes.
///
/// Fractions are truncated; out-of-range channels saturate at 0 or 255.
#[inline]
pub fn color_to_rgb(color: Vec3) -> [u8; 3] {
    [color.x as u8, color.y as u8, color.z as u8]
}

/// Render the scene through its primary camera.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<RenderOutput> {
    let camera = PinholeCamera::new(scene.primary_camera()?);
    render_with_camera(&camera, scene, config)
}

/// Render the scene through the given camera.
pub fn render_with_camera(
    camera: &PinholeCamera,
    scene: &Scene,
    config: &RenderConfig,
) -> RenderResult<RenderOutput> {
    let (width, height) = (camera.image_width(), camera.image_height());
    let mut image = PixelBuffer::new(width, height)?;
    let pixels = width as u64 * height as u64;

    log::debug!(
        "Rendering {}x{} against {} spheres ({})",
        width,
        height,
        scene.sphere_count(),
        if config.parallel { "parallel" } else { "sequential" }
    );

    if pixels == 0 {
        return Ok(RenderOutput {
            image,
            stats: RenderStats::default(),
        });
    }

    let row_len = image.row_len();
    let hits = if config.parallel {
        let rows: Vec<RenderResult<u64>> = image
            .samples
            .par_chunks_mut(row_len)
            .enumerate()
            .map(|(y, row)| render_row(camera, scene, y as u32, row))
            .collect();
        rows.into_iter().sum::<RenderResult<u64>>()?
    } else {
        let mut hits = 0;
        for (y, row) in image.samples.chunks_mut(row_len).enumerate() {
            hits += render_row(camera, scene, y as u32, row)?;
        }
        hits
    };

    Ok(RenderOutput {
        image,
        stats: RenderStats { pixels, hits },
    })
}

/// Render row `y` into `row` and return how many of its pixels hit.
fn render_row(camera: &PinholeCamera, scene: &Scene, y: u32, row: &mut [u8]) -> RenderResult<u64> {
    let mut hits = 0;

    for (x, rgb) in row.chunks_exact_mut(3).enumerate() {
        let x = x as u32;
        let ray = camera.get_ray(x, y)?;
        let hit = nearest_hit(&ray, scene)?;

        if let Some(hit) = &hit {
            hits += 1;
            log::trace!(
                "Pixel ({}, {}) hit sphere {} at {} (t={})",
                x,
                y,
                hit.sphere_index,
                ray.at(hit.t),
                hit.t
            );
        }

        rgb.copy_from_slice(&color_to_rgb(shade(hit.as_ref(), scene)));
    }

    Ok(hits)
}

/// Render a single pixel.
pub fn render_pixel(camera: &PinholeCamera, scene: &Scene, x: u32, y: u32) -> RenderResult<[u8; 3]> {
    let ray = camera.get_ray(x, y)?;
    let color = crate::resolve_color(&ray, scene)?;
    Ok(color_to_rgb(color))
}
