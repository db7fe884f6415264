//! Render errors.

use orb_core::SceneError;
use thiserror::Error;

/// Errors that stop a render.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Ray through pixel ({x}, {y}) has a zero-length direction")]
    DegenerateRay { x: u32, y: u32 },

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("A {width}x{height} image does not fit in memory")]
    ImageTooLarge { width: u32, height: u32 },
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
