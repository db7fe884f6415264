//! Image encoders.
//!
//! Writes a rendered [`PixelBuffer`] as an ASCII PPM (P3) pixmap or as a
//! PNG through the `image` crate. The format is picked from the file
//! extension.

use image::{ImageFormat, RgbImage};
use orb_renderer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0:?} (expected .ppm or .png)")]
    UnsupportedFormat(String),

    #[error("Buffer holds {found} bytes, {width}x{height} RGB needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Save the buffer to `path`, choosing the encoder from its extension.
pub fn save_image(image: &PixelBuffer, path: &Path) -> OutputResult<()> {
    check_size(image)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(&mut writer, image, &name)?;
            writer.flush()?;
        }
        "png" => {
            let rgb = RgbImage::from_raw(image.width, image.height, image.samples.clone())
                .ok_or_else(|| size_mismatch(image))?;
            rgb.save_with_format(path, ImageFormat::Png)?;
        }
        _ => return Err(OutputError::UnsupportedFormat(extension)),
    }

    log::info!("Image saved as {}", path.display());
    Ok(())
}

/// Write the buffer as an ASCII P3 pixmap.
///
/// The header carries the file name as a comment, then one `r g b` line
/// per pixel follows, rows top to bottom.
pub fn write_ppm<W: Write>(writer: &mut W, image: &PixelBuffer, name: &str) -> OutputResult<()> {
    check_size(image)?;

    writeln!(writer, "P3")?;
    writeln!(writer, "# {}", name)?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.as_bytes().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}

fn check_size(image: &PixelBuffer) -> OutputResult<()> {
    if image.samples.len() != image.width as usize * image.height as usize * 3 {
        return Err(size_mismatch(image));
    }
    Ok(())
}

fn size_mismatch(image: &PixelBuffer) -> OutputError {
    OutputError::SizeMismatch {
        width: image.width,
        height: image.height,
        expected: image.width as usize * image.height as usize * 3,
        found: image.samples.len(),
    }
}
