//! Image output
//!
//! `.bmp` paths are written by the raw serializer in [`bmp`]; any other
//! extension goes through the `image` crate.

mod bmp;

pub use bmp::*;

use std::path::{Path, PathBuf};
use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::rasterizer::Framebuffer;

/// Error type for writing images
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Convert to an RGB image, flipped so it looks the same as the BMP output
/// (raster row 0 at the bottom).
pub fn to_rgb_image(fb: &Framebuffer) -> RgbImage {
    let size = fb.size() as u32;
    RgbImage::from_fn(size, size, |x, y| {
        let c = fb.pixel(x as usize, (size - 1 - y) as usize);
        Rgb([c.r, c.g, c.b])
    })
}

/// Save in the format implied by the path's extension
pub fn save_image<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();
    let is_bmp = path
        .extension()
        .map(|ext| ext.to_ascii_lowercase() == "bmp")
        .unwrap_or(false);

    if is_bmp {
        return save_bmp(fb, path);
    }

    to_rgb_image(fb).save(path)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
