//! Uncompressed 24-bit BMP writer
//!
//! The header declares a bottom-up image, and rows are written in
//! framebuffer order (row 0 first). Row 0 therefore ends up at the bottom of
//! the picture and raster +y points up, matching the mesh's object space.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::OutputError;
use crate::rasterizer::Framebuffer;

/// File header (14 bytes) plus BITMAPINFOHEADER (40 bytes)
pub const BMP_HEADER_LEN: usize = 54;

/// Pixels per metre stored in both resolution fields
const PIXELS_PER_METRE: u32 = 8189;

/// Row length in bytes, padded to a multiple of 4
pub fn row_stride(size: usize) -> usize {
    (size * 3 + 3) & !3
}

/// Header for a `size` x `size` 24-bit image
pub fn bmp_header(size: usize) -> io::Result<[u8; BMP_HEADER_LEN]> {
    let too_large = || io::Error::new(io::ErrorKind::InvalidInput, format!("{}x{} is too large for BMP", size, size));

    let data_len = row_stride(size).checked_mul(size).ok_or_else(too_large)?;
    let file_len = u32::try_from(data_len + BMP_HEADER_LEN).map_err(|_| too_large())?;
    let dim = i32::try_from(size).map_err(|_| too_large())?;

    let mut h = [0u8; BMP_HEADER_LEN];
    h[0..2].copy_from_slice(b"BM");
    h[2..6].copy_from_slice(&file_len.to_le_bytes());
    // 6..10 reserved
    h[10..14].copy_from_slice(&(BMP_HEADER_LEN as u32).to_le_bytes());
    h[14..18].copy_from_slice(&40u32.to_le_bytes());
    h[18..22].copy_from_slice(&dim.to_le_bytes());
    // Positive height: bottom-up
    h[22..26].copy_from_slice(&dim.to_le_bytes());
    h[26..28].copy_from_slice(&1u16.to_le_bytes());
    h[28..30].copy_from_slice(&24u16.to_le_bytes());
    // 30..34 compression (none), 34..38 image size (0 is allowed uncompressed)
    h[38..42].copy_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    h[42..46].copy_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    // 46..54 palette counts
    Ok(h)
}

/// Write header and pixel rows
pub fn write_bmp<W: Write>(fb: &Framebuffer, mut out: W) -> io::Result<()> {
    let size = fb.size();
    out.write_all(&bmp_header(size)?)?;

    let padding = [0u8; 3];
    let pad = row_stride(size) - size * 3;
    for row in fb.rows() {
        out.write_all(row)?;
        out.write_all(&padding[..pad])?;
    }
    out.flush()
}

/// Write the framebuffer to a BMP file
pub fn save_bmp<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    write_bmp(fb, BufWriter::new(file)).map_err(io_err)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
