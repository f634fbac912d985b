//! PNG input and output for rasters.
//!
//! Writes rasters to PNG files with optional integer scaling and decodes
//! source images into rasters.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{Result, StudioError};
use crate::types::Raster;

/// Largest width or height of a written PNG, after scaling.
pub const MAX_OUTPUT_SIDE: u32 = 16_384;

/// Write a raster to a PNG file.
///
/// # Arguments
///
/// * `raster` - The pixels to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
///
/// Fails with `InvalidInput` before touching `path` if the scaled image
/// would exceed `MAX_OUTPUT_SIDE` on either side.
pub fn write_png(raster: &Raster, path: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1);

    let width = scaled_side(raster.width(), scale)?;
    let height = scaled_side(raster.height(), scale)?;

    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for (i, colour) in raster.pixels().enumerate() {
        let x = (i % raster.width()) as u32;
        let y = (i / raster.width()) as u32;
        let rgba = Rgba(colour.to_rgba());

        for sy in 0..scale {
            for sx in 0..scale {
                img.put_pixel(x * scale + sx, y * scale + sy, rgba);
            }
        }
    }

    img.save(path).map_err(|e| StudioError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

fn scaled_side(side: usize, scale: u32) -> Result<u32> {
    u32::try_from(side)
        .ok()
        .and_then(|side| side.checked_mul(scale))
        .filter(|&scaled| scaled <= MAX_OUTPUT_SIDE)
        .ok_or_else(|| {
            StudioError::invalid_input(format!(
                "{} pixels at scale {} exceeds the {} pixel output limit",
                side, scale, MAX_OUTPUT_SIDE
            ))
        })
}

/// Decode any image format the `image` crate understands into a raster.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path)
        .map_err(|e| StudioError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", e),
        })?
        .to_rgba8();

    let (width, height) = img.dimensions();
    Raster::new(width as usize, height as usize, img.into_raw())
}
