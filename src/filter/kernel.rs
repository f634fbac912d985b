//! 3x3 convolution kernels.
//!
//! Only interior pixels are filtered; the one-pixel border is copied
//! through unchanged, as is alpha.

use rayon::prelude::*;

use crate::types::Raster;

/// A 3x3 convolution kernel with a normalising divisor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3 {
    pub weights: [[f32; 3]; 3],
    pub divisor: f32,
}

impl Kernel3 {
    /// Unweighted 3x3 mean (denoise).
    pub const BOX_BLUR: Self = Self {
        weights: [[1.0; 3]; 3],
        divisor: 9.0,
    };

    /// Edge enhancement.
    pub const SHARPEN: Self = Self {
        weights: [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]],
        divisor: 1.0,
    };

    /// Weighted sum of one channel over the neighbourhood centred on (x, y).
    /// Callers guarantee (x, y) is an interior pixel.
    fn apply(&self, data: &[u8], width: usize, x: usize, y: usize, channel: usize) -> f32 {
        let mut sum = 0.0;
        for (ky, row) in self.weights.iter().enumerate() {
            for (kx, &weight) in row.iter().enumerate() {
                let i = ((y + ky - 1) * width + (x + kx - 1)) * 4 + channel;
                sum += data[i] as f32 * weight;
            }
        }
        sum / self.divisor
    }
}

/// Convolve the RGB channels of a raster with `kernel`.
///
/// Results are rounded and clamped to `0..=255`.
pub fn convolve(raster: &Raster, kernel: &Kernel3) -> Raster {
    let (width, height) = raster.size();
    let mut out = raster.clone();
    if width < 3 || height < 3 {
        return out;
    }

    let src = raster.as_rgba();
    out.as_rgba_mut()
        .par_chunks_mut(width * 4)
        .enumerate()
        .filter(|(y, _)| *y > 0 && *y < height - 1)
        .for_each(|(y, row)| {
            for x in 1..width - 1 {
                for channel in 0..3 {
                    let value = kernel.apply(src, width, x, y, channel);
                    row[x * 4 + channel] = value.round().clamp(0.0, 255.0) as u8;
                }
            }
        });

    out
}

/// Denoise with a 3x3 box blur.
pub fn box_blur(raster: &Raster) -> Raster {
    convolve(raster, &Kernel3::BOX_BLUR)
}

/// Sharpen with the 4-neighbour sharpen kernel.
pub fn sharpen(raster: &Raster) -> Raster {
    convolve(raster, &Kernel3::SHARPEN)
}
