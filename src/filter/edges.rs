//! Sobel edge detection with optional dilation.

use rayon::prelude::*;

use crate::types::{Colour, Raster};

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Perceptual luminance weighting used for edge detection.
pub fn luminance(colour: Colour) -> f32 {
    0.3 * colour.r as f32 + 0.59 * colour.g as f32 + 0.11 * colour.b as f32
}

/// Sobel gradient magnitude per pixel, row-major. Border pixels are 0.
pub fn sobel_magnitude(raster: &Raster) -> Vec<f32> {
    let (width, height) = raster.size();
    let luma: Vec<f32> = raster.pixels().map(luminance).collect();
    let mut magnitude = vec![0.0f32; width * height];

    if width < 3 || height < 3 {
        return magnitude;
    }

    magnitude
        .par_chunks_mut(width)
        .enumerate()
        .filter(|(y, _)| *y > 0 && *y < height - 1)
        .for_each(|(y, row)| {
            for x in 1..width - 1 {
                let mut gx = 0.0;
                let mut gy = 0.0;
                for ky in 0..3 {
                    for kx in 0..3 {
                        let l = luma[(y + ky - 1) * width + (x + kx - 1)];
                        gx += l * SOBEL_X[ky][kx];
                        gy += l * SOBEL_Y[ky][kx];
                    }
                }
                row[x] = (gx * gx + gy * gy).sqrt();
            }
        });

    magnitude
}

/// A boolean edge classification per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMap {
    width: usize,
    height: usize,
    edges: Vec<bool>,
}

impl EdgeMap {
    /// Classify pixels whose Sobel magnitude exceeds `threshold`, then
    /// thicken by `dilate_radius / 2` (Chebyshev distance).
    ///
    /// Border pixels are never detected as edges themselves, though
    /// dilation may spread an interior edge onto them.
    pub fn detect(raster: &Raster, threshold: f32, dilate_radius: usize) -> Self {
        let (width, height) = raster.size();
        let magnitude = sobel_magnitude(raster);

        let edges: Vec<bool> = magnitude
            .iter()
            .enumerate()
            .map(|(i, &m)| {
                let (x, y) = (i % width, i / width);
                let interior = x > 0 && y > 0 && x + 1 < width && y + 1 < height;
                interior && m > threshold
            })
            .collect();

        let map = Self {
            width,
            height,
            edges,
        };
        let map = map.dilate(dilate_radius / 2);

        tracing::trace!(threshold, dilate_radius, edges = map.count(), "detected edges");
        map
    }

    /// Mark every pixel within Chebyshev `reach` of an edge.
    fn dilate(self, reach: usize) -> Self {
        if reach == 0 {
            return self;
        }

        let (width, height) = (self.width, self.height);
        let mut dilated = vec![false; self.edges.len()];
        for y in 0..height {
            for x in 0..width {
                let y0 = y.saturating_sub(reach);
                let y1 = (y + reach).min(height - 1);
                let x0 = x.saturating_sub(reach);
                let x1 = (x + reach).min(width - 1);
                dilated[y * width + x] =
                    (y0..=y1).any(|ny| (x0..=x1).any(|nx| self.edges[ny * width + nx]));
            }
        }

        Self {
            edges: dilated,
            ..self
        }
    }

    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.edges[y * self.width + x]
    }

    /// Row-major edge flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.edges
    }

    /// Number of edge pixels.
    pub fn count(&self) -> usize {
        self.edges.iter().filter(|&&e| e).count()
    }

    /// Paint every edge pixel black. The raster must match the map's size.
    pub fn overlay(&self, raster: &mut Raster) {
        debug_assert_eq!(raster.size(), (self.width, self.height));
        for (i, &edge) in self.edges.iter().enumerate() {
            if edge {
                raster.set(i % self.width, i / self.width, Colour::BLACK);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left half black, right half white.
    fn split(width: usize, height: usize) -> Raster {
        let colours: Vec<Colour> = (0..width * height)
            .map(|i| {
                if i % width < width / 2 {
                    Colour::BLACK
                } else {
                    Colour::WHITE
                }
            })
            .collect();
        Raster::from_colours(width, height, &colours).unwrap()
    }

    #[test]
    fn test_uniform_has_no_edges() {
        let raster = Raster::filled(8, 8, Colour::rgb(120, 30, 200)).unwrap();
        assert!(sobel_magnitude(&raster).iter().all(|&m| m < 1e-3));
        let map = EdgeMap::detect(&raster, 0.5, 4);
        assert_eq!(map.count(), 0);
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(Colour::BLACK), 0.0);
        assert!((luminance(Colour::WHITE) - 255.0).abs() < 1e-3);
    }

    #[test]
    fn test_vertical_boundary_detected() {
        let map = EdgeMap::detect(&split(8, 6), 100.0, 0);
        // Columns 3 and 4 straddle the boundary
        for y in 1..5 {
            assert!(map.is_edge(3, y));
            assert!(map.is_edge(4, y));
            assert!(!map.is_edge(1, y));
            assert!(!map.is_edge(6, y));
        }
    }

    #[test]
    fn test_border_never_detected() {
        let map = EdgeMap::detect(&split(8, 6), 0.0, 0);
        for x in 0..8 {
            assert!(!map.is_edge(x, 0));
            assert!(!map.is_edge(x, 5));
        }
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let raster = split(8, 6);
        let peak = sobel_magnitude(&raster)
            .into_iter()
            .fold(0.0f32, f32::max);
        assert_eq!(EdgeMap::detect(&raster, peak, 0).count(), 0);
    }

    #[test]
    fn test_dilation_thickens() {
        let raster = split(10, 10);
        let thin = EdgeMap::detect(&raster, 100.0, 0);
        let thick = EdgeMap::detect(&raster, 100.0, 2);
        assert!(thick.count() > thin.count());
        assert!(thick.is_edge(3, 4));
        assert!(!thin.is_edge(3, 4));
        // Radius 1 floors to no dilation
        assert_eq!(EdgeMap::detect(&raster, 100.0, 1), thin);
    }

    #[test]
    fn test_overlay_paints_black() {
        let mut raster = Raster::filled(5, 5, Colour::WHITE).unwrap();
        let map = EdgeMap {
            width: 5,
            height: 5,
            edges: (0..25).map(|i| i == 12).collect(),
        };
        map.overlay(&mut raster);
        assert_eq!(raster.get(2, 2), Some(Colour::BLACK));
        assert_eq!(raster.pixels().filter(|&c| c == Colour::BLACK).count(), 1);
    }
}
