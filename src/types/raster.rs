//! Dense RGBA rasters.

use crate::error::{StudioError, Result};

use super::Colour;

/// A row-major RGBA pixel buffer.
///
/// Invariant: `width * height * 4 == data.len()` and both dimensions are
/// non-zero. Pipeline outputs always carry alpha 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an interleaved RGBA buffer.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StudioError::invalid_input(format!(
                "raster has zero area ({}x{})",
                width, height
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| StudioError::invalid_input("raster dimensions overflow"))?;
        if data.len() != expected {
            return Err(StudioError::invalid_input(format!(
                "buffer length {} does not match {}x{} RGBA ({} bytes)",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A raster filled with one colour.
    pub fn filled(width: usize, height: usize, colour: Colour) -> Result<Self> {
        let data = colour.to_rgba().repeat(width.saturating_mul(height));
        Self::new(width, height, data)
    }

    /// Build an opaque raster from row-major colours.
    pub fn from_colours(width: usize, height: usize, colours: &[Colour]) -> Result<Self> {
        if colours.len() != width.saturating_mul(height) {
            return Err(StudioError::invalid_input(format!(
                "{} colours do not fill a {}x{} raster",
                colours.len(),
                width,
                height
            )));
        }
        if width == 0 || height == 0 {
            return Err(StudioError::invalid_input(format!(
                "raster has zero area ({}x{})",
                width, height
            )));
        }
        Ok(Self::from_cells(width, height, colours))
    }

    /// Build from colours already known to fill a non-empty
    /// `width`×`height` area.
    pub(crate) fn from_cells(width: usize, height: usize, colours: &[Colour]) -> Self {
        debug_assert!(width > 0 && height > 0 && colours.len() == width * height);
        let mut data = Vec::with_capacity(colours.len() * 4);
        for colour in colours {
            data.extend_from_slice(&colour.to_rgba());
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// RGB of the pixel at (x, y), or `None` outside the raster.
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some(Colour::rgb(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Overwrite a pixel with an opaque colour. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, colour: Colour) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&colour.to_rgba());
    }

    /// All pixels in row-major order, alpha dropped.
    pub fn pixels(&self) -> impl Iterator<Item = Colour> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| Colour::rgb(p[0], p[1], p[2]))
    }

    /// The interleaved RGBA buffer.
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_rgba_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.data
    }

    /// Nearest-neighbour integer upscale, used to display grid-resolution
    /// output as constant-coloured blocks.
    pub fn upscale(&self, factor: usize) -> Raster {
        if factor <= 1 {
            return self.clone();
        }

        let width = self.width * factor;
        let height = self.height * factor;
        let mut data = Vec::with_capacity(width * height * 4);

        for row in self.data.chunks_exact(self.width * 4) {
            let mut scaled_row = Vec::with_capacity(width * 4);
            for pixel in row.chunks_exact(4) {
                for _ in 0..factor {
                    scaled_row.extend_from_slice(pixel);
                }
            }
            for _ in 0..factor {
                data.extend_from_slice(&scaled_row);
            }
        }

        Raster {
            width,
            height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        assert!(Raster::new(2, 2, vec![0; 16]).is_ok());
        let err = Raster::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, StudioError::InvalidInput { .. }));
    }

    #[test]
    fn test_new_rejects_zero_area() {
        assert!(matches!(
            Raster::new(0, 4, vec![]).unwrap_err(),
            StudioError::InvalidInput { .. }
        ));
        assert!(matches!(
            Raster::filled(3, 0, Colour::BLACK).unwrap_err(),
            StudioError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_get_and_set() {
        let mut raster = Raster::filled(3, 2, Colour::BLACK).unwrap();
        raster.set(2, 1, Colour::rgb(1, 2, 3));
        assert_eq!(raster.get(2, 1), Some(Colour::rgb(1, 2, 3)));
        assert_eq!(raster.get(0, 0), Some(Colour::BLACK));
        assert_eq!(raster.get(3, 0), None);
        // Alpha of pixel (2, 1)
        assert_eq!(raster.as_rgba()[5 * 4 + 3], 255);
    }

    #[test]
    fn test_from_colours() {
        let raster =
            Raster::from_colours(2, 1, &[Colour::WHITE, Colour::rgb(9, 8, 7)]).unwrap();
        assert_eq!(raster.as_rgba(), &[255, 255, 255, 255, 9, 8, 7, 255]);
        assert!(Raster::from_colours(2, 2, &[Colour::WHITE]).is_err());
    }

    #[test]
    fn test_upscale() {
        let raster = Raster::from_colours(2, 1, &[Colour::BLACK, Colour::WHITE]).unwrap();
        let scaled = raster.upscale(2);
        assert_eq!(scaled.size(), (4, 2));
        assert_eq!(scaled.get(1, 1), Some(Colour::BLACK));
        assert_eq!(scaled.get(2, 0), Some(Colour::WHITE));
        assert_eq!(scaled.get(3, 1), Some(Colour::WHITE));
        assert_eq!(raster.upscale(0), raster);
    }
}
