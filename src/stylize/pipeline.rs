//! The photo-to-pixel-art pipeline.

use std::borrow::Cow;

use rayon::prelude::*;

use crate::error::{Result, StudioError};
use crate::filter::{box_blur, sharpen, EdgeMap};
use crate::quantize::{floyd_steinberg, nearest_rgb, PaletteIndex};
use crate::types::{Colour, Palette, Raster};

use super::options::{PipelineOptions, QuantizationStrategy};

/// Converts source rasters to palette-constrained pixel art.
///
/// Holds the palette index built for its palette, so one `Stylizer` can be
/// reused across any number of conversions.
#[derive(Debug, Clone)]
pub struct Stylizer {
    index: PaletteIndex,
    options: PipelineOptions,
}

impl Stylizer {
    /// Create a stylizer, building the palette index up front.
    pub fn new(palette: &Palette, options: PipelineOptions) -> Result<Self> {
        let index = PaletteIndex::build(palette, options.index_resolution)?;
        Ok(Self { index, options })
    }

    /// Create a stylizer from a raw colour list. An empty list is an
    /// `InvalidPalette` error.
    pub fn from_colours(colours: Vec<Colour>, options: PipelineOptions) -> Result<Self> {
        Self::new(&Palette::new(colours)?, options)
    }

    pub fn palette(&self) -> &Palette {
        self.index.palette()
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Stylize an interleaved RGBA buffer.
    pub fn stylize_rgba(
        &self,
        width: usize,
        height: usize,
        rgba: Vec<u8>,
        grid_size: usize,
    ) -> Result<Raster> {
        let source = Raster::new(width, height, rgba)?;
        self.stylize(&source, grid_size)
    }

    /// Run the pipeline.
    ///
    /// With `BlockAverage` the result is `grid_size`×`grid_size`. With
    /// `EdgeAware` the result has the source's dimensions and `grid_size`
    /// is only validated.
    pub fn stylize(&self, source: &Raster, grid_size: usize) -> Result<Raster> {
        if grid_size == 0 {
            return Err(StudioError::invalid_input("grid size must be at least 1"));
        }

        let opts = &self.options;
        tracing::debug!(
            strategy = %opts.strategy,
            width = source.width(),
            height = source.height(),
            grid_size,
            denoise = opts.enable_denoise,
            sharpen = opts.enable_sharpen,
            dither = opts.enable_dithering,
            "stylizing raster"
        );

        let mut prepared = Cow::Borrowed(source);
        if opts.enable_denoise {
            prepared = Cow::Owned(box_blur(&prepared));
        }
        if opts.enable_sharpen {
            prepared = Cow::Owned(sharpen(&prepared));
        }

        let (mut output, edges) = match opts.strategy {
            QuantizationStrategy::BlockAverage => {
                let quantized = self.quantize_blocks(&prepared, grid_size)?;
                let edges = opts.enable_edge_overlay.then(|| {
                    EdgeMap::detect(&quantized, opts.edge_threshold, opts.edge_dilate_radius)
                });
                (quantized, edges)
            }
            QuantizationStrategy::EdgeAware => {
                let edges =
                    EdgeMap::detect(&prepared, opts.edge_threshold, opts.edge_dilate_radius);
                let quantized = self.quantize_pixels(&prepared, &edges)?;
                (quantized, Some(edges))
            }
        };

        if opts.enable_scanlines {
            apply_scanlines(&mut output);
        }
        if let Some(edges) = edges {
            edges.overlay(&mut output);
        }

        Ok(output)
    }

    /// Average, contrast-boost and palette-map each cell.
    fn quantize_blocks(&self, source: &Raster, grid_size: usize) -> Result<Raster> {
        let contrast = self.options.contrast;
        let cells: Vec<Colour> = (0..grid_size * grid_size)
            .into_par_iter()
            .map(|cell| {
                let avg = average_cell(source, grid_size, cell % grid_size, cell / grid_size);
                boost_contrast(avg, contrast)
            })
            .collect();

        let quantized = if self.options.enable_dithering {
            floyd_steinberg(&cells, grid_size, grid_size, None, |c| self.index.lookup(c))
        } else {
            cells.par_iter().map(|&c| self.index.lookup(c)).collect()
        };

        Raster::from_colours(grid_size, grid_size, &quantized)
    }

    /// Full-resolution quantization with edges forced to black.
    fn quantize_pixels(&self, source: &Raster, edges: &EdgeMap) -> Result<Raster> {
        let (width, height) = source.size();
        let palette = self.index.palette();
        let pixels: Vec<Colour> = source.pixels().collect();

        let quantized: Vec<Colour> = if self.options.enable_dithering {
            let mut out = floyd_steinberg(&pixels, width, height, Some(edges.as_slice()), |c| {
                nearest_rgb(c, palette)
            });
            for (colour, &edge) in out.iter_mut().zip(edges.as_slice()) {
                if edge {
                    *colour = Colour::BLACK;
                }
            }
            out
        } else {
            pixels
                .par_iter()
                .zip(edges.as_slice().par_iter())
                .map(|(&c, &edge)| if edge { Colour::BLACK } else { nearest_rgb(c, palette) })
                .collect()
        };

        Raster::from_colours(width, height, &quantized)
    }
}

/// Source pixel span covered by cell `cell` of `cells` along an axis of
/// length `len`. Never empty, even when `len < cells`.
fn cell_span(cell: usize, cells: usize, len: usize) -> (usize, usize) {
    let start = (cell * len / cells).min(len - 1);
    let end = ((cell + 1) * len / cells).max(start + 1).min(len);
    (start, end)
}

/// Rounded mean colour of the source region mapped to grid cell (gx, gy).
fn average_cell(source: &Raster, grid_size: usize, gx: usize, gy: usize) -> Colour {
    let (x0, x1) = cell_span(gx, grid_size, source.width());
    let (y0, y1) = cell_span(gy, grid_size, source.height());

    let data = source.as_rgba();
    let width = source.width();
    let mut total = [0u64; 3];
    for y in y0..y1 {
        for x in x0..x1 {
            let i = (y * width + x) * 4;
            total[0] += data[i] as u64;
            total[1] += data[i + 1] as u64;
            total[2] += data[i + 2] as u64;
        }
    }

    let count = ((x1 - x0) * (y1 - y0)) as f64;
    let [r, g, b] = total.map(|t| (t as f64 / count).round() as u8);
    Colour::rgb(r, g, b)
}

/// Stretch each channel away from mid-grey by `factor`.
fn boost_contrast(colour: Colour, factor: f32) -> Colour {
    let adjust = |c: u8| ((c as f32 / 255.0 - 0.5) * factor + 0.5) * 255.0;
    Colour::from_f32_clamped([adjust(colour.r), adjust(colour.g), adjust(colour.b)])
}

/// Darken every odd row to 90% brightness (rounded) to mimic a CRT.
/// Alpha is left alone.
pub fn apply_scanlines(raster: &mut Raster) {
    let width = raster.width();
    for (y, row) in raster.as_rgba_mut().chunks_exact_mut(width * 4).enumerate() {
        if y % 2 == 0 {
            continue;
        }
        for pixel in row.chunks_exact_mut(4) {
            for channel in &mut pixel[..3] {
                *channel = ((*channel as u16 * 9 + 5) / 10) as u8;
            }
        }
    }
}
