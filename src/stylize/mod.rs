//! Image-to-pixel-art stylization.
//!
//! A `Stylizer` runs a fixed sequence of optional stages over a source
//! raster: denoise, sharpen, quantize (block-average or edge-aware, with
//! optional Floyd-Steinberg dithering), scanlines and edge overlay.

mod options;
mod pipeline;

pub use options::{PipelineOptions, QuantizationStrategy};
pub use pipeline::{apply_scanlines, Stylizer};
