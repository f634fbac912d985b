//! Colour quantization: distance metrics, the bucketed palette index and
//! error diffusion.

pub mod dither;
pub mod index;
pub mod metric;

pub use dither::floyd_steinberg;
pub use index::{PaletteIndex, DEFAULT_RESOLUTION};
pub use metric::{nearest_rgb, perceptual_distance, rgb_distance, to_lab, Lab};
