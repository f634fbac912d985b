//! Core domain types for pixstudio.
//!
//! - `Colour` - opaque RGB values
//! - `Palette` - ordered, non-empty colour lists
//! - `Raster` - row-major RGBA pixel buffers

mod colour;
mod palette;
mod raster;

pub use colour::Colour;
pub use palette::{Palette, DEFAULT_COLOURS};
pub use raster::Raster;
