//! Image file input and output.

mod png;

pub use png::{load_raster, write_png, MAX_OUTPUT_SIDE};
