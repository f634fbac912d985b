//! pixstudio - Pixel art conversion and grid editing
//!
//! Turns photographs into palette-limited pixel art through a configurable
//! filter and quantization pipeline, and provides an editable colour grid
//! with flood fill and undo/redo.

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod filter;
pub mod output;
pub mod quantize;
pub mod render;
pub mod stylize;
pub mod types;

pub use config::{StudioConfig, CONFIG_FILENAME};
pub use editor::{
    parse_script, EditCommand, EditorSession, GridSnapshot, HistoryStack, PixelGrid, Tool,
    GRID_SIZES,
};
pub use error::{Result, StudioError};
pub use filter::{box_blur, sharpen, sobel_magnitude, EdgeMap};
pub use quantize::{nearest_rgb, perceptual_distance, rgb_distance, to_lab, Lab, PaletteIndex};
pub use render::{load_raster, write_png};
pub use stylize::{apply_scanlines, PipelineOptions, QuantizationStrategy, Stylizer};
pub use types::{Colour, Palette, Raster, DEFAULT_COLOURS};
