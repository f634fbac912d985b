//! Image filters used ahead of and after quantization.
//!
//! - `kernel` - generic 3x3 convolution (box blur, sharpen)
//! - `edges` - Sobel gradient magnitude and edge maps

pub mod edges;
pub mod kernel;

pub use edges::{luminance, sobel_magnitude, EdgeMap};
pub use kernel::{box_blur, convolve, sharpen, Kernel3};
