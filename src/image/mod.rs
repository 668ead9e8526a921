//! Source images: pixel types, the accessor trait and file loading.

pub mod image_formats;
pub mod load;

pub use image_formats::{Pixel, PixelSource, Pixmap};
pub use load::load_pixmap;
