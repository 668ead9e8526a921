//! A codec for mono bitmaps (MBP): single-color images with four opacity levels.
//!
//! Each pixel's red channel is quantized to a 2-bit level, then the image is
//! written in whichever of three bit-packed encodings is smallest:
//!
//! - **Horizontal RLE** (variant 1): runs in row-major order,
//! - **Vertical RLE** (variant 2): runs in column-major order,
//! - **Raw** (variant 3): two bits per pixel.
//!
//! # Quick Start
//!
//! ```
//! use mbp_codec::{decode, encode_to_vec, Level, Pixel, Pixmap};
//!
//! let img = Pixmap::from_fn(16, 16, |x, _| if x < 8 { Pixel::black() } else { Pixel::white() });
//! let bytes = encode_to_vec(&img)?;
//!
//! let levels = decode(&bytes)?;
//! assert_eq!(levels.get(12, 3), Level::Opaque);
//! # Ok::<(), mbp_codec::MbpError>(())
//! ```
//!
//! # File format
//!
//! | Offset | Size | Field                              |
//! |--------|------|------------------------------------|
//! | 0      | 1    | variant (1, 2 or 3)                |
//! | 1      | 1    | width, 1..=255                     |
//! | 2      | 1    | height, 1..=255                    |
//! | 3      | ...  | body, LSB-first, zero-padded       |
//!
//! See [`encode::stripe`] for the RLE codes and [`decode`] for the full
//! body grammar.

pub mod convert;
pub mod decode;
pub mod encode;
pub mod image;
pub mod utils;

// Encoding
pub use encode::{encode_to, encode_to_vec, measure, Encoded, Level, SizeReport, Variant};

// Decoding
pub use decode::{decode, decode_with, DecodeOptions, LevelMap};

// Image types
pub use self::image::image_formats::{Pixel, PixelSource, Pixmap};

// Files
pub use convert::{convert_file, decode_file};

// Error types
pub use utils::error::{MbpError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_roundtrip() -> Result<()> {
        let img = Pixmap::from_fn(16, 16, |x, _| {
            if x < 8 { Pixel::black() } else { Pixel::white() }
        });
        let bytes = encode_to_vec(&img)?;
        let levels = decode(&bytes)?;
        assert_eq!(levels.get(12, 3), Level::Opaque);
        assert_eq!(levels.get(2, 15), Level::Transparent);
        Ok(())
    }

    #[test]
    fn test_measure_reports_every_variant() -> Result<()> {
        let img = Pixmap::from_pixel(10, 10, Pixel::gray(100));
        let sizes = measure(&img)?;
        for variant in Variant::ALL {
            assert!(sizes.size_of(variant) > encode::HEADER_LEN);
        }
        Ok(())
    }
}
