//! Decoding encoded images back to opacity levels.
//!
//! ## Body grammar
//!
//! - RLE variants (1, 2): read a bit. `0` means a literal: the next two bits
//!   are one pixel's level. `1` means a stripe: six bits `L` (LSB first), then
//!   two level bits applied to `L + 4` pixels.
//! - Raw (3): two level bits per pixel, no markers.
//!
//! Pixels are assigned in the scan order of the variant. Padding bits after
//! the last pixel, and any trailing bytes, are ignored.

pub mod reader;

use crate::encode::level::Level;
use crate::encode::raster::{check_dimensions, Variant, HEADER_LEN};
use crate::encode::stripe::RunCode;
use crate::image::image_formats::{Pixel, PixelSource};
use crate::utils::error::{MbpError, Result};
use byteorder::ReadBytesExt;
use std::io::Cursor;

pub use reader::{BitReader, CodeReader};

/// The fixed 3-byte header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub variant: Variant,
    pub width: u8,
    pub height: u8,
}

impl Header {
    pub fn pixel_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

/// Mirroring applied while decoding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Stream pixel `x` lands at `width - 1 - x`.
    pub horizontal_flip: bool,
    /// Stream pixel `y` lands at `height - 1 - y`.
    pub vertical_flip: bool,
}

/// A decoded image: one [`Level`] per pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelMap {
    width: u32,
    height: u32,
    levels: Vec<Level>,
}

impl LevelMap {
    /// A map with every pixel transparent.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            levels: vec![Level::Transparent; (width as usize) * (height as usize)],
        }
    }

    /// Quantizes every pixel of `source`.
    pub fn from_source<P: PixelSource + ?Sized>(source: &P) -> Self {
        let (width, height) = (source.width(), source.height());
        let mut map = LevelMap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map.set(x, y, Level::from_intensity(source.pixel(x, y).r));
            }
        }
        map
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> Level {
        assert!(x < self.width && y < self.height);
        self.levels[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, level: Level) {
        assert!(x < self.width && y < self.height);
        self.levels[(y as usize) * (self.width as usize) + x as usize] = level;
    }

    /// All levels in row-major order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}

/// Each level reads back as a gray sample that quantizes to the same level.
impl PixelSource for LevelMap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        Pixel::gray(self.get(x, y).intensity())
    }
}

/// Parses the header of an encoded image.
pub fn read_header(bytes: &[u8]) -> Result<Header> {
    let mut cursor = Cursor::new(bytes);
    let mut next = || {
        cursor.read_u8().map_err(|_| MbpError::Truncated {
            offset: bytes.len() * 8,
        })
    };
    let variant = Variant::try_from(next()?)?;
    let width = next()?;
    let height = next()?;
    check_dimensions(width as u32, height as u32)?;
    Ok(Header {
        variant,
        width,
        height,
    })
}

/// Reads the header and every code of the body.
///
/// The codes cover exactly `width * height` pixels.
pub fn read_codes(bytes: &[u8]) -> Result<(Header, Vec<RunCode>)> {
    let header = read_header(bytes)?;
    let mut reader = CodeReader::new(bytes, header.variant)?;
    let mut codes = Vec::new();
    let mut remaining = header.pixel_count();
    while remaining > 0 {
        let code = reader.next_code()?;
        let length = code.pixels();
        if length > remaining {
            return Err(MbpError::StripeOverrun { length, remaining });
        }
        remaining -= length;
        codes.push(code);
    }
    log::trace!(
        "{}: {} codes, {} of {} body bits used",
        header.variant,
        codes.len(),
        reader.position() - HEADER_LEN * 8,
        (bytes.len() - HEADER_LEN) * 8
    );
    Ok((header, codes))
}

/// Decodes an encoded image.
pub fn decode(bytes: &[u8]) -> Result<LevelMap> {
    decode_with(bytes, DecodeOptions::default())
}

/// Decodes an encoded image, optionally mirrored.
pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Result<LevelMap> {
    let (header, codes) = read_codes(bytes)?;
    let (width, height) = (header.width as u32, header.height as u32);
    let mut map = LevelMap::new(width, height);
    let mut scan = header.variant.scan_order().coords(width, height);
    for code in codes {
        for (x, y) in scan.by_ref().take(code.pixels() as usize) {
            let x = if options.horizontal_flip { width - 1 - x } else { x };
            let y = if options.vertical_flip { height - 1 - y } else { y };
            map.set(x, y, code.level());
        }
    }
    Ok(map)
}
