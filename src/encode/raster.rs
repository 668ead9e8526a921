// src/encode/raster.rs

//! Whole-image encoders.
//!
//! Every encoded image starts with a 3-byte header (variant, width, height)
//! followed by a bit-packed body:
//!
//! | Variant | Scan order   | Body                                    |
//! |---------|--------------|-----------------------------------------|
//! | 1       | row-major    | RLE codes (see [`crate::encode::stripe`]) |
//! | 2       | column-major | RLE codes                               |
//! | 3       | row-major    | one bare 2-bit literal per pixel        |
//!
//! Runs follow the scan order straight across line boundaries.

use crate::encode::bit_writer::{BitWriter, ByteSink, DiscardSink};
use crate::encode::level::Level;
use crate::encode::stripe::{emit_run, write_literal, LiteralStyle};
use crate::image::image_formats::PixelSource;
use crate::utils::error::{MbpError, Result};
use std::fmt;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 3;
/// Largest width or height the header can carry.
pub const MAX_DIMENSION: u32 = u8::MAX as u32;

/// The three whole-image encodings, in tie-break priority order.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    HorizontalRle = 1,
    VerticalRle = 2,
    Raw = 3,
}

impl Variant {
    /// All variants, highest priority first.
    pub const ALL: [Variant; 3] = [Variant::HorizontalRle, Variant::VerticalRle, Variant::Raw];

    /// The header byte.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn scan_order(self) -> ScanOrder {
        match self {
            Variant::HorizontalRle | Variant::Raw => ScanOrder::RowMajor,
            Variant::VerticalRle => ScanOrder::ColumnMajor,
        }
    }

    pub fn is_rle(self) -> bool {
        self != Variant::Raw
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Variant::HorizontalRle => "HRLE",
            Variant::VerticalRle => "VRLE",
            Variant::Raw => "RAW",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl TryFrom<u8> for Variant {
    type Error = MbpError;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Variant::HorizontalRle),
            2 => Ok(Variant::VerticalRle),
            3 => Ok(Variant::Raw),
            other => Err(MbpError::UnknownVariant(other)),
        }
    }
}

/// Pixel visiting order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScanOrder {
    /// `y` outer, `x` inner.
    RowMajor,
    /// `x` outer, `y` inner.
    ColumnMajor,
}

impl ScanOrder {
    /// Iterates `(x, y)` over a `width` x `height` grid in this order.
    pub fn coords(self, width: u32, height: u32) -> Scan {
        Scan {
            order: self,
            width,
            height,
            index: 0,
            len: width as u64 * height as u64,
        }
    }
}

/// Iterator returned by [`ScanOrder::coords`].
#[derive(Clone, Debug)]
pub struct Scan {
    order: ScanOrder,
    width: u32,
    height: u32,
    index: u64,
    len: u64,
}

impl Iterator for Scan {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        if self.index >= self.len {
            return None;
        }
        let i = self.index;
        self.index += 1;
        Some(match self.order {
            ScanOrder::RowMajor => {
                ((i % self.width as u64) as u32, (i / self.width as u64) as u32)
            }
            ScanOrder::ColumnMajor => {
                ((i / self.height as u64) as u32, (i % self.height as u64) as u32)
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.len - self.index) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Scan {}

/// Checks that both dimensions fit the header and are non-zero.
pub fn check_dimensions(width: u32, height: u32) -> Result<(u8, u8)> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(MbpError::DimensionTooLarge { width, height });
    }
    if width == 0 || height == 0 {
        return Err(MbpError::EmptyImage { width, height });
    }
    Ok((width as u8, height as u8))
}

#[inline]
fn level_at<P: PixelSource + ?Sized>(source: &P, x: u32, y: u32) -> Level {
    Level::from_intensity(source.pixel(x, y).r)
}

/// Encodes `source` with one variant into `sink`.
///
/// Returns the encoded size in bytes (header included) and the sink.
pub fn encode_variant<P, S>(source: &P, variant: Variant, sink: S) -> Result<(usize, S)>
where
    P: PixelSource + ?Sized,
    S: ByteSink,
{
    let (width, height) = check_dimensions(source.width(), source.height())?;

    let mut w = BitWriter::new(sink);
    w.write_u8(variant.id())?;
    w.write_u8(width)?;
    w.write_u8(height)?;

    let scan = variant.scan_order().coords(width as u32, height as u32);
    if variant.is_rle() {
        encode_runs(&mut w, source, scan)?;
    } else {
        for (x, y) in scan {
            write_literal(&mut w, level_at(source, x, y), LiteralStyle::Bare)?;
        }
    }

    let size = w.size();
    let sink = w.finish()?;
    Ok((size, sink))
}

/// Encoded size of `source` under `variant`, without storing any output.
pub fn measure_variant<P: PixelSource + ?Sized>(source: &P, variant: Variant) -> Result<usize> {
    let (size, _) = encode_variant(source, variant, DiscardSink)?;
    log::debug!("{}: {} bytes", variant, size);
    Ok(size)
}

fn encode_runs<P, S>(w: &mut BitWriter<S>, source: &P, scan: Scan) -> Result<()>
where
    P: PixelSource + ?Sized,
    S: ByteSink,
{
    let mut run: Option<(Level, u32)> = None;
    for (x, y) in scan {
        let level = level_at(source, x, y);
        run = match run {
            Some((current, length)) if current == level => Some((current, length + 1)),
            Some((current, length)) => {
                emit_run(w, current, length)?;
                Some((level, 1))
            }
            None => Some((level, 1)),
        };
    }
    if let Some((level, length)) = run {
        emit_run(w, level, length)?;
    }
    Ok(())
}
