// src/encode/select.rs

//! Picks the smallest of the three encodings and writes it.
//!
//! Selection costs four passes over the pixels: one sizing pass per variant
//! against a discarding sink, then the winning variant again against the real
//! output. Nothing reaches the output before the winner is known.

use crate::encode::bit_writer::WriterSink;
use crate::encode::raster::{encode_variant, measure_variant, Variant};
use crate::image::image_formats::PixelSource;
use crate::utils::error::Result;
use std::io::Write;

/// Encoded sizes, in bytes, of one image under each variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SizeReport {
    pub horizontal: usize,
    pub vertical: usize,
    pub raw: usize,
}

impl SizeReport {
    pub fn size_of(&self, variant: Variant) -> usize {
        match variant {
            Variant::HorizontalRle => self.horizontal,
            Variant::VerticalRle => self.vertical,
            Variant::Raw => self.raw,
        }
    }

    /// The smallest variant. Ties go to horizontal, then vertical.
    pub fn pick(&self) -> Variant {
        if self.horizontal <= self.vertical && self.horizontal <= self.raw {
            Variant::HorizontalRle
        } else if self.vertical <= self.raw {
            Variant::VerticalRle
        } else {
            Variant::Raw
        }
    }

    /// Size of the picked variant.
    pub fn smallest(&self) -> usize {
        self.size_of(self.pick())
    }
}

/// Result of a full encode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    pub variant: Variant,
    pub size: usize,
}

/// Runs the three sizing passes.
pub fn measure<P: PixelSource + ?Sized>(source: &P) -> Result<SizeReport> {
    let report = SizeReport {
        horizontal: measure_variant(source, Variant::HorizontalRle)?,
        vertical: measure_variant(source, Variant::VerticalRle)?,
        raw: measure_variant(source, Variant::Raw)?,
    };
    log::info!(
        "HRLE:{} VRLE:{} RAW:{}",
        report.horizontal,
        report.vertical,
        report.raw
    );
    Ok(report)
}

/// Encodes `source` with its smallest variant into `writer`.
///
/// Returns what was written along with the writer.
pub fn encode_to<P, W>(source: &P, writer: W) -> Result<(Encoded, W)>
where
    P: PixelSource + ?Sized,
    W: Write,
{
    let report = measure(source)?;
    let variant = report.pick();
    log::info!("Save {}", variant);

    let (size, sink) = encode_variant(source, variant, WriterSink::new(writer))?;
    debug_assert_eq!(size, report.size_of(variant));
    Ok((Encoded { variant, size }, sink.into_inner()))
}

/// Encodes `source` with its smallest variant into a new buffer.
pub fn encode_to_vec<P: PixelSource + ?Sized>(source: &P) -> Result<Vec<u8>> {
    let (encoded, buffer) = encode_to(source, Vec::new())?;
    debug_assert_eq!(encoded.size, buffer.len());
    Ok(buffer)
}
