// src/encode/stripe.rs

//! Run splitting and code emission.
//!
//! A run of identical levels becomes a sequence of [`RunCode`]s:
//!
//! - runs of 4 pixels or more are cut into stripes of at most 67 pixels,
//!   each written as `1`, a 6-bit `length - 4` field (LSB first), then the
//!   2-bit level pattern;
//! - whatever is left below 4 pixels is written pixel by pixel as literals,
//!   each `0` followed by the level pattern.
//!
//! Three literals cost exactly as much as one stripe, so a stripe never
//! covers fewer than 4 pixels.
//!
//! Raw images write bare literals: the level pattern with no marker bit.

use crate::encode::bit_writer::{BitWriter, ByteSink};
use crate::encode::level::Level;
use crate::utils::error::Result;

/// Fewest pixels a stripe may cover.
pub const MIN_STRIPE: u32 = 4;
/// Most pixels a stripe may cover (`MIN_STRIPE` + the 6-bit field maximum).
pub const MAX_STRIPE: u32 = MIN_STRIPE + STRIPE_FIELD_MAX as u32;
/// Width of the stripe length field.
pub const STRIPE_LENGTH_BITS: u8 = 6;
const STRIPE_FIELD_MAX: u8 = (1 << STRIPE_LENGTH_BITS) - 1;

/// One unit of an RLE body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunCode {
    /// A single pixel.
    Literal(Level),
    /// `length` consecutive pixels, `MIN_STRIPE..=MAX_STRIPE`.
    Stripe { level: Level, length: u32 },
}

impl RunCode {
    pub fn level(&self) -> Level {
        match *self {
            RunCode::Literal(level) => level,
            RunCode::Stripe { level, .. } => level,
        }
    }

    /// Number of pixels this code covers.
    pub fn pixels(&self) -> u32 {
        match *self {
            RunCode::Literal(_) => 1,
            RunCode::Stripe { length, .. } => length,
        }
    }

    /// Encoded size of this code in an RLE body.
    pub fn bit_len(&self) -> u32 {
        match self {
            RunCode::Literal(_) => 3,
            RunCode::Stripe { .. } => 1 + STRIPE_LENGTH_BITS as u32 + 2,
        }
    }
}

/// Whether a literal carries its leading `0` marker bit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LiteralStyle {
    /// RLE bodies: `0` then the pattern.
    Marked,
    /// Raw bodies: the pattern only.
    Bare,
}

/// Iterator over the codes of one run, in emission order.
#[derive(Clone, Debug)]
pub struct RunChunks {
    level: Level,
    remaining: u32,
}

/// Splits a run of `length` pixels of `level` into codes.
pub fn split_run(level: Level, length: u32) -> RunChunks {
    RunChunks {
        level,
        remaining: length,
    }
}

impl Iterator for RunChunks {
    type Item = RunCode;

    fn next(&mut self) -> Option<RunCode> {
        match self.remaining {
            0 => None,
            n if n >= MIN_STRIPE => {
                let length = n.min(MAX_STRIPE);
                self.remaining -= length;
                Some(RunCode::Stripe {
                    level: self.level,
                    length,
                })
            }
            _ => {
                self.remaining -= 1;
                Some(RunCode::Literal(self.level))
            }
        }
    }
}

/// Writes a single literal pixel.
#[inline]
pub fn write_literal<S: ByteSink>(
    w: &mut BitWriter<S>,
    level: Level,
    style: LiteralStyle,
) -> Result<()> {
    if style == LiteralStyle::Marked {
        w.write_bit(false)?;
    }
    w.write_bits(&level.pattern())
}

/// Writes one RLE code.
pub fn write_code<S: ByteSink>(w: &mut BitWriter<S>, code: RunCode) -> Result<()> {
    match code {
        RunCode::Literal(level) => write_literal(w, level, LiteralStyle::Marked),
        RunCode::Stripe { level, length } => {
            debug_assert!((MIN_STRIPE..=MAX_STRIPE).contains(&length));
            w.write_bit(true)?;
            w.write_byte((length - MIN_STRIPE) as u8, STRIPE_LENGTH_BITS)?;
            w.write_bits(&level.pattern())
        }
    }
}

/// Writes a whole run as stripes and trailing literals.
pub fn emit_run<S: ByteSink>(w: &mut BitWriter<S>, level: Level, length: u32) -> Result<()> {
    for code in split_run(level, length) {
        write_code(w, code)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::bit_writer::WriterSink;

    fn emitted(f: impl FnOnce(&mut BitWriter<WriterSink<Vec<u8>>>) -> Result<()>) -> Vec<u8> {
        let mut w = BitWriter::new(WriterSink::new(Vec::new()));
        f(&mut w).unwrap();
        w.finish().unwrap().into_inner()
    }

    #[test]
    fn test_short_runs_are_literals() {
        for length in 1..MIN_STRIPE {
            let codes: Vec<_> = split_run(Level::High, length).collect();
            assert_eq!(codes.len(), length as usize);
            assert!(codes.iter().all(|c| *c == RunCode::Literal(Level::High)));
        }
    }

    #[test]
    fn test_split_68() {
        let codes: Vec<_> = split_run(Level::Transparent, 68).collect();
        assert_eq!(
            codes,
            vec![
                RunCode::Stripe {
                    level: Level::Transparent,
                    length: 67
                },
                RunCode::Literal(Level::Transparent),
            ]
        );
    }

    #[test]
    fn test_split_bounds_and_totals() {
        for length in 1..=500u32 {
            let codes: Vec<_> = split_run(Level::Low, length).collect();
            let total: u32 = codes.iter().map(|c| c.pixels()).sum();
            assert_eq!(total, length);
            for code in &codes {
                if let RunCode::Stripe { length, .. } = code {
                    assert!((MIN_STRIPE..=MAX_STRIPE).contains(length));
                }
            }
            // Literals only ever trail the run, and never more than three.
            let literals = codes
                .iter()
                .skip_while(|c| matches!(c, RunCode::Stripe { .. }))
                .count();
            assert!(literals < MIN_STRIPE as usize);
            assert!(codes.iter().rev().take(literals).all(|c| matches!(c, RunCode::Literal(_))));
        }
    }

    #[test]
    fn test_split_71_leaves_a_second_stripe() {
        let codes: Vec<_> = split_run(Level::Opaque, 71).collect();
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[1].pixels(), 4);
    }

    #[test]
    fn test_marked_literal_bits() {
        let out = emitted(|w| write_literal(w, Level::Opaque, LiteralStyle::Marked));
        assert_eq!(out, vec![0b110]);
        let out = emitted(|w| write_literal(w, Level::High, LiteralStyle::Marked));
        assert_eq!(out, vec![0b010]);
    }

    #[test]
    fn test_bare_literal_bits() {
        let out = emitted(|w| write_literal(w, Level::Low, LiteralStyle::Bare));
        assert_eq!(out, vec![0b10]);
        let out = emitted(|w| write_literal(w, Level::High, LiteralStyle::Bare));
        assert_eq!(out, vec![0b01]);
    }

    #[test]
    fn test_stripe_of_four() {
        let out = emitted(|w| emit_run(w, Level::Opaque, 4));
        assert_eq!(out, vec![0x81, 0x01]);
    }

    #[test]
    fn test_stripe_of_67_then_literal() {
        // 1, 111111, 00 | 0, 00
        let out = emitted(|w| emit_run(w, Level::Transparent, 68));
        assert_eq!(out, vec![0x7F, 0x00]);
    }

    #[test]
    fn test_bit_len_matches_writer() {
        for length in [1u32, 3, 4, 67, 68, 200] {
            let mut w = BitWriter::new(crate::encode::bit_writer::DiscardSink);
            emit_run(&mut w, Level::Low, length).unwrap();
            let expected: u32 = split_run(Level::Low, length).map(|c| c.bit_len()).sum();
            assert_eq!(w.bit_count(), expected as u64);
        }
    }
}
