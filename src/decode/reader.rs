// src/decode/reader.rs

//! Bit-level readers for encoded bodies.

use crate::encode::level::Level;
use crate::encode::raster::{Variant, HEADER_LEN};
use crate::encode::stripe::{RunCode, MIN_STRIPE, STRIPE_LENGTH_BITS};
use crate::utils::error::{MbpError, Result};
use bitvec::prelude::*;

/// Reads bits least-significant-bit first, matching `BitWriter`.
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Lsb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bits: bytes.view_bits::<Lsb0>(),
            pos: 0,
        }
    }

    /// Bit offset of the next read, from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(MbpError::Truncated {
                offset: self.bits.len(),
            });
        }
        self.pos += count;
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        if self.pos >= self.bits.len() {
            return Err(MbpError::Truncated { offset: self.pos });
        }
        let bit = self.bits[self.pos];
        self.pos += 1;
        Ok(bit)
    }

    /// Reads `count` bits into the low bits of a byte, first bit lowest.
    pub fn read_bits(&mut self, count: u8) -> Result<u8> {
        debug_assert!(count <= 8);
        let mut value = 0u8;
        for i in 0..count {
            value |= (self.read_bit()? as u8) << i;
        }
        Ok(value)
    }

    fn read_level(&mut self) -> Result<Level> {
        let high = self.read_bit()?;
        let low = self.read_bit()?;
        Ok(Level::from_pattern(high, low))
    }
}

/// Reads the body of an encoded image as a sequence of [`RunCode`]s.
///
/// Raw bodies yield one `Literal` per pixel.
pub struct CodeReader<'a> {
    bits: BitReader<'a>,
    variant: Variant,
}

impl<'a> CodeReader<'a> {
    /// Positions a reader on the body of `bytes`, right after the header.
    pub fn new(bytes: &'a [u8], variant: Variant) -> Result<Self> {
        let mut bits = BitReader::new(bytes);
        bits.skip(HEADER_LEN * 8)?;
        Ok(Self { bits, variant })
    }

    pub fn position(&self) -> usize {
        self.bits.position()
    }

    pub fn next_code(&mut self) -> Result<RunCode> {
        if !self.variant.is_rle() || !self.bits.read_bit()? {
            return Ok(RunCode::Literal(self.bits.read_level()?));
        }
        let length = self.bits.read_bits(STRIPE_LENGTH_BITS)? as u32 + MIN_STRIPE;
        let level = self.bits.read_level()?;
        Ok(RunCode::Stripe { level, length })
    }
}
