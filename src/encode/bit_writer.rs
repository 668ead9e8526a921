// src/encode/bit_writer.rs

//! Bit-level output stream.
//!
//! Bits are packed least-significant-bit first: the first bit written to a
//! byte lands in bit 0, the eighth in bit 7. A full byte is handed to the
//! [`ByteSink`] as soon as its eighth bit arrives; a partial last byte is
//! zero-padded when the writer is finished (or dropped).
//!
//! Sizing passes use a [`DiscardSink`], which keeps the bit count exact but
//! never stores a byte.

use crate::utils::error::{MbpError, Result};
use std::io::{self, Write};

/// Destination for the bytes assembled by a [`BitWriter`].
pub trait ByteSink {
    fn put_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Called once after the last byte.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that drops every byte. Only the writer's bit count survives.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl ByteSink for DiscardSink {
    #[inline]
    fn put_byte(&mut self, _byte: u8) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that forwards bytes to any `std::io::Write`.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    #[inline]
    fn put_byte(&mut self, byte: u8) -> io::Result<()> {
        self.writer.write_all(&[byte])
    }

    fn close(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Accumulates single bits into bytes.
///
/// Call [`BitWriter::finish`] to flush the last partial byte and get the
/// sink back. If the writer is dropped unfinished (an early `?` return, for
/// example) the pending byte is still flushed, with any error ignored.
///
/// A sink whose `put_byte` fails is dropped on the spot. Every later write,
/// `finish`, and the drop flush then leave it alone.
pub struct BitWriter<S: ByteSink> {
    sink: Option<S>,
    byte: u8,    // current output byte
    scount: u8,  // bits already placed in `byte`
    total_bits: u64,
}

impl<S: ByteSink> BitWriter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink: Some(sink),
            byte: 0,
            scount: 0,
            total_bits: 0,
        }
    }

    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.byte |= (bit as u8) << self.scount;
        self.scount += 1;
        self.total_bits += 1;
        if self.scount == 8 {
            self.emit()?;
        }
        Ok(())
    }

    pub fn write_bits(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Writes the low `count` bits of `value`, least-significant bit first.
    pub fn write_byte(&mut self, value: u8, count: u8) -> Result<()> {
        debug_assert!(count <= 8, "write_byte takes at most 8 bits");
        for i in 0..count {
            self.write_bit((value >> i) & 1 != 0)?;
        }
        Ok(())
    }

    /// Writes a whole byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_byte(value, 8)
    }

    /// Number of bits written so far.
    pub fn bit_count(&self) -> u64 {
        self.total_bits
    }

    /// Output size in bytes, counting a partial last byte as a full one.
    pub fn size(&self) -> usize {
        self.total_bits.div_ceil(8) as usize
    }

    /// Flushes the pending partial byte and returns the sink.
    ///
    /// Fails with [`MbpError::SinkFailed`] if an earlier write already failed.
    pub fn finish(mut self) -> Result<S> {
        self.eflush()?;
        let mut sink = self.sink.take().ok_or(MbpError::SinkFailed)?;
        sink.close()?;
        Ok(sink)
    }

    fn emit(&mut self) -> Result<()> {
        let byte = self.byte;
        self.byte = 0;
        self.scount = 0;
        let sink = self.sink.as_mut().ok_or(MbpError::SinkFailed)?;
        if let Err(err) = sink.put_byte(byte) {
            self.sink = None;
            return Err(err.into());
        }
        Ok(())
    }

    fn eflush(&mut self) -> Result<()> {
        if self.scount > 0 {
            self.emit()?;
        }
        Ok(())
    }
}

impl<S: ByteSink> Drop for BitWriter<S> {
    fn drop(&mut self) {
        if self.sink.is_some() {
            let _ = self.eflush();
            if let Some(ref mut sink) = self.sink {
                let _ = sink.close();
            }
        }
    }
}
