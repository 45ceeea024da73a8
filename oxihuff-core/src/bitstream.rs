//! Bit-level I/O for variable-length codes.
//!
//! This module provides `BitWriter` and `BitReader`, which pack and unpack
//! Huffman codes to and from a contiguous byte buffer.
//!
//! # Bit Ordering
//!
//! OxiHuff containers use MSB-first (Most Significant Bit first) ordering:
//! the first bit written lands in bit 7 of the first byte. The final byte is
//! zero-padded; readers must know how many symbols to decode rather than rely
//! on the padding.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let output = writer.into_inner().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&output);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{OxiHuffError, Result};
use std::io::Write;

/// An MSB-first bit writer that wraps any `Write` implementation.
///
/// Complete bytes are forwarded to the underlying writer as soon as they are
/// filled. The last partial byte is only written by [`BitWriter::align_to_byte`]
/// or [`BitWriter::into_inner`], padded with zero bits.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer (MSB-first, valid bits in the low `bits_in_buffer` bits).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of zero bits the final byte will carry once flushed.
    pub fn padding_bits(&self) -> u8 {
        (8 - self.bits_in_buffer % 8) % 8
    }

    /// Flush complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.writer.write_all(&[byte])?;
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
        Ok(())
    }

    /// Write up to 32 bits to the stream.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write, right-aligned; the highest of the
    ///   `count` bits is written first
    /// * `count` - Number of bits to write (0-32)
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count) - 1
        };

        self.buffer = (self.buffer << count) | u64::from(value & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += u64::from(count);

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(u32::from(bit), 1)
    }

    /// Pad to byte boundary with zeros and flush the completed byte.
    pub fn align_to_byte(&mut self) -> Result<()> {
        let padding = self.padding_bits();
        if padding > 0 {
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
            self.flush_bytes()?;
        }
        Ok(())
    }

    /// Flush any remaining bits and return the underlying writer.
    ///
    /// A partial final byte is padded with zero bits.
    pub fn into_inner(mut self) -> Result<W> {
        self.align_to_byte()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// An MSB-first bit reader over an in-memory byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Next byte to load into the buffer.
    byte_pos: usize,
    /// Bit buffer (MSB-first, valid bits in the low `bits_in_buffer` bits).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a new `BitReader` over the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Get the current bit position (for error reporting).
    pub fn bit_position(&self) -> u64 {
        self.total_bits_read
    }

    /// Number of bits that can still be read.
    pub fn bits_remaining(&self) -> u64 {
        u64::from(self.bits_in_buffer) + (self.data.len() - self.byte_pos) as u64 * 8
    }

    /// Whether every bit of the input has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.bits_remaining() == 0
    }

    /// Ensure at least `count` bits are available in the buffer.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        while self.bits_in_buffer < count && self.byte_pos < self.data.len() {
            self.buffer = (self.buffer << 8) | u64::from(self.data[self.byte_pos]);
            self.byte_pos += 1;
            self.bits_in_buffer += 8;
        }

        if self.bits_in_buffer < count {
            let missing = usize::from(count - self.bits_in_buffer);
            return Err(OxiHuffError::unexpected_eof(missing.div_ceil(8)));
        }

        Ok(())
    }

    /// Read up to 32 bits from the stream.
    ///
    /// The first bit read ends up as the most significant of the `count`
    /// returned bits.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = (self.buffer >> shift) & mask;

        self.bits_in_buffer -= count;
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
        self.total_bits_read += u64::from(count);

        Ok(value as u32)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }
}
