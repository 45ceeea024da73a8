//! # OxiHuff Core
//!
//! Core components for the OxiHuff Huffman codec.
//!
//! This crate provides the fundamental building blocks shared by the codec
//! and the command-line tool:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length codes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiHuff is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     oxihuff encode / decode                             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     Signature, code table, counts, payload              │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Histogram, Huffman tree, code table                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, errors                         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b1110, 4).unwrap();
//! let data = writer.into_inner().unwrap();
//! assert_eq!(data, vec![0xE0]);
//!
//! let mut reader = BitReader::new(&data);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1110);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiHuffError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{OxiHuffError, Result};
}
