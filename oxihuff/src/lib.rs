//! # OxiHuff
//!
//! Pure Rust byte-oriented Huffman compression.
//!
//! The encoder counts byte frequencies, builds a Huffman tree with a
//! deterministic tie-break, derives a prefix-free code per byte value and
//! packs the codes MSB-first behind a small header holding the code table.
//! The decoder validates the header and matches the payload bit by bit.
//!
//! - [`frequency`]: byte histogram
//! - [`tree`]: greedy tree construction
//! - [`codes`]: code derivation
//! - [`container`]: on-disk layout
//! - [`encode`] / [`decode`]: in-memory codec
//! - [`file`]: file-to-file entry points
//!
//! ## Example
//!
//! ```rust
//! use oxihuff::{decode, encode};
//!
//! let data = b"abracadabra";
//! let packed = encode(data).unwrap();
//! assert_eq!(&packed[..2], &[0x1F, 0xA0]);
//! assert_eq!(decode(&packed).unwrap(), data);
//! ```
//!
//! ## Inspecting a container
//!
//! ```rust
//! use oxihuff::{ContainerHeader, encode};
//!
//! let packed = encode(b"aaab").unwrap();
//! let header = ContainerHeader::parse(&mut packed.as_slice()).unwrap();
//! assert_eq!(header.table.len(), 2);
//! assert_eq!(header.symbol_count, 4);
//! assert_eq!(header.payload_len, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod codes;
pub mod config;
pub mod container;
pub mod decode;
pub mod encode;
pub mod file;
pub mod frequency;
pub mod tree;

// Re-exports
pub use codes::{Code, CodeTable};
pub use config::HuffmanConfig;
pub use container::{Container, ContainerHeader, MAGIC, MAX_CODE_LENGTH};
pub use decode::{DecodeTable, HuffmanDecoder, decode};
pub use encode::{HuffmanEncoder, PackedPayload, encode};
pub use file::{DecodeStats, EncodeStats, decode_file, encode_file};
pub use frequency::Histogram;
pub use oxihuff_core::{OxiHuffError, Result};
pub use tree::{HuffmanNode, HuffmanTree};
