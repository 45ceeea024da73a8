//! Huffman decompression (decoding).
//!
//! Decoding reads the payload one bit at a time and looks the accumulated
//! bits up in the code table once they are at least as long as the shortest
//! code. Because the table is prefix-free the first match is the only one.
//! Decoding stops as soon as the container's symbol count is reached, so the
//! zero padding of the last byte never yields extra symbols.

use crate::codes::{Code, CodeTable};
use crate::container::Container;
use oxihuff_core::BitReader;
use oxihuff_core::error::{OxiHuffError, Result};
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Reverse code table: code to symbol.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    lookup: HashMap<Code, u8>,
    min_length: u8,
    max_length: u8,
}

impl DecodeTable {
    /// Build the reverse mapping of `table`.
    pub fn new(table: &CodeTable) -> Self {
        Self {
            lookup: table.iter().map(|(sym, code)| (code, sym)).collect(),
            min_length: table.min_code_len(),
            max_length: table.max_code_len(),
        }
    }

    /// The symbol whose code is exactly `code`.
    pub fn lookup(&self, code: Code) -> Option<u8> {
        self.lookup.get(&code).copied()
    }

    /// Length of the shortest code.
    pub fn min_length(&self) -> u8 {
        self.min_length
    }

    /// Length of the longest code.
    pub fn max_length(&self) -> u8 {
        self.max_length
    }
}

/// Decode `symbol_count` symbols from a packed payload.
pub fn unpack_symbols(payload: &[u8], table: &DecodeTable, symbol_count: u32) -> Result<Vec<u8>> {
    let symbol_count = symbol_count as usize;
    let mut reader = BitReader::new(payload);
    // Every symbol takes at least one bit
    let mut output = Vec::with_capacity(symbol_count.min(payload.len() * 8));
    let mut candidate = Code::new(0, 0);

    while output.len() < symbol_count {
        let bit = match reader.read_bit() {
            Ok(bit) => bit,
            Err(OxiHuffError::UnexpectedEof { .. }) => {
                return Err(OxiHuffError::corrupted(
                    payload.len() as u64,
                    format!(
                        "payload ended after {} of {} symbols",
                        output.len(),
                        symbol_count
                    ),
                ));
            }
            Err(e) => return Err(e),
        };
        candidate = candidate.push(bit);

        if candidate.length() < table.min_length() {
            continue;
        }

        if let Some(symbol) = table.lookup(candidate) {
            output.push(symbol);
            candidate = Code::new(0, 0);
        } else if candidate.length() >= table.max_length() {
            let start = reader.bit_position() - u64::from(candidate.length());
            return Err(OxiHuffError::invalid_huffman(start));
        }
    }

    debug!(
        symbols = output.len(),
        bits = reader.bits_read(),
        unused_bits = reader.bits_remaining(),
        "unpacked payload"
    );
    Ok(output)
}

/// Huffman decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanDecoder;

impl HuffmanDecoder {
    /// Create a decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decode a parsed container.
    pub fn decode_container(&self, container: &Container) -> Result<Vec<u8>> {
        let table = DecodeTable::new(&container.table);
        unpack_symbols(&container.payload, &table, container.symbol_count)
    }

    /// Read a container from `reader` and decode it.
    pub fn decode_from<R: Read>(&self, reader: &mut R) -> Result<Vec<u8>> {
        let container = Container::read_from(reader)?;
        self.decode_container(&container)
    }

    /// Decode an in-memory container.
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let container = Container::from_bytes(data)?;
        self.decode_container(&container)
    }
}

/// Decompress an in-memory container.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::new().decompress(data)
}
