//! Huffman compression (encoding).

use crate::codes::CodeTable;
use crate::config::HuffmanConfig;
use crate::container::Container;
use crate::frequency::Histogram;
use crate::tree::HuffmanTree;
use oxihuff_core::BitWriter;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::Write;
use tracing::debug;

/// Codes of an input packed into bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedPayload {
    /// MSB-first packed codes, the last byte zero-padded.
    pub bytes: Vec<u8>,
    /// Number of symbols packed.
    pub symbol_count: u32,
}

/// Pack the code of every byte of `data`, in input order.
pub fn pack_symbols(data: &[u8], table: &CodeTable) -> Result<PackedPayload> {
    let symbol_count =
        u32::try_from(data.len()).map_err(|_| OxiHuffError::input_too_large(data.len() as u64))?;

    let mut writer = BitWriter::new(Vec::with_capacity(data.len() / 2 + 1));
    for (pos, &byte) in data.iter().enumerate() {
        let code = table.get(byte).ok_or_else(|| {
            OxiHuffError::corrupted(pos as u64, format!("symbol {byte:#04x} has no code"))
        })?;
        writer.write_bits(code.bits(), code.length())?;
    }

    let bits = writer.bits_written();
    let bytes = writer.into_inner()?;
    debug!(bits, bytes = bytes.len(), "packed payload");

    Ok(PackedPayload {
        bytes,
        symbol_count,
    })
}

/// Huffman encoder.
#[derive(Debug, Clone, Default)]
pub struct HuffmanEncoder {
    config: HuffmanConfig,
}

impl HuffmanEncoder {
    /// Create an encoder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with a custom configuration.
    pub fn with_config(config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The encoder configuration.
    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    /// Build the container for `data`.
    ///
    /// Returns `None` for empty input, which has nothing to encode.
    pub fn build_container(&self, data: &[u8]) -> Result<Option<Container>> {
        if data.len() as u64 > u64::from(u32::MAX) {
            return Err(OxiHuffError::input_too_large(data.len() as u64));
        }

        let histogram = Histogram::from_bytes(data);
        let Some(tree) = HuffmanTree::from_histogram(&histogram) else {
            debug!("empty input, nothing to encode");
            return Ok(None);
        };
        debug!(
            input = data.len(),
            distinct = histogram.distinct(),
            "encoding"
        );

        let table = CodeTable::from_tree(tree, self.config.max_code_length)?;
        let payload = pack_symbols(data, &table)?;

        Ok(Some(Container::new(
            table,
            payload.symbol_count,
            payload.bytes,
        )))
    }

    /// Encode `data` and write the container to `writer`.
    ///
    /// Returns the number of bytes written; empty input writes nothing.
    pub fn encode_to<W: Write>(&self, data: &[u8], writer: &mut W) -> Result<usize> {
        match self.build_container(data)? {
            Some(container) => {
                container.write_to(writer)?;
                Ok(container.encoded_len())
            }
            None => Ok(0),
        }
    }

    /// Encode `data` into a new buffer; empty input gives an empty buffer.
    pub fn compress_to_vec(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self.build_container(data)? {
            Some(container) => container.to_bytes(),
            None => Ok(Vec::new()),
        }
    }
}

/// Compress data with the default configuration.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanEncoder::new().compress_to_vec(data)
}
