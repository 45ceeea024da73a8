//! File-to-file encode and decode.
//!
//! Both operations read their whole input into memory. Decoding finishes
//! before the output file is created, so a malformed container never leaves
//! a partial output behind.

use crate::config::HuffmanConfig;
use crate::decode::HuffmanDecoder;
use crate::encode::HuffmanEncoder;
use oxihuff_core::error::{OxiHuffError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of a file encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    /// Size of the input file.
    pub input_bytes: u64,
    /// Size of the container written.
    pub output_bytes: u64,
    /// Number of distinct byte values (table entries).
    pub distinct_symbols: usize,
}

impl EncodeStats {
    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Outcome of a file decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    /// Size of the container read.
    pub input_bytes: u64,
    /// Size of the decoded output written.
    pub output_bytes: u64,
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| OxiHuffError::file_io(path, e))
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).map_err(|e| OxiHuffError::file_io(path, e))
}

/// Encode the file at `input` into a container at `output`.
///
/// An empty input is not an error: nothing is written, `output` is not
/// created, and `Ok(None)` is returned.
pub fn encode_file(
    input: &Path,
    output: &Path,
    config: &HuffmanConfig,
) -> Result<Option<EncodeStats>> {
    let encoder = HuffmanEncoder::with_config(*config)?;
    let data = read_file(input)?;

    let Some(container) = encoder.build_container(&data)? else {
        warn!(input = %input.display(), "input is empty, no output written");
        return Ok(None);
    };

    let bytes = container.to_bytes()?;
    write_file(output, &bytes)?;

    let stats = EncodeStats {
        input_bytes: data.len() as u64,
        output_bytes: bytes.len() as u64,
        distinct_symbols: container.table.len(),
    };
    debug!(
        input = %input.display(),
        output = %output.display(),
        input_bytes = stats.input_bytes,
        output_bytes = stats.output_bytes,
        "encoded file"
    );
    Ok(Some(stats))
}

/// Decode the container at `input` into `output`.
pub fn decode_file(input: &Path, output: &Path) -> Result<DecodeStats> {
    let data = read_file(input)?;
    let decoded = HuffmanDecoder::new().decompress(&data)?;
    write_file(output, &decoded)?;

    let stats = DecodeStats {
        input_bytes: data.len() as u64,
        output_bytes: decoded.len() as u64,
    };
    debug!(
        input = %input.display(),
        output = %output.display(),
        output_bytes = stats.output_bytes,
        "decoded file"
    );
    Ok(stats)
}
