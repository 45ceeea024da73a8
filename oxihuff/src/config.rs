//! Encoder configuration.

use crate::container::MAX_CODE_LENGTH;
use oxihuff_core::error::{OxiHuffError, Result};

/// Huffman encoder configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanConfig {
    /// Longest code, in bits, the encoder accepts before failing.
    ///
    /// Inputs whose optimal tree is deeper than this are rejected with
    /// `CodeTooLong` rather than re-balanced.
    pub max_code_length: u8,
}

impl HuffmanConfig {
    /// Configuration matching the container's code field: codes up to 23 bits.
    pub const CONTAINER: Self = Self {
        max_code_length: MAX_CODE_LENGTH,
    };

    /// Create a configuration with a custom code length limit.
    pub fn new(max_code_length: u8) -> Self {
        Self { max_code_length }
    }

    /// Check the configuration against the container limits.
    pub fn validate(&self) -> Result<()> {
        if self.max_code_length == 0 || self.max_code_length > MAX_CODE_LENGTH {
            return Err(OxiHuffError::invalid_config(format!(
                "max code length must be in 1..={MAX_CODE_LENGTH}, got {}",
                self.max_code_length
            )));
        }
        Ok(())
    }
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self::CONTAINER
    }
}
