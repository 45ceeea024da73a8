//! Error types for OxiHuff operations.
//!
//! One error type covers every failure of an encode or decode run: I/O on
//! the input and output files, container format validation, and codes that
//! the container layout cannot represent.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O error on a named file.
    #[error("{}: {source}", path.display())]
    FileIo {
        /// The file that could not be opened, read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid signature at the start of a container.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Invalid header format.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Corrupted data in the container.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Unexpected end of file.
    #[error("Unexpected end of file: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// No code in the table matches the bits read.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// A derived code does not fit the container's code field.
    #[error("Code for symbol {symbol:#04x} is {length} bits long, limit is {max}")]
    CodeTooLong {
        /// Symbol whose code is too long.
        symbol: u8,
        /// Length of the derived code in bits.
        length: usize,
        /// Maximum allowed code length.
        max: u8,
    },

    /// Input exceeds what the 32-bit count fields can describe.
    #[error("Input too large: {size} bytes exceeds the 32-bit container limit")]
    InputTooLarge {
        /// Size of the rejected input.
        size: u64,
    },

    /// Invalid codec configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create a file I/O error carrying the failing path.
    pub fn file_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create a code too long error.
    pub fn code_too_long(symbol: u8, length: usize, max: u8) -> Self {
        Self::CodeTooLong {
            symbol,
            length,
            max,
        }
    }

    /// Create an input too large error.
    pub fn input_too_large(size: u64) -> Self {
        Self::InputTooLarge { size }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error means the input is not a valid container.
    ///
    /// Format errors are detected before any output is produced.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic { .. }
                | Self::InvalidHeader { .. }
                | Self::CorruptedData { .. }
                | Self::UnexpectedEof { .. }
                | Self::InvalidHuffmanCode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiHuffError::invalid_magic(vec![0x1F, 0xA0], vec![0x50, 0x4B]);
        assert!(err.to_string().contains("Invalid magic"));
        assert!(err.to_string().contains("1f"));

        let err = OxiHuffError::code_too_long(0x41, 25, 23);
        assert_eq!(
            err.to_string(),
            "Code for symbol 0x41 is 25 bits long, limit is 23"
        );

        let err = OxiHuffError::file_io(
            "missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(err.to_string(), "missing.txt: file not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: OxiHuffError = io_err.into();
        assert!(matches!(err, OxiHuffError::Io(_)));
    }

    #[test]
    fn test_format_error_classification() {
        assert!(OxiHuffError::invalid_magic(vec![0x1F], vec![0x00]).is_format_error());
        assert!(OxiHuffError::corrupted(6, "bad table").is_format_error());
        assert!(OxiHuffError::unexpected_eof(4).is_format_error());
        assert!(!OxiHuffError::input_too_large(1 << 33).is_format_error());
        assert!(!OxiHuffError::invalid_config("zero").is_format_error());
    }
}
