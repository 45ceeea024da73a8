//! On-disk container layout.
//!
//! All multi-byte integers are unsigned big-endian:
//!
//! ```text
//! +--------+-----------+-------------------+-------------+--------------+---------+
//! | 1F A0  | TableSize | TableSize entries | SymbolCount | PayloadBytes | Payload |
//! | 2 B    | 4 B       | 5 B each          | 4 B         | 4 B          | n B     |
//! +--------+-----------+-------------------+-------------+--------------+---------+
//! ```
//!
//! A table entry is one symbol byte followed by a 32-bit packed code: the top
//! byte holds the code length `L` and the low 24 bits hold the code shifted
//! left by one, so its first bit sits at bit position `L` and bit 0 is always
//! zero. That leaves room for codes of at most 23 bits.

use crate::codes::{Code, CodeTable};
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{self, Read, Write};
use tracing::debug;

/// Container signature.
pub const MAGIC: [u8; 2] = [0x1F, 0xA0];

/// Longest code the table entry layout can hold.
pub const MAX_CODE_LENGTH: u8 = 23;

/// Largest possible number of table entries (one per byte value).
pub const MAX_TABLE_SIZE: usize = 256;

/// Size of one serialized table entry.
pub const TABLE_ENTRY_SIZE: usize = 5;

/// Offset of the first table entry.
const TABLE_OFFSET: u64 = 6;

/// Pack a code into the 32-bit table entry field.
pub fn pack_code(code: Code) -> u32 {
    debug_assert!(code.length() >= 1 && code.length() <= MAX_CODE_LENGTH);
    (u32::from(code.length()) << 24) | (code.bits() << 1)
}

/// Unpack the 32-bit table entry field, rejecting malformed values.
///
/// `offset` is the byte offset of the entry, used for error reporting.
pub fn unpack_code(field: u32, offset: u64) -> Result<Code> {
    let length = (field >> 24) as u8;
    if length == 0 || length > MAX_CODE_LENGTH {
        return Err(OxiHuffError::corrupted(
            offset,
            format!("code length {length} out of range 1..={MAX_CODE_LENGTH}"),
        ));
    }

    let value = field & 0x00FF_FFFF;
    if value & 1 != 0 || value >> (u32::from(length) + 1) != 0 {
        return Err(OxiHuffError::corrupted(
            offset,
            format!("code field {value:#08x} has bits outside its {length}-bit code"),
        ));
    }

    Ok(Code::new(value >> 1, length))
}

/// Read exactly `buf.len()` bytes, reporting a short read as `UnexpectedEof`.
fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => OxiHuffError::unexpected_eof(buf.len()),
        _ => OxiHuffError::Io(e),
    })
}

fn read_u32_be<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_exact_or_eof(reader, &mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| OxiHuffError::input_too_large(value as u64))
}

/// Everything in a container before the payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Code table.
    pub table: CodeTable,
    /// Number of symbols (original bytes) in the payload.
    pub symbol_count: u32,
    /// Number of payload bytes following the header.
    pub payload_len: u32,
}

impl ContainerHeader {
    /// Serialized size of this header in bytes.
    pub fn encoded_len(&self) -> usize {
        MAGIC.len() + 4 + self.table.len() * TABLE_ENTRY_SIZE + 4 + 4
    }

    /// Parse and validate a header.
    ///
    /// The signature is checked first; nothing else is read from a stream
    /// that does not start with [`MAGIC`].
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 2];
        read_exact_or_eof(reader, &mut magic)?;
        if magic != MAGIC {
            return Err(OxiHuffError::invalid_magic(MAGIC, magic));
        }

        let table_size = read_u32_be(reader)? as usize;
        if table_size == 0 || table_size > MAX_TABLE_SIZE {
            return Err(OxiHuffError::invalid_header(format!(
                "table size {table_size} out of range 1..={MAX_TABLE_SIZE}"
            )));
        }

        let mut entries = vec![0u8; table_size * TABLE_ENTRY_SIZE];
        read_exact_or_eof(reader, &mut entries)?;

        let mut table = CodeTable::new();
        for (i, entry) in entries.chunks_exact(TABLE_ENTRY_SIZE).enumerate() {
            let offset = TABLE_OFFSET + (i * TABLE_ENTRY_SIZE) as u64;
            let symbol = entry[0];
            let field = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]);
            let code = unpack_code(field, offset + 1)?;

            if table.insert(symbol, code).is_some() {
                return Err(OxiHuffError::corrupted(
                    offset,
                    format!("duplicate table entry for symbol {symbol:#04x}"),
                ));
            }
        }

        if !table.is_prefix_free() {
            return Err(OxiHuffError::corrupted(
                TABLE_OFFSET,
                "code table is not prefix-free",
            ));
        }

        let symbol_count = read_u32_be(reader)?;
        if symbol_count == 0 {
            return Err(OxiHuffError::invalid_header("symbol count is zero"));
        }
        let payload_len = read_u32_be(reader)?;

        debug!(
            symbols = table.len(),
            symbol_count, payload_len, "parsed container header"
        );

        Ok(Self {
            table,
            symbol_count,
            payload_len,
        })
    }

    /// Serialize the header.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&MAGIC)?;
        writer.write_all(&to_u32(self.table.len())?.to_be_bytes())?;

        let mut entries = Vec::with_capacity(self.table.len() * TABLE_ENTRY_SIZE);
        for (symbol, code) in self.table.iter() {
            if code.length() > MAX_CODE_LENGTH {
                return Err(OxiHuffError::code_too_long(
                    symbol,
                    usize::from(code.length()),
                    MAX_CODE_LENGTH,
                ));
            }
            entries.push(symbol);
            entries.extend_from_slice(&pack_code(code).to_be_bytes());
        }
        writer.write_all(&entries)?;

        writer.write_all(&self.symbol_count.to_be_bytes())?;
        writer.write_all(&self.payload_len.to_be_bytes())?;
        Ok(())
    }
}

/// A complete container: code table, symbol count and packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Code table.
    pub table: CodeTable,
    /// Number of symbols (original bytes) in the payload.
    pub symbol_count: u32,
    /// MSB-first packed codes, zero-padded to a whole byte.
    pub payload: Vec<u8>,
}

impl Container {
    /// Create a container.
    pub fn new(table: CodeTable, symbol_count: u32, payload: Vec<u8>) -> Self {
        Self {
            table,
            symbol_count,
            payload,
        }
    }

    /// The header describing this container.
    pub fn header(&self) -> Result<ContainerHeader> {
        Ok(ContainerHeader {
            table: self.table.clone(),
            symbol_count: self.symbol_count,
            payload_len: to_u32(self.payload.len())?,
        })
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        MAGIC.len() + 4 + self.table.len() * TABLE_ENTRY_SIZE + 4 + 4 + self.payload.len()
    }

    /// Serialize the container.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.header()?.write(writer)?;
        writer.write_all(&self.payload)?;
        Ok(())
    }

    /// Serialize the container into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Parse a container. Bytes after the payload are not read.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let header = ContainerHeader::parse(reader)?;

        let expected = header.payload_len as usize;
        let mut payload = Vec::new();
        reader
            .by_ref()
            .take(u64::from(header.payload_len))
            .read_to_end(&mut payload)?;
        if payload.len() < expected {
            return Err(OxiHuffError::unexpected_eof(expected - payload.len()));
        }

        Ok(Self {
            table: header.table,
            symbol_count: header.symbol_count,
            payload,
        })
    }

    /// Parse a container from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = data;
        Self::read_from(&mut reader)
    }
}
