//! Container header format.
//!
//! Every seasnake buffer starts with a header that describes how its body is
//! framed.
//!
//! # Header Layout
//!
//! ```text
//! ┌────────────┬───────────────┬──────────────┬──────────────────────┐
//! │ Magic (4)  │ Subformat (1) │ Desc Len (1) │ Description (0-255)  │
//! └────────────┴───────────────┴──────────────┴──────────────────────┘
//! ┌─────────────────────┬──────────────────────────────────────────┐
//! │ Element Size (1)    │ Static Size (4, only if element Static)  │
//! └─────────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! - **Magic**: `SSDB` (0x53 0x53 0x44 0x42)
//! - **Subformat**: 0x00 for a plain record sequence
//! - **Description**: UTF-8, truncated to 255 bytes at a character boundary on write
//! - **Element Size**: size class wire value (0, 1, 2 or 4)
//! - **Static Size**: u32 LE, the fixed element length
//!
//! All integers are little-endian.

use byteorder::{ByteOrder, LittleEndian};
use seasnake_core::{Error, Limits, Record, Result, SizeClass, MAX_DESCRIPTION_BYTES};

/// Magic bytes identifying a seasnake buffer: "SSDB"
pub const SEASNAKE_MAGIC: [u8; 4] = *b"SSDB";

/// Subformat tag of a plain ordered record sequence
pub const SUBFORMAT_SEQUENCE: u8 = 0x00;

/// Size of the fixed part of the header (magic + subformat + desc len + size class)
pub const HEADER_MIN_SIZE: usize = 7;

/// Truncate a description to what the header can carry
///
/// Cuts at the last character boundary at or below 255 bytes.
pub fn truncate_description(text: &str) -> &str {
    if text.len() <= MAX_DESCRIPTION_BYTES {
        return text;
    }
    let mut end = MAX_DESCRIPTION_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Parsed container header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Subformat tag
    pub subformat: u8,
    /// Short description, at most 255 bytes
    pub description: String,
    /// Size class of every body element
    pub size_class: SizeClass,
    /// Fixed element length, present iff `size_class` is `Static`
    pub static_size: Option<usize>,
}

impl ContainerHeader {
    /// Build the header for a body of `T` elements
    pub fn for_elements<T: Record>(subformat: u8, description: &str) -> Self {
        ContainerHeader {
            subformat,
            description: truncate_description(description).to_owned(),
            size_class: T::SIZE_CLASS,
            static_size: T::SIZE_CLASS.is_static().then_some(T::STATIC_SIZE),
        }
    }

    /// Encoded length of this header in bytes
    pub fn encoded_len(&self) -> usize {
        HEADER_MIN_SIZE
            + truncate_description(&self.description).len()
            + self.static_size.map_or(0, |_| 4)
    }

    /// Append the encoded header to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let description = truncate_description(&self.description);
        out.extend_from_slice(&SEASNAKE_MAGIC);
        out.push(self.subformat);
        out.push(description.len() as u8);
        out.extend_from_slice(description.as_bytes());
        out.push(self.size_class.to_wire());
        if let Some(size) = self.static_size {
            let size = u32::try_from(size).map_err(|_| Error::LengthOverflow {
                len: size,
                size_class: SizeClass::Variable32,
            })?;
            out.extend_from_slice(&size.to_le_bytes());
        }
        Ok(())
    }

    /// Parse a header from the front of `bytes`
    ///
    /// Checks the magic and that the subformat equals `expected_subformat`
    /// before reading anything else. Returns the header and the offset at
    /// which the body starts.
    pub fn read(
        bytes: &[u8],
        expected_subformat: u8,
        limits: &Limits,
    ) -> Result<(Self, usize)> {
        if bytes.len() < SEASNAKE_MAGIC.len() || bytes[..4] != SEASNAKE_MAGIC {
            return Err(Error::NotASeasnakeDatabase);
        }
        let mut reader = ByteReader::new(bytes);
        reader.advance(SEASNAKE_MAGIC.len());

        let subformat = reader.header_u8()?;
        if subformat != expected_subformat {
            return Err(Error::SubformatMismatch {
                expected: expected_subformat,
                actual: subformat,
            });
        }

        let desc_len = reader.header_u8()? as usize;
        limits.validate_description_len(desc_len)?;
        let description = if desc_len > 0 {
            std::str::from_utf8(reader.header_bytes(desc_len)?)?.to_owned()
        } else {
            String::new()
        };

        let size_class = SizeClass::from_wire(reader.header_u8()?)?;
        let static_size = if size_class.is_static() {
            Some(LittleEndian::read_u32(reader.header_bytes(4)?) as usize)
        } else {
            None
        };

        let header = ContainerHeader {
            subformat,
            description,
            size_class,
            static_size,
        };
        Ok((header, reader.position()))
    }
}

/// Forward-only cursor over a borrowed buffer
#[derive(Debug)]
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        ByteReader { bytes, pos: 0 }
    }

    pub(crate) fn at(bytes: &'a [u8], pos: usize) -> Self {
        ByteReader { bytes, pos }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    /// Take the next `n` bytes, or `None` if fewer remain
    pub(crate) fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if n > self.remaining() {
            return None;
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Some(slice)
    }

    fn header_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        self.take(n).ok_or(Error::TruncatedHeader {
            needed: n,
            available,
        })
    }

    fn header_u8(&mut self) -> Result<u8> {
        Ok(self.header_bytes(1)?[0])
    }
}
