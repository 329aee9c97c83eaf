//! Scalar record kinds
//!
//! | Kind               | Size class   | Encoding                  |
//! |--------------------|--------------|---------------------------|
//! | `ByteRecord`       | Static (1)   | the byte                  |
//! | `Int16Record`      | Static (2)   | i16 little-endian         |
//! | `Int32Record`      | Static (4)   | i32 little-endian         |
//! | `AsciiShortString` | Variable16   | raw ASCII bytes           |
//! | `Utf8String`       | Variable32   | raw UTF-8 bytes           |

use crate::error::{Error, Result};
use crate::record::Record;
use crate::size_class::SizeClass;
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

/// Check that a static record block has exactly the expected length
fn expect_len(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::LayoutMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Single unsigned byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteRecord(pub u8);

impl Record for ByteRecord {
    const SIZE_CLASS: SizeClass = SizeClass::Static;
    const STATIC_SIZE: usize = 1;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(vec![self.0])
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        expect_len(bytes, Self::STATIC_SIZE)?;
        Ok(ByteRecord(bytes[0]))
    }
}

impl From<u8> for ByteRecord {
    fn from(value: u8) -> Self {
        ByteRecord(value)
    }
}

impl From<ByteRecord> for u8 {
    fn from(record: ByteRecord) -> Self {
        record.0
    }
}

/// Signed 16-bit integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Int16Record(pub i16);

impl Record for Int16Record {
    const SIZE_CLASS: SizeClass = SizeClass::Static;
    const STATIC_SIZE: usize = 2;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.0.to_le_bytes().to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        expect_len(bytes, Self::STATIC_SIZE)?;
        Ok(Int16Record(LittleEndian::read_i16(bytes)))
    }
}

impl From<i16> for Int16Record {
    fn from(value: i16) -> Self {
        Int16Record(value)
    }
}

impl From<Int16Record> for i16 {
    fn from(record: Int16Record) -> Self {
        record.0
    }
}

/// Signed 32-bit integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Int32Record(pub i32);

impl Record for Int32Record {
    const SIZE_CLASS: SizeClass = SizeClass::Static;
    const STATIC_SIZE: usize = 4;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.0.to_le_bytes().to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        expect_len(bytes, Self::STATIC_SIZE)?;
        Ok(Int32Record(LittleEndian::read_i32(bytes)))
    }
}

impl From<i32> for Int32Record {
    fn from(value: i32) -> Self {
        Int32Record(value)
    }
}

impl From<Int32Record> for i32 {
    fn from(record: Int32Record) -> Self {
        record.0
    }
}

/// ASCII text of at most 65 535 bytes
///
/// Non-ASCII text is rejected both when constructing and when decoding, so
/// every value holds 7-bit ASCII only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AsciiShortString(String);

impl AsciiShortString {
    /// Maximum length in bytes
    pub const MAX_LEN: usize = u16::MAX as usize;

    /// Create from text, rejecting non-ASCII characters and oversized input
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if let Some(pos) = text.bytes().position(|b| !b.is_ascii()) {
            return Err(Error::EncodingError(format!(
                "non-ASCII byte at position {} in short string",
                pos
            )));
        }
        if text.len() > Self::MAX_LEN {
            return Err(Error::LengthOverflow {
                len: text.len(),
                size_class: Self::SIZE_CLASS,
            });
        }
        Ok(AsciiShortString(text))
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Record for AsciiShortString {
    const SIZE_CLASS: SizeClass = SizeClass::Variable16;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.0.as_bytes().to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
            return Err(Error::EncodingError(format!(
                "non-ASCII byte {:#04x} at position {} in short string",
                bytes[pos], pos
            )));
        }
        let text = std::str::from_utf8(bytes)?;
        Ok(AsciiShortString(text.to_owned()))
    }
}

impl TryFrom<&str> for AsciiShortString {
    type Error = Error;

    fn try_from(text: &str) -> Result<Self> {
        AsciiShortString::new(text)
    }
}

impl TryFrom<String> for AsciiShortString {
    type Error = Error;

    fn try_from(text: String) -> Result<Self> {
        AsciiShortString::new(text)
    }
}

impl fmt::Display for AsciiShortString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// UTF-8 text with a four byte length prefix
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Utf8String(String);

impl Utf8String {
    /// Create from any text
    pub fn new(text: impl Into<String>) -> Self {
        Utf8String(text.into())
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Record for Utf8String {
    const SIZE_CLASS: SizeClass = SizeClass::Variable32;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.0.as_bytes().to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Utf8String(String::from_utf8(bytes.to_vec())?))
    }
}

impl From<&str> for Utf8String {
    fn from(text: &str) -> Self {
        Utf8String(text.to_owned())
    }
}

impl From<String> for Utf8String {
    fn from(text: String) -> Self {
        Utf8String(text)
    }
}

impl From<Utf8String> for String {
    fn from(record: Utf8String) -> Self {
        record.0
    }
}

impl fmt::Display for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
