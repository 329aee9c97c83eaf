//! Size classification for encoded records
//!
//! Every record kind declares how its encoded length is framed:
//!
//! - `Static`: the length is fixed per kind and never written inline
//! - `Variable8` / `Variable16` / `Variable32`: the length is written inline
//!   as a 1, 2 or 4 byte little-endian prefix
//!
//! The discriminant doubles as the prefix width in bytes, which is also the
//! value stored on the wire. Value 3 is reserved and never valid.

use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

/// Size class of a record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SizeClass {
    /// Fixed encoded length, no prefix
    Static = 0,
    /// Length prefix of one byte
    Variable8 = 1,
    /// Length prefix of two bytes (u16 LE)
    Variable16 = 2,
    /// Length prefix of four bytes (u32 LE)
    Variable32 = 4,
}

impl SizeClass {
    /// Wire value of this size class
    pub const fn to_wire(self) -> u8 {
        self as u8
    }

    /// Parse a wire value
    ///
    /// Returns `Error::UnknownSizeClass` for the reserved value 3 and anything above 4.
    pub fn from_wire(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(SizeClass::Static),
            1 => Ok(SizeClass::Variable8),
            2 => Ok(SizeClass::Variable16),
            4 => Ok(SizeClass::Variable32),
            other => Err(Error::UnknownSizeClass(other)),
        }
    }

    /// Number of bytes used by a length prefix of this class (0 for `Static`)
    pub const fn prefix_width(self) -> usize {
        self as usize
    }

    /// Whether the class is `Static`
    pub const fn is_static(self) -> bool {
        matches!(self, SizeClass::Static)
    }

    /// Largest payload length a prefix of this class can describe
    ///
    /// `None` for `Static`, which has no prefix.
    pub const fn max_len(self) -> Option<usize> {
        match self {
            SizeClass::Static => None,
            SizeClass::Variable8 => Some(u8::MAX as usize),
            SizeClass::Variable16 => Some(u16::MAX as usize),
            SizeClass::Variable32 => Some(u32::MAX as usize),
        }
    }

    /// The smaller of two classes by ordinal, preferring `self` on ties
    pub const fn min(self, other: SizeClass) -> SizeClass {
        if (self as u8) <= (other as u8) {
            self
        } else {
            other
        }
    }

    /// The larger of two classes by ordinal, preferring `self` on ties
    pub const fn max(self, other: SizeClass) -> SizeClass {
        if (self as u8) >= (other as u8) {
            self
        } else {
            other
        }
    }

    /// Size class of a pair whose key and value have the given classes
    ///
    /// Two static halves stay static. A `Variable8` half next to a static or
    /// another `Variable8` half fits a two byte prefix. Everything else needs
    /// the full four bytes.
    pub const fn for_pair(key: SizeClass, value: SizeClass) -> SizeClass {
        match (key, value) {
            (SizeClass::Static, SizeClass::Static) => SizeClass::Static,
            (SizeClass::Variable8, SizeClass::Static)
            | (SizeClass::Static, SizeClass::Variable8)
            | (SizeClass::Variable8, SizeClass::Variable8) => SizeClass::Variable16,
            _ => SizeClass::Variable32,
        }
    }

    /// Append a length prefix for `len` to `out`
    ///
    /// Writes nothing for `Static`. Fails with `Error::LengthOverflow` when
    /// `len` does not fit the prefix width.
    pub fn write_len(self, len: usize, out: &mut Vec<u8>) -> Result<()> {
        if let Some(max) = self.max_len() {
            if len > max {
                return Err(Error::LengthOverflow {
                    len,
                    size_class: self,
                });
            }
        }
        match self {
            SizeClass::Static => {}
            SizeClass::Variable8 => out.push(len as u8),
            SizeClass::Variable16 => {
                let mut buf = [0u8; 2];
                LittleEndian::write_u16(&mut buf, len as u16);
                out.extend_from_slice(&buf);
            }
            SizeClass::Variable32 => {
                let mut buf = [0u8; 4];
                LittleEndian::write_u32(&mut buf, len as u32);
                out.extend_from_slice(&buf);
            }
        }
        Ok(())
    }

    /// Read a length prefix of this class from the front of `bytes`
    ///
    /// Returns `None` when `bytes` is shorter than the prefix width.
    /// A `Static` class reads nothing and yields 0.
    pub fn read_len(self, bytes: &[u8]) -> Option<usize> {
        let width = self.prefix_width();
        if bytes.len() < width {
            return None;
        }
        let len = match self {
            SizeClass::Static => 0,
            SizeClass::Variable8 => bytes[0] as usize,
            SizeClass::Variable16 => LittleEndian::read_u16(&bytes[..2]) as usize,
            SizeClass::Variable32 => LittleEndian::read_u32(&bytes[..4]) as usize,
        };
        Some(len)
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SizeClass::Static => "Static",
            SizeClass::Variable8 => "Variable8",
            SizeClass::Variable16 => "Variable16",
            SizeClass::Variable32 => "Variable32",
        };
        f.write_str(name)
    }
}
