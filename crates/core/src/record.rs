//! The record contract
//!
//! A record is the unit a container stores. Each record kind fixes its
//! [`SizeClass`] at compile time, which lets a container decide once, in its
//! header, how every element is framed.

use crate::error::Result;
use crate::limits::Limits;
use crate::size_class::SizeClass;

/// A value that can serialize itself to and from a byte block
///
/// # Contract
///
/// - `to_bytes` is a pure function of the current value.
/// - For `Static` kinds, `to_bytes` always yields exactly `STATIC_SIZE` bytes
///   and `from_bytes` expects exactly that many.
/// - For variable kinds, `to_bytes` must yield at most
///   `SIZE_CLASS.max_len()` bytes; containers report `LengthOverflow` otherwise.
/// - `from_bytes(&to_bytes(v)?)` reproduces `v`.
pub trait Record: Sized {
    /// Size class shared by every value of this kind
    const SIZE_CLASS: SizeClass;

    /// Encoded length when `SIZE_CLASS` is `Static`, otherwise 0
    ///
    /// Only meaningful for static kinds.
    const STATIC_SIZE: usize = 0;

    /// Serialize the value into a fresh byte block
    ///
    /// Scalar records never fail. Composite records fail with
    /// `LengthOverflow` when a part is too long for its framing.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Reconstruct a value from a block produced by `to_bytes`
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Reconstruct a value, enforcing `limits` on anything framed inside it
    ///
    /// Records that embed whole containers override this so that decode
    /// limits reach nested buffers. Flat records ignore `limits`.
    fn from_bytes_with_limits(bytes: &[u8], limits: &Limits) -> Result<Self> {
        let _ = limits;
        Self::from_bytes(bytes)
    }

    /// Size class of this value's kind
    fn size_class(&self) -> SizeClass {
        Self::SIZE_CLASS
    }

    /// Static size of this value's kind (0 unless `Static`)
    fn static_size(&self) -> usize {
        Self::STATIC_SIZE
    }
}
