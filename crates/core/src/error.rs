//! Error types for the seasnake codec
//!
//! Every failure surfaces synchronously from `encode`/`decode`. A container
//! whose `decode` failed is left in an unspecified (possibly partially cleared)
//! state and must be discarded, not reused.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::limits::LimitError;
use crate::size_class::SizeClass;
use thiserror::Error;

/// Result type alias for seasnake operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for encoding and decoding seasnake buffers
#[derive(Debug, Error)]
pub enum Error {
    /// Magic bytes missing or not `SSDB`
    #[error("Not a seasnake database: magic bytes do not match")]
    NotASeasnakeDatabase,

    /// Subformat tag differs from the one this container kind reads
    #[error("Subformat mismatch: expected {expected:#04x}, got {actual:#04x}")]
    SubformatMismatch {
        /// Subformat of the container kind
        expected: u8,
        /// Subformat found in the header
        actual: u8,
    },

    /// Element size class in the header differs from the element kind's
    #[error("Element size class mismatch: expected {expected}, got {actual}")]
    SizeClassMismatch {
        /// Size class of the element kind
        expected: SizeClass,
        /// Size class found in the header
        actual: SizeClass,
    },

    /// Size class wire value is reserved or out of range
    #[error("Unknown size class value: {0:#04x}")]
    UnknownSizeClass(u8),

    /// Embedded static element size differs from the element kind's
    #[error("Element size mismatch: expected {expected} bytes, header declares {actual}")]
    ElementSizeMismatch {
        /// Static size of the element kind
        expected: usize,
        /// Static size found in the header
        actual: usize,
    },

    /// Buffer ends inside the header
    #[error("Truncated header: needed {needed} bytes, {available} available")]
    TruncatedHeader {
        /// Bytes required to finish the current header field
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// Body framing is inconsistent with the declared element size class
    #[error("Corrupt body at offset {offset}: {reason}")]
    CorruptBody {
        /// Byte offset into the buffer where the problem was found
        offset: usize,
        /// What was wrong
        reason: String,
    },

    /// A record block disagrees with the fixed sizes of its parts
    #[error("Layout mismatch: expected {expected} bytes, got {actual}")]
    LayoutMismatch {
        /// Length implied by the record layout
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Text bytes are not valid for the record's encoding
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// A payload is too long for the length prefix of its size class
    #[error("Length {len} does not fit a {size_class} length prefix")]
    LengthOverflow {
        /// Payload length in bytes
        len: usize,
        /// Size class whose prefix was too narrow
        size_class: SizeClass,
    },

    /// Decoding exceeded a configured limit
    #[error("Limit exceeded: {0}")]
    LimitExceeded(#[from] LimitError),
}

impl Error {
    /// Create a corrupt body error at `offset`
    pub fn corrupt_body(offset: usize, reason: impl Into<String>) -> Self {
        Error::CorruptBody {
            offset,
            reason: reason.into(),
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Error::EncodingError(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Error::EncodingError(e.to_string())
    }
}
