//! Decode limits
//!
//! A seasnake buffer declares its own element lengths, so a hostile or
//! corrupted buffer can ask for very large allocations. `Limits` bounds what
//! `decode_with_limits` will accept. Violations result in `LimitError`.
//!
//! The default limits are the format maxima: anything `encode` can produce
//! decodes under `Limits::default()`.

use thiserror::Error;

/// Maximum description length the header can carry
pub const MAX_DESCRIPTION_BYTES: usize = u8::MAX as usize;

/// Bounds enforced while decoding a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of elements in one container body (default: unbounded)
    pub max_elements: usize,

    /// Maximum payload length of a single element in bytes (default: u32::MAX)
    pub max_element_bytes: usize,

    /// Maximum description length in bytes (default: 255)
    pub max_description_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_elements: usize::MAX,
            max_element_bytes: u32::MAX as usize,
            max_description_bytes: MAX_DESCRIPTION_BYTES,
        }
    }
}

impl Limits {
    /// Same as `Default`; spelled out for call sites that want to be explicit
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Create limits with small values for testing
    ///
    /// Useful for unit tests that exercise limit enforcement without
    /// building very large buffers.
    pub fn with_small_limits() -> Self {
        Limits {
            max_elements: 16,
            max_element_bytes: 64,
            max_description_bytes: 16,
        }
    }

    /// Validate the number of elements decoded so far
    pub fn validate_element_count(&self, count: usize) -> Result<(), LimitError> {
        if count > self.max_elements {
            return Err(LimitError::TooManyElements {
                actual: count,
                max: self.max_elements,
            });
        }
        Ok(())
    }

    /// Validate a declared element length before reading it
    pub fn validate_element_len(&self, len: usize) -> Result<(), LimitError> {
        if len > self.max_element_bytes {
            return Err(LimitError::ElementTooLarge {
                actual: len,
                max: self.max_element_bytes,
            });
        }
        Ok(())
    }

    /// Validate a declared description length
    pub fn validate_description_len(&self, len: usize) -> Result<(), LimitError> {
        if len > self.max_description_bytes {
            return Err(LimitError::DescriptionTooLong {
                actual: len,
                max: self.max_description_bytes,
            });
        }
        Ok(())
    }
}

/// Limit validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    /// Body holds more elements than allowed
    #[error("Too many elements: {actual} exceeds maximum {max}")]
    TooManyElements {
        /// Element count reached
        actual: usize,
        /// Maximum allowed count
        max: usize,
    },

    /// An element declares a payload longer than allowed
    #[error("Element too large: {actual} bytes exceeds maximum {max}")]
    ElementTooLarge {
        /// Declared payload length
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Description longer than allowed
    #[error("Description too long: {actual} bytes exceeds maximum {max}")]
    DescriptionTooLong {
        /// Declared description length
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}
