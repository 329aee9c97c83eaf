//! Core types for the seasnake container format
//!
//! This crate defines the record side of the codec:
//! - SizeClass: how a record kind's encoded length is framed
//! - Record: the serialize/deserialize contract every element implements
//! - Scalar records: byte, i16, i32, ASCII short string, UTF-8 string
//! - PairRecord: a key/value composite record
//! - Error: error type shared by the whole codec
//! - Limits: decode bounds for untrusted input

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod pair;
pub mod record;
pub mod scalar;
pub mod size_class;

pub use error::{Error, Result};
pub use limits::{LimitError, Limits, MAX_DESCRIPTION_BYTES};
pub use pair::PairRecord;
pub use record::Record;
pub use scalar::{AsciiShortString, ByteRecord, Int16Record, Int32Record, Utf8String};
pub use size_class::SizeClass;
