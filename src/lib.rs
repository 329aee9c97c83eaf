//! Seasnake - self-describing binary container format for typed records
//!
//! A seasnake buffer is a small header (magic `SSDB`, subformat, description,
//! element size class) followed by a body of homogeneous records. The size
//! class of the element type decides whether each element carries a 1, 2 or
//! 4 byte length prefix or none at all.
//!
//! # Quick Start
//!
//! ```
//! use seasnake::{AssociativeContainer, ByteRecord, Database, Utf8String};
//!
//! let mut names = AssociativeContainer::<ByteRecord, Utf8String>::with_description("names");
//! names.insert(ByteRecord(1), Utf8String::from("one"));
//!
//! let bytes = names.encode()?;
//! let decoded = AssociativeContainer::<ByteRecord, Utf8String>::from_slice(&bytes)?;
//! assert_eq!(decoded, names);
//! # Ok::<(), seasnake::Error>(())
//! ```
//!
//! # Architecture
//!
//! Records and their framing live in `seasnake-core`; headers and containers
//! live in `seasnake-format`. Both are re-exported here. Reading and writing
//! buffers to disk is left to the caller.

pub use seasnake_core::*;
pub use seasnake_format::*;
