//! Container layer of the seasnake format
//!
//! This crate turns typed record sequences into self-describing byte buffers
//! and back:
//!
//! - `header`: magic, subformat, description and element framing
//! - `container`: plain ordered record sequence (subformat 0x00)
//! - `associative`: key/value map whose wire form is a sequence of pairs
//! - `database`: the encode/decode contract both containers implement
//!
//! # Example
//!
//! ```
//! use seasnake_core::Int32Record;
//! use seasnake_format::{Container, Database};
//!
//! let ints: Container<Int32Record> =
//!     Container::with_items("ints", [1, -5, 100_000].into_iter().map(Int32Record::from));
//! let bytes = ints.encode().unwrap();
//! assert_eq!(&bytes[..4], b"SSDB");
//!
//! let decoded = Container::<Int32Record>::from_slice(&bytes).unwrap();
//! assert_eq!(decoded, ints);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod associative;
pub mod container;
pub mod database;
pub mod header;

pub use associative::AssociativeContainer;
pub use container::Container;
pub use database::Database;
pub use header::{
    truncate_description, ContainerHeader, HEADER_MIN_SIZE, SEASNAKE_MAGIC, SUBFORMAT_SEQUENCE,
};
