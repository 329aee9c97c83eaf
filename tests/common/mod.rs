//! Shared fixtures for the integration test suites.
//!
//! Import via `mod common;` from any test file.

#![allow(dead_code)]

use seasnake::{
    AsciiShortString, AssociativeContainer, ByteRecord, Container, Int16Record, Int32Record,
    Utf8String,
};

/// The reference `ints` container: `[1, -5, 100000]`
pub fn reference_ints() -> Container<Int32Record> {
    Container::with_items("ints", [1, -5, 100_000].into_iter().map(Int32Record::from))
}

/// Exact encoding of [`reference_ints`]
pub fn reference_ints_bytes() -> Vec<u8> {
    vec![
        0x53, 0x53, 0x44, 0x42, 0x00, 0x04, 0x69, 0x6E, 0x74, 0x73, 0x00, 0x04, 0x00, 0x00, 0x00,
        0x01, 0x00, 0x00, 0x00, 0xFB, 0xFF, 0xFF, 0xFF, 0xA0, 0x86, 0x01, 0x00,
    ]
}

/// Short strings of increasing length
pub fn short_strings(count: usize) -> Container<AsciiShortString> {
    Container::with_items(
        "short strings",
        (0..count).map(|i| AsciiShortString::new("s".repeat(i)).unwrap()),
    )
}

/// Map from byte keys 0..count to UTF-8 values
pub fn byte_keyed_map(count: u8) -> AssociativeContainer<ByteRecord, Utf8String> {
    let mut map = AssociativeContainer::with_description("byte keyed");
    for i in 0..count {
        map.insert(ByteRecord(i), Utf8String::new(format!("value #{}", i)));
    }
    map
}

/// Map from i16 keys to i32 values (static pairs)
pub fn static_map(count: i16) -> AssociativeContainer<Int16Record, Int32Record> {
    (0..count)
        .map(|i| (Int16Record(i), Int32Record(i as i32 * -7)))
        .collect()
}
