//! End-to-end tests through the `seasnake` facade
//!
//! Exercises the re-exported API the way an application would: build a
//! container, encode it to a buffer, hand the buffer around, decode it again.

mod common;

use common::*;
use proptest::prelude::*;
use seasnake::{
    AsciiShortString, AssociativeContainer, ByteRecord, Container, Database, Error, Int16Record,
    Int32Record, Limits, PairRecord, Record, SizeClass, Utf8String, SEASNAKE_MAGIC,
};

#[test]
fn test_reference_buffer_both_directions() {
    assert_eq!(reference_ints().encode().unwrap(), reference_ints_bytes());

    let decoded = Container::<Int32Record>::from_slice(&reference_ints_bytes()).unwrap();
    assert_eq!(decoded, reference_ints());
}

#[test]
fn test_decode_into_existing_container() {
    let mut target = Container::<Int32Record>::new("stale");
    target.push(Int32Record(42));
    target.decode(&reference_ints_bytes()).unwrap();
    assert_eq!(target.len(), 3);
    assert_eq!(target.description(), "ints");
}

#[test]
fn test_short_strings_roundtrip() {
    for count in [0, 1, 50] {
        let original = short_strings(count);
        let bytes = original.encode().unwrap();
        assert_eq!(&bytes[..4], &SEASNAKE_MAGIC);
        let decoded = Container::<AsciiShortString>::from_slice(&bytes).unwrap();
        assert_eq!(original, decoded);
    }
}

#[test]
fn test_map_roundtrip() {
    let original = byte_keyed_map(10);
    let decoded =
        AssociativeContainer::<ByteRecord, Utf8String>::from_slice(&original.encode().unwrap())
            .unwrap();
    assert_eq!(decoded, original);
    assert_eq!(decoded.description(), "byte keyed");
}

#[test]
fn test_static_map_uses_static_elements() {
    let map = static_map(6);
    let bytes = map.encode().unwrap();
    // Pair<i16, i32> is static: size class byte 0 and a static size of 6.
    assert_eq!(bytes[6], SizeClass::Static.to_wire());
    assert_eq!(&bytes[7..11], &[6, 0, 0, 0]);
    assert_eq!(bytes.len(), 11 + 6 * 6);

    let decoded = AssociativeContainer::<Int16Record, Int32Record>::from_slice(&bytes).unwrap();
    assert_eq!(decoded, map);
}

#[test]
fn test_map_reads_as_pair_sequence_and_back() {
    let map = byte_keyed_map(3);
    let sequence =
        Container::<PairRecord<ByteRecord, Utf8String>>::from_slice(&map.encode().unwrap())
            .unwrap();
    let rebuilt = AssociativeContainer::<ByteRecord, Utf8String>::from_slice(
        &sequence.encode().unwrap(),
    )
    .unwrap();
    assert_eq!(rebuilt, map);
}

#[test]
fn test_nested_map_record() {
    type Inner = AssociativeContainer<ByteRecord, Utf8String>;
    assert_eq!(Inner::SIZE_CLASS, SizeClass::Variable32);
    assert_eq!(Inner::STATIC_SIZE, 0);

    let outer: Container<Inner> =
        Container::with_items("maps", [byte_keyed_map(2), byte_keyed_map(5)]);
    let decoded = Container::<Inner>::from_slice(&outer.encode().unwrap()).unwrap();
    assert_eq!(decoded, outer);
}

#[test]
fn test_strict_limits_reject_large_buffers() {
    let bytes = short_strings(40).encode().unwrap();
    let mut target = Container::<AsciiShortString>::default();
    let err = target
        .decode_with_limits(&bytes, &Limits::with_small_limits())
        .unwrap_err();
    assert!(matches!(err, Error::LimitExceeded(_)));

    let mut target = Container::<AsciiShortString>::default();
    target.decode_with_limits(&bytes, &Limits::unlimited()).unwrap();
    assert_eq!(target, short_strings(40));
}

proptest! {
    #[test]
    fn prop_nested_maps_roundtrip(
        description in "[a-z ]{0,40}",
        groups in proptest::collection::vec(
            proptest::collection::hash_map(any::<i32>(), "[ -~]{0,24}", 0..8),
            0..6,
        ),
    ) {
        type Inner = AssociativeContainer<Int32Record, AsciiShortString>;
        let maps: Vec<Inner> = groups
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|(k, v)| (Int32Record(k), AsciiShortString::new(v).unwrap()))
                    .collect()
            })
            .collect();
        let original = Container::with_items(description, maps);

        let bytes = original.encode().unwrap();
        let decoded = Container::<Inner>::from_slice(&bytes).unwrap();
        prop_assert_eq!(&decoded, &original);
        prop_assert_eq!(decoded.encode().unwrap(), bytes);
    }
}
