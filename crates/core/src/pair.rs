//! Key/value pair record
//!
//! A `PairRecord<K, V>` packs two records into one block. Its size class is
//! derived from its halves via [`SizeClass::for_pair`].
//!
//! # Block Layout
//!
//! ```text
//! [prefix: 0/1/2/4 bytes][key bytes][value bytes]
//! ```
//!
//! The prefix width is the smaller of the two halves' size classes. When it
//! is non-zero, the prefix holds the encoded length of the half with the
//! smaller class (the key on ties); the other half takes the rest. When
//! either half is `Static` there is no prefix: a static key is the first
//! `K::STATIC_SIZE` bytes, a static value is the last `V::STATIC_SIZE` bytes.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::record::Record;
use crate::size_class::SizeClass;

/// A composite record holding one key and one value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PairRecord<K, V> {
    key: K,
    value: V,
}

impl<K: Record, V: Record> PairRecord<K, V> {
    /// Prefix width and class for this pair kind
    const HEAD: SizeClass = K::SIZE_CLASS.min(V::SIZE_CLASS);

    /// Whether the key (rather than the value) is the measured half
    const KEY_MEASURED: bool = (K::SIZE_CLASS as u8) <= (V::SIZE_CLASS as u8);

    /// Create a pair from its halves
    pub fn new(key: K, value: V) -> Self {
        PairRecord { key, value }
    }

    /// Borrow the key
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Borrow the value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Split into key and value
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Decode a block into its key and value halves
    ///
    /// The halves' size classes are taken from `K` and `V`.
    pub fn decode(block: &[u8]) -> Result<Self> {
        Self::decode_with_limits(block, &Limits::default())
    }

    /// Decode a block, passing `limits` down to both halves
    pub fn decode_with_limits(block: &[u8], limits: &Limits) -> Result<Self> {
        let (key_bytes, value_bytes) = Self::split(block)?;
        Ok(PairRecord {
            key: K::from_bytes_with_limits(key_bytes, limits)?,
            value: V::from_bytes_with_limits(value_bytes, limits)?,
        })
    }

    /// Join already encoded halves into one block
    ///
    /// Static halves must have their kind's exact size. Fails with
    /// `LengthOverflow` when the measured half does not fit the prefix.
    pub fn join_halves(key_bytes: &[u8], value_bytes: &[u8]) -> Result<Vec<u8>> {
        check_static::<K>(key_bytes)?;
        check_static::<V>(value_bytes)?;

        let head = Self::HEAD;
        let mut out =
            Vec::with_capacity(head.prefix_width() + key_bytes.len() + value_bytes.len());
        if !head.is_static() {
            let measured = if Self::KEY_MEASURED {
                key_bytes.len()
            } else {
                value_bytes.len()
            };
            head.write_len(measured, &mut out)?;
        }
        out.extend_from_slice(key_bytes);
        out.extend_from_slice(value_bytes);
        Ok(out)
    }

    fn split(block: &[u8]) -> Result<(&[u8], &[u8])> {
        match (K::SIZE_CLASS.is_static(), V::SIZE_CLASS.is_static()) {
            (true, true) => {
                let expected = K::STATIC_SIZE + V::STATIC_SIZE;
                if block.len() != expected {
                    return Err(Error::LayoutMismatch {
                        expected,
                        actual: block.len(),
                    });
                }
                Ok(block.split_at(K::STATIC_SIZE))
            }
            (true, false) => {
                if block.len() < K::STATIC_SIZE {
                    return Err(Error::LayoutMismatch {
                        expected: K::STATIC_SIZE,
                        actual: block.len(),
                    });
                }
                Ok(block.split_at(K::STATIC_SIZE))
            }
            (false, true) => {
                if block.len() < V::STATIC_SIZE {
                    return Err(Error::LayoutMismatch {
                        expected: V::STATIC_SIZE,
                        actual: block.len(),
                    });
                }
                Ok(block.split_at(block.len() - V::STATIC_SIZE))
            }
            (false, false) => {
                let width = Self::HEAD.prefix_width();
                let measured = Self::HEAD.read_len(block).ok_or(Error::LayoutMismatch {
                    expected: width,
                    actual: block.len(),
                })?;
                let rest = &block[width..];
                if measured > rest.len() {
                    return Err(Error::LayoutMismatch {
                        expected: measured,
                        actual: rest.len(),
                    });
                }
                let key_len = if Self::KEY_MEASURED {
                    measured
                } else {
                    rest.len() - measured
                };
                Ok(rest.split_at(key_len))
            }
        }
    }
}

fn check_static<R: Record>(bytes: &[u8]) -> Result<()> {
    if R::SIZE_CLASS.is_static() && bytes.len() != R::STATIC_SIZE {
        return Err(Error::LayoutMismatch {
            expected: R::STATIC_SIZE,
            actual: bytes.len(),
        });
    }
    Ok(())
}

impl<K: Record, V: Record> Record for PairRecord<K, V> {
    const SIZE_CLASS: SizeClass = SizeClass::for_pair(K::SIZE_CLASS, V::SIZE_CLASS);
    const STATIC_SIZE: usize = if K::SIZE_CLASS.is_static() && V::SIZE_CLASS.is_static() {
        K::STATIC_SIZE + V::STATIC_SIZE
    } else {
        0
    };

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Self::join_halves(&self.key.to_bytes()?, &self.value.to_bytes()?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes)
    }

    fn from_bytes_with_limits(bytes: &[u8], limits: &Limits) -> Result<Self> {
        Self::decode_with_limits(bytes, limits)
    }
}

impl<K: Record, V: Record> From<(K, V)> for PairRecord<K, V> {
    fn from((key, value): (K, V)) -> Self {
        PairRecord::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{AsciiShortString, ByteRecord, Int16Record, Int32Record, Utf8String};
    use proptest::prelude::*;

    /// Raw bytes framed with a one byte prefix
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct TinyBytes(Vec<u8>);

    impl Record for TinyBytes {
        const SIZE_CLASS: SizeClass = SizeClass::Variable8;

        fn to_bytes(&self) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }

        fn from_bytes(bytes: &[u8]) -> Result<Self> {
            Ok(TinyBytes(bytes.to_vec()))
        }
    }

    fn static_v() -> Int16Record {
        Int16Record(-1234)
    }
    fn var8_v() -> TinyBytes {
        TinyBytes(vec![9, 8, 7])
    }
    fn var16_v() -> AsciiShortString {
        AsciiShortString::new("short ascii").unwrap()
    }
    fn var32_v() -> Utf8String {
        Utf8String::from("long \u{2603} utf8")
    }

    fn roundtrip<K, V>(key: K, value: V)
    where
        K: Record + Clone + PartialEq + std::fmt::Debug,
        V: Record + Clone + PartialEq + std::fmt::Debug,
    {
        let pair = PairRecord::new(key, value);
        let bytes = pair.to_bytes().unwrap();
        let decoded = PairRecord::<K, V>::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, pair);
    }

    macro_rules! roundtrip_all_values {
        ($($k:ident),*) => {
            $(
                roundtrip($k(), static_v());
                roundtrip($k(), var8_v());
                roundtrip($k(), var16_v());
                roundtrip($k(), var32_v());
            )*
        };
    }

    #[test]
    fn test_roundtrip_every_size_class_combination() {
        roundtrip_all_values!(static_v, var8_v, var16_v, var32_v);
    }

    #[test]
    fn test_derived_size_class() {
        assert_eq!(
            PairRecord::<ByteRecord, Int32Record>::SIZE_CLASS,
            SizeClass::Static
        );
        assert_eq!(PairRecord::<ByteRecord, Int32Record>::STATIC_SIZE, 5);
        assert_eq!(
            PairRecord::<ByteRecord, TinyBytes>::SIZE_CLASS,
            SizeClass::Variable16
        );
        assert_eq!(
            PairRecord::<TinyBytes, TinyBytes>::SIZE_CLASS,
            SizeClass::Variable16
        );
        assert_eq!(
            PairRecord::<ByteRecord, Utf8String>::SIZE_CLASS,
            SizeClass::Variable32
        );
        assert_eq!(PairRecord::<ByteRecord, Utf8String>::STATIC_SIZE, 0);
        assert_eq!(
            PairRecord::<AsciiShortString, AsciiShortString>::SIZE_CLASS,
            SizeClass::Variable32
        );
    }

    #[test]
    fn test_both_static_layout() {
        let pair = PairRecord::new(ByteRecord(0xAA), Int16Record(0x0102));
        assert_eq!(pair.to_bytes().unwrap(), vec![0xAA, 0x02, 0x01]);
    }

    #[test]
    fn test_static_key_has_no_prefix() {
        let pair = PairRecord::new(ByteRecord(3), Utf8String::from("hi"));
        assert_eq!(pair.to_bytes().unwrap(), vec![3, b'h', b'i']);
    }

    #[test]
    fn test_static_value_is_taken_from_the_end() {
        let pair = PairRecord::new(Utf8String::from("hey"), Int16Record(1));
        let bytes = pair.to_bytes().unwrap();
        assert_eq!(bytes, vec![b'h', b'e', b'y', 1, 0]);
        let decoded = PairRecord::<Utf8String, Int16Record>::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.key().as_str(), "hey");
        assert_eq!(decoded.value(), &Int16Record(1));
    }

    #[test]
    fn test_prefix_measures_smaller_class_value() {
        // Key is Variable32, value is Variable16: prefix is u16 length of the value.
        let pair = PairRecord::new(Utf8String::from("abc"), var16_v());
        let bytes = pair.to_bytes().unwrap();
        assert_eq!(&bytes[..2], &[11, 0]);
        assert_eq!(&bytes[2..5], b"abc");
        assert_eq!(&bytes[5..], b"short ascii");
    }

    #[test]
    fn test_prefix_measures_key_on_tie() {
        let pair = PairRecord::new(
            AsciiShortString::new("k").unwrap(),
            AsciiShortString::new("value").unwrap(),
        );
        let bytes = pair.to_bytes().unwrap();
        assert_eq!(bytes, b"\x01\x00kvalue".to_vec());
    }

    #[test]
    fn test_var8_prefix_is_one_byte() {
        let pair = PairRecord::new(TinyBytes(vec![1, 2]), Utf8String::from("z"));
        assert_eq!(pair.to_bytes().unwrap(), vec![2, 1, 2, b'z']);
    }

    #[test]
    fn test_both_static_wrong_length() {
        let err = PairRecord::<ByteRecord, Int32Record>::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::LayoutMismatch {
                expected: 5,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_prefix_longer_than_block() {
        // Claims a 200 byte key but only 2 bytes follow.
        let block = [200u8, 0, b'a', b'b'];
        let err = PairRecord::<AsciiShortString, Utf8String>::from_bytes(&block).unwrap_err();
        assert!(matches!(err, Error::LayoutMismatch { .. }));
    }

    #[test]
    fn test_block_shorter_than_prefix() {
        let err = PairRecord::<Utf8String, Utf8String>::from_bytes(&[1, 0]).unwrap_err();
        assert!(matches!(
            err,
            Error::LayoutMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_measured_half_overflow() {
        let pair = PairRecord::new(TinyBytes(vec![0; 300]), Utf8String::from("x"));
        let err = pair.to_bytes().unwrap_err();
        assert!(matches!(
            err,
            Error::LengthOverflow {
                len: 300,
                size_class: SizeClass::Variable8
            }
        ));
    }

    #[test]
    fn test_nested_pair() {
        type Inner = PairRecord<ByteRecord, Utf8String>;
        let pair = PairRecord::new(
            Int32Record(7),
            Inner::new(ByteRecord(1), Utf8String::from("nested")),
        );
        let bytes = pair.to_bytes().unwrap();
        let decoded = PairRecord::<Int32Record, Inner>::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, pair);
    }

    #[test]
    fn test_join_halves_matches_to_bytes() {
        let pair = PairRecord::new(var16_v(), Utf8String::from("joined"));
        let joined = PairRecord::<AsciiShortString, Utf8String>::join_halves(
            &pair.key().to_bytes().unwrap(),
            &pair.value().to_bytes().unwrap(),
        )
        .unwrap();
        assert_eq!(joined, pair.to_bytes().unwrap());

        let err = PairRecord::<Int16Record, Utf8String>::join_halves(&[1], b"x").unwrap_err();
        assert!(matches!(
            err,
            Error::LayoutMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_into_parts_and_from_tuple() {
        let pair: PairRecord<ByteRecord, Int16Record> = (ByteRecord(1), Int16Record(2)).into();
        assert_eq!(pair.into_parts(), (ByteRecord(1), Int16Record(2)));
    }

    proptest! {
        #[test]
        fn prop_pair_roundtrip_var16_var32(k in "[ -~]{0,64}", v in any::<String>()) {
            let pair = PairRecord::new(AsciiShortString::new(k).unwrap(), Utf8String::new(v));
            let bytes = pair.to_bytes().unwrap();
            prop_assert_eq!(
                PairRecord::<AsciiShortString, Utf8String>::from_bytes(&bytes).unwrap(),
                pair
            );
        }

        #[test]
        fn prop_pair_roundtrip_var32_var8(k in any::<String>(), v in proptest::collection::vec(any::<u8>(), 0..255)) {
            let pair = PairRecord::new(Utf8String::new(k), TinyBytes(v));
            let bytes = pair.to_bytes().unwrap();
            prop_assert_eq!(
                PairRecord::<Utf8String, TinyBytes>::from_bytes(&bytes).unwrap(),
                pair
            );
        }
    }
}
