//! Key/value container built on the record sequence.
//!
//! On the wire an `AssociativeContainer<K, V>` is exactly a
//! `Container<PairRecord<K, V>>`: same header, same subformat, one pair per
//! entry. Entries are written sorted by the encoded key bytes so that equal
//! maps encode identically. Duplicate keys in a decoded buffer collapse with
//! the last occurrence winning.

use crate::container::{write_element, Container};
use crate::database::Database;
use crate::header::{truncate_description, ContainerHeader, SUBFORMAT_SEQUENCE};
use rustc_hash::FxHashMap;
use seasnake_core::{Limits, PairRecord, Record, Result, SizeClass};
use std::hash::Hash;
use tracing::{debug, trace};

/// A map from key records to value records with a seasnake wire form
#[derive(Debug, Clone)]
pub struct AssociativeContainer<K, V> {
    description: String,
    entries: FxHashMap<K, V>,
}

impl<K, V> Default for AssociativeContainer<K, V> {
    fn default() -> Self {
        AssociativeContainer {
            description: String::new(),
            entries: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for AssociativeContainer<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description && self.entries == other.entries
    }
}

impl<K: Eq + Hash, V: Eq> Eq for AssociativeContainer<K, V> {}

impl<K: Eq + Hash, V> AssociativeContainer<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with a description
    pub fn with_description(description: impl Into<String>) -> Self {
        let mut map = Self::default();
        map.set_description(description);
        map
    }

    /// Short description stored in the header
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the description, truncating to 255 bytes at a character boundary
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        let keep = truncate_description(&description).len();
        self.description = description;
        self.description.truncate(keep);
    }

    /// Insert an entry, returning the previous value for `key`
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Value stored under `key`
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Mutable value stored under `key`
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`, returning its value
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry, keeping the description
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over entries in arbitrary order
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Iterate over keys in arbitrary order
    pub fn keys(&self) -> std::collections::hash_map::Keys<'_, K, V> {
        self.entries.keys()
    }

    /// Iterate over values in arbitrary order
    pub fn values(&self) -> std::collections::hash_map::Values<'_, K, V> {
        self.entries.values()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &FxHashMap<K, V> {
        &self.entries
    }

    /// Take the underlying map
    pub fn into_map(self) -> FxHashMap<K, V> {
        self.entries
    }
}

impl<K, V> Database for AssociativeContainer<K, V>
where
    K: Record + Eq + Hash,
    V: Record,
{
    const SUBFORMAT: u8 = SUBFORMAT_SEQUENCE;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut keyed = self
            .entries
            .iter()
            .map(|(key, value)| -> Result<_> { Ok((key.to_bytes()?, value)) })
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let header =
            ContainerHeader::for_elements::<PairRecord<K, V>>(Self::SUBFORMAT, &self.description);
        let mut out = Vec::with_capacity(header.encoded_len());
        header.write_to(&mut out)?;
        for (key_bytes, value) in &keyed {
            let block = PairRecord::<K, V>::join_halves(key_bytes, &value.to_bytes()?)?;
            write_element::<PairRecord<K, V>>(&block, &mut out)?;
        }

        trace!(
            target: "seasnake::associative",
            entries = self.entries.len(),
            bytes = out.len(),
            "Encoded associative container"
        );
        Ok(out)
    }

    fn decode_with_limits(&mut self, bytes: &[u8], limits: &Limits) -> Result<()> {
        self.entries.clear();

        let mut sequence = Container::<PairRecord<K, V>>::default();
        sequence.decode_with_limits(bytes, limits)?;
        let (description, pairs) = sequence.into_parts();
        let total = pairs.len();

        self.description = description;
        self.entries.reserve(total);
        for pair in pairs {
            let (key, value) = pair.into_parts();
            self.entries.insert(key, value);
        }

        if self.entries.len() < total {
            debug!(
                target: "seasnake::associative",
                duplicates = total - self.entries.len(),
                "Duplicate keys collapsed, last entry wins"
            );
        }
        Ok(())
    }
}

impl<K, V> Record for AssociativeContainer<K, V>
where
    K: Record + Eq + Hash,
    V: Record,
{
    const SIZE_CLASS: SizeClass = SizeClass::Variable32;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        self.encode()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }

    fn from_bytes_with_limits(bytes: &[u8], limits: &Limits) -> Result<Self> {
        let mut map = Self::default();
        map.decode_with_limits(bytes, limits)?;
        Ok(map)
    }
}

impl<K: Eq + Hash, V> From<FxHashMap<K, V>> for AssociativeContainer<K, V> {
    fn from(entries: FxHashMap<K, V>) -> Self {
        AssociativeContainer {
            description: String::new(),
            entries,
        }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for AssociativeContainer<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AssociativeContainer {
            description: String::new(),
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for AssociativeContainer<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<'a, K, V> IntoIterator for &'a AssociativeContainer<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::collections::hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> IntoIterator for AssociativeContainer<K, V> {
    type Item = (K, V);
    type IntoIter = std::collections::hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
