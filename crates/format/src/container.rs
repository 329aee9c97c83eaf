//! Plain record sequence container (subformat 0x00).
//!
//! # Layout
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │ Container Header (see `header`)    │
//! ├────────────────────────────────────┤
//! │ [prefix] Element 1                 │
//! ├────────────────────────────────────┤
//! │ [prefix] Element 2                 │
//! ├────────────────────────────────────┤
//! │ ...                                │
//! └────────────────────────────────────┘
//! ```
//!
//! Static elements are stored back to back with no prefix; the header carries
//! their shared length. Variable elements each carry a 1, 2 or 4 byte
//! little-endian length prefix. The body runs to the end of the buffer.
//!
//! Every element has the same size class because the element type `T` fixes it.

use crate::database::Database;
use crate::header::{truncate_description, ByteReader, ContainerHeader, SUBFORMAT_SEQUENCE};
use seasnake_core::{Error, Limits, Record, Result};
use std::ops::{Index, IndexMut};
use tracing::{debug, trace};

/// An ordered, header-framed sequence of homogeneous records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<T> {
    description: String,
    items: Vec<T>,
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Container {
            description: String::new(),
            items: Vec::new(),
        }
    }
}

impl<T> Container<T> {
    /// Create an empty container with a description
    ///
    /// The description is truncated to 255 bytes.
    pub fn new(description: impl Into<String>) -> Self {
        let mut container = Container::default();
        container.set_description(description);
        container
    }

    /// Create a container holding `items`
    pub fn with_items(description: impl Into<String>, items: impl IntoIterator<Item = T>) -> Self {
        let mut container = Container::new(description);
        container.items.extend(items);
        container
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

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable element at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Append an element
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the last element
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Insert an element at `index`, shifting later elements
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
    }

    /// Remove and return the element at `index`, shifting later elements
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    /// Remove every element, keeping the description
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace every element with `items`
    pub fn populate(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.clear();
        self.items.extend(items);
    }

    /// Iterate over the elements in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterate mutably over the elements in order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Elements as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Split into description and elements
    pub fn into_parts(self) -> (String, Vec<T>) {
        (self.description, self.items)
    }
}

impl<T: Record> Database for Container<T> {
    const SUBFORMAT: u8 = SUBFORMAT_SEQUENCE;

    fn encode(&self) -> Result<Vec<u8>> {
        let header = ContainerHeader::for_elements::<T>(Self::SUBFORMAT, &self.description);
        let mut out = Vec::with_capacity(header.encoded_len());
        header.write_to(&mut out)?;

        for item in &self.items {
            write_element::<T>(&item.to_bytes()?, &mut out)?;
        }

        trace!(
            target: "seasnake::container",
            elements = self.items.len(),
            bytes = out.len(),
            "Encoded container"
        );
        Ok(out)
    }

    fn decode_with_limits(&mut self, bytes: &[u8], limits: &Limits) -> Result<()> {
        self.items.clear();

        let (header, body_start) = ContainerHeader::read(bytes, Self::SUBFORMAT, limits)?;
        if header.size_class != T::SIZE_CLASS {
            return Err(Error::SizeClassMismatch {
                expected: T::SIZE_CLASS,
                actual: header.size_class,
            });
        }
        if let Some(size) = header.static_size {
            if size != T::STATIC_SIZE {
                return Err(Error::ElementSizeMismatch {
                    expected: T::STATIC_SIZE,
                    actual: size,
                });
            }
        }

        self.description = header.description;
        self.items = if T::SIZE_CLASS.is_static() {
            decode_static_body(bytes, body_start, limits)?
        } else {
            decode_variable_body(bytes, body_start, limits)?
        };

        debug!(
            target: "seasnake::container",
            elements = self.items.len(),
            size_class = %T::SIZE_CLASS,
            description_len = self.description.len(),
            "Decoded container"
        );
        Ok(())
    }
}

/// Append one encoded element to a body of `T` elements
///
/// Static blocks must have the kind's exact size; variable blocks get their
/// length prefix.
pub(crate) fn write_element<T: Record>(block: &[u8], out: &mut Vec<u8>) -> Result<()> {
    if T::SIZE_CLASS.is_static() {
        if block.len() != T::STATIC_SIZE {
            return Err(Error::LayoutMismatch {
                expected: T::STATIC_SIZE,
                actual: block.len(),
            });
        }
    } else {
        T::SIZE_CLASS.write_len(block.len(), out)?;
    }
    out.extend_from_slice(block);
    Ok(())
}

fn decode_static_body<T: Record>(bytes: &[u8], start: usize, limits: &Limits) -> Result<Vec<T>> {
    let body = &bytes[start..];
    let size = T::STATIC_SIZE;
    if size == 0 {
        if body.is_empty() {
            return Ok(Vec::new());
        }
        return Err(Error::corrupt_body(
            start,
            "zero-size elements but the body is not empty",
        ));
    }
    if body.len() % size != 0 {
        return Err(Error::corrupt_body(
            start,
            format!(
                "body length {} is not a multiple of element size {}",
                body.len(),
                size
            ),
        ));
    }
    limits.validate_element_count(body.len() / size)?;

    body.chunks_exact(size)
        .map(|chunk| T::from_bytes_with_limits(chunk, limits))
        .collect()
}

fn decode_variable_body<T: Record>(
    bytes: &[u8],
    start: usize,
    limits: &Limits,
) -> Result<Vec<T>> {
    let class = T::SIZE_CLASS;
    let mut reader = ByteReader::at(bytes, start);
    let mut items = Vec::new();

    while !reader.is_empty() {
        let at = reader.position();
        let len = class.read_len(reader.rest()).ok_or_else(|| {
            Error::corrupt_body(
                at,
                format!(
                    "{} trailing bytes cannot hold a {} byte length prefix",
                    reader.remaining(),
                    class.prefix_width()
                ),
            )
        })?;
        reader.advance(class.prefix_width());
        limits.validate_element_len(len)?;

        let remaining = reader.remaining();
        let block = reader.take(len).ok_or_else(|| {
            Error::corrupt_body(
                at,
                format!(
                    "element declares {} bytes but only {} remain",
                    len, remaining
                ),
            )
        })?;
        items.push(T::from_bytes_with_limits(block, limits)?);
        limits.validate_element_count(items.len())?;
    }

    Ok(items)
}

impl<T> Index<usize> for Container<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Container<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> Extend<T> for Container<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for Container<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Container::with_items(String::new(), iter)
    }
}

impl<T> IntoIterator for Container<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Container<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
