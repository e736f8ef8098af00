//! Defines the [`Segment`] type.

use std::collections::btree_map::{BTreeMap, Entry};

use crate::error::Error;

use super::{Relocatable, Value};

/// A relocatable segment of memory accessible by the Cairo virtual machine.
///
/// # Representation
///
/// A program can never access an arbitrary absolute memory location, since it does not know
/// where a segment will end up once relocated. Accesses within a segment are usually
/// contiguous, but nothing prevents a program from writing far past the last known cell, so
/// cells are kept in a map keyed by offset. A gap costs nothing, whatever its length.
///
/// Every cell is a write-once slot: it starts out unknown and is asserted to a value at most
/// once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Segment {
    cells: BTreeMap<usize, Value>,
}

impl Segment {
    /// Creates a new empty [`Segment`].
    ///
    /// No memory is allocated by this function.
    pub const fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    /// Returns the size of the segment: the offset of the highest known cell, plus one.
    ///
    /// An empty segment has a size of zero.
    #[inline]
    pub fn len(&self) -> usize {
        // A cell at `usize::MAX` cannot be represented by a size; saturate instead of wrapping.
        self.cells
            .last_key_value()
            .map_or(0, |(&offset, _)| offset.saturating_add(1))
    }

    /// Returns whether no cell of the segment has been written.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the number of cells that have been written.
    #[inline(always)]
    pub fn known_cells(&self) -> usize {
        self.cells.len()
    }

    /// Returns the memory cell at offset `index` in the segment, if it has been written.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.cells.get(&index)
    }

    /// Writes `value` to the cell referenced by `address`, which must belong to this segment.
    ///
    /// If the cell was already known, it is left untouched.
    pub(crate) fn insert(&mut self, address: Relocatable, value: Value) -> Result<(), Error> {
        match self.cells.entry(address.offset) {
            Entry::Occupied(existing) => Err(Error::WriteOnce {
                address,
                existing: *existing.get(),
                value,
            }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use starknet_types_core::felt::Felt;

    use super::*;

    #[test]
    fn sparse_insert_grows_size() {
        let mut segment = Segment::new();
        assert!(segment.is_empty());

        segment.insert(Relocatable::new(0, 4), Felt::ONE.into()).unwrap();
        assert_eq!(segment.len(), 5);
        assert_eq!(segment.get(4), Some(&Value::Scalar(Felt::ONE)));
        assert_eq!(segment.get(2), None);
        assert_eq!(segment.get(10), None);

        segment.insert(Relocatable::new(0, 1), Felt::TWO.into()).unwrap();
        assert_eq!(segment.len(), 5);
        assert_eq!(segment.known_cells(), 2);
    }

    #[test]
    fn far_insert_is_cheap() {
        let mut segment = Segment::new();
        let far = Relocatable::new(0, 1 << 36);

        segment.insert(far, Felt::ONE.into()).unwrap();
        assert_eq!(segment.len(), (1 << 36) + 1);
        assert_eq!(segment.known_cells(), 1);
        assert_eq!(segment.get(1 << 36), Some(&Value::Scalar(Felt::ONE)));
        assert_eq!(segment.get((1 << 36) - 1), None);
    }

    #[test]
    fn insert_at_last_offset() {
        let mut segment = Segment::new();
        segment
            .insert(Relocatable::new(0, usize::MAX), Felt::ONE.into())
            .unwrap();
        assert_eq!(segment.len(), usize::MAX);
        assert_eq!(segment.get(usize::MAX), Some(&Value::Scalar(Felt::ONE)));
    }

    #[test]
    fn second_insert_keeps_existing() {
        let mut segment = Segment::new();
        let address = Relocatable::new(0, 0);
        segment.insert(address, Felt::ONE.into()).unwrap();
        assert_eq!(
            segment.insert(address, Felt::TWO.into()),
            Err(Error::WriteOnce {
                address,
                existing: Felt::ONE.into(),
                value: Felt::TWO.into(),
            })
        );
        assert_eq!(segment.get(0), Some(&Value::Scalar(Felt::ONE)));
    }
}
