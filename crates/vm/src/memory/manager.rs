//! Defines the [`SegmentManager`] type.

use crate::error::Error;

use super::{Memory, Relocatable, Value};

/// Coordinates the lifecycle of the segments of a [`Memory`].
///
/// The manager holds the only mutating handle to the memory of a run. On top of the single
/// cell [`Memory::insert`] primitive, it provides the bulk operations used when loading a
/// program or the initial state of a segment.
///
/// Segment sizes are always derived from the memory itself, so they cannot go stale when
/// cells are written one at a time through [`SegmentManager::insert`].
#[derive(Debug, Default, Clone)]
pub struct SegmentManager {
    memory: Memory,
}

impl SegmentManager {
    /// Creates a new [`SegmentManager`] coordinating an empty [`Memory`].
    pub const fn new() -> Self {
        Self {
            memory: Memory::new(),
        }
    }

    /// Creates a new [`SegmentManager`] taking ownership of an existing [`Memory`].
    pub fn from_memory(memory: Memory) -> Self {
        Self { memory }
    }

    /// Returns the [`Memory`] managed by this [`SegmentManager`].
    #[inline(always)]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Allocates a new segment and returns its base address.
    #[inline]
    pub fn add_segment(&mut self) -> Relocatable {
        self.memory.add_segment()
    }

    /// Writes a single value, with the same checks as [`Memory::insert`].
    #[inline]
    pub fn insert(&mut self, address: Relocatable, value: Value) -> Result<(), Error> {
        self.memory.insert(address, value)
    }

    /// Writes `data` to consecutive cells starting at `base`.
    ///
    /// Each cell is written through [`Memory::insert`], so the write-once and segment checks
    /// apply to every element. When a write fails, the elements before it remain written;
    /// the run is expected to be aborted anyway.
    ///
    /// Returns the address directly following the loaded data.
    pub fn load_data(&mut self, base: Relocatable, data: &[Value]) -> Result<Relocatable, Error> {
        let mut address = base;

        for value in data {
            self.memory.insert(address, *value)?;
            address = address.add_offset(1)?;
        }

        log::trace!("loaded {} cells at {base}", data.len());
        Ok(address)
    }

    /// Returns the number of allocated segments.
    #[inline(always)]
    pub fn segment_count(&self) -> usize {
        self.memory.segment_count()
    }

    /// Returns the size of a segment, or zero if it does not exist.
    #[inline]
    pub fn segment_size(&self, segment: usize) -> usize {
        self.memory.segment_size(segment)
    }

    /// Returns the sizes of all segments, in segment order.
    pub fn segment_sizes(&self) -> Vec<usize> {
        self.memory.segment_sizes().collect()
    }
}
