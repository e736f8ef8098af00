//! Defines the [`Memory`] type, responsible for representing the memory of a Cairo virtual
//! machine.
//!
//! # Immutable Memory
//!
//! Note that the memory of a Cairo virtual machine does not work in the same way regular computer
//! memory does. Instead, it is mathematically immutable: every memory cell starts out unknown and
//! may be *asserted* to a specific value exactly once. Writing the same cell a second time is an
//! error, even when the new value is identical to the old one.
//!
//! # Segments
//!
//! The address space of the machine has the size of the Starknet field, which cannot be
//! represented in a regular computer's memory. Programs therefore split their memory into
//! *segments*. Each segment is a contiguous block of memory that is located *somewhere* in the
//! virtual machine's address space. The final location of segments is not decided until the
//! program has finished running, which is why addresses are [`Relocatable`] until then.

mod manager;
mod relocatable;
mod segment;
mod value;

pub use self::manager::*;
pub use self::relocatable::*;
pub use self::segment::*;
pub use self::value::*;

use crate::error::Error;

/// Represents the memory of the Cairo virtual machine.
///
/// More information on memory can be found in [module-level documentation](self).
#[derive(Default, Debug, Clone)]
pub struct Memory {
    /// The segments that have been initialized in the memory.
    segments: Vec<Segment>,
}

impl Memory {
    /// Creates a new [`Memory`] with no segments.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Creates a new [`Memory`] with `count` empty segments already allocated.
    pub fn with_segments(count: usize) -> Self {
        Self {
            segments: vec![Segment::new(); count],
        }
    }

    /// Allocates a new empty segment and returns the address of its first cell.
    pub fn add_segment(&mut self) -> Relocatable {
        let base = Relocatable::new(self.segments.len(), 0);
        self.segments.push(Segment::new());
        log::trace!("allocated segment {}", base.segment);
        base
    }

    /// Returns the number of segments allocated so far.
    #[inline(always)]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the size of a segment, or zero if the segment does not exist.
    pub fn segment_size(&self, segment: usize) -> usize {
        self.segments.get(segment).map_or(0, Segment::len)
    }

    /// Returns the size of every allocated segment, in segment order.
    pub fn segment_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().map(Segment::len)
    }

    /// Writes `value` to the memory cell at `address`.
    ///
    /// This is the only way to mutate the contents of the memory. The segment of `address`
    /// must have been allocated, and the cell must not have been written before.
    pub fn insert(&mut self, address: Relocatable, value: Value) -> Result<(), Error> {
        let segment_count = self.segments.len();
        let segment = self
            .segments
            .get_mut(address.segment)
            .ok_or(Error::UnallocatedSegment {
                address,
                segment_count,
            })?;

        segment.insert(address, value)?;
        log::trace!("[{address}] = {value}");
        Ok(())
    }

    /// Returns the value of the memory cell at `address`.
    ///
    /// # Returns
    ///
    /// - `Err(_)` if the segment of `address` has not been allocated.
    ///
    /// - `Ok(None)` if the segment exists but the cell has never been written.
    ///
    /// - `Ok(Some(_))` with the value of the cell otherwise.
    pub fn get(&self, address: Relocatable) -> Result<Option<&Value>, Error> {
        match self.segments.get(address.segment) {
            Some(segment) => Ok(segment.get(address.offset)),
            None => Err(Error::UnallocatedSegment {
                address,
                segment_count: self.segments.len(),
            }),
        }
    }

    /// Returns the value of the memory cell at `address`, failing if it is unknown.
    pub fn read(&self, address: Relocatable) -> Result<Value, Error> {
        self.get(address)?
            .copied()
            .ok_or(Error::UnknownAddress(address))
    }
}
