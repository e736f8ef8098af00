//! Defines the [`Relocatable`] type.

use std::fmt;

use num_traits::ToPrimitive;
use starknet_types_core::felt::Felt;

use crate::error::Error;

use super::Value;

/// An address within a [`Memory`](super::Memory) segment.
///
/// The final location of a segment is only decided once the program has finished running,
/// so an address is kept relative to its segment until then. Two addresses can only be
/// compared meaningfully when they belong to the same segment.
///
/// The derived ordering compares the segment index first, then the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Relocatable {
    /// The index of the segment in the memory.
    ///
    /// This can be thought of as the provenance of the address.
    pub segment: usize,
    /// The offset within the segment.
    pub offset: usize,
}

impl Relocatable {
    /// Creates a new [`Relocatable`] from a segment index and an offset.
    #[inline(always)]
    pub const fn new(segment: usize, offset: usize) -> Self {
        Self { segment, offset }
    }

    /// Adds `delta` to the offset of `self`.
    pub fn add_offset(self, delta: usize) -> Result<Self, Error> {
        match self.offset.checked_add(delta) {
            Some(offset) => Ok(Self::new(self.segment, offset)),
            None => Err(Error::OffsetOverflow {
                address: self,
                delta,
            }),
        }
    }

    /// Adds a [`Value`] to the offset of `self`.
    ///
    /// The value must be a field element small enough to be used as an offset. Adding two
    /// relocatable addresses is not defined before relocation.
    pub fn add_value(self, delta: &Value) -> Result<Self, Error> {
        match delta {
            Value::Scalar(felt) => self.add_offset(felt_to_offset(felt)?),
            Value::Relocatable(right) => Err(Error::AddRelocatables {
                left: self,
                right: *right,
            }),
        }
    }

    /// Subtracts `delta` from the offset of `self`.
    pub fn sub_offset(self, delta: usize) -> Result<Self, Error> {
        match self.offset.checked_sub(delta) {
            Some(offset) => Ok(Self::new(self.segment, offset)),
            None => Err(Error::OffsetUnderflow {
                address: self,
                delta,
            }),
        }
    }

    /// Returns the distance between `self` and `other`, given that both refer to the same
    /// segment and `other` is not located after `self`.
    ///
    /// The result is a plain offset difference, not a [`Relocatable`] in the segment of
    /// `self`: the segment index carries no meaning once both addresses are known to share it.
    /// At the [`Value`] level the difference becomes a [`Value::Scalar`].
    pub fn distance(self, other: Self) -> Result<usize, Error> {
        if self.segment != other.segment {
            return Err(Error::SegmentMismatch {
                left: self,
                right: other,
            });
        }

        self.sub_offset(other.offset).map(|r| r.offset)
    }

    /// Applies a signed instruction offset to `self`.
    pub fn apply_offset(self, offset: i16) -> Result<Self, Error> {
        let magnitude = offset.unsigned_abs() as usize;

        if offset < 0 {
            self.sub_offset(magnitude)
        } else {
            self.add_offset(magnitude)
        }
    }
}

impl fmt::Display for Relocatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.segment, self.offset)
    }
}

/// Converts a field element into a memory offset.
///
/// Fails instead of truncating when the element does not fit in a `usize`.
pub fn felt_to_offset(felt: &Felt) -> Result<usize, Error> {
    felt.to_usize().ok_or(Error::OffsetTooLarge(*felt))
}
