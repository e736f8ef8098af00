//! Defines the [`Error`] type of the crate.

use starknet_types_core::felt::Felt;
use thiserror::Error;

use crate::memory::{Relocatable, Value};

/// An error that might occur when computing addresses or accessing the memory of a Cairo
/// program.
///
/// None of these errors are recoverable from within the crate: each one indicates either a
/// malformed program or a bug in the executor driving the virtual machine. The step loop is
/// expected to stop and report the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An address referenced a segment that has not been allocated yet.
    #[error("segment of {address} has not been allocated ({segment_count} segments exist)")]
    UnallocatedSegment {
        /// The address that was accessed.
        address: Relocatable,
        /// The number of segments allocated at the time of the access.
        segment_count: usize,
    },
    /// Attempted to subtract two relocatable addresses that live in different segments.
    #[error("cannot subtract {right} from {left}: addresses belong to different segments")]
    SegmentMismatch {
        /// The left-hand side of the subtraction.
        left: Relocatable,
        /// The right-hand side of the subtraction.
        right: Relocatable,
    },
    /// A memory cell that already holds a value was written a second time.
    ///
    /// This is reported even when the new value equals the existing one.
    #[error("write-once violation at {address}: holds {existing}, attempted to write {value}")]
    WriteOnce {
        /// The address of the memory cell.
        address: Relocatable,
        /// The value the cell already holds.
        existing: Value,
        /// The value that was rejected.
        value: Value,
    },
    /// A memory cell was read before ever being written.
    #[error("unknown memory cell at {0}")]
    UnknownAddress(Relocatable),
    /// Subtracting from an offset would produce a negative offset.
    #[error("offset underflow: cannot subtract {delta} from {address}")]
    OffsetUnderflow {
        /// The address being subtracted from.
        address: Relocatable,
        /// The amount subtracted.
        delta: usize,
    },
    /// Adding to an offset exceeded the range of a machine offset.
    #[error("offset overflow: cannot add {delta} to {address}")]
    OffsetOverflow {
        /// The address being added to.
        address: Relocatable,
        /// The amount added.
        delta: usize,
    },
    /// Attempted to add two relocatable addresses together.
    #[error("cannot add relocatable {right} to relocatable {left}")]
    AddRelocatables {
        /// The left-hand side of the addition.
        left: Relocatable,
        /// The right-hand side of the addition.
        right: Relocatable,
    },
    /// Attempted to subtract a relocatable address from a field element.
    #[error("cannot subtract relocatable {relocatable} from field element {scalar}")]
    SubtractRelocatable {
        /// The field element on the left-hand side.
        scalar: Felt,
        /// The relocatable address on the right-hand side.
        relocatable: Relocatable,
    },
    /// A field element used as an offset does not fit in a machine offset.
    #[error("field element {0} does not fit in a memory offset")]
    OffsetTooLarge(Felt),
    /// An instruction offset does not fit in the signed 16-bit range of the instruction
    /// format.
    #[error("offset {0} is outside of the signed 16-bit range")]
    OffsetOutOfRange(isize),
    /// The second operand is relative to the first one, but the first operand is not known.
    #[error("op1 is relative to op0, but op0 is undefined")]
    Op0Undefined,
    /// The second operand is relative to the first one, but the first operand is a field
    /// element rather than an address.
    #[error("op1 is relative to op0, but op0 is the field element {0}")]
    Op0NotRelocatable(Felt),
    /// An immediate second operand was requested with an offset other than `1`.
    #[error("immediate op1 must have an offset of 1, got {0}")]
    Op1ImmediateOffset(i16),
}
