//! Defines the selectors an instruction uses to locate its operands.

use crate::memory::Relocatable;

/// A register the destination or first operand of an instruction can be relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    /// The **Allocation Pointer**.
    AP = 0,
    /// The **Frame Pointer**.
    FP = 1,
}

/// A register/object the second operand of an instruction can be relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Op1Source {
    /// The value of the first operand of the instruction, which must be an address.
    Op0 = 0,
    /// The immediate value directly following the instruction, relative to the
    /// **Program Counter**.
    Imm = 1,
    /// The **Frame Pointer**.
    FP = 2,
    /// The **Allocation Pointer**.
    AP = 4,
}

/// The operand locators of a decoded instruction.
///
/// Offsets are kept wide so that values coming from outside the instruction encoding are
/// range-checked when the addresses are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands {
    /// The register the destination is relative to.
    pub dst_register: Register,
    /// The offset applied to the destination register.
    pub dst_offset: isize,
    /// The register the first operand is relative to.
    pub op0_register: Register,
    /// The offset applied to the first operand register.
    pub op0_offset: isize,
    /// The source of the second operand.
    pub op1_source: Op1Source,
    /// The offset applied to the source of the second operand.
    pub op1_offset: isize,
}

/// The addresses of the operands of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandAddresses {
    /// The address of the destination.
    pub dst: Relocatable,
    /// The address of the first operand.
    pub op0: Relocatable,
    /// The address of the second operand.
    pub op1: Relocatable,
}
