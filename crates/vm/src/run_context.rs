//! Defines the [`RunContext`] type, holding the registers of the virtual machine.
//!
//! More information in the documentation for [`RunContext`].

use crate::error::Error;
use crate::memory::{Relocatable, Value};
use crate::operand::{Op1Source, Register};

/// The segment in which the program is loaded.
pub const PROGRAM_SEGMENT: usize = 0;

/// The segment used as working memory by the program.
pub const EXECUTION_SEGMENT: usize = 1;

/// The registers of the Cairo virtual machine.
///
/// By itself, a [`RunContext`] only knows where things are: it computes the addresses of the
/// operands of an instruction relative to its registers. Reading or writing those addresses is
/// done through the [`Memory`](crate::memory::Memory).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    /// The Program Counter, pointing to the next instruction to be fetched from memory.
    ///
    /// It is possible to change the segment in which **PC** points to using an absolute jump,
    /// preventing us from assuming that **PC** is always part of the same segment.
    pc: Relocatable,
    /// The Allocation Pointer, incremented by most instructions that need to write to working
    /// memory.
    ap: Relocatable,
    /// The Frame Pointer, pointing to the base of the current frame.
    fp: Relocatable,
}

impl Default for RunContext {
    /// Places **PC** at the start of the program segment, and both **AP** and **FP** at the
    /// start of the execution segment.
    fn default() -> Self {
        Self::new(
            Relocatable::new(PROGRAM_SEGMENT, 0),
            Relocatable::new(EXECUTION_SEGMENT, 0),
            Relocatable::new(EXECUTION_SEGMENT, 0),
        )
    }
}

impl RunContext {
    /// Creates a new [`RunContext`] from explicit register values.
    pub const fn new(pc: Relocatable, ap: Relocatable, fp: Relocatable) -> Self {
        Self { pc, ap, fp }
    }

    /// Returns the **Program Counter**.
    #[inline(always)]
    pub fn pc(&self) -> Relocatable {
        self.pc
    }

    /// Returns the **Allocation Pointer**.
    #[inline(always)]
    pub fn ap(&self) -> Relocatable {
        self.ap
    }

    /// Returns the **Frame Pointer**.
    #[inline(always)]
    pub fn fp(&self) -> Relocatable {
        self.fp
    }

    /// Sets the **Program Counter**, for jumps.
    #[inline(always)]
    pub fn set_pc(&mut self, pc: Relocatable) {
        self.pc = pc;
    }

    /// Sets the **Allocation Pointer**.
    #[inline(always)]
    pub fn set_ap(&mut self, ap: Relocatable) {
        self.ap = ap;
    }

    /// Sets the **Frame Pointer**.
    #[inline(always)]
    pub fn set_fp(&mut self, fp: Relocatable) {
        self.fp = fp;
    }

    /// Advances the **Program Counter** past an instruction of `instruction_size` cells.
    pub fn increment_pc(&mut self, instruction_size: usize) -> Result<(), Error> {
        self.pc = self.pc.add_offset(instruction_size)?;
        log::trace!("pc advanced to {}", self.pc);
        Ok(())
    }

    /// Returns the value of `register`.
    #[inline]
    pub fn register(&self, register: Register) -> Relocatable {
        match register {
            Register::AP => self.ap,
            Register::FP => self.fp,
        }
    }

    /// Computes the address located `offset` cells away from `register`.
    pub fn compute_address(
        &self,
        register: Register,
        offset: isize,
    ) -> Result<Relocatable, Error> {
        let offset = narrow_offset(offset)?;
        self.register(register).apply_offset(offset)
    }

    /// Computes the address of the second operand of an instruction.
    ///
    /// `op0` is the value of the first operand, when known. It is only required when the
    /// second operand is relative to it.
    pub fn compute_op1_address(
        &self,
        op1_source: Op1Source,
        op1_offset: isize,
        op0: Option<&Value>,
    ) -> Result<Relocatable, Error> {
        let offset = narrow_offset(op1_offset)?;

        let base = match op1_source {
            Op1Source::AP => self.ap,
            Op1Source::FP => self.fp,
            // The immediate value is encoded in the cell directly following the instruction.
            Op1Source::Imm if offset == 1 => self.pc,
            Op1Source::Imm => return Err(Error::Op1ImmediateOffset(offset)),
            Op1Source::Op0 => match op0 {
                Some(Value::Relocatable(r)) => *r,
                Some(Value::Scalar(felt)) => return Err(Error::Op0NotRelocatable(*felt)),
                None => return Err(Error::Op0Undefined),
            },
        };

        base.apply_offset(offset)
    }
}

/// Checks that an offset fits in the 16-bit offset fields of the instruction format.
fn narrow_offset(offset: isize) -> Result<i16, Error> {
    i16::try_from(offset).map_err(|_| Error::OffsetOutOfRange(offset))
}
