//! # Cairo VM Core
//!
//! The memory model and operand addressing of a Cairo virtual machine.
//!
//! # Documentation
//!
//! - [The Cairo Whitepaper](https://www.cairo-lang.org/cairo-whitepaper/).

#![warn(missing_docs, missing_debug_implementations)]
#![forbid(unsafe_code)]

use error::Error;
use memory::{Memory, Relocatable, SegmentManager, Value};
use operand::{Op1Source, OperandAddresses, Operands};
use run_context::{RunContext, PROGRAM_SEGMENT};

pub mod error;
pub mod memory;
pub mod operand;
pub mod run_context;


/// Contains the state of a single run of a Cairo virtual machine.
///
/// # Components
///
/// The [`CairoVM`] is composed of two main components:
///
/// - [`RunContext`]: The registers of the virtual machine, used to compute the addresses of
///   the operands of an instruction.
///
/// - [`SegmentManager`]: The owner of the [`Memory`] associated with the run. Instructions and
///   working memory are stored here.
///
/// Nothing is shared between two instances, so independent runs never interfere.
#[derive(Debug, Clone)]
pub struct CairoVM {
    /// The registers of the virtual machine.
    run_context: RunContext,
    /// The segments of the run, and the memory they live in.
    segments: SegmentManager,
}

impl Default for CairoVM {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl CairoVM {
    /// Creates a new [`CairoVM`] with the program and execution segments allocated and the
    /// registers placed at their start.
    pub fn new() -> Self {
        let mut segments = SegmentManager::new();
        let program = segments.add_segment();
        let execution = segments.add_segment();
        log::debug!("created run with program at {program} and execution at {execution}");

        Self {
            run_context: RunContext::new(program, execution, execution),
            segments,
        }
    }

    /// Creates a [`CairoVM`] from existing parts.
    ///
    /// The caller is responsible for the registers referencing allocated segments.
    pub fn from_parts(run_context: RunContext, segments: SegmentManager) -> Self {
        Self {
            run_context,
            segments,
        }
    }

    /// Returns the current state of the [`RunContext`].
    #[inline(always)]
    pub fn run_context(&self) -> &RunContext {
        &self.run_context
    }

    /// Returns the [`RunContext`] for the opcode layer to update its registers.
    #[inline(always)]
    pub fn run_context_mut(&mut self) -> &mut RunContext {
        &mut self.run_context
    }

    /// Returns the [`SegmentManager`] of the run.
    #[inline(always)]
    pub fn segments(&self) -> &SegmentManager {
        &self.segments
    }

    /// Returns the [`SegmentManager`] of the run, for loaders and builtins.
    #[inline(always)]
    pub fn segments_mut(&mut self) -> &mut SegmentManager {
        &mut self.segments
    }

    /// Returns the current state of the [`Memory`].
    #[inline(always)]
    pub fn memory(&self) -> &Memory {
        self.segments.memory()
    }

    /// Loads the words of a program at the start of the program segment.
    ///
    /// Returns the address following the last word of the program.
    pub fn load_program(&mut self, program: &[Value]) -> Result<Relocatable, Error> {
        self.segments.load_data(Relocatable::new(PROGRAM_SEGMENT, 0), program)
    }

    /// Computes the addresses of the operands of an instruction.
    ///
    /// The destination and the first operand are computed first. When the second operand is
    /// relative to the first one, the value of the first operand is read from memory; a cell
    /// that has not been written yet is reported as [`Error::Op0Undefined`].
    pub fn compute_operand_addresses(
        &self,
        operands: &Operands,
    ) -> Result<OperandAddresses, Error> {
        let ctx = &self.run_context;

        let dst = ctx.compute_address(operands.dst_register, operands.dst_offset)?;
        let op0 = ctx.compute_address(operands.op0_register, operands.op0_offset)?;

        let op0_value = match operands.op1_source {
            Op1Source::Op0 => self.memory().get(op0)?,
            _ => None,
        };

        let op1 = ctx.compute_op1_address(operands.op1_source, operands.op1_offset, op0_value)?;

        Ok(OperandAddresses { dst, op0, op1 })
    }
}

#[cfg(test)]
mod tests {
    use starknet_types_core::felt::Felt;

    use super::*;
    use crate::operand::Register;

    fn operands(op1_source: Op1Source, op1_offset: isize) -> Operands {
        Operands {
            dst_register: Register::AP,
            dst_offset: 0,
            op0_register: Register::FP,
            op0_offset: -1,
            op1_source,
            op1_offset,
        }
    }

    fn vm_with_frame() -> CairoVM {
        let mut vm = CairoVM::new();
        vm.run_context_mut().set_fp(Relocatable::new(1, 2));
        vm.run_context_mut().set_ap(Relocatable::new(1, 4));
        vm
    }

    #[test]
    fn new_allocates_program_and_execution() {
        let vm = CairoVM::new();
        assert_eq!(vm.memory().segment_count(), 2);
        assert_eq!(*vm.run_context(), RunContext::default());
    }

    #[test]
    fn load_program_at_pc() {
        let mut vm = CairoVM::new();
        let end = vm
            .load_program(&[Felt::ONE.into(), Felt::TWO.into()])
            .unwrap();
        assert_eq!(end, Relocatable::new(PROGRAM_SEGMENT, 2));
        assert_eq!(vm.memory().read(vm.run_context().pc()), Ok(Felt::ONE.into()));
    }

    #[test]
    fn operands_relative_to_registers() {
        let vm = vm_with_frame();
        assert_eq!(
            vm.compute_operand_addresses(&operands(Op1Source::AP, -1)),
            Ok(OperandAddresses {
                dst: Relocatable::new(1, 4),
                op0: Relocatable::new(1, 1),
                op1: Relocatable::new(1, 3),
            })
        );
    }

    #[test]
    fn operands_with_immediate() {
        let vm = vm_with_frame();
        let addresses = vm
            .compute_operand_addresses(&operands(Op1Source::Imm, 1))
            .unwrap();
        assert_eq!(addresses.op1, Relocatable::new(0, 1));
    }

    #[test]
    fn operands_relative_to_op0() {
        let mut vm = vm_with_frame();
        let target = vm.segments_mut().add_segment();
        vm.segments_mut()
            .insert(Relocatable::new(1, 1), target.into())
            .unwrap();

        let addresses = vm
            .compute_operand_addresses(&operands(Op1Source::Op0, 3))
            .unwrap();
        assert_eq!(addresses.op1, Relocatable::new(2, 3));
    }

    #[test]
    fn operands_with_unknown_op0() {
        let vm = vm_with_frame();
        assert_eq!(
            vm.compute_operand_addresses(&operands(Op1Source::Op0, 0)),
            Err(Error::Op0Undefined)
        );
    }

    #[test]
    fn operands_with_scalar_op0() {
        let mut vm = vm_with_frame();
        vm.segments_mut()
            .insert(Relocatable::new(1, 1), Felt::TWO.into())
            .unwrap();
        assert_eq!(
            vm.compute_operand_addresses(&operands(Op1Source::Op0, 0)),
            Err(Error::Op0NotRelocatable(Felt::TWO))
        );
    }

    #[test]
    fn from_existing_parts() {
        let segments = SegmentManager::from_memory(Memory::with_segments(3));
        let ctx = RunContext::new(
            Relocatable::new(0, 0),
            Relocatable::new(2, 5),
            Relocatable::new(2, 3),
        );
        let vm = CairoVM::from_parts(ctx, segments);

        assert_eq!(vm.segments().segment_count(), 3);
        assert_eq!(
            vm.compute_operand_addresses(&operands(Op1Source::FP, 2)),
            Ok(OperandAddresses {
                dst: Relocatable::new(2, 5),
                op0: Relocatable::new(2, 2),
                op1: Relocatable::new(2, 5),
            })
        );
    }

    #[test]
    fn runs_are_independent() {
        let mut first = CairoVM::new();
        let second = CairoVM::new();
        first.load_program(&[Felt::ONE.into()]).unwrap();
        assert_eq!(first.memory().segment_size(PROGRAM_SEGMENT), 1);
        assert_eq!(second.memory().segment_size(PROGRAM_SEGMENT), 0);
    }
}
