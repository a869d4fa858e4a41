use ethereum_types::U256;
use smallvec::SmallVec;

use crate::error::InterpreterError;

/// Scratch buffer for popped operands. Eight inline slots cover every
/// fixed-arity opcode and the common variable arities.
pub type Operands = SmallVec<[U256; 8]>;

/// Per-run mutable state: the operand stack and the zipmap argument stack.
///
/// Both stacks start empty at the beginning of a run and are discarded at its
/// end; nothing survives between runs except what the caller carries itself
/// (e.g. a resolver's ledger).
#[derive(Debug, Default)]
pub struct ExecutionState {
    pub(crate) stack: Vec<U256>,
    pub(crate) arg_stack: Vec<U256>,
}

impl ExecutionState {
    pub fn stack(&self) -> &[U256] {
        &self.stack
    }

    pub(crate) fn push(&mut self, value: U256) {
        self.stack.push(value);
    }

    pub(crate) fn pop(&mut self) -> Result<U256, InterpreterError> {
        self.stack.pop().ok_or(InterpreterError::StackUnderflow {
            needed: 1,
            available: 0,
        })
    }

    /// Pops `n` values, returned oldest-pushed first.
    pub(crate) fn pop_n(&mut self, n: usize) -> Result<Operands, InterpreterError> {
        let available = self.stack.len();
        if available < n {
            return Err(InterpreterError::StackUnderflow {
                needed: n,
                available,
            });
        }
        Ok(self.stack.drain(available - n..).collect())
    }
}
