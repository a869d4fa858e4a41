use ethereum_types::U256;
use tracing::trace;

use super::interpreter::{Interpreter, RunData};
use crate::{
    error::InterpreterError,
    registry,
    script::Script,
    state::{ExecutionState, Operands},
};

/// Everything an opcode implementation can touch during a run.
///
/// One context is built per `run` call and threaded through the dispatch
/// loop; zipmap re-enters [`EvalContext::eval`] on the same context, so its
/// iterations share the main stack while the argument stack is replaced per
/// iteration.
pub struct EvalContext<'a> {
    interpreter: &'a Interpreter,
    script: &'a Script,
    data: &'a RunData,
    state: &'a mut ExecutionState,
}

impl<'a> EvalContext<'a> {
    pub(crate) fn new(
        interpreter: &'a Interpreter,
        script: &'a Script,
        data: &'a RunData,
        state: &'a mut ExecutionState,
    ) -> Self {
        Self {
            interpreter,
            script,
            data,
            state,
        }
    }

    /// The dispatch loop over one source: `(opcode, operand)` byte pairs,
    /// strictly in order, until the source is exhausted or an opcode fails.
    pub(crate) fn eval(&mut self, source_index: usize) -> Result<(), InterpreterError> {
        let source = self.script.source(source_index)?;
        if source.len() % 2 != 0 {
            return Err(InterpreterError::TruncatedSource(source_index));
        }
        for pair in source.chunks_exact(2) {
            self.step(pair[0], pair[1])?;
        }
        Ok(())
    }

    fn step(&mut self, id: u8, operand: u8) -> Result<(), InterpreterError> {
        if let Some(run) = self.interpreter.config().overrides.get(&id) {
            trace!(opcode = id, operand, "dispatch (override)");
            return run(self, operand);
        }
        let descriptor =
            registry::lookup(id).ok_or(InterpreterError::UnknownOpcode(id))?;
        trace!(opcode = descriptor.name, operand, "dispatch");
        (descriptor.run)(self, operand)
    }

    pub fn push(&mut self, value: U256) {
        self.state.push(value);
    }

    pub fn pop(&mut self) -> Result<U256, InterpreterError> {
        self.state.pop()
    }

    /// Pops `n` values, returned oldest-pushed first.
    pub fn pop_n(&mut self, n: usize) -> Result<Operands, InterpreterError> {
        self.state.pop_n(n)
    }

    pub fn stack(&self) -> &[U256] {
        self.state.stack()
    }

    pub fn constants(&self) -> &[U256] {
        &self.script.constants
    }

    pub fn data(&self) -> &RunData {
        self.data
    }

    pub fn resolver(&self) -> &dyn crate::resolver::Resolver {
        self.interpreter.resolver()
    }

    pub(crate) fn interpreter(&self) -> &Interpreter {
        self.interpreter
    }

    pub(crate) fn arg_stack(&self) -> &[U256] {
        &self.state.arg_stack
    }

    /// Replaces the argument stack wholesale for one zipmap iteration.
    pub(crate) fn replace_args(&mut self, args: impl IntoIterator<Item = U256>) {
        self.state.arg_stack.clear();
        self.state.arg_stack.extend(args);
    }
}
