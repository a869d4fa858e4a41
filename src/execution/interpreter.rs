use ahash::AHashMap;
use ethereum_types::U256;

use super::context::EvalContext;
use crate::{
    error::InterpreterError, resolver::Resolver, script::Script, state::ExecutionState,
};

/// An opcode implementation: mutates the run through the [`EvalContext`].
pub type OpcodeFn = fn(&mut EvalContext<'_>, u8) -> Result<(), InterpreterError>;

/// Per-instance interpreter configuration.
///
/// Domains that vary the context length, expose storage slots or carry local
/// opcodes beyond the shared set do so entirely through this struct; there is
/// one interpreter type and no subclassing.
#[derive(Clone, Default)]
pub struct InterpreterConfig {
    /// Upper bound on `CONTEXT` operands for this domain. The default of
    /// zero disables the `CONTEXT` surface entirely: every operand is out
    /// of bounds even when run data supplies context values.
    pub context_length: usize,
    /// `STORAGE` implementations keyed by operand. `None` means the domain
    /// has no storage surface and any `STORAGE` opcode is an error.
    pub storage: Option<AHashMap<u8, OpcodeFn>>,
    /// Opcode implementations consulted before the registry. An entry here
    /// shadows the registry entirely for that id.
    pub overrides: AHashMap<u8, OpcodeFn>,
}

/// Caller-supplied per-run data.
///
/// Supplied values take precedence over the resolver for the corresponding
/// opcodes (`CONTEXT`, `BLOCK_NUMBER`, `BLOCK_TIMESTAMP`), so a simulation can
/// pin a scenario without touching its ledger.
#[derive(Debug, Clone, Default)]
pub struct RunData {
    pub context: Option<Vec<U256>>,
    pub block_number: Option<u64>,
    pub timestamp: Option<u64>,
}

/// The dispatch engine.
///
/// Owns one resolver for its lifetime and is otherwise stateless across runs:
/// each `run` call builds a fresh [`ExecutionState`] and returns the final
/// operand stack, oldest-pushed first. Any opcode failure aborts the run
/// whole; there are no partial results.
pub struct Interpreter {
    resolver: Box<dyn Resolver>,
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(resolver: Box<dyn Resolver>) -> Self {
        Self::with_config(resolver, InterpreterConfig::default())
    }

    pub fn with_config(resolver: Box<dyn Resolver>, config: InterpreterConfig) -> Self {
        Self { resolver, config }
    }

    pub fn resolver(&self) -> &dyn Resolver {
        &*self.resolver
    }

    pub(crate) fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Runs `sources[0]` with no run data.
    pub fn run(&self, script: &Script) -> Result<Vec<U256>, InterpreterError> {
        self.run_with(script, &RunData::default(), 0)
    }

    /// Runs `sources[entrypoint]` with the given run data.
    pub fn run_with(
        &self,
        script: &Script,
        data: &RunData,
        entrypoint: usize,
    ) -> Result<Vec<U256>, InterpreterError> {
        let mut state = ExecutionState::default();
        EvalContext::new(self, script, data, &mut state).eval(entrypoint)?;
        Ok(state.stack)
    }
}
