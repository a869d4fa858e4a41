use ethereum_types::U256;

use crate::{error::InterpreterError, Opcode};

/// A compiled Rain script.
///
/// Each source is a flat sequence of `(opcode, operand)` byte pairs.
/// `sources[0]` is the default entrypoint; other indices are reachable only
/// through `ZIPMAP`. The interpreter borrows a `Script` for the duration of a
/// run and never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub sources: Vec<Vec<u8>>,
    pub constants: Vec<U256>,
}

impl Script {
    pub fn new(sources: Vec<Vec<u8>>, constants: Vec<U256>) -> Self {
        Self { sources, constants }
    }

    pub(crate) fn source(&self, index: usize) -> Result<&[u8], InterpreterError> {
        self.sources
            .get(index)
            .map(Vec::as_slice)
            .ok_or(InterpreterError::MissingSource(index))
    }
}

/// Flattens `(opcode, operand)` pairs into one bytecode source.
pub fn assemble(pairs: &[(Opcode, u8)]) -> Vec<u8> {
    let mut source = Vec::with_capacity(pairs.len() * 2);
    for &(opcode, operand) in pairs {
        source.push(opcode.into());
        source.push(operand);
    }
    source
}
