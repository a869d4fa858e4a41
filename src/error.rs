use ethereum_types::{H160, U256};
use thiserror::Error;

use crate::resolver::TransportError;

/// Every failure mode of a `run()`.
///
/// All variants are terminal for the enclosing run: the dispatch loop aborts
/// at the first error, including inside nested zipmap iterations, and the
/// caller never observes a partially-built stack.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterpreterError {
    #[error("stack underflow: needed {needed} item(s), had {available}")]
    StackUnderflow { needed: usize, available: usize },

    #[error("constant operand {0} out of bounds")]
    OutOfBoundsConstant(usize),

    #[error("argument operand {0} out of bounds")]
    OutOfBoundsArgument(usize),

    #[error("context operand {0} out of bounds")]
    OutOfBoundsContext(usize),

    #[error("no context supplied to a CONTEXT opcode")]
    UndefinedContext,

    #[error("no storage table configured for a STORAGE opcode")]
    UndefinedStorage,

    #[error("storage operand {0} not present in the storage table")]
    OutOfBoundsStorage(usize),

    #[error("numeric overflow")]
    NumericOverflow,

    #[error("numeric underflow")]
    NumericUnderflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("tier argument {0} outside [1, 8]")]
    InvalidTierArgument(U256),

    #[error("batch read with {accounts} account(s) but {ids} id(s)")]
    BatchLengthMismatch { accounts: usize, ids: usize },

    #[error("resolver has no record for {0:?}")]
    ResolverNotFound(H160),

    #[error("unknown opcode 0x{0:02x}")]
    UnknownOpcode(u8),

    #[error("source {0} has a trailing opcode byte with no operand")]
    TruncatedSource(usize),

    #[error("script has no source at index {0}")]
    MissingSource(usize),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
