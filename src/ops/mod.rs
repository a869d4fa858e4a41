//! Opcode implementations.
//!
//! Each function here is one entry in the registry; they only touch the run
//! through the [`EvalContext`](crate::EvalContext) handed to them: the stack,
//! the argument stack, the run data and the resolver.

pub(crate) mod core;
pub(crate) mod erc;
pub(crate) mod evm;
pub(crate) mod logic;
pub(crate) mod math;
pub(crate) mod scale;
pub(crate) mod tier;
