//! EVM environment opcodes.
//!
//! `BLOCK_NUMBER` and `BLOCK_TIMESTAMP` prefer a value pinned in the run
//! data; only when none was supplied do they fall through to the resolver.
//! Exactly one value is pushed either way.

use ethereum_types::U256;

use crate::{error::InterpreterError, execution::EvalContext, util::h160_to_u256};

pub(crate) fn block_number(ctx: &mut EvalContext<'_>, _operand: u8) -> Result<(), InterpreterError> {
    let number = match ctx.data().block_number {
        Some(number) => U256::from(number),
        None => ctx.resolver().block_number()?,
    };
    ctx.push(number);
    Ok(())
}

pub(crate) fn block_timestamp(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let timestamp = match ctx.data().timestamp {
        Some(timestamp) => U256::from(timestamp),
        None => ctx.resolver().block_timestamp()?,
    };
    ctx.push(timestamp);
    Ok(())
}

pub(crate) fn sender(ctx: &mut EvalContext<'_>, _operand: u8) -> Result<(), InterpreterError> {
    let sender = ctx.resolver().sender()?;
    ctx.push(h160_to_u256(sender));
    Ok(())
}

pub(crate) fn this_address(ctx: &mut EvalContext<'_>, _operand: u8) -> Result<(), InterpreterError> {
    let this = ctx.resolver().this_address()?;
    ctx.push(h160_to_u256(this));
    Ok(())
}
