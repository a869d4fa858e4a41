//! Boolean opcodes. Truth is `0`/`1` on the stack, but `ANY`/`EVERY` return
//! the triggering value itself, matching the on-chain contract.

use ethereum_types::U256;

use crate::{error::InterpreterError, execution::EvalContext};

pub(crate) fn is_zero(ctx: &mut EvalContext<'_>, _operand: u8) -> Result<(), InterpreterError> {
    let value = ctx.pop()?;
    ctx.push(bool_word(value.is_zero()));
    Ok(())
}

pub(crate) fn equal_to(ctx: &mut EvalContext<'_>, _operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    ctx.push(bool_word(vals[0] == vals[1]));
    Ok(())
}

pub(crate) fn less_than(ctx: &mut EvalContext<'_>, _operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    ctx.push(bool_word(vals[0] < vals[1]));
    Ok(())
}

pub(crate) fn greater_than(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    ctx.push(bool_word(vals[0] > vals[1]));
    Ok(())
}

/// `EAGER_IF`: both branches are already evaluated on the stack; this only
/// selects between them.
pub(crate) fn eager_if(ctx: &mut EvalContext<'_>, _operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(3)?;
    ctx.push(if vals[0].is_zero() { vals[2] } else { vals[1] });
    Ok(())
}

/// `ANY`: the first non-zero value in declaration order, else zero.
pub(crate) fn any(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    let result = vals
        .iter()
        .find(|v| !v.is_zero())
        .copied()
        .unwrap_or_default();
    ctx.push(result);
    Ok(())
}

/// `EVERY`: zero if any value is zero, else the first value.
pub(crate) fn every(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    let result = if vals.iter().any(U256::is_zero) {
        U256::zero()
    } else {
        vals.first().copied().unwrap_or_default()
    };
    ctx.push(result);
    Ok(())
}

fn bool_word(value: bool) -> U256 {
    if value {
        U256::one()
    } else {
        U256::zero()
    }
}
