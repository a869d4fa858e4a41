//! Arithmetic folds, checked and saturating.

use crate::{error::InterpreterError, execution::EvalContext, math};

pub(crate) fn add(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::checked_add(&vals)?);
    Ok(())
}

pub(crate) fn sub(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::checked_sub(&vals)?);
    Ok(())
}

pub(crate) fn mul(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::checked_mul(&vals)?);
    Ok(())
}

pub(crate) fn div(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::checked_div(&vals)?);
    Ok(())
}

pub(crate) fn rem(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::checked_rem(&vals)?);
    Ok(())
}

pub(crate) fn exp(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::checked_exp(&vals)?);
    Ok(())
}

pub(crate) fn min(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::min(&vals)?);
    Ok(())
}

pub(crate) fn max(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::max(&vals)?);
    Ok(())
}

pub(crate) fn saturating_add(
    ctx: &mut EvalContext<'_>,
    operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::saturating_add(&vals));
    Ok(())
}

pub(crate) fn saturating_sub(
    ctx: &mut EvalContext<'_>,
    operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::saturating_sub(&vals)?);
    Ok(())
}

pub(crate) fn saturating_mul(
    ctx: &mut EvalContext<'_>,
    operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(operand as usize)?;
    ctx.push(math::saturating_mul(&vals));
    Ok(())
}
