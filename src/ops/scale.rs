//! Fixed-point rescaling opcodes; the operand carries the scale.

use crate::{error::InterpreterError, execution::EvalContext, math};

pub(crate) fn scale18(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let value = ctx.pop()?;
    ctx.push(math::scale18(value, operand as u32)?);
    Ok(())
}

pub(crate) fn scale_n(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let value = ctx.pop()?;
    ctx.push(math::scale_n(value, operand as u32)?);
    Ok(())
}

pub(crate) fn scale_by(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let value = ctx.pop()?;
    ctx.push(math::scale_by(value, operand)?);
    Ok(())
}

pub(crate) fn scale18_mul(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    ctx.push(math::fixed_point_mul(vals[0], vals[1], operand as u32)?);
    Ok(())
}

pub(crate) fn scale18_div(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    ctx.push(math::fixed_point_div(vals[0], vals[1], operand as u32)?);
    Ok(())
}
