//! Value access, storage delegation, the debug dump and zipmap.

use ethereum_types::U256;
use tracing::debug;

use crate::{error::InterpreterError, execution::EvalContext};

/// `CONSTANT`: pushes `constants[operand]`, falling through to the zipmap
/// argument stack at `operand - constants.len()` when the operand is past the
/// constant pool.
pub(crate) fn constant(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let index = operand as usize;
    if let Some(value) = ctx.constants().get(index).copied() {
        ctx.push(value);
        return Ok(());
    }
    let arg_index = index - ctx.constants().len();
    if ctx.arg_stack().is_empty() {
        // Not inside a zipmap sub-call: there is nothing to fall through to.
        return Err(InterpreterError::OutOfBoundsConstant(index));
    }
    match ctx.arg_stack().get(arg_index) {
        Some(value) => {
            let value = *value;
            ctx.push(value);
            Ok(())
        }
        None => Err(InterpreterError::OutOfBoundsArgument(arg_index)),
    }
}

/// `STACK`: copies (not moves) `stack[operand]` onto the top.
pub(crate) fn stack(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let index = operand as usize;
    let value = *ctx.stack().get(index).ok_or(InterpreterError::StackUnderflow {
        needed: index + 1,
        available: ctx.stack().len(),
    })?;
    ctx.push(value);
    Ok(())
}

/// `CONTEXT`: pushes `data.context[operand]`.
pub(crate) fn context(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let index = operand as usize;
    let values = ctx
        .data()
        .context
        .as_deref()
        .ok_or(InterpreterError::UndefinedContext)?;
    if index >= ctx.interpreter().config().context_length || index >= values.len() {
        return Err(InterpreterError::OutOfBoundsContext(index));
    }
    let value = values[index];
    ctx.push(value);
    Ok(())
}

/// `STORAGE`: delegates to the configured storage-opcode table.
pub(crate) fn storage(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let run = *ctx
        .interpreter()
        .config()
        .storage
        .as_ref()
        .ok_or(InterpreterError::UndefinedStorage)?
        .get(&operand)
        .ok_or(InterpreterError::OutOfBoundsStorage(operand as usize))?;
    run(ctx, operand)
}

/// `DEBUG`: diagnostic dump of the current stack, no stack effect.
pub(crate) fn debug_stack(ctx: &mut EvalContext<'_>, _operand: u8) -> Result<(), InterpreterError> {
    debug!(stack = ?ctx.stack(), "DEBUG opcode");
    Ok(())
}

/// `ZIPMAP`: slices popped values into sub-word lanes and re-runs another
/// source once per lane set.
///
/// Operand packing: entrypoint in bits 0..3, the subdivision selector in bits
/// 3..5 (`1 << selector` iterations of `256 >> selector`-bit lanes), and the
/// popped-value count minus one in bits 5..8.
///
/// Each iteration replaces the argument stack with the current lane of every
/// popped value (most significant lane first) and evaluates the sub-source on
/// the shared main stack, so results accumulate across iterations. Any
/// iteration failure aborts the whole run.
pub(crate) fn zipmap(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let entrypoint = (operand & 0x07) as usize;
    let loop_pow = ((operand >> 3) & 0x03) as usize;
    let val_count = ((operand >> 5) & 0x07) as usize + 1;
    let iterations = 1usize << loop_pow;
    let lane_bits = 256 >> loop_pow;

    let vals = ctx.pop_n(val_count)?;
    for step in 0..iterations {
        ctx.replace_args(vals.iter().map(|val| lane(*val, step, lane_bits)));
        ctx.eval(entrypoint)?;
    }
    Ok(())
}

/// Extracts lane `step` of `value`, counting lanes from the most significant
/// end down.
fn lane(value: U256, step: usize, lane_bits: usize) -> U256 {
    if lane_bits == 256 {
        value
    } else {
        (value << (step * lane_bits)) >> (256 - lane_bits)
    }
}
