//! Resolver-backed token reads.
//!
//! These pop addresses and ids off the stack, delegate to the configured
//! resolver and push the result. With a live resolver they are the run's only
//! blocking I/O; against the simulation ledger they are plain lookups.

use crate::{
    error::InterpreterError,
    execution::EvalContext,
    util::{h160_to_u256, u256_to_h160},
};

pub(crate) fn erc20_balance_of(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    let balance = ctx
        .resolver()
        .erc20_balance_of(u256_to_h160(vals[0]), u256_to_h160(vals[1]))?;
    ctx.push(balance);
    Ok(())
}

pub(crate) fn erc20_total_supply(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let token = ctx.pop()?;
    let supply = ctx.resolver().erc20_total_supply(u256_to_h160(token))?;
    ctx.push(supply);
    Ok(())
}

pub(crate) fn erc20_snapshot_balance_of_at(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(3)?;
    let balance = ctx.resolver().erc20_snapshot_balance_of_at(
        u256_to_h160(vals[0]),
        u256_to_h160(vals[1]),
        vals[2],
    )?;
    ctx.push(balance);
    Ok(())
}

pub(crate) fn erc20_snapshot_total_supply_at(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    let supply = ctx
        .resolver()
        .erc20_snapshot_total_supply_at(u256_to_h160(vals[0]), vals[1])?;
    ctx.push(supply);
    Ok(())
}

pub(crate) fn erc721_balance_of(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    let balance = ctx
        .resolver()
        .erc721_balance_of(u256_to_h160(vals[0]), u256_to_h160(vals[1]))?;
    ctx.push(balance);
    Ok(())
}

pub(crate) fn erc721_owner_of(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    let owner = ctx
        .resolver()
        .erc721_owner_of(u256_to_h160(vals[0]), vals[1])?;
    ctx.push(h160_to_u256(owner));
    Ok(())
}

pub(crate) fn erc1155_balance_of(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(3)?;
    let balance = ctx.resolver().erc1155_balance_of(
        u256_to_h160(vals[0]),
        u256_to_h160(vals[1]),
        vals[2],
    )?;
    ctx.push(balance);
    Ok(())
}

/// `IERC1155_BALANCE_OF_BATCH`: operand is the pair count `n`; pops the token
/// then `n` accounts then `n` ids, and pushes the `n` balances in order.
pub(crate) fn erc1155_balance_of_batch(
    ctx: &mut EvalContext<'_>,
    operand: u8,
) -> Result<(), InterpreterError> {
    let n = operand as usize;
    let vals = ctx.pop_n(1 + 2 * n)?;
    let token = u256_to_h160(vals[0]);
    let accounts: Vec<_> = vals[1..1 + n].iter().map(|v| u256_to_h160(*v)).collect();
    let ids = &vals[1 + n..];
    let balances = ctx.resolver().erc1155_balance_of_batch(token, &accounts, ids)?;
    for balance in balances {
        ctx.push(balance);
    }
    Ok(())
}
