//! Tier-report opcodes: resolver reads plus the pure combination library.

use crate::{
    error::InterpreterError,
    execution::EvalContext,
    tier::{self, SelectLogic, SelectMode},
    util::u256_to_h160,
};

/// `ITIERV2_REPORT`: operand is the count of extra context values. Pops the
/// tier contract, the account, then the context, and pushes the report.
pub(crate) fn report(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2 + operand as usize)?;
    let report = ctx.resolver().tier_report(
        u256_to_h160(vals[0]),
        u256_to_h160(vals[1]),
        &vals[2..],
    )?;
    ctx.push(report);
    Ok(())
}

/// `ITIERV2_REPORT_TIME_FOR_TIER`: like [`report`] with an extra tier
/// argument, rejected outside `[1, 8]` before the resolver is consulted.
pub(crate) fn report_time_for_tier(
    ctx: &mut EvalContext<'_>,
    operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(3 + operand as usize)?;
    let tier = vals[2];
    if tier.is_zero() || tier > ethereum_types::U256::from(tier::TIER_COUNT) {
        return Err(InterpreterError::InvalidTierArgument(tier));
    }
    let time = ctx.resolver().tier_report_time_for_tier(
        u256_to_h160(vals[0]),
        u256_to_h160(vals[1]),
        tier,
        &vals[3..],
    )?;
    ctx.push(time);
    Ok(())
}

pub(crate) fn saturating_diff(
    ctx: &mut EvalContext<'_>,
    _operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    ctx.push(tier::saturating_diff(vals[0], vals[1]));
    Ok(())
}

/// `UPDATE_TIMES_FOR_TIER_RANGE`: pops the report then the timestamp; the
/// tier range rides in the operand nibbles.
pub(crate) fn update_times_for_tier_range(
    ctx: &mut EvalContext<'_>,
    operand: u8,
) -> Result<(), InterpreterError> {
    let vals = ctx.pop_n(2)?;
    ctx.push(tier::update_times_for_tier_range(vals[0], vals[1], operand));
    Ok(())
}

/// `SELECT_LTE`: operand packs logic (bit 7), mode (bits 5..7) and the report
/// count (bits 0..5). Pops the cutoff timestamp then the reports.
pub(crate) fn select_lte(ctx: &mut EvalContext<'_>, operand: u8) -> Result<(), InterpreterError> {
    let logic = if operand >> 7 == 0 {
        SelectLogic::Every
    } else {
        SelectLogic::Any
    };
    let mode = match (operand >> 5) & 0x03 {
        0 => SelectMode::Min,
        1 => SelectMode::Max,
        _ => SelectMode::Last,
    };
    let length = (operand & 0x1f) as usize;

    let vals = ctx.pop_n(length + 1)?;
    let timestamp = vals[0];
    ctx.push(tier::select_lte(&vals[1..], timestamp, logic, mode));
    Ok(())
}
