//! Bit-packed tier report encoding and combination.
//!
//! A report is a `U256` split into eight 32-bit lanes. Lane `k` (counting
//! from the least significant end) holds the timestamp at which tier `k + 1`
//! was first reached, or [`NEVER`] if it never was. All functions here are
//! pure; the corresponding opcodes are thin wrappers over them.

use ethereum_types::U256;

use crate::error::InterpreterError;

/// Sentinel lane value: "tier never reached".
pub const NEVER: u32 = u32::MAX;

/// Number of 32-bit lanes in a report.
pub const TIER_COUNT: usize = 8;

/// The all-sentinel report: no tier ever reached.
pub fn never_report() -> U256 {
    U256::MAX
}

/// Reads lane `index` (0-based, least significant first) of a report.
pub fn lane(report: U256, index: usize) -> u32 {
    (report >> (index * 32)).low_u32()
}

/// Returns `report` with lane `index` replaced by `value`.
pub fn with_lane(report: U256, index: usize, value: u32) -> U256 {
    let shift = index * 32;
    let mask = U256::from(u32::MAX) << shift;
    (report & !mask) | (U256::from(value) << shift)
}

/// Selection across reports for a single lane: `EVERY` requires the lane to
/// be reached (by the cutoff timestamp) in all reports, `ANY` in at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectLogic {
    Every,
    Any,
}

/// Reduction applied to the qualifying lane values of [`select_lte`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    Min,
    Max,
    Last,
}

/// Pulls the reached-time of every tier in `[start, end)` (packed as the low
/// and high nibbles of `range`) back to `timestamp` where that is earlier.
///
/// A lane can only move earlier through this function; later timestamps and
/// lanes outside the range pass through unchanged.
pub fn update_times_for_tier_range(report: U256, timestamp: U256, range: u8) -> U256 {
    let start = (range & 0x0f) as usize;
    let end = ((range >> 4) & 0x0f) as usize;
    let mut updated = report;
    for index in start..end.min(TIER_COUNT) {
        if timestamp < U256::from(lane(updated, index)) {
            // timestamp < an existing lane value, so it fits in 32 bits
            updated = with_lane(updated, index, timestamp.low_u32());
        }
    }
    updated
}

/// Lane-wise saturating difference `a - b`, clamping each lane at zero.
///
/// This is eight independent 32-bit subtractions, not one 256-bit one.
pub fn saturating_diff(a: U256, b: U256) -> U256 {
    let mut diff = U256::zero();
    for index in 0..TIER_COUNT {
        diff = with_lane(diff, index, lane(a, index).saturating_sub(lane(b, index)));
    }
    diff
}

/// Combines reports lane-wise into one synthesized report.
///
/// A lane value strictly after `timestamp` counts as [`NEVER`] for the
/// combination. Under [`SelectLogic::Every`] a single such lane forces the
/// result lane to [`NEVER`]; under [`SelectLogic::Any`] the qualifying values
/// are reduced with `mode`, defaulting to [`NEVER`] when none qualify.
pub fn select_lte(
    reports: &[U256],
    timestamp: U256,
    logic: SelectLogic,
    mode: SelectMode,
) -> U256 {
    let mut combined = U256::zero();
    for index in 0..TIER_COUNT {
        let mut acc: Option<u32> = None;
        let mut missing = false;
        for report in reports {
            let value = lane(*report, index);
            if value == NEVER || U256::from(value) > timestamp {
                missing = true;
                continue;
            }
            acc = Some(match (mode, acc) {
                (SelectMode::Min, Some(best)) => best.min(value),
                (SelectMode::Max, Some(best)) => best.max(value),
                (SelectMode::Last, _) | (_, None) => value,
            });
        }
        let result = match logic {
            SelectLogic::Every if missing => NEVER,
            _ => acc.unwrap_or(NEVER),
        };
        combined = with_lane(combined, index, result);
    }
    combined
}

/// Reads a single tier's reached-time out of a report.
///
/// `tier` is 1-based; values outside `[1, 8]` are rejected.
pub fn report_time_for_tier(report: U256, tier: U256) -> Result<U256, InterpreterError> {
    if tier.is_zero() || tier > U256::from(TIER_COUNT) {
        return Err(InterpreterError::InvalidTierArgument(tier));
    }
    Ok(U256::from(lane(report, tier.low_u32() as usize - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_from_lanes(lanes: [u32; 8]) -> U256 {
        let mut report = U256::zero();
        for (index, value) in lanes.into_iter().enumerate() {
            report = with_lane(report, index, value);
        }
        report
    }

    #[test]
    fn lane_round_trip() {
        let report = report_from_lanes([1, 2, 3, 4, 5, 6, 7, 8]);
        for index in 0..TIER_COUNT {
            assert_eq!(lane(report, index), index as u32 + 1);
        }
    }

    #[test]
    fn update_pulls_earlier_only() {
        let report = report_from_lanes([100, 200, NEVER, NEVER, 50, 60, 70, 80]);
        // Range [0, 4): lanes 0..=3.
        let updated = update_times_for_tier_range(report, U256::from(150), 0x40);
        assert_eq!(lane(updated, 0), 100); // 150 is later, untouched
        assert_eq!(lane(updated, 1), 150);
        assert_eq!(lane(updated, 2), 150);
        assert_eq!(lane(updated, 3), 150);
        // Lanes outside the range pass through.
        assert_eq!(lane(updated, 4), 50);
        assert_eq!(lane(updated, 7), 80);
    }

    #[test]
    fn update_full_range_then_diff_self_is_zero() {
        let updated = update_times_for_tier_range(never_report(), U256::from(123), 0x80);
        for index in 0..TIER_COUNT {
            assert_eq!(lane(updated, index), 123);
        }
        assert_eq!(saturating_diff(updated, updated), U256::zero());
    }

    #[test]
    fn diff_clamps_per_lane() {
        let a = report_from_lanes([10, 5, NEVER, 0, 1, 1, 1, 1]);
        let b = report_from_lanes([3, 9, 1, 4, 1, 1, 1, 1]);
        let diff = saturating_diff(a, b);
        assert_eq!(lane(diff, 0), 7);
        assert_eq!(lane(diff, 1), 0);
        assert_eq!(lane(diff, 2), NEVER - 1);
        assert_eq!(lane(diff, 3), 0);
    }

    #[test]
    fn select_lte_any_min_picks_earliest_pre_cutoff() {
        let a = report_from_lanes([NEVER, NEVER, 50, 50, 50, 50, NEVER, NEVER]);
        let b = report_from_lanes([30, NEVER, 90, 40, 200, 50, NEVER, 10]);
        let combined = select_lte(&[a, b], U256::from(100), SelectLogic::Any, SelectMode::Min);
        let expected = report_from_lanes([30, NEVER, 50, 40, 50, 50, NEVER, 10]);
        assert_eq!(combined, expected);
    }

    #[test]
    fn select_lte_every_forces_sentinel_on_any_missing() {
        let a = report_from_lanes([20, 20, NEVER, 20, 20, 20, 20, 20]);
        let b = report_from_lanes([30, NEVER, 30, 30, 30, 30, 30, 30]);
        let combined = select_lte(&[a, b], U256::from(100), SelectLogic::Every, SelectMode::Max);
        let expected = report_from_lanes([30, NEVER, NEVER, 30, 30, 30, 30, 30]);
        assert_eq!(combined, expected);
    }

    #[test]
    fn select_lte_treats_post_cutoff_as_missing() {
        let a = report_from_lanes([150, 150, 150, 150, 150, 150, 150, 150]);
        let combined = select_lte(&[a], U256::from(100), SelectLogic::Any, SelectMode::Min);
        assert_eq!(combined, never_report());
    }

    #[test]
    fn select_lte_last_takes_latest_declared() {
        let a = report_from_lanes([10, 10, 10, 10, 10, 10, 10, 10]);
        let b = report_from_lanes([20, NEVER, 20, 20, 20, 20, 20, 20]);
        let combined = select_lte(&[a, b], U256::from(100), SelectLogic::Any, SelectMode::Last);
        let expected = report_from_lanes([20, 10, 20, 20, 20, 20, 20, 20]);
        assert_eq!(combined, expected);
    }

    #[test]
    fn report_time_rejects_out_of_range_tiers() {
        let report = report_from_lanes([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(report_time_for_tier(report, U256::from(1)), Ok(U256::from(1)));
        assert_eq!(report_time_for_tier(report, U256::from(8)), Ok(U256::from(8)));
        assert!(matches!(
            report_time_for_tier(report, U256::zero()),
            Err(InterpreterError::InvalidTierArgument(_))
        ));
        assert!(matches!(
            report_time_for_tier(report, U256::from(9)),
            Err(InterpreterError::InvalidTierArgument(_))
        ));
    }
}
