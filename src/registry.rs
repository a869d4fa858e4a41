//! The process-wide opcode registry.
//!
//! Built once at startup and never mutated: one descriptor per opcode id,
//! carrying the canonical name (plus accepted aliases for the external
//! pretty-printer), the derived push/pop arity functions and the
//! implementation. Per-run behavior changes go through the interpreter's
//! override table, never through this table.

use once_cell::sync::Lazy;
use strum::EnumCount;

use crate::{execution::OpcodeFn, ops, Opcode};

/// Registry entry for one opcode.
#[derive(Clone, Copy)]
pub struct OpcodeDescriptor {
    pub opcode: Opcode,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub run: OpcodeFn,
}

impl OpcodeDescriptor {
    /// Stack items consumed, derived from the operand where arity varies.
    pub fn pops(&self, operand: u8) -> usize {
        self.opcode.pops(operand)
    }

    /// Stack items produced.
    pub fn pushes(&self, operand: u8) -> usize {
        self.opcode.pushes(operand)
    }
}

const fn descriptor(
    opcode: Opcode,
    name: &'static str,
    aliases: &'static [&'static str],
    run: OpcodeFn,
) -> OpcodeDescriptor {
    OpcodeDescriptor {
        opcode,
        name,
        aliases,
        run,
    }
}

/// Indexed by opcode id; the discriminants are dense so id == index.
static REGISTRY: Lazy<[OpcodeDescriptor; Opcode::COUNT]> = Lazy::new(|| {
    [
        descriptor(Opcode::Constant, "CONSTANT", &["VAL"], ops::core::constant),
        descriptor(Opcode::Stack, "STACK", &["DUP"], ops::core::stack),
        descriptor(Opcode::Context, "CONTEXT", &[], ops::core::context),
        descriptor(Opcode::Storage, "STORAGE", &[], ops::core::storage),
        descriptor(Opcode::Zipmap, "ZIPMAP", &[], ops::core::zipmap),
        descriptor(Opcode::Debug, "DEBUG", &[], ops::core::debug_stack),
        descriptor(
            Opcode::Ierc20BalanceOf,
            "IERC20_BALANCE_OF",
            &[],
            ops::erc::erc20_balance_of,
        ),
        descriptor(
            Opcode::Ierc20TotalSupply,
            "IERC20_TOTAL_SUPPLY",
            &[],
            ops::erc::erc20_total_supply,
        ),
        descriptor(
            Opcode::Ierc20SnapshotBalanceOfAt,
            "IERC20_SNAPSHOT_BALANCE_OF_AT",
            &[],
            ops::erc::erc20_snapshot_balance_of_at,
        ),
        descriptor(
            Opcode::Ierc20SnapshotTotalSupplyAt,
            "IERC20_SNAPSHOT_TOTAL_SUPPLY_AT",
            &[],
            ops::erc::erc20_snapshot_total_supply_at,
        ),
        descriptor(
            Opcode::Ierc721BalanceOf,
            "IERC721_BALANCE_OF",
            &[],
            ops::erc::erc721_balance_of,
        ),
        descriptor(
            Opcode::Ierc721OwnerOf,
            "IERC721_OWNER_OF",
            &[],
            ops::erc::erc721_owner_of,
        ),
        descriptor(
            Opcode::Ierc1155BalanceOf,
            "IERC1155_BALANCE_OF",
            &[],
            ops::erc::erc1155_balance_of,
        ),
        descriptor(
            Opcode::Ierc1155BalanceOfBatch,
            "IERC1155_BALANCE_OF_BATCH",
            &[],
            ops::erc::erc1155_balance_of_batch,
        ),
        descriptor(
            Opcode::BlockNumber,
            "BLOCK_NUMBER",
            &[],
            ops::evm::block_number,
        ),
        descriptor(Opcode::Sender, "SENDER", &[], ops::evm::sender),
        descriptor(
            Opcode::ThisAddress,
            "THIS_ADDRESS",
            &[],
            ops::evm::this_address,
        ),
        descriptor(
            Opcode::BlockTimestamp,
            "BLOCK_TIMESTAMP",
            &[],
            ops::evm::block_timestamp,
        ),
        descriptor(Opcode::Scale18, "SCALE18", &[], ops::scale::scale18),
        descriptor(Opcode::Scale18Div, "SCALE18_DIV", &[], ops::scale::scale18_div),
        descriptor(Opcode::Scale18Mul, "SCALE18_MUL", &[], ops::scale::scale18_mul),
        descriptor(Opcode::ScaleBy, "SCALE_BY", &[], ops::scale::scale_by),
        descriptor(Opcode::ScaleN, "SCALEN", &[], ops::scale::scale_n),
        descriptor(Opcode::Any, "ANY", &[], ops::logic::any),
        descriptor(Opcode::EagerIf, "EAGER_IF", &["IF"], ops::logic::eager_if),
        descriptor(Opcode::EqualTo, "EQUAL_TO", &["EQ"], ops::logic::equal_to),
        descriptor(Opcode::Every, "EVERY", &[], ops::logic::every),
        descriptor(
            Opcode::GreaterThan,
            "GREATER_THAN",
            &["GT"],
            ops::logic::greater_than,
        ),
        descriptor(Opcode::IsZero, "ISZERO", &["IS_ZERO"], ops::logic::is_zero),
        descriptor(Opcode::LessThan, "LESS_THAN", &["LT"], ops::logic::less_than),
        descriptor(
            Opcode::SaturatingAdd,
            "SATURATING_ADD",
            &[],
            ops::math::saturating_add,
        ),
        descriptor(
            Opcode::SaturatingMul,
            "SATURATING_MUL",
            &[],
            ops::math::saturating_mul,
        ),
        descriptor(
            Opcode::SaturatingSub,
            "SATURATING_SUB",
            &[],
            ops::math::saturating_sub,
        ),
        descriptor(Opcode::Add, "ADD", &[], ops::math::add),
        descriptor(Opcode::Div, "DIV", &[], ops::math::div),
        descriptor(Opcode::Exp, "EXP", &[], ops::math::exp),
        descriptor(Opcode::Max, "MAX", &[], ops::math::max),
        descriptor(Opcode::Min, "MIN", &[], ops::math::min),
        descriptor(Opcode::Mod, "MOD", &[], ops::math::rem),
        descriptor(Opcode::Mul, "MUL", &[], ops::math::mul),
        descriptor(Opcode::Sub, "SUB", &[], ops::math::sub),
        descriptor(
            Opcode::ITierV2Report,
            "ITIERV2_REPORT",
            &[],
            ops::tier::report,
        ),
        descriptor(
            Opcode::ITierV2ReportTimeForTier,
            "ITIERV2_REPORT_TIME_FOR_TIER",
            &[],
            ops::tier::report_time_for_tier,
        ),
        descriptor(
            Opcode::SaturatingDiff,
            "SATURATING_DIFF",
            &[],
            ops::tier::saturating_diff,
        ),
        descriptor(Opcode::SelectLte, "SELECT_LTE", &[], ops::tier::select_lte),
        descriptor(
            Opcode::UpdateTimesForTierRange,
            "UPDATE_TIMES_FOR_TIER_RANGE",
            &[],
            ops::tier::update_times_for_tier_range,
        ),
    ]
});

/// Looks an opcode id up in the registry.
pub fn lookup(id: u8) -> Option<&'static OpcodeDescriptor> {
    REGISTRY.get(id as usize)
}
