use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display, EnumCount, EnumIter};

/// The shared opcode set, ids fixed by the on-chain VM specification.
///
/// Discriminants are wire values: a source byte is exactly one of these ids.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Opcode {
    Constant = 0,
    Stack = 1,
    Context = 2,
    Storage = 3,
    Zipmap = 4,
    Debug = 5,
    #[strum(serialize = "IERC20_BALANCE_OF")]
    Ierc20BalanceOf = 6,
    #[strum(serialize = "IERC20_TOTAL_SUPPLY")]
    Ierc20TotalSupply = 7,
    #[strum(serialize = "IERC20_SNAPSHOT_BALANCE_OF_AT")]
    Ierc20SnapshotBalanceOfAt = 8,
    #[strum(serialize = "IERC20_SNAPSHOT_TOTAL_SUPPLY_AT")]
    Ierc20SnapshotTotalSupplyAt = 9,
    #[strum(serialize = "IERC721_BALANCE_OF")]
    Ierc721BalanceOf = 10,
    #[strum(serialize = "IERC721_OWNER_OF")]
    Ierc721OwnerOf = 11,
    #[strum(serialize = "IERC1155_BALANCE_OF")]
    Ierc1155BalanceOf = 12,
    #[strum(serialize = "IERC1155_BALANCE_OF_BATCH")]
    Ierc1155BalanceOfBatch = 13,
    BlockNumber = 14,
    Sender = 15,
    ThisAddress = 16,
    BlockTimestamp = 17,
    #[strum(serialize = "SCALE18")]
    Scale18 = 18,
    #[strum(serialize = "SCALE18_DIV")]
    Scale18Div = 19,
    #[strum(serialize = "SCALE18_MUL")]
    Scale18Mul = 20,
    ScaleBy = 21,
    #[strum(serialize = "SCALEN")]
    ScaleN = 22,
    Any = 23,
    EagerIf = 24,
    EqualTo = 25,
    Every = 26,
    GreaterThan = 27,
    #[strum(serialize = "ISZERO")]
    IsZero = 28,
    LessThan = 29,
    SaturatingAdd = 30,
    SaturatingMul = 31,
    SaturatingSub = 32,
    Add = 33,
    Div = 34,
    Exp = 35,
    Max = 36,
    Min = 37,
    Mod = 38,
    Mul = 39,
    Sub = 40,
    #[strum(serialize = "ITIERV2_REPORT")]
    ITierV2Report = 41,
    #[strum(serialize = "ITIERV2_REPORT_TIME_FOR_TIER")]
    ITierV2ReportTimeForTier = 42,
    SaturatingDiff = 43,
    SelectLte = 44,
    UpdateTimesForTierRange = 45,
}

impl Opcode {
    /// Number of stack items this opcode consumes.
    ///
    /// Derived from the operand for variable-arity opcodes: the arithmetic
    /// and logic folds take `operand` values, while `ZIPMAP`,
    /// `SELECT_LTE`, `IERC1155_BALANCE_OF_BATCH` and the tier-report reads
    /// unpack their counts from operand bit-fields.
    pub fn pops(&self, operand: u8) -> usize {
        match self {
            Opcode::Constant
            | Opcode::Stack
            | Opcode::Context
            | Opcode::Storage
            | Opcode::Debug
            | Opcode::BlockNumber
            | Opcode::Sender
            | Opcode::ThisAddress
            | Opcode::BlockTimestamp => 0,
            Opcode::Zipmap => ((operand >> 5) & 0x07) as usize + 1,
            Opcode::IsZero | Opcode::Scale18 | Opcode::ScaleBy | Opcode::ScaleN => 1,
            Opcode::Scale18Div
            | Opcode::Scale18Mul
            | Opcode::EqualTo
            | Opcode::GreaterThan
            | Opcode::LessThan => 2,
            Opcode::EagerIf => 3,
            Opcode::Any
            | Opcode::Every
            | Opcode::SaturatingAdd
            | Opcode::SaturatingMul
            | Opcode::SaturatingSub
            | Opcode::Add
            | Opcode::Div
            | Opcode::Exp
            | Opcode::Max
            | Opcode::Min
            | Opcode::Mod
            | Opcode::Mul
            | Opcode::Sub => operand as usize,
            Opcode::Ierc20BalanceOf => 2,
            Opcode::Ierc20TotalSupply => 1,
            Opcode::Ierc20SnapshotBalanceOfAt => 3,
            Opcode::Ierc20SnapshotTotalSupplyAt => 2,
            Opcode::Ierc721BalanceOf | Opcode::Ierc721OwnerOf => 2,
            Opcode::Ierc1155BalanceOf => 3,
            Opcode::Ierc1155BalanceOfBatch => 1 + 2 * operand as usize,
            Opcode::ITierV2Report => 2 + operand as usize,
            Opcode::ITierV2ReportTimeForTier => 3 + operand as usize,
            Opcode::SaturatingDiff => 2,
            Opcode::SelectLte => 1 + (operand & 0x1f) as usize,
            Opcode::UpdateTimesForTierRange => 2,
        }
    }

    /// Number of stack items this opcode produces.
    ///
    /// `ZIPMAP` reports zero: its pushes are whatever the sub-source pushes
    /// across its iterations and are accounted against that source.
    pub fn pushes(&self, operand: u8) -> usize {
        match self {
            Opcode::Debug | Opcode::Zipmap => 0,
            Opcode::Ierc1155BalanceOfBatch => operand as usize,
            _ => 1,
        }
    }
}
