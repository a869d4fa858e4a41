//! In-memory simulation ledger.
//!
//! A mock store of token balances, ownership and tier reports keyed by
//! contract address, letting scripts run deterministically with no network
//! access. Entries are seeded and merged through [`SimLedger::add_assets`] /
//! [`SimLedger::add_tiers`]; the read-only opcode set never mutates them.

use ahash::AHashMap;
use ethereum_types::{H160, U256};

use super::Resolver;
use crate::{error::InterpreterError, tier};

/// A simulated ERC20 snapshot entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Erc20Snapshot {
    pub total_supply: U256,
    pub balances: AHashMap<H160, U256>,
}

/// Whether a simulated ERC20 exposes the snapshot extension.
///
/// Chosen at construction; a `Standard` token has no snapshot surface at all
/// rather than methods that may or may not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Erc20View {
    Standard,
    Snapshot { snapshots: AHashMap<U256, Erc20Snapshot> },
}

impl Default for Erc20View {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimErc20 {
    pub total_supply: U256,
    pub decimals: u8,
    pub balances: AHashMap<H160, U256>,
    pub view: Erc20View,
}

/// Token id to owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimErc721 {
    pub owners: AHashMap<U256, H160>,
}

/// Token id to per-account balances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimErc1155 {
    pub balances: AHashMap<U256, AHashMap<H160, U256>>,
}

/// Tier reports per account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimTier {
    pub reports: AHashMap<H160, U256>,
}

/// One simulated contract record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimAsset {
    Erc20(SimErc20),
    Erc721(SimErc721),
    Erc1155(SimErc1155),
    Tier(SimTier),
}

impl SimAsset {
    /// Merges `other` into `self` where both are the same kind of record;
    /// a kind change replaces the record outright.
    fn merge(&mut self, other: SimAsset) {
        match (self, other) {
            (SimAsset::Erc20(existing), SimAsset::Erc20(incoming)) => {
                existing.total_supply = incoming.total_supply;
                existing.decimals = incoming.decimals;
                existing.balances.extend(incoming.balances);
                match (&mut existing.view, incoming.view) {
                    (
                        Erc20View::Snapshot { snapshots },
                        Erc20View::Snapshot {
                            snapshots: incoming_snapshots,
                        },
                    ) => snapshots.extend(incoming_snapshots),
                    (view, incoming_view) => *view = incoming_view,
                }
            }
            (SimAsset::Erc721(existing), SimAsset::Erc721(incoming)) => {
                existing.owners.extend(incoming.owners);
            }
            (SimAsset::Erc1155(existing), SimAsset::Erc1155(incoming)) => {
                for (id, balances) in incoming.balances {
                    existing.balances.entry(id).or_default().extend(balances);
                }
            }
            (SimAsset::Tier(existing), SimAsset::Tier(incoming)) => {
                existing.reports.extend(incoming.reports);
            }
            (existing, incoming) => *existing = incoming,
        }
    }
}

/// The in-memory ledger behind the simulated resolver.
///
/// Also carries the simulated EVM context (block number, timestamp, sender,
/// interpreter contract address) for the context opcodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimLedger {
    assets: AHashMap<H160, SimAsset>,
    block_number: u64,
    timestamp: u64,
    sender: H160,
    this_address: H160,
}

impl SimLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds (or merges into) token records.
    pub fn add_assets(&mut self, assets: impl IntoIterator<Item = (H160, SimAsset)>) {
        for (address, asset) in assets {
            match self.assets.get_mut(&address) {
                Some(existing) => existing.merge(asset),
                None => {
                    self.assets.insert(address, asset);
                }
            }
        }
    }

    /// Seeds (or merges into) tier contract records.
    pub fn add_tiers(&mut self, tiers: impl IntoIterator<Item = (H160, SimTier)>) {
        self.add_assets(
            tiers
                .into_iter()
                .map(|(address, tier)| (address, SimAsset::Tier(tier))),
        );
    }

    pub fn set_block_number(&mut self, block_number: u64) {
        self.block_number = block_number;
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    pub fn set_sender(&mut self, sender: H160) {
        self.sender = sender;
    }

    pub fn set_this_address(&mut self, this_address: H160) {
        self.this_address = this_address;
    }

    fn erc20(&self, token: H160) -> Result<&SimErc20, InterpreterError> {
        match self.assets.get(&token) {
            Some(SimAsset::Erc20(erc20)) => Ok(erc20),
            _ => Err(InterpreterError::ResolverNotFound(token)),
        }
    }

    fn erc20_snapshot(
        &self,
        token: H160,
        snapshot_id: U256,
    ) -> Result<&Erc20Snapshot, InterpreterError> {
        match &self.erc20(token)?.view {
            Erc20View::Snapshot { snapshots } => snapshots
                .get(&snapshot_id)
                .ok_or(InterpreterError::ResolverNotFound(token)),
            Erc20View::Standard => Err(InterpreterError::ResolverNotFound(token)),
        }
    }

    fn erc721(&self, token: H160) -> Result<&SimErc721, InterpreterError> {
        match self.assets.get(&token) {
            Some(SimAsset::Erc721(erc721)) => Ok(erc721),
            _ => Err(InterpreterError::ResolverNotFound(token)),
        }
    }

    fn erc1155(&self, token: H160) -> Result<&SimErc1155, InterpreterError> {
        match self.assets.get(&token) {
            Some(SimAsset::Erc1155(erc1155)) => Ok(erc1155),
            _ => Err(InterpreterError::ResolverNotFound(token)),
        }
    }

    fn tier(&self, tier_contract: H160) -> Result<&SimTier, InterpreterError> {
        match self.assets.get(&tier_contract) {
            Some(SimAsset::Tier(tier)) => Ok(tier),
            _ => Err(InterpreterError::ResolverNotFound(tier_contract)),
        }
    }
}

impl Resolver for SimLedger {
    fn erc20_balance_of(&self, token: H160, account: H160) -> Result<U256, InterpreterError> {
        // Unknown accounts within an existing record hold zero, like a chain.
        Ok(self
            .erc20(token)?
            .balances
            .get(&account)
            .copied()
            .unwrap_or_default())
    }

    fn erc20_total_supply(&self, token: H160) -> Result<U256, InterpreterError> {
        Ok(self.erc20(token)?.total_supply)
    }

    fn erc20_snapshot_balance_of_at(
        &self,
        token: H160,
        account: H160,
        snapshot_id: U256,
    ) -> Result<U256, InterpreterError> {
        Ok(self
            .erc20_snapshot(token, snapshot_id)?
            .balances
            .get(&account)
            .copied()
            .unwrap_or_default())
    }

    fn erc20_snapshot_total_supply_at(
        &self,
        token: H160,
        snapshot_id: U256,
    ) -> Result<U256, InterpreterError> {
        Ok(self.erc20_snapshot(token, snapshot_id)?.total_supply)
    }

    fn erc721_balance_of(&self, token: H160, account: H160) -> Result<U256, InterpreterError> {
        let owned = self
            .erc721(token)?
            .owners
            .values()
            .filter(|owner| **owner == account)
            .count();
        Ok(U256::from(owned))
    }

    fn erc721_owner_of(&self, token: H160, token_id: U256) -> Result<H160, InterpreterError> {
        self.erc721(token)?
            .owners
            .get(&token_id)
            .copied()
            .ok_or(InterpreterError::ResolverNotFound(token))
    }

    fn erc1155_balance_of(
        &self,
        token: H160,
        account: H160,
        id: U256,
    ) -> Result<U256, InterpreterError> {
        Ok(self
            .erc1155(token)?
            .balances
            .get(&id)
            .and_then(|balances| balances.get(&account))
            .copied()
            .unwrap_or_default())
    }

    fn erc1155_balance_of_batch(
        &self,
        token: H160,
        accounts: &[H160],
        ids: &[U256],
    ) -> Result<Vec<U256>, InterpreterError> {
        // The on-chain balanceOfBatch reverts on a length mismatch.
        if accounts.len() != ids.len() {
            return Err(InterpreterError::BatchLengthMismatch {
                accounts: accounts.len(),
                ids: ids.len(),
            });
        }
        accounts
            .iter()
            .zip(ids)
            .map(|(account, id)| self.erc1155_balance_of(token, *account, *id))
            .collect()
    }

    fn tier_report(
        &self,
        tier_contract: H160,
        account: H160,
        _context: &[U256],
    ) -> Result<U256, InterpreterError> {
        // Accounts the tier contract has never seen report all-sentinel.
        Ok(self
            .tier(tier_contract)?
            .reports
            .get(&account)
            .copied()
            .unwrap_or_else(tier::never_report))
    }

    fn tier_report_time_for_tier(
        &self,
        tier_contract: H160,
        account: H160,
        tier: U256,
        context: &[U256],
    ) -> Result<U256, InterpreterError> {
        let report = self.tier_report(tier_contract, account, context)?;
        tier::report_time_for_tier(report, tier)
    }

    fn block_number(&self) -> Result<U256, InterpreterError> {
        Ok(U256::from(self.block_number))
    }

    fn block_timestamp(&self) -> Result<U256, InterpreterError> {
        Ok(U256::from(self.timestamp))
    }

    fn sender(&self) -> Result<H160, InterpreterError> {
        Ok(self.sender)
    }

    fn this_address(&self) -> Result<H160, InterpreterError> {
        Ok(self.this_address)
    }
}
