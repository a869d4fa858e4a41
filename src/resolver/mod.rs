//! The capability through which opcodes read external chain state.
//!
//! The interpreter is resolver-agnostic: it is constructed with one
//! [`Resolver`] and never distinguishes live from simulated behavior. The
//! [`SimLedger`] answers every query from an in-memory mock store with zero
//! network access; [`RpcResolver`] ABI-encodes the same queries into `eth_call`
//! payloads handed to a caller-supplied [`CallTransport`].

mod abi;
mod rpc;
mod sim;

use ethereum_types::{H160, U256};
use thiserror::Error;

pub use rpc::{CallTransport, RpcResolver};
pub use sim::{Erc20Snapshot, Erc20View, SimAsset, SimErc1155, SimErc20, SimErc721, SimLedger, SimTier};

use crate::error::InterpreterError;

/// A failure in the live transport layer (network, RPC, response shape).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// External state reads required by the resolver-backed opcodes.
///
/// Every method is synchronous; a live implementation blocks on its I/O,
/// the simulation never suspends at all.
pub trait Resolver {
    fn erc20_balance_of(&self, token: H160, account: H160) -> Result<U256, InterpreterError>;
    fn erc20_total_supply(&self, token: H160) -> Result<U256, InterpreterError>;
    fn erc20_snapshot_balance_of_at(
        &self,
        token: H160,
        account: H160,
        snapshot_id: U256,
    ) -> Result<U256, InterpreterError>;
    fn erc20_snapshot_total_supply_at(
        &self,
        token: H160,
        snapshot_id: U256,
    ) -> Result<U256, InterpreterError>;

    fn erc721_balance_of(&self, token: H160, account: H160) -> Result<U256, InterpreterError>;
    fn erc721_owner_of(&self, token: H160, token_id: U256) -> Result<H160, InterpreterError>;

    fn erc1155_balance_of(
        &self,
        token: H160,
        account: H160,
        id: U256,
    ) -> Result<U256, InterpreterError>;
    fn erc1155_balance_of_batch(
        &self,
        token: H160,
        accounts: &[H160],
        ids: &[U256],
    ) -> Result<Vec<U256>, InterpreterError>;

    fn tier_report(
        &self,
        tier_contract: H160,
        account: H160,
        context: &[U256],
    ) -> Result<U256, InterpreterError>;
    fn tier_report_time_for_tier(
        &self,
        tier_contract: H160,
        account: H160,
        tier: U256,
        context: &[U256],
    ) -> Result<U256, InterpreterError>;

    fn block_number(&self) -> Result<U256, InterpreterError>;
    fn block_timestamp(&self) -> Result<U256, InterpreterError>;
    fn sender(&self) -> Result<H160, InterpreterError>;
    fn this_address(&self) -> Result<H160, InterpreterError>;
}
