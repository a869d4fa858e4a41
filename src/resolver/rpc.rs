//! Live resolver: ABI-encoded reads against deployed contracts.
//!
//! [`RpcResolver`] owns no socket itself; it turns every query into a
//! `(contract, calldata)` pair for a [`CallTransport`], the single I/O seam
//! of the crate. Embedding applications supply a transport speaking their
//! JSON-RPC stack of choice; tests supply a recording mock.

use ethereum_types::{H160, U256};

use super::{
    abi::{self, Token},
    Resolver, TransportError,
};
use crate::error::InterpreterError;

/// A handle to a deployed chain, able to execute read-only calls.
pub trait CallTransport {
    /// Executes an `eth_call` against `to` and returns the raw return data.
    fn call(&self, to: H160, data: &[u8]) -> Result<Vec<u8>, TransportError>;

    fn block_number(&self) -> Result<u64, TransportError>;
    fn block_timestamp(&self) -> Result<u64, TransportError>;

    /// The account submitting the previewed transaction.
    fn sender(&self) -> Result<H160, TransportError>;
}

/// Resolver implementation backed by a [`CallTransport`].
pub struct RpcResolver<T> {
    transport: T,
    /// Address of the deployed VM contract the script targets, answered by
    /// `THIS_ADDRESS`.
    this_address: H160,
}

impl<T: CallTransport> RpcResolver<T> {
    pub fn new(transport: T, this_address: H160) -> Self {
        Self {
            transport,
            this_address,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call_uint(
        &self,
        to: H160,
        signature: &str,
        tokens: &[Token],
    ) -> Result<U256, InterpreterError> {
        let data = self.transport.call(to, &abi::encode_call(signature, tokens))?;
        Ok(abi::decode_uint(&data)?)
    }
}

impl<T: CallTransport> Resolver for RpcResolver<T> {
    fn erc20_balance_of(&self, token: H160, account: H160) -> Result<U256, InterpreterError> {
        self.call_uint(token, "balanceOf(address)", &[Token::Address(account)])
    }

    fn erc20_total_supply(&self, token: H160) -> Result<U256, InterpreterError> {
        self.call_uint(token, "totalSupply()", &[])
    }

    fn erc20_snapshot_balance_of_at(
        &self,
        token: H160,
        account: H160,
        snapshot_id: U256,
    ) -> Result<U256, InterpreterError> {
        self.call_uint(
            token,
            "balanceOfAt(address,uint256)",
            &[Token::Address(account), Token::Uint(snapshot_id)],
        )
    }

    fn erc20_snapshot_total_supply_at(
        &self,
        token: H160,
        snapshot_id: U256,
    ) -> Result<U256, InterpreterError> {
        self.call_uint(token, "totalSupplyAt(uint256)", &[Token::Uint(snapshot_id)])
    }

    fn erc721_balance_of(&self, token: H160, account: H160) -> Result<U256, InterpreterError> {
        self.call_uint(token, "balanceOf(address)", &[Token::Address(account)])
    }

    fn erc721_owner_of(&self, token: H160, token_id: U256) -> Result<H160, InterpreterError> {
        let data = self.transport.call(
            token,
            &abi::encode_call("ownerOf(uint256)", &[Token::Uint(token_id)]),
        )?;
        Ok(abi::decode_address(&data)?)
    }

    fn erc1155_balance_of(
        &self,
        token: H160,
        account: H160,
        id: U256,
    ) -> Result<U256, InterpreterError> {
        self.call_uint(
            token,
            "balanceOf(address,uint256)",
            &[Token::Address(account), Token::Uint(id)],
        )
    }

    fn erc1155_balance_of_batch(
        &self,
        token: H160,
        accounts: &[H160],
        ids: &[U256],
    ) -> Result<Vec<U256>, InterpreterError> {
        // Rejected locally; the contract would revert on this calldata anyway.
        if accounts.len() != ids.len() {
            return Err(InterpreterError::BatchLengthMismatch {
                accounts: accounts.len(),
                ids: ids.len(),
            });
        }
        let data = self.transport.call(
            token,
            &abi::encode_call(
                "balanceOfBatch(address[],uint256[])",
                &[
                    Token::AddressArray(accounts.to_vec()),
                    Token::UintArray(ids.to_vec()),
                ],
            ),
        )?;
        Ok(abi::decode_uint_array(&data)?)
    }

    fn tier_report(
        &self,
        tier_contract: H160,
        account: H160,
        context: &[U256],
    ) -> Result<U256, InterpreterError> {
        self.call_uint(
            tier_contract,
            "report(address,uint256[])",
            &[
                Token::Address(account),
                Token::UintArray(context.to_vec()),
            ],
        )
    }

    fn tier_report_time_for_tier(
        &self,
        tier_contract: H160,
        account: H160,
        tier: U256,
        context: &[U256],
    ) -> Result<U256, InterpreterError> {
        self.call_uint(
            tier_contract,
            "reportTimeForTier(address,uint256,uint256[])",
            &[
                Token::Address(account),
                Token::Uint(tier),
                Token::UintArray(context.to_vec()),
            ],
        )
    }

    fn block_number(&self) -> Result<U256, InterpreterError> {
        Ok(U256::from(self.transport.block_number()?))
    }

    fn block_timestamp(&self) -> Result<U256, InterpreterError> {
        Ok(U256::from(self.transport.block_timestamp()?))
    }

    fn sender(&self) -> Result<H160, InterpreterError> {
        Ok(self.transport.sender()?)
    }

    fn this_address(&self) -> Result<H160, InterpreterError> {
        Ok(self.this_address)
    }
}
