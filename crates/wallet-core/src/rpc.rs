use std::sync::Arc;

use alloy_primitives::U256;
use async_trait::async_trait;
use chain_cosmos::proto::Coin;
use chain_cosmos::tx::SignedCosmosTx;

use crate::error::WalletError;

/// The transaction shape submitted to a node's gas estimator.
#[derive(Debug, Clone)]
pub struct EvmCallRequest {
    pub from: String,
    pub to: String,
    pub value: U256,
    pub data: Vec<u8>,
}

/// EVM node collaborator.
///
/// Implementations own transport, endpoints, and deadlines; they map
/// transport failures to [`WalletError::UpstreamRpc`]. No method retries.
#[async_trait]
pub trait EvmRpc: Send + Sync {
    /// Current account nonce (confirmed transaction count).
    async fn get_transaction_count(&self, address: &str) -> Result<u64, WalletError>;

    /// Current gas price in wei.
    async fn get_gas_price(&self) -> Result<u128, WalletError>;

    /// Gas estimate for the given call shape.
    async fn estimate_gas(&self, call: &EvmCallRequest) -> Result<u64, WalletError>;

    /// Submits a 0x-prefixed raw signed transaction; returns the tx hash.
    async fn send_raw_transaction(&self, raw_hex: &str) -> Result<String, WalletError>;

    /// Balance in base units: native when `token_contract` is `None`,
    /// otherwise the ERC-20 balance on that contract.
    async fn get_balance(
        &self,
        address: &str,
        token_contract: Option<&str>,
    ) -> Result<String, WalletError>;
}

/// Cosmos node collaborator.
#[async_trait]
pub trait CosmosRpc: Send + Sync {
    /// On-chain account state for the sender.
    async fn get_account(&self, address: &str) -> Result<CosmosAccount, WalletError>;

    /// Balance of one denomination.
    async fn get_balance(&self, address: &str, denom: &str) -> Result<Coin, WalletError>;

    /// All balances held by the address.
    async fn get_all_balances(&self, address: &str) -> Result<Vec<Coin>, WalletError>;

    /// Broadcasts a signed transaction; returns the tx hash.
    async fn broadcast(&self, signed: &SignedCosmosTx) -> Result<String, WalletError>;
}

/// Account state fetched per send and bound into the signed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CosmosAccount {
    pub account_number: u64,
    pub sequence: u64,
}

#[async_trait]
impl<T: EvmRpc + ?Sized> EvmRpc for Arc<T> {
    async fn get_transaction_count(&self, address: &str) -> Result<u64, WalletError> {
        (**self).get_transaction_count(address).await
    }

    async fn get_gas_price(&self) -> Result<u128, WalletError> {
        (**self).get_gas_price().await
    }

    async fn estimate_gas(&self, call: &EvmCallRequest) -> Result<u64, WalletError> {
        (**self).estimate_gas(call).await
    }

    async fn send_raw_transaction(&self, raw_hex: &str) -> Result<String, WalletError> {
        (**self).send_raw_transaction(raw_hex).await
    }

    async fn get_balance(
        &self,
        address: &str,
        token_contract: Option<&str>,
    ) -> Result<String, WalletError> {
        (**self).get_balance(address, token_contract).await
    }
}

#[async_trait]
impl<T: CosmosRpc + ?Sized> CosmosRpc for Arc<T> {
    async fn get_account(&self, address: &str) -> Result<CosmosAccount, WalletError> {
        (**self).get_account(address).await
    }

    async fn get_balance(&self, address: &str, denom: &str) -> Result<Coin, WalletError> {
        (**self).get_balance(address, denom).await
    }

    async fn get_all_balances(&self, address: &str) -> Result<Vec<Coin>, WalletError> {
        (**self).get_all_balances(address).await
    }

    async fn broadcast(&self, signed: &SignedCosmosTx) -> Result<String, WalletError> {
        (**self).broadcast(signed).await
    }
}
