use alloy_primitives::U256;
use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use chain_evm::assets::AssetRegistry;
use chain_evm::chains::EvmChainConfig;
use chain_evm::transaction::{self, EvmTransaction};
use chain_evm::{address, erc20, units};

use crate::error::WalletError;
use crate::rpc::{EvmCallRequest, EvmRpc};
use crate::signer::{normalize_signature, RemoteSigner};
use crate::wallet::Wallet;

/// A custodial wallet on one EVM chain.
///
/// Holds the chain preset and the network-matched asset registry by value;
/// the signer and RPC collaborators are the only I/O edges.
pub struct EvmWallet<S, R> {
    signer: S,
    rpc: R,
    chain: &'static EvmChainConfig,
    assets: AssetRegistry,
    key: OnceCell<WalletKey>,
    /// Serializes sends so two concurrent calls cannot read the same nonce.
    send_lock: Mutex<()>,
}

/// The memoized public key and the address derived from it.
struct WalletKey {
    public_key: Vec<u8>,
    address: String,
}

impl<S: RemoteSigner, R: EvmRpc> EvmWallet<S, R> {
    pub fn new(signer: S, rpc: R, chain: &'static EvmChainConfig) -> Self {
        Self {
            signer,
            rpc,
            assets: AssetRegistry::for_network(chain.network()),
            chain,
            key: OnceCell::new(),
            send_lock: Mutex::new(()),
        }
    }

    pub fn chain(&self) -> &'static EvmChainConfig {
        self.chain
    }

    /// The wallet's raw SEC1 public key bytes.
    pub async fn public_key(&self) -> Result<Vec<u8>, WalletError> {
        Ok(self.wallet_key().await?.public_key.clone())
    }

    /// Fetches the key and derives the address at most once per instance;
    /// concurrent first callers await the same in-flight fetch.
    async fn wallet_key(&self) -> Result<&WalletKey, WalletError> {
        self.key
            .get_or_try_init(|| async {
                let public_key = self.signer.public_key().await?;
                let address = address::derive_address(&public_key)?;
                debug!(chain = self.chain.name, %address, "derived wallet address");
                Ok(WalletKey {
                    public_key,
                    address,
                })
            })
            .await
    }

    /// Resolves the (target, value, calldata) triple for a transfer.
    ///
    /// Pure: a registry miss aborts here, before any nonce/gas round trip.
    /// Native transfers move `amount` as the transaction value; token
    /// transfers rewrite it into `transfer(address,uint256)` calldata on
    /// the token contract with the transaction value pinned to zero.
    fn resolve_transfer(
        &self,
        to: &str,
        amount: &str,
        asset: Option<&str>,
    ) -> Result<(String, U256, Vec<u8>), WalletError> {
        address::parse_address(to)?;

        let symbol = match asset {
            None => None,
            Some(s) if s.eq_ignore_ascii_case(self.chain.symbol) => None,
            Some(s) => Some(s),
        };

        match symbol {
            None => {
                let value = units::to_base_units(amount, self.chain.decimals)?;
                Ok((to.to_string(), value, Vec::new()))
            }
            Some(symbol) => {
                let descriptor = self
                    .assets
                    .lookup(symbol)
                    .ok_or_else(|| WalletError::UnknownAsset(symbol.to_string()))?;
                let contract = descriptor
                    .contract_address
                    .ok_or_else(|| WalletError::UnknownAsset(symbol.to_string()))?;

                let base_amount = units::to_base_units(amount, descriptor.decimals)?;
                let data = erc20::encode_transfer(to, base_amount)?;
                Ok((contract.to_string(), U256::ZERO, data))
            }
        }
    }

    /// Builds the fully populated unsigned transaction: resolves the
    /// transfer shape, then fetches nonce and gas price and estimates the
    /// gas limit through the RPC collaborator.
    async fn assemble(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        asset: Option<&str>,
    ) -> Result<EvmTransaction, WalletError> {
        let (target, value, data) = self.resolve_transfer(to, amount, asset)?;

        let nonce = self.rpc.get_transaction_count(from).await?;
        let gas_price = self.rpc.get_gas_price().await?;
        let gas_limit = self
            .rpc
            .estimate_gas(&EvmCallRequest {
                from: from.to_string(),
                to: target.clone(),
                value,
                data: data.clone(),
            })
            .await?;

        debug!(
            chain = self.chain.name,
            nonce, gas_price, gas_limit, "assembled transaction"
        );

        Ok(EvmTransaction {
            nonce,
            gas_price,
            gas_limit,
            to: target,
            value,
            data,
            chain_id: self.chain.chain_id,
        })
    }
}

#[async_trait]
impl<S: RemoteSigner, R: EvmRpc> Wallet for EvmWallet<S, R> {
    async fn address(&self) -> Result<String, WalletError> {
        Ok(self.wallet_key().await?.address.clone())
    }

    async fn balance(&self, asset: Option<&str>) -> Result<String, WalletError> {
        let address = self.address().await?;

        let contract = match asset {
            None => None,
            Some(s) if s.eq_ignore_ascii_case(self.chain.symbol) => None,
            Some(s) => {
                let descriptor = self
                    .assets
                    .lookup(s)
                    .ok_or_else(|| WalletError::UnknownAsset(s.to_string()))?;
                descriptor.contract_address
            }
        };

        self.rpc.get_balance(&address, contract).await
    }

    async fn send_payment(
        &self,
        to: &str,
        amount: &str,
        asset: Option<&str>,
    ) -> Result<String, WalletError> {
        // Held from nonce fetch through broadcast: a concurrent send from
        // this instance would otherwise read the same nonce and race.
        let _guard = self.send_lock.lock().await;

        let from = self.address().await?;
        let tx = self.assemble(&from, to, amount, asset).await?;
        let digest = transaction::sighash(&tx)?;

        let raw_sig = self.signer.sign(digest).await?;
        let sig = normalize_signature(&raw_sig)?;

        let raw = transaction::encode_signed(&tx, &sig.r, &sig.s, sig.recovery_id)?;
        let tx_hash = self.rpc.send_raw_transaction(&raw).await?;

        info!(chain = self.chain.name, %tx_hash, "transaction broadcast");
        Ok(tx_hash)
    }
}
