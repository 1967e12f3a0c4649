use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use chain_cosmos::address;
use chain_cosmos::config::CosmosChainConfig;
use chain_cosmos::error::CosmosError;
use chain_cosmos::proto::Coin;
use chain_cosmos::tx::{self, MsgSendParams, SigningContext};

use crate::error::WalletError;
use crate::rpc::CosmosRpc;
use crate::signer::{compress_public_key, normalize_signature, RemoteSigner};
use crate::wallet::Wallet;

/// A custodial wallet on one Cosmos-SDK chain.
pub struct CosmosWallet<S, R> {
    signer: S,
    rpc: R,
    chain: &'static CosmosChainConfig,
    key: OnceCell<WalletKey>,
    /// Serializes sends so two concurrent calls cannot read the same
    /// sequence number.
    send_lock: Mutex<()>,
}

/// The memoized compressed public key and the address derived from it.
struct WalletKey {
    public_key: [u8; 33],
    address: String,
}

impl<S: RemoteSigner, R: CosmosRpc> CosmosWallet<S, R> {
    pub fn new(signer: S, rpc: R, chain: &'static CosmosChainConfig) -> Self {
        Self {
            signer,
            rpc,
            chain,
            key: OnceCell::new(),
            send_lock: Mutex::new(()),
        }
    }

    pub fn chain(&self) -> &'static CosmosChainConfig {
        self.chain
    }

    /// The wallet's 33-byte compressed public key.
    pub async fn public_key(&self) -> Result<[u8; 33], WalletError> {
        Ok(self.wallet_key().await?.public_key)
    }

    /// All coins held by this wallet.
    pub async fn balances(&self) -> Result<Vec<Coin>, WalletError> {
        let address = self.address().await?;
        self.rpc.get_all_balances(&address).await
    }

    async fn wallet_key(&self) -> Result<&WalletKey, WalletError> {
        self.key
            .get_or_try_init(|| async {
                let raw = self.signer.public_key().await?;
                // Cosmos account hashing is defined over the compressed
                // form regardless of what the backend returns.
                let public_key = compress_public_key(&raw)?;
                let address =
                    address::pubkey_to_address(&public_key, self.chain.address_prefix)?;
                debug!(chain = self.chain.chain_id, %address, "derived wallet address");
                Ok(WalletKey {
                    public_key,
                    address,
                })
            })
            .await
    }
}

#[async_trait]
impl<S: RemoteSigner, R: CosmosRpc> Wallet for CosmosWallet<S, R> {
    async fn address(&self) -> Result<String, WalletError> {
        Ok(self.wallet_key().await?.address.clone())
    }

    /// Formats as `"{amount} {denom}"`, matching the upstream client.
    async fn balance(&self, asset: Option<&str>) -> Result<String, WalletError> {
        let address = self.address().await?;
        let denom = asset.unwrap_or(self.chain.denom);
        let coin = self.rpc.get_balance(&address, denom).await?;
        Ok(format!("{} {}", coin.amount, coin.denom))
    }

    async fn send_payment(
        &self,
        to: &str,
        amount: &str,
        asset: Option<&str>,
    ) -> Result<String, WalletError> {
        // Held from account fetch through broadcast; see EvmWallet.
        let _guard = self.send_lock.lock().await;

        if !address::validate_address(to, self.chain.address_prefix)? {
            return Err(CosmosError::InvalidAddress(format!(
                "recipient prefix is not {}",
                self.chain.address_prefix
            ))
            .into());
        }

        let key = self.wallet_key().await?;
        let from = key.address.clone();
        let denom = asset.unwrap_or(self.chain.denom);

        let account = self.rpc.get_account(&from).await?;
        debug!(
            chain = self.chain.chain_id,
            account_number = account.account_number,
            sequence = account.sequence,
            "assembled sign doc"
        );

        let doc = tx::build_sign_doc(
            &MsgSendParams {
                from: &from,
                to,
                amount,
                denom,
                memo: "",
            },
            &SigningContext {
                chain_id: self.chain.chain_id,
                account_number: account.account_number,
                sequence: account.sequence,
                public_key: &key.public_key,
                fee_amount: self.chain.fee_amount,
                fee_denom: self.chain.denom,
                gas_limit: self.chain.gas_limit,
            },
        )?;

        let digest = tx::sign_hash(&doc);
        let raw_sig = self.signer.sign(digest).await?;
        let sig = normalize_signature(&raw_sig)?;

        let signed = tx::encode_signed(doc, &key.public_key, &sig.r, &sig.s);
        let tx_hash = self.rpc.broadcast(&signed).await?;

        info!(chain = self.chain.chain_id, %tx_hash, "transaction broadcast");
        Ok(tx_hash)
    }
}
