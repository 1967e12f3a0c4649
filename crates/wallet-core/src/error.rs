use chain_cosmos::error::CosmosError;
use chain_evm::error::EvmError;
use thiserror::Error;

/// Wallet pipeline errors.
///
/// Every component surfaces its first failure unmodified and nothing
/// retries internally; a failed send aborts the whole pipeline with one of
/// these and leaves no partial signed state behind.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The signer returned bytes that are not a secp256k1 point.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// An explicitly requested symbol is neither native nor registered.
    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    /// A malformed display-unit or base-unit amount string.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The remote signing capability failed or timed out.
    #[error("signing unavailable: {0}")]
    SigningUnavailable(String),

    /// A transaction field could not be serialized.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Node communication failed (nonce, gas, account, or broadcast).
    #[error("upstream rpc error: {0}")]
    UpstreamRpc(String),
}

impl From<EvmError> for WalletError {
    fn from(err: EvmError) -> Self {
        match err {
            EvmError::InvalidPublicKey(msg) => WalletError::InvalidPublicKey(msg),
            EvmError::InvalidAmount(msg) => WalletError::InvalidAmount(msg),
            EvmError::InvalidAddress(msg) => WalletError::Encoding(format!("invalid address: {msg}")),
            EvmError::EncodingError(msg) => WalletError::Encoding(msg),
        }
    }
}

impl From<CosmosError> for WalletError {
    fn from(err: CosmosError) -> Self {
        match err {
            CosmosError::InvalidPublicKey(msg) => WalletError::InvalidPublicKey(msg),
            CosmosError::InvalidAmount(msg) => WalletError::InvalidAmount(msg),
            CosmosError::InvalidAddress(msg) => {
                WalletError::Encoding(format!("invalid address: {msg}"))
            }
            CosmosError::EncodingError(msg) => WalletError::Encoding(msg),
        }
    }
}
