use thiserror::Error;

/// Cosmos chain primitive errors.
#[derive(Debug, Error)]
pub enum CosmosError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}
