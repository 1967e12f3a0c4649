use thiserror::Error;

/// EVM chain primitive errors.
#[derive(Debug, Error)]
pub enum EvmError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}
