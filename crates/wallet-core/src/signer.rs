use std::sync::Arc;

use async_trait::async_trait;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{EncodedPoint, PublicKey};
use serde::Deserialize;

use crate::error::WalletError;

/// The remote custodial signing capability.
///
/// Both calls may involve a remote (possibly multi-party) round trip, so
/// they are async and carry no local retry: a failure propagates to the
/// caller as [`WalletError::SigningUnavailable`]. Cancellation is the
/// caller's — dropping the future abandons the round trip — and deadlines
/// belong to the implementation.
#[async_trait]
pub trait RemoteSigner: Send + Sync {
    /// The wallet's public key in SEC1 encoding (compressed or
    /// uncompressed). Callers cache this; implementations may too.
    async fn public_key(&self) -> Result<Vec<u8>, WalletError>;

    /// Signs a 32-byte digest, returning the raw signature as produced by
    /// the custody backend.
    async fn sign(&self, digest: [u8; 32]) -> Result<RawSignature, WalletError>;
}

#[async_trait]
impl<T: RemoteSigner + ?Sized> RemoteSigner for Arc<T> {
    async fn public_key(&self) -> Result<Vec<u8>, WalletError> {
        (**self).public_key().await
    }

    async fn sign(&self, digest: [u8; 32]) -> Result<RawSignature, WalletError> {
        (**self).sign(digest).await
    }
}

/// A signature as returned by the custody backend: hex scalars of
/// unspecified width and a recovery id.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSignature {
    pub r: String,
    pub s: String,
    pub recovery_id: u8,
}

/// A normalized signature: fixed 32-byte big-endian scalars and a validated
/// recovery id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub recovery_id: u8,
}

/// Normalizes a raw backend signature.
///
/// Accepts scalars with or without a `0x` prefix and shorter than 32 bytes
/// (left-padded); rejects over-long scalars and recovery ids outside 0..=3.
pub fn normalize_signature(raw: &RawSignature) -> Result<Signature, WalletError> {
    if raw.recovery_id > 3 {
        return Err(WalletError::SigningUnavailable(format!(
            "recovery id out of range: {}",
            raw.recovery_id
        )));
    }

    Ok(Signature {
        r: scalar_from_hex("r", &raw.r)?,
        s: scalar_from_hex("s", &raw.s)?,
        recovery_id: raw.recovery_id,
    })
}

fn scalar_from_hex(name: &str, value: &str) -> Result<[u8; 32], WalletError> {
    let hex_str = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    // Tolerate odd-length hex from backends that strip leading zeros.
    let padded;
    let hex_str = if hex_str.len() % 2 == 1 {
        padded = format!("0{hex_str}");
        &padded
    } else {
        hex_str
    };

    let bytes = hex::decode(hex_str).map_err(|e| {
        WalletError::SigningUnavailable(format!("signature {name} is not hex: {e}"))
    })?;

    if bytes.len() > 32 {
        return Err(WalletError::SigningUnavailable(format!(
            "signature {name} is {} bytes, expected at most 32",
            bytes.len()
        )));
    }

    let mut scalar = [0u8; 32];
    scalar[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(scalar)
}

/// Parses SEC1 public key bytes and returns the 33-byte compressed form.
///
/// Rejects malformed encodings and off-curve points.
pub fn compress_public_key(bytes: &[u8]) -> Result<[u8; 33], WalletError> {
    let encoded = EncodedPoint::from_bytes(bytes)
        .map_err(|e| WalletError::InvalidPublicKey(format!("invalid key encoding: {e}")))?;

    let parsed: Option<PublicKey> = PublicKey::from_encoded_point(&encoded).into();
    let parsed = parsed.ok_or_else(|| {
        WalletError::InvalidPublicKey("point is not on the secp256k1 curve".into())
    })?;

    let compressed = parsed.to_encoded_point(true);
    let mut key = [0u8; 33];
    key.copy_from_slice(compressed.as_bytes());
    Ok(key)
}
