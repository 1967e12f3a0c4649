use bech32::{Bech32, Hrp};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::CosmosError;

/// Derives a bech32 account address from a 33-byte compressed secp256k1
/// public key.
///
/// Steps:
/// 1. SHA-256(pubkey)
/// 2. RIPEMD-160(sha256_result) -> 20-byte account hash
/// 3. bech32-encode with the network's human-readable prefix
pub fn pubkey_to_address(pubkey: &[u8; 33], prefix: &str) -> Result<String, CosmosError> {
    // Validate compressed public key prefix.
    if pubkey[0] != 0x02 && pubkey[0] != 0x03 {
        return Err(CosmosError::InvalidPublicKey(
            "compressed key must start with 0x02 or 0x03".into(),
        ));
    }

    let sha256_hash = Sha256::digest(pubkey);
    let account_hash: [u8; 20] = Ripemd160::digest(sha256_hash).into();

    let hrp = Hrp::parse(prefix)
        .map_err(|e| CosmosError::InvalidAddress(format!("invalid bech32 prefix: {e}")))?;

    bech32::encode::<Bech32>(hrp, &account_hash)
        .map_err(|e| CosmosError::EncodingError(format!("bech32 encoding failed: {e}")))
}

/// Validates a bech32 account address string for the given prefix.
///
/// Checks the bech32 checksum, the human-readable prefix, and the 20-byte
/// payload length. Returns `false` for a well-formed address with the wrong
/// prefix.
pub fn validate_address(address: &str, prefix: &str) -> Result<bool, CosmosError> {
    let (hrp, payload) = bech32::decode(address)
        .map_err(|e| CosmosError::InvalidAddress(format!("invalid bech32: {e}")))?;

    if payload.len() != 20 {
        return Err(CosmosError::InvalidAddress(format!(
            "expected a 20-byte payload, got {}",
            payload.len()
        )));
    }

    Ok(hrp.as_str() == prefix)
}
