use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{EncodedPoint, PublicKey};
use sha3::{Digest, Keccak256};

use crate::error::EvmError;

/// Derives an EIP-55 checksummed Ethereum address from a secp256k1 public key
/// in SEC1 encoding (33-byte compressed or 65-byte uncompressed).
///
/// The key is parsed as a curve point (off-curve or malformed bytes are
/// rejected), expanded to its 64-byte uncompressed X‖Y form, hashed with
/// Keccak-256, and the last 20 bytes of the digest become the address.
pub fn derive_address(pubkey: &[u8]) -> Result<String, EvmError> {
    let point = uncompressed_point(pubkey)?;

    // Keccak-256 of the 64-byte key (skip the 0x04 prefix).
    let hash = Keccak256::digest(&point[1..]);

    let addr_hex = hex::encode(&hash[12..]);
    checksum_address(&format!("0x{addr_hex}"))
}

/// Parses SEC1 public key bytes and returns the 65-byte uncompressed point.
///
/// Rejects with `InvalidPublicKey` if the bytes are not a valid encoding or
/// the point is not on the secp256k1 curve.
pub fn uncompressed_point(pubkey: &[u8]) -> Result<[u8; 65], EvmError> {
    let encoded = EncodedPoint::from_bytes(pubkey)
        .map_err(|e| EvmError::InvalidPublicKey(format!("invalid key encoding: {e}")))?;

    let parsed: Option<PublicKey> = PublicKey::from_encoded_point(&encoded).into();
    let parsed = parsed.ok_or_else(|| {
        EvmError::InvalidPublicKey("point is not on the secp256k1 curve".into())
    })?;

    let uncompressed = parsed.to_encoded_point(false);

    let mut point = [0u8; 65];
    point.copy_from_slice(uncompressed.as_bytes());
    Ok(point)
}

/// Parses a 0x-prefixed hex address string into a 20-byte array.
pub fn parse_address(address: &str) -> Result<[u8; 20], EvmError> {
    let hex_str = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| EvmError::InvalidAddress("address must start with 0x".into()))?;

    if hex_str.len() != 40 {
        return Err(EvmError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_str.len()
        )));
    }

    let bytes = hex::decode(hex_str)
        .map_err(|e| EvmError::InvalidAddress(format!("invalid hex: {e}")))?;

    let mut addr = [0u8; 20];
    addr.copy_from_slice(&bytes);
    Ok(addr)
}

/// Applies EIP-55 mixed-case checksum encoding to an Ethereum address.
///
/// The input should be a 0x-prefixed address; casing of the input is
/// ignored. Returns the checksummed version.
pub fn checksum_address(address: &str) -> Result<String, EvmError> {
    let addr = parse_address(address)?;
    let hex_part = hex::encode(addr);

    // EIP-55: hash the lowercase hex address (without 0x).
    let hash = Keccak256::digest(hex_part.as_bytes());
    let hash_hex = hex::encode(hash);

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");

    for (i, c) in hex_part.chars().enumerate() {
        if c.is_ascii_digit() {
            checksummed.push(c);
        } else {
            // Uppercase iff the corresponding nibble of the hash is >= 8.
            let hash_nibble = u8::from_str_radix(&hash_hex[i..i + 1], 16).unwrap_or(0);
            if hash_nibble >= 8 {
                checksummed.push(c.to_ascii_uppercase());
            } else {
                checksummed.push(c);
            }
        }
    }

    Ok(checksummed)
}

/// Validates an Ethereum address string.
///
/// Checks the 0x + 40 hex character format. If the address contains mixed
/// case, the EIP-55 checksum is verified.
pub fn validate_address(address: &str) -> Result<bool, EvmError> {
    let _ = parse_address(address)?;
    let hex_part = &address[2..];

    // All-lowercase or all-uppercase addresses carry no checksum.
    let is_all_lower = hex_part.chars().all(|c| !c.is_ascii_uppercase());
    let is_all_upper = hex_part.chars().all(|c| !c.is_ascii_lowercase());

    if is_all_lower || is_all_upper {
        return Ok(true);
    }

    let checksummed = checksum_address(address)?;
    Ok(checksummed == address)
}
