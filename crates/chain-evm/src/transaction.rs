use alloy_primitives::U256;
use alloy_rlp::{Encodable, RlpEncodable};
use sha3::{Digest, Keccak256};

use crate::address::parse_address;
use crate::error::EvmError;

/// An unsigned legacy (pre-EIP-1559) EVM transaction.
///
/// The field order is fixed and shared between the signing hash and the
/// final wire encoding: `[nonce, gasPrice, gasLimit, to, value, data, v, r,
/// s]`. Before signing, `v` holds the chain id and `r`/`s` are empty
/// (EIP-155); after signing, `v` encodes the chain id and recovery id
/// together.
#[derive(Debug, Clone)]
pub struct EvmTransaction {
    pub nonce: u64,
    /// Gas price in wei.
    pub gas_price: u128,
    pub gas_limit: u64,
    /// Recipient (or token contract) as a 0x-prefixed hex string.
    pub to: String,
    /// Transfer value in wei. Zero for token transfers.
    pub value: U256,
    /// Calldata; empty for native transfers.
    pub data: Vec<u8>,
    /// EIP-155 replay-protection domain.
    pub chain_id: u64,
}

/// Computes the EIP-155 `v` value: `chainId * 2 + 35 + recoveryId`.
pub fn eip155_v(chain_id: u64, recovery_id: u8) -> u64 {
    chain_id * 2 + 35 + recovery_id as u64
}

/// RLP-encodes the unsigned transaction for signing.
///
/// Per EIP-155 the nine-slot list is serialized with `v = chainId` and
/// empty `r`/`s`:
/// `RLP([nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0])`.
pub fn encode_unsigned(tx: &EvmTransaction) -> Result<Vec<u8>, EvmError> {
    let fields = UnsignedFields {
        nonce: tx.nonce,
        gas_price: tx.gas_price,
        gas_limit: tx.gas_limit,
        to: RlpAddress(parse_address(&tx.to)?),
        value: RlpU256::from(tx.value),
        data: RlpBytes(tx.data.clone()),
        chain_id: tx.chain_id,
        empty_r: RlpU256::ZERO,
        empty_s: RlpU256::ZERO,
    };

    let mut buf = Vec::new();
    fields.encode(&mut buf);
    Ok(buf)
}

/// Computes the 32-byte signing hash: Keccak-256 of the unsigned encoding.
///
/// Pure: identical transactions hash identically.
pub fn sighash(tx: &EvmTransaction) -> Result<[u8; 32], EvmError> {
    let encoded = encode_unsigned(tx)?;
    Ok(Keccak256::digest(&encoded).into())
}

/// Encodes the signed transaction as the 0x-prefixed hex string accepted by
/// a node's raw-transaction-submission endpoint.
///
/// Re-serializes the same nine-field list used for hashing, with `v`
/// replaced by `chainId * 2 + 35 + recoveryId` and `r`/`s` filled in.
pub fn encode_signed(
    tx: &EvmTransaction,
    r: &[u8; 32],
    s: &[u8; 32],
    recovery_id: u8,
) -> Result<String, EvmError> {
    let fields = SignedFields {
        nonce: tx.nonce,
        gas_price: tx.gas_price,
        gas_limit: tx.gas_limit,
        to: RlpAddress(parse_address(&tx.to)?),
        value: RlpU256::from(tx.value),
        data: RlpBytes(tx.data.clone()),
        v: eip155_v(tx.chain_id, recovery_id),
        r: RlpU256(*r),
        s: RlpU256(*s),
    };

    let mut buf = Vec::new();
    fields.encode(&mut buf);
    Ok(format!("0x{}", hex::encode(buf)))
}

// ---------------------------------------------------------------------------
// RLP-encodable structures
// ---------------------------------------------------------------------------

/// Unsigned EIP-155 field list (v = chainId, r = s = empty).
#[derive(RlpEncodable)]
struct UnsignedFields {
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: RlpAddress,
    value: RlpU256,
    data: RlpBytes,
    chain_id: u64,
    empty_r: RlpU256,
    empty_s: RlpU256,
}

/// Signed field list (v = chainId * 2 + 35 + recoveryId).
#[derive(RlpEncodable)]
struct SignedFields {
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: RlpAddress,
    value: RlpU256,
    data: RlpBytes,
    v: u64,
    r: RlpU256,
    s: RlpU256,
}

/// Wrapper for a 20-byte address that encodes as a 20-byte RLP string.
#[derive(Debug, Clone)]
struct RlpAddress([u8; 20]);

impl Encodable for RlpAddress {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// Wrapper for a 256-bit integer that encodes as minimal big-endian bytes
/// with leading zeros stripped (standard RLP integer encoding; zero encodes
/// as the empty string).
#[derive(Debug, Clone)]
struct RlpU256([u8; 32]);

impl RlpU256 {
    const ZERO: Self = Self([0u8; 32]);

    fn trimmed(&self) -> &[u8] {
        let start = self.0.iter().position(|&b| b != 0).unwrap_or(32);
        &self.0[start..]
    }
}

impl From<U256> for RlpU256 {
    fn from(value: U256) -> Self {
        Self(value.to_be_bytes::<32>())
    }
}

impl Encodable for RlpU256 {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.trimmed().encode(out);
    }

    fn length(&self) -> usize {
        self.trimmed().length()
    }
}

/// Wrapper that encodes calldata as an RLP string rather than a list.
#[derive(Debug, Clone)]
struct RlpBytes(Vec<u8>);

impl Encodable for RlpBytes {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}
