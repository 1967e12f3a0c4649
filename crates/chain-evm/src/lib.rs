//! EVM chain primitives for the custodial wallet engine.
//!
//! This crate provides the pure, synchronous half of EVM support:
//! - Address derivation from secp256k1 public keys (with EIP-55 checksums)
//! - Legacy (EIP-155) transaction encoding, signing hash, and signed wire
//!   format
//! - ERC-20 token transfer calldata and the asset registry behind the
//!   token-overlay rewrite
//! - Exact decimal-string to base-unit conversion
//! - Chain and network presets
//!
//! No I/O happens here; nonce/gas resolution and signing live in the
//! orchestration crate.

pub mod abi;
pub mod address;
pub mod assets;
pub mod chains;
pub mod erc20;
pub mod error;
pub mod transaction;
pub mod units;
