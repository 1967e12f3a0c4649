//! Cosmos-SDK chain primitives for the custodial wallet engine.
//!
//! This crate provides the pure, synchronous half of Cosmos support:
//! - bech32 account address derivation from compressed secp256k1 keys
//! - The protobuf message subset for a SIGN_MODE_DIRECT bank send
//! - Canonical `SignDoc` sign bytes and SHA-256 signing hash
//! - Signature envelope and `TxRaw` broadcast encoding
//! - Chain presets
//!
//! No I/O happens here; account/sequence resolution and signing live in the
//! orchestration crate.

pub mod address;
pub mod config;
pub mod error;
pub mod proto;
pub mod tx;
