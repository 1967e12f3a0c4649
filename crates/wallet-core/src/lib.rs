//! Orchestration layer of the custodial wallet engine.
//!
//! Turns the two primitives a remote custody backend exposes — "return the
//! wallet's public key" and "sign this 32-byte hash" — into protocol-valid
//! signed transactions, one facade per chain family:
//!
//! - [`evm::EvmWallet`] — legacy EIP-155 transactions with the ERC-20
//!   token-overlay rewrite
//! - [`cosmos::CosmosWallet`] — SIGN_MODE_DIRECT bank sends
//!
//! Both implement the shared [`wallet::Wallet`] contract and run the same
//! linear pipeline per send: assemble -> hash -> sign -> encode ->
//! broadcast. The chain-specific byte work lives in the `chain-evm` and
//! `chain-cosmos` leaf crates; the I/O edges are the [`signer::RemoteSigner`]
//! and [`rpc`] collaborator traits supplied by the embedding application.

pub mod cosmos;
pub mod error;
pub mod evm;
pub mod rpc;
pub mod signer;
pub mod wallet;

pub use cosmos::CosmosWallet;
pub use error::WalletError;
pub use evm::EvmWallet;
pub use rpc::{CosmosAccount, CosmosRpc, EvmCallRequest, EvmRpc};
pub use signer::{RawSignature, RemoteSigner, Signature};
pub use wallet::Wallet;
