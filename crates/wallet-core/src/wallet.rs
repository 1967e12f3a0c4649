use async_trait::async_trait;

use crate::error::WalletError;

/// The shared contract every chain-family wallet implements.
///
/// One implementation exists per chain family, each orchestrating the same
/// linear pipeline per send: assemble -> hash -> sign -> encode ->
/// broadcast. The first failing stage aborts the call; nothing partial is
/// cached, so a retried send re-assembles from scratch with fresh chain
/// state.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// The wallet's chain-specific address, derived from the custodial
    /// public key. Fetched and derived once per instance, then memoized.
    async fn address(&self) -> Result<String, WalletError>;

    /// Balance in base units. `None` queries the native currency; a symbol
    /// (EVM) or denomination (Cosmos) queries that asset.
    async fn balance(&self, asset: Option<&str>) -> Result<String, WalletError>;

    /// Signs and broadcasts a payment, returning the transaction id.
    ///
    /// `amount` is a display-unit decimal string on EVM chains and an
    /// integer base-unit string on Cosmos chains, matching what each
    /// chain's tooling conventionally accepts.
    async fn send_payment(
        &self,
        to: &str,
        amount: &str,
        asset: Option<&str>,
    ) -> Result<String, WalletError>;
}
