use serde::Serialize;

/// Network selector, fixed once at wallet construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CosmosNetwork {
    Mainnet,
    Testnet,
}

/// Definition of a Cosmos-SDK chain.
///
/// Fee and gas defaults apply per bank-send; account number and sequence
/// are per-sender chain state and are fetched at send time.
#[derive(Debug, Clone, Serialize)]
pub struct CosmosChainConfig {
    /// Chain identifier bound into every signed payload.
    pub chain_id: &'static str,
    /// Human-readable bech32 address prefix.
    pub address_prefix: &'static str,
    /// Base denomination for transfers and fees.
    pub denom: &'static str,
    /// Flat fee, in base denomination units.
    pub fee_amount: &'static str,
    pub gas_limit: u64,
    pub is_testnet: bool,
}

/// Cosmos Hub mainnet.
pub const COSMOS_HUB: CosmosChainConfig = CosmosChainConfig {
    chain_id: "cosmoshub-4",
    address_prefix: "cosmos",
    denom: "uatom",
    fee_amount: "2500",
    gas_limit: 200_000,
    is_testnet: false,
};

/// Cosmos Hub public testnet.
pub const COSMOS_TESTNET: CosmosChainConfig = CosmosChainConfig {
    chain_id: "theta-testnet-001",
    address_prefix: "cosmos",
    denom: "uatom",
    fee_amount: "2500",
    gas_limit: 200_000,
    is_testnet: true,
};

/// Cosmos Hub configuration for the given network.
pub fn cosmos_hub(network: CosmosNetwork) -> &'static CosmosChainConfig {
    match network {
        CosmosNetwork::Mainnet => &COSMOS_HUB,
        CosmosNetwork::Testnet => &COSMOS_TESTNET,
    }
}
