use serde::Serialize;

/// Network selector, fixed once at wallet construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvmNetwork {
    Mainnet,
    Testnet,
}

/// Definition of an EVM-compatible blockchain network.
#[derive(Debug, Clone, Serialize)]
pub struct EvmChainConfig {
    pub chain_id: u64,
    pub name: &'static str,
    /// Native currency symbol; transfers of this symbol bypass the token
    /// registry.
    pub symbol: &'static str,
    pub decimals: u8,
    pub is_testnet: bool,
}

/// Ethereum Mainnet (chain ID 1).
pub const ETHEREUM: EvmChainConfig = EvmChainConfig {
    chain_id: 1,
    name: "Ethereum",
    symbol: "ETH",
    decimals: 18,
    is_testnet: false,
};

/// BNB Smart Chain (chain ID 56).
pub const BSC: EvmChainConfig = EvmChainConfig {
    chain_id: 56,
    name: "BNB Smart Chain",
    symbol: "BNB",
    decimals: 18,
    is_testnet: false,
};

/// Polygon PoS (chain ID 137).
pub const POLYGON: EvmChainConfig = EvmChainConfig {
    chain_id: 137,
    name: "Polygon",
    symbol: "MATIC",
    decimals: 18,
    is_testnet: false,
};

/// Sepolia Testnet (chain ID 11155111).
pub const SEPOLIA: EvmChainConfig = EvmChainConfig {
    chain_id: 11155111,
    name: "Sepolia",
    symbol: "ETH",
    decimals: 18,
    is_testnet: true,
};

/// BNB Smart Chain Testnet (chain ID 97).
pub const BSC_TESTNET: EvmChainConfig = EvmChainConfig {
    chain_id: 97,
    name: "BNB Smart Chain Testnet",
    symbol: "BNB",
    decimals: 18,
    is_testnet: true,
};

/// Polygon Amoy Testnet (chain ID 80002).
pub const POLYGON_AMOY: EvmChainConfig = EvmChainConfig {
    chain_id: 80002,
    name: "Polygon Amoy",
    symbol: "MATIC",
    decimals: 18,
    is_testnet: true,
};

/// Ethereum configuration for the given network.
pub fn ethereum(network: EvmNetwork) -> &'static EvmChainConfig {
    match network {
        EvmNetwork::Mainnet => &ETHEREUM,
        EvmNetwork::Testnet => &SEPOLIA,
    }
}

/// BNB Smart Chain configuration for the given network.
pub fn bsc(network: EvmNetwork) -> &'static EvmChainConfig {
    match network {
        EvmNetwork::Mainnet => &BSC,
        EvmNetwork::Testnet => &BSC_TESTNET,
    }
}

/// Polygon configuration for the given network.
pub fn polygon(network: EvmNetwork) -> &'static EvmChainConfig {
    match network {
        EvmNetwork::Mainnet => &POLYGON,
        EvmNetwork::Testnet => &POLYGON_AMOY,
    }
}

impl EvmChainConfig {
    /// The network flag this chain belongs to.
    pub fn network(&self) -> EvmNetwork {
        if self.is_testnet {
            EvmNetwork::Testnet
        } else {
            EvmNetwork::Mainnet
        }
    }
}
