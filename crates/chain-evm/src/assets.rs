use serde::Serialize;

use crate::chains::EvmNetwork;

/// Metadata for a transferable asset on an EVM network.
///
/// `contract_address` present means the asset is an ERC-20 token and a
/// transfer of it must be rewritten into a `transfer(address,uint256)` call
/// on that contract. Absent means the chain's native currency.
#[derive(Debug, Clone, Serialize)]
pub struct AssetDescriptor {
    pub symbol: &'static str,
    pub contract_address: Option<&'static str>,
    /// Base-unit scale: display amounts are multiplied by 10^decimals.
    pub decimals: u8,
}

const fn token(
    symbol: &'static str,
    contract_address: &'static str,
    decimals: u8,
) -> AssetDescriptor {
    AssetDescriptor {
        symbol,
        contract_address: Some(contract_address),
        decimals,
    }
}

/// Well-known mainnet ERC-20 contracts.
static MAINNET_ASSETS: &[AssetDescriptor] = &[
    token("dai", "0x6b175474e89094c44da98b954eedeac495271d0f", 18),
    token("usdt", "0xdac17f958d2ee523a2206206994597c13d831ec7", 6),
    token("usdc", "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", 6),
    token("wbtc", "0x2260fac5e5542a773aa44fbcfedf7c193bc2c599", 8),
    token("link", "0x514910771af9ca656af840dff83e8264ecf986ca", 18),
    token("uni", "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984", 18),
    token("aave", "0x7fc66500c84a76ad7e9c93437bfc5ac33e2ddae9", 18),
    token("mkr", "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2", 18),
    token("comp", "0xc00e94cb662c3520282e6f5717214004a7f26888", 18),
    token("bat", "0x0d8775f648430679a709e98d2b0cb6250d2887ef", 18),
    token("sushi", "0x6b3595068778dd592e39a122f4f5a5cf09c90fe2", 18),
    token("1inch", "0x111111111117dc0aa78b770fa6a738034120c302", 18),
];

/// Sepolia test tokens.
static TESTNET_ASSETS: &[AssetDescriptor] = &[
    token("link", "0x779877a7b0d9e8603169ddbd7836e478b4624789", 18),
    token("usdc", "0x1c7d4b196cb0c7b01d743fbc6116a902379c7238", 6),
];

/// Immutable, network-selected symbol -> token metadata table.
///
/// The table is chosen once at construction by the network flag and never
/// read from global state afterwards. Native currencies are not listed;
/// callers decide what a miss means (native symbol vs. unknown asset).
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    network: EvmNetwork,
    assets: &'static [AssetDescriptor],
}

impl AssetRegistry {
    pub fn for_network(network: EvmNetwork) -> Self {
        let assets = match network {
            EvmNetwork::Mainnet => MAINNET_ASSETS,
            EvmNetwork::Testnet => TESTNET_ASSETS,
        };
        Self { network, assets }
    }

    pub fn network(&self) -> EvmNetwork {
        self.network
    }

    /// Case-insensitive symbol lookup. `None` means the symbol is not a
    /// known token on this network.
    pub fn lookup(&self, symbol: &str) -> Option<&'static AssetDescriptor> {
        self.assets
            .iter()
            .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }

    /// All descriptors for this network.
    pub fn assets(&self) -> &'static [AssetDescriptor] {
        self.assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_lookup_dai() {
        let registry = AssetRegistry::for_network(EvmNetwork::Mainnet);
        let dai = registry.lookup("dai").expect("dai should be listed");
        assert_eq!(
            dai.contract_address,
            Some("0x6b175474e89094c44da98b954eedeac495271d0f")
        );
        assert_eq!(dai.decimals, 18);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = AssetRegistry::for_network(EvmNetwork::Mainnet);
        assert!(registry.lookup("DAI").is_some());
        assert!(registry.lookup("Usdc").is_some());
    }

    #[test]
    fn stablecoins_have_6_decimals() {
        let registry = AssetRegistry::for_network(EvmNetwork::Mainnet);
        assert_eq!(registry.lookup("usdt").unwrap().decimals, 6);
        assert_eq!(registry.lookup("usdc").unwrap().decimals, 6);
    }

    #[test]
    fn wbtc_has_8_decimals() {
        let registry = AssetRegistry::for_network(EvmNetwork::Mainnet);
        assert_eq!(registry.lookup("wbtc").unwrap().decimals, 8);
    }

    #[test]
    fn native_symbol_is_not_listed() {
        let registry = AssetRegistry::for_network(EvmNetwork::Mainnet);
        assert!(registry.lookup("eth").is_none());
    }

    #[test]
    fn unknown_symbol_returns_none() {
        let registry = AssetRegistry::for_network(EvmNetwork::Mainnet);
        assert!(registry.lookup("doesnotexist").is_none());
    }

    #[test]
    fn testnet_table_differs_from_mainnet() {
        let mainnet = AssetRegistry::for_network(EvmNetwork::Mainnet);
        let testnet = AssetRegistry::for_network(EvmNetwork::Testnet);
        assert!(testnet.lookup("dai").is_none());
        assert_ne!(
            mainnet.lookup("link").unwrap().contract_address,
            testnet.lookup("link").unwrap().contract_address
        );
    }

    #[test]
    fn all_contract_addresses_are_well_formed() {
        for network in [EvmNetwork::Mainnet, EvmNetwork::Testnet] {
            for asset in AssetRegistry::for_network(network).assets() {
                let addr = asset.contract_address.unwrap();
                assert!(crate::address::validate_address(addr).unwrap(), "{addr}");
            }
        }
    }
}
