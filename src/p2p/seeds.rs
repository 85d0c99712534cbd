//! DNS seed configuration
//!
//! Hardcoded bootstrap hosts for initial peer discovery.
//! New nodes resolve these first to discover the rest of the network.

use crate::error::ConfigurationError;
use crate::network::{NetworkId, PerNetwork};

/// Mainnet DNS seeds
pub const MAINNET_DNS_SEEDS: &[&str] = &[
    "dnsseed.litecointools.com",
    "dnsseed.litecoinpool.org",
    "dnsseed.ltc.xurious.com",
    "dnsseed.koin-project.com",
    "dnsseed.weminemnc.com",
];

/// Testnet DNS seeds
pub const TESTNET_DNS_SEEDS: &[&str] = &[
    "testnet-seed.litecointools.com",
    "testnet-seed.ltc.xurious.com",
    "dnsseed.wemine-testnet.com",
];

const DNS_SEEDS: PerNetwork<&[&str]> = PerNetwork::new(MAINNET_DNS_SEEDS, TESTNET_DNS_SEEDS);

/// Get DNS seed hosts for a network
pub fn dns_seeds(network: NetworkId) -> Result<&'static [&'static str], ConfigurationError> {
    DNS_SEEDS.select(network, crate::constants::NAME)
}

/// Pair each seed host with the network port, ready for resolution
pub fn seed_endpoints(network: NetworkId, port: u16) -> Result<Vec<String>, ConfigurationError> {
    Ok(dns_seeds(network)?
        .iter()
        .map(|host| format!("{host}:{port}"))
        .collect())
}
