//! Per-network consensus parameters

use crate::crypto::U256;
use crate::network::NetworkId;

/// Fixed constants governing timing, supply and address encoding for one
/// network. Built once per network and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusParameters {
    pub network: NetworkId,
    /// Seconds per difficulty cycle
    pub target_timespan: u64,
    /// Seconds per block
    pub target_spacing: u64,
    /// Blocks between retargets
    pub interval: u64,
    /// Blocks between checkpoints
    pub checkpoint_interval: u64,
    /// Blocks between subsidy halvings
    pub subsidy_halving_interval: u64,
    /// Maximum number of whole coins ever issued
    pub max_coins: u64,
    /// Easiest allowed proof-of-work target
    pub max_target: U256,
    /// Easiest compact target a block header may carry
    pub easiest_difficulty_target: u32,
    /// Outputs below this value (base units) are dust
    pub dust_threshold: u64,
    pub default_min_tx_fee: u64,
    pub max_block_size: u32,
    pub protocol_version: u32,
    pub min_bloom_protocol_version: u32,
    pub min_pong_protocol_version: u32,
    /// How far a block timestamp may run ahead of local time (seconds)
    pub allowed_time_drift: u64,
    /// Confirmations before a coinbase output may be spent
    pub spendable_coinbase_depth: u32,
    pub packet_magic: u32,
    pub port: u16,
    pub pubkey_address_header: u8,
    pub dumped_private_key_header: u8,
    pub p2sh_address_header: u8,
}

impl ConsensusParameters {
    /// Maximum supply in base units
    pub fn max_money(&self) -> u64 {
        self.max_coins * crate::constants::COIN
    }
}

/// Private-key (WIF) version byte for a given pubkey address byte
pub const fn dumped_private_key_header(pubkey_address_header: u8) -> u8 {
    pubkey_address_header.wrapping_add(128)
}
