//! Coin definition layer
//!
//! Lets a generic multi-chain node engine run an arbitrary coin by handing it
//! one `CoinDefinition` instead of patching the engine. The engine reads
//! consensus constants, the genesis descriptor, the checkpoint anchor check
//! and the block hasher from the definition.
//!
//! Litecoin is the coin shipped with the layer.

pub mod coin;
pub mod config;
pub mod consensus;
pub mod crypto;
pub mod error;
pub mod network;
pub mod node;
pub mod p2p;
pub mod tools;

pub use error::{CoinError, Result};
pub use network::NetworkId;

/// Litecoin protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    /// Coin name
    pub const NAME: &str = "litecoin";

    /// Name used in signed-message prefixes
    pub const SIGNING_NAME: &str = "Litecoin";

    pub const TICKER: &str = "LTC";

    pub const URI_SCHEME: &str = "litecoin";

    pub const PROTOCOL_VERSION: u32 = 70003;

    /// Base units per coin (8 decimal places)
    pub const COIN: u64 = 100_000_000;

    /// Maximum number of coins ever issued
    pub const MAX_COINS: u64 = 84_000_000;

    /// Block reward before the first halving (in base units)
    pub const BASE_REWARD: u64 = 50 * COIN;

    /// 3.5 days per difficulty cycle
    pub const TARGET_TIMESPAN: u64 = 302_400;

    /// 2.5 minutes per block
    pub const TARGET_SPACING: u64 = 150;

    pub const INTERVAL: u64 = TARGET_TIMESPAN / TARGET_SPACING;

    /// Target spacing on the unit-test network
    pub const UNIT_TEST_TARGET_SPACING: u64 = 20_000_000;

    /// Same value as the reference client
    pub const ALLOWED_TIME_DRIFT: u64 = 2 * 60 * 60;

    /// Time drift multiplier on the unit-test network
    pub const UNIT_TEST_TIME_DRIFT_MULTIPLIER: u64 = 10_000;

    pub const MAIN_SUBSIDY_DECREASE_BLOCK_COUNT: u64 = 840_000;
    pub const TEST_SUBSIDY_DECREASE_BLOCK_COUNT: u64 = 210_000;

    /// Compact encoding of the main/test proof-of-work limit
    pub const MAX_TARGET_BITS: u32 = 0x1e0f_ffff;

    /// Easiest compact target a block may carry
    pub const EASIEST_DIFFICULTY_TARGET: u32 = 0x2001_0000;

    pub const REFERENCE_DEFAULT_MIN_TX_FEE: u64 = 100_000;
    pub const MIN_NONDUST_OUTPUT: u64 = 1_000;
    pub const MAX_BLOCK_SIZE: u32 = 250_000;
    pub const SPENDABLE_COINBASE_DEPTH: u32 = 100;

    pub const PORT: u16 = 9333;
    pub const TEST_PORT: u16 = 19333;

    pub const MAIN_PACKET_MAGIC: u32 = 0xfbc0_b6db;
    pub const TEST_PACKET_MAGIC: u32 = 0xfcc1_b7dc;

    pub const PUBKEY_ADDRESS_HEADER: u8 = 48;
    pub const TEST_PUBKEY_ADDRESS_HEADER: u8 = 111;
    pub const P2SH_ADDRESS_HEADER: u8 = 5;
    pub const TEST_P2SH_ADDRESS_HEADER: u8 = 196;

    pub const MIN_BLOOM_PROTOCOL_VERSION: u32 = 70_000;
    pub const MIN_PONG_PROTOCOL_VERSION: u32 = 60_001;

    pub const CHECKPOINTING_SUPPORT: bool = true;
    pub const CHECKPOINT_DAYS_BACK: u32 = 2;
    pub const MIN_BROADCAST_CONNECTIONS: usize = 0;

    /// Test network allows min-difficulty blocks after this time (2012-02-15)
    pub const TESTNET_DIFF_DATE: u64 = 1_329_264_000;

    pub const ID_MAINNET: &str = "org.litecoin.production";
    pub const ID_TESTNET: &str = "org.litecoin.test";
    pub const ID_UNITTESTNET: &str = "org.litecoin.unittest";

    pub const MAIN_ALERT_KEY: &str = "04fc9702847840aaf195de8442ebecedf5b095cdbb9bc716bda9110971b28a49e0ead8564ff0db22209e0374782c093bb899692d524e9d6a6956e7c5ecbcd68284";
}
