//! Litecoin coin definition

use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::warn;

use super::definition::CoinDefinition;
use super::extensions::BlockChainExtension;
use crate::consensus::{
    check_difficulty_transition, dumped_private_key_header, BlockHasher,
    CheckpointAnchor, ConsensusParameters, DifficultyContext, DifficultyError, ScryptBlockHasher,
};
use crate::constants::*;
use crate::crypto::U256;
use crate::error::ConfigurationError;
use crate::network::{NetworkId, PerNetwork};
use crate::node::GenesisBlockInfo;
use crate::p2p;

const PORTS: PerNetwork<u16> = PerNetwork::new(PORT, TEST_PORT);
const PACKET_MAGIC: PerNetwork<u32> = PerNetwork::new(MAIN_PACKET_MAGIC, TEST_PACKET_MAGIC);
const PUBKEY_HEADERS: PerNetwork<u8> = PerNetwork::new(PUBKEY_ADDRESS_HEADER, TEST_PUBKEY_ADDRESS_HEADER);
const P2SH_HEADERS: PerNetwork<u8> = PerNetwork::new(P2SH_ADDRESS_HEADER, TEST_P2SH_ADDRESS_HEADER);
const SUBSIDY_INTERVALS: PerNetwork<u64> =
    PerNetwork::new(MAIN_SUBSIDY_DECREASE_BLOCK_COUNT, TEST_SUBSIDY_DECREASE_BLOCK_COUNT);
const SPENDABLE_DEPTHS: PerNetwork<u32> =
    PerNetwork::new(SPENDABLE_COINBASE_DEPTH, SPENDABLE_COINBASE_DEPTH);

/// Main/test proof-of-work limit, `MAX_TARGET_BITS` expanded
static POW_LIMIT: Lazy<U256> = Lazy::new(|| {
    let exponent = (MAX_TARGET_BITS >> 24) as usize;
    U256::from(u64::from(MAX_TARGET_BITS & 0x007f_ffff)) << (8 * (exponent - 3))
});

/// Checkpoint the main-network checkpoint file must contain
pub const MAIN_CHECKPOINT_ANCHOR: CheckpointAnchor = CheckpointAnchor {
    cutoff_time: 1_348_310_800,
    height: 211_680,
    hash: "d8c4452c530b0a2f5c7b712b0503704f0956c5ec1878cd372035311fedcd2d9c",
};

// "NY Times 05/Oct/2011 Steve Jobs, Apple’s Visionary, Dies at 56"
const GENESIS_TX_IN_SCRIPT: &str = "04ffff001d0104404e592054696d65732030352f4f63742f32303131205374657665204a6f62732c204170706c65e280997320566973696f6e6172792c2044696573206174203536";
const GENESIS_TX_OUT_SCRIPT: &str = "41040184710fa689ad5023690c80f3a49c8f13f8d45b8c857fbcbc8bc4a8e4d3eb4b10f4d4604fa08dce601aaf0f470216fe1b51850b4acf21b179c45070ac7b03a9ac";
const GENESIS_MERKLE_ROOT: &str = "97ddfbbae6be97fd6cdf3e7ca13232a3afff2353e29badfab7f73011edd4ced9";
const GENESIS_BLOCK_VALUE: u64 = 50;
const GENESIS_BITS: u32 = 0x1e0f_fff0;

pub const MAIN_GENESIS: GenesisBlockInfo = GenesisBlockInfo {
    tx_in_script: GENESIS_TX_IN_SCRIPT,
    tx_out_script: GENESIS_TX_OUT_SCRIPT,
    value: GENESIS_BLOCK_VALUE,
    bits: GENESIS_BITS,
    time: 1_317_972_665,
    nonce: 2_084_524_493,
    merkle_root: GENESIS_MERKLE_ROOT,
    hash: "12a765e31ffd4059bada1e25190f6e98c99d9714d334efa41a195a7e7e04bfe2",
};

pub const TEST_GENESIS: GenesisBlockInfo = GenesisBlockInfo {
    tx_in_script: GENESIS_TX_IN_SCRIPT,
    tx_out_script: GENESIS_TX_OUT_SCRIPT,
    value: GENESIS_BLOCK_VALUE,
    bits: GENESIS_BITS,
    time: 1_317_798_646,
    nonce: 385_270_584,
    merkle_root: GENESIS_MERKLE_ROOT,
    hash: "f5ae71e26c74beacc88382716aced69cddf3dffff24f384e1808905e0188f68f",
};

fn non_standard(network: NetworkId) -> ConfigurationError {
    ConfigurationError::NonStandardNetwork {
        network: network.tag().to_string(),
        coin: NAME.to_string(),
    }
}

/// Resolve Litecoin's consensus parameters for a network
///
/// Main and test values come from the constant tables. The unit-test
/// network reads the test values, except for the overrides that make the
/// host engine's difficulty tests fast.
pub fn resolve(network: NetworkId) -> Result<ConsensusParameters, ConfigurationError> {
    let pubkey_address_header = PUBKEY_HEADERS.select(network, NAME)?;
    let (target_spacing, allowed_time_drift, subsidy_halving_interval, max_target) = match network {
        NetworkId::UnitTest => (
            UNIT_TEST_TARGET_SPACING,
            ALLOWED_TIME_DRIFT * UNIT_TEST_TIME_DRIFT_MULTIPLIER,
            MAIN_SUBSIDY_DECREASE_BLOCK_COUNT,
            // 2^256 does not fit in 256 bits; every hash is at or below U256::MAX
            U256::MAX,
        ),
        _ => (
            TARGET_SPACING,
            ALLOWED_TIME_DRIFT,
            SUBSIDY_INTERVALS.select(network, NAME)?,
            *POW_LIMIT,
        ),
    };

    Ok(ConsensusParameters {
        network,
        target_timespan: TARGET_TIMESPAN,
        target_spacing,
        interval: INTERVAL,
        checkpoint_interval: INTERVAL,
        subsidy_halving_interval,
        max_coins: MAX_COINS,
        max_target,
        easiest_difficulty_target: EASIEST_DIFFICULTY_TARGET,
        dust_threshold: MIN_NONDUST_OUTPUT,
        default_min_tx_fee: REFERENCE_DEFAULT_MIN_TX_FEE,
        max_block_size: MAX_BLOCK_SIZE,
        protocol_version: PROTOCOL_VERSION,
        min_bloom_protocol_version: MIN_BLOOM_PROTOCOL_VERSION,
        min_pong_protocol_version: MIN_PONG_PROTOCOL_VERSION,
        allowed_time_drift,
        spendable_coinbase_depth: SPENDABLE_DEPTHS.select(network, NAME)?,
        packet_magic: PACKET_MAGIC.select(network, NAME)?,
        port: PORTS.select(network, NAME)?,
        pubkey_address_header,
        dumped_private_key_header: dumped_private_key_header(pubkey_address_header),
        p2sh_address_header: P2SH_HEADERS.select(network, NAME)?,
    })
}

/// Genesis descriptor for a network
///
/// The unit-test network shares the main genesis block.
pub fn genesis(network: NetworkId) -> Result<GenesisBlockInfo, ConfigurationError> {
    match network {
        NetworkId::Main | NetworkId::UnitTest => Ok(MAIN_GENESIS),
        NetworkId::Test => Ok(TEST_GENESIS),
        NetworkId::Regtest => Err(non_standard(network)),
    }
}

/// Litecoin difficulty rules, exposed through the chain extension
#[derive(Debug, Clone)]
pub struct LitecoinChainExtension {
    params: ConsensusParameters,
}

impl BlockChainExtension for LitecoinChainExtension {
    fn check_difficulty_transition(&self, ctx: &DifficultyContext) -> Result<(), DifficultyError> {
        check_difficulty_transition(&self.params, ctx).map_err(|e| {
            warn!(height = ctx.next_height, error = %e, "rejected difficulty transition");
            e
        })
    }
}

/// Litecoin
///
/// Parameters for every network Litecoin defines are resolved once, when the
/// definition is built.
#[derive(Debug, Clone)]
pub struct LitecoinDefinition {
    main: ConsensusParameters,
    test: ConsensusParameters,
    unit_test: ConsensusParameters,
    hasher: ScryptBlockHasher,
}

impl LitecoinDefinition {
    pub fn new() -> Result<Self, ConfigurationError> {
        Ok(Self {
            main: resolve(NetworkId::Main)?,
            test: resolve(NetworkId::Test)?,
            unit_test: resolve(NetworkId::UnitTest)?,
            hasher: ScryptBlockHasher,
        })
    }
}

impl CoinDefinition for LitecoinDefinition {
    fn name(&self) -> &'static str {
        NAME
    }

    fn signed_message_name(&self) -> &'static str {
        SIGNING_NAME
    }

    fn ticker(&self) -> &'static str {
        TICKER
    }

    fn uri_scheme(&self) -> &'static str {
        URI_SCHEME
    }

    fn protocol_version(&self) -> u32 {
        PROTOCOL_VERSION
    }

    fn is_checkpointing_supported(&self) -> bool {
        CHECKPOINTING_SUPPORT
    }

    fn checkpoint_days_back(&self) -> u32 {
        CHECKPOINT_DAYS_BACK
    }

    fn consensus_parameters(&self, network: NetworkId) -> Result<&ConsensusParameters, ConfigurationError> {
        match network {
            NetworkId::Main => Ok(&self.main),
            NetworkId::Test => Ok(&self.test),
            NetworkId::UnitTest => Ok(&self.unit_test),
            NetworkId::Regtest => Err(non_standard(network)),
        }
    }

    fn genesis_block_info(&self, network: NetworkId) -> Result<GenesisBlockInfo, ConfigurationError> {
        genesis(network)
    }

    fn checkpoint_anchor(&self) -> Option<CheckpointAnchor> {
        Some(MAIN_CHECKPOINT_ANCHOR)
    }

    fn dns_seeds(&self, network: NetworkId) -> Result<&'static [&'static str], ConfigurationError> {
        p2p::dns_seeds(network)
    }

    fn alert_key(&self, _network: NetworkId) -> &'static str {
        MAIN_ALERT_KEY
    }

    fn network_id_string(&self, network: NetworkId) -> Option<&'static str> {
        match network {
            NetworkId::Main => Some(ID_MAINNET),
            NetworkId::Test => Some(ID_TESTNET),
            NetworkId::UnitTest => Some(ID_UNITTESTNET),
            NetworkId::Regtest => None,
        }
    }

    fn max_coins(&self) -> u64 {
        MAX_COINS
    }

    fn default_min_tx_fee(&self) -> u64 {
        REFERENCE_DEFAULT_MIN_TX_FEE
    }

    fn dust_limit(&self) -> u64 {
        MIN_NONDUST_OUTPUT
    }

    fn max_block_size(&self) -> u32 {
        MAX_BLOCK_SIZE
    }

    fn easiest_difficulty_target(&self) -> u32 {
        EASIEST_DIFFICULTY_TARGET
    }

    fn min_broadcast_connections(&self) -> usize {
        MIN_BROADCAST_CONNECTIONS
    }

    fn block_hasher(&self) -> &dyn BlockHasher {
        &self.hasher
    }

    fn min_bloom_protocol_version(&self) -> u32 {
        MIN_BLOOM_PROTOCOL_VERSION
    }

    fn min_pong_protocol_version(&self) -> u32 {
        MIN_PONG_PROTOCOL_VERSION
    }

    fn create_block_chain_extension(
        &self,
        network: NetworkId,
    ) -> Result<Arc<dyn BlockChainExtension>, ConfigurationError> {
        Ok(Arc::new(LitecoinChainExtension {
            params: self.consensus_parameters(network)?.clone(),
        }))
    }
}
