//! The capability surface a coin hands to the host engine

use std::sync::Arc;

use super::extensions::{
    noop_extension, BlockChainExtension, BlockExtension, PeerExtension, PeerGroupExtension,
    SerializerExtension, TransactionConfidenceExtension, TransactionExtension, WalletExtension,
};
use crate::consensus::{
    block_reward, validate_checkpoints, BlockHasher, CheckpointAnchor, CheckpointMap,
    CheckpointStore, ConsensusParameters, HeaderView,
};
use crate::crypto::U256;
use crate::error::{ConfigurationError, ConsensusMismatchError};
use crate::network::NetworkId;
use crate::node::GenesisBlockInfo;
use crate::p2p::{self, VersionInfo, NODE_NETWORK};

/// Everything the host engine needs to run one coin
///
/// Coins implement the identity and table accessors; per-field consensus
/// accessors, peer predicates and extension factories have defaults built
/// on top of them.
pub trait CoinDefinition: Send + Sync {
    fn name(&self) -> &'static str;
    /// Prefix used in signed messages
    fn signed_message_name(&self) -> &'static str;
    fn ticker(&self) -> &'static str;
    fn uri_scheme(&self) -> &'static str;
    fn protocol_version(&self) -> u32;

    fn is_checkpointing_supported(&self) -> bool;
    fn checkpoint_days_back(&self) -> u32;

    /// Resolved parameters for a network
    fn consensus_parameters(&self, network: NetworkId) -> Result<&ConsensusParameters, ConfigurationError>;

    fn genesis_block_info(&self, network: NetworkId) -> Result<GenesisBlockInfo, ConfigurationError>;

    /// Main-network checkpoint anchor, if the coin has one
    fn checkpoint_anchor(&self) -> Option<CheckpointAnchor>;

    fn dns_seeds(&self, network: NetworkId) -> Result<&'static [&'static str], ConfigurationError>;

    fn alert_key(&self, network: NetworkId) -> &'static str;

    /// Coin-scoped id string for a network (e.g. `org.litecoin.production`)
    fn network_id_string(&self, network: NetworkId) -> Option<&'static str>;

    fn max_coins(&self) -> u64;
    fn default_min_tx_fee(&self) -> u64;
    fn dust_limit(&self) -> u64;
    fn max_block_size(&self) -> u32;
    fn easiest_difficulty_target(&self) -> u32;
    fn min_broadcast_connections(&self) -> usize;

    /// Hashing strategy, chosen once when the definition is built
    fn block_hasher(&self) -> &dyn BlockHasher;

    fn payment_protocol_id(&self, _network: NetworkId) -> Option<&'static str> {
        None
    }

    fn is_bitcoin_private_key_allowed(&self) -> bool {
        false
    }

    /// Sanity-check a loaded checkpoint store against the coin's anchor
    fn checkpoints_sanity_check(
        &self,
        store: &dyn CheckpointStore,
        checkpoints: &CheckpointMap,
        network: NetworkId,
    ) -> Result<(), ConsensusMismatchError> {
        validate_checkpoints(store, checkpoints, network, self.checkpoint_anchor().as_ref())
    }

    fn target_timespan(&self, network: NetworkId) -> Result<u64, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.target_timespan)
    }

    fn target_spacing(&self, network: NetworkId) -> Result<u64, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.target_spacing)
    }

    fn interval(&self, network: NetworkId) -> Result<u64, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.interval)
    }

    fn interval_checkpoints(&self, network: NetworkId) -> Result<u64, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.checkpoint_interval)
    }

    fn allowed_block_time_drift(&self, network: NetworkId) -> Result<u64, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.allowed_time_drift)
    }

    fn subsidy_decrease_block_count(&self, network: NetworkId) -> Result<u64, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.subsidy_halving_interval)
    }

    /// Reward for the block built on `prev_height`
    fn block_reward(&self, prev_height: u64, network: NetworkId) -> Result<u64, ConfigurationError> {
        Ok(block_reward(self.consensus_parameters(network)?, prev_height))
    }

    fn spendable_depth(&self, network: NetworkId) -> Result<u32, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.spendable_coinbase_depth)
    }

    fn proof_of_work_limit(&self, network: NetworkId) -> Result<U256, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.max_target)
    }

    fn port(&self, network: NetworkId) -> Result<u16, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.port)
    }

    fn packet_magic(&self, network: NetworkId) -> Result<u32, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.packet_magic)
    }

    fn pubkey_address_header(&self, network: NetworkId) -> Result<u8, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.pubkey_address_header)
    }

    fn dumped_private_key_header(&self, network: NetworkId) -> Result<u8, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.dumped_private_key_header)
    }

    fn p2sh_address_header(&self, network: NetworkId) -> Result<u8, ConfigurationError> {
        Ok(self.consensus_parameters(network)?.p2sh_address_header)
    }

    fn min_bloom_protocol_version(&self) -> u32;
    fn min_pong_protocol_version(&self) -> u32;

    fn is_bloom_filtering_supported(&self, peer: &dyn VersionInfo) -> bool {
        p2p::supports_bloom_filtering(peer, self.min_bloom_protocol_version())
    }

    fn is_ping_pong_supported(&self, peer: &dyn VersionInfo) -> bool {
        p2p::supports_ping_pong(peer, self.min_pong_protocol_version())
    }

    fn has_block_chain(&self, peer: &dyn VersionInfo) -> bool {
        p2p::has_block_chain(peer)
    }

    fn is_get_utxos_supported(&self, _peer: &dyn VersionInfo) -> bool {
        false
    }

    fn node_network_constant(&self) -> Option<u64> {
        Some(NODE_NETWORK)
    }

    fn node_bloom_constant(&self) -> Option<u64> {
        None
    }

    fn node_get_utxos_constant(&self) -> Option<u64> {
        None
    }

    fn node_pong_constant(&self) -> Option<u64> {
        None
    }

    fn create_block_extension(&self, _header: &dyn HeaderView) -> Arc<dyn BlockExtension> {
        noop_extension()
    }

    fn create_transaction_extension(&self, _tx: &[u8]) -> Arc<dyn TransactionExtension> {
        noop_extension()
    }

    fn create_peer_extension(&self, _peer: &dyn VersionInfo) -> Arc<dyn PeerExtension> {
        noop_extension()
    }

    fn create_peer_group_extension(&self) -> Arc<dyn PeerGroupExtension> {
        noop_extension()
    }

    fn create_block_chain_extension(
        &self,
        _network: NetworkId,
    ) -> Result<Arc<dyn BlockChainExtension>, ConfigurationError> {
        Ok(noop_extension())
    }

    fn create_transaction_confidence_extension(&self) -> Arc<dyn TransactionConfidenceExtension> {
        noop_extension()
    }

    fn create_wallet_extension(&self) -> Arc<dyn WalletExtension> {
        noop_extension()
    }

    fn create_serializer_extension(&self) -> Arc<dyn SerializerExtension> {
        noop_extension()
    }
}
