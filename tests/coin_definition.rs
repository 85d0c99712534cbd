//! End-to-end checks of the Litecoin definition as the host engine sees it

use std::sync::Arc;

use coin_core::coin::{CoinDefinition, CoinRegistry, LitecoinDefinition};
use coin_core::consensus::{CheckpointList, StoredCheckpoint};
use coin_core::crypto::Hash;
use coin_core::error::{CoinError, ConfigurationError, ConsensusMismatchError};
use coin_core::node::verify_genesis;
use coin_core::p2p::VersionMessage;
use coin_core::NetworkId;

const ANCHOR_HASH: &str = "d8c4452c530b0a2f5c7b712b0503704f0956c5ec1878cd372035311fedcd2d9c";

fn litecoin() -> LitecoinDefinition {
    LitecoinDefinition::new().unwrap()
}

fn checkpoint(height: u32, hash: &str, timestamp: u64) -> StoredCheckpoint {
    StoredCheckpoint {
        height,
        hash: Hash::from_hex(hash).unwrap(),
        timestamp,
    }
}

#[test]
fn test_genesis_hashes_match_published_values() {
    let coin = litecoin();

    let main = verify_genesis(&coin, NetworkId::Main).unwrap();
    assert_eq!(
        coin.block_hasher().identity_hash(&main.header.to_bytes()).to_hex(),
        "12a765e31ffd4059bada1e25190f6e98c99d9714d334efa41a195a7e7e04bfe2"
    );
    assert_eq!(
        main.header.merkle_root.to_hex(),
        "97ddfbbae6be97fd6cdf3e7ca13232a3afff2353e29badfab7f73011edd4ced9"
    );

    let test = verify_genesis(&coin, NetworkId::Test).unwrap();
    assert_eq!(
        coin.block_hasher().identity_hash(&test.header.to_bytes()).to_hex(),
        "f5ae71e26c74beacc88382716aced69cddf3dffff24f384e1808905e0188f68f"
    );

    assert_eq!(main.coinbase_txid(), main.header.merkle_root);
    assert_eq!(test.coinbase_txid(), test.header.merkle_root);

    let unit = verify_genesis(&coin, NetworkId::UnitTest).unwrap();
    assert_eq!(unit.header, main.header);
}

#[test]
fn test_genesis_pow_hash_meets_target() {
    let coin = litecoin();
    let block = verify_genesis(&coin, NetworkId::Main).unwrap();
    let pow = coin.block_hasher().proof_of_work_hash(&block.header.to_bytes());
    assert!(pow.to_hex().starts_with("0000050c"), "pow hash {pow}");
}

#[test]
fn test_regtest_is_rejected_everywhere() {
    let coin = litecoin();
    let expected = ConfigurationError::NonStandardNetwork {
        network: "regtest".to_string(),
        coin: "litecoin".to_string(),
    };
    assert_eq!(coin.port(NetworkId::Regtest).unwrap_err(), expected);
    assert_eq!(coin.interval(NetworkId::Regtest).unwrap_err(), expected);
    assert_eq!(coin.genesis_block_info(NetworkId::Regtest).unwrap_err(), expected);
    assert!(coin.dns_seeds(NetworkId::Regtest).is_err());
    assert!(coin.create_block_chain_extension(NetworkId::Regtest).is_err());
    assert!(matches!(
        verify_genesis(&coin, NetworkId::Regtest),
        Err(CoinError::Configuration(_))
    ));
}

#[test]
fn test_identity_surface() {
    let coin = litecoin();
    assert_eq!(coin.name(), "litecoin");
    assert_eq!(coin.ticker(), "LTC");
    assert_eq!(coin.uri_scheme(), "litecoin");
    assert_eq!(coin.protocol_version(), 70003);
    assert_eq!(coin.network_id_string(NetworkId::Main), Some("org.litecoin.production"));
    assert_eq!(coin.network_id_string(NetworkId::Regtest), None);
    assert_eq!(coin.max_coins(), 84_000_000);
    assert_eq!(coin.packet_magic(NetworkId::Main).unwrap(), 0xfbc0_b6db);
    assert_eq!(coin.dumped_private_key_header(NetworkId::Test).unwrap(), 239);
    assert_eq!(coin.block_reward(839_999, NetworkId::Main).unwrap(), 25 * 100_000_000);
    assert!(!coin.is_bitcoin_private_key_allowed());
    assert_eq!(coin.payment_protocol_id(NetworkId::Main), None);
}

#[test]
fn test_peer_predicates() {
    let coin = litecoin();
    let modern = VersionMessage { client_version: 70_003, local_services: 1 };
    let old = VersionMessage { client_version: 60_000, local_services: 0 };

    assert!(coin.is_bloom_filtering_supported(&modern));
    assert!(coin.is_ping_pong_supported(&modern));
    assert!(coin.has_block_chain(&modern));
    assert!(!coin.is_bloom_filtering_supported(&old));
    assert!(!coin.is_ping_pong_supported(&old));
    assert!(!coin.has_block_chain(&old));
    assert!(!coin.is_get_utxos_supported(&modern));
}

#[test]
fn test_checkpoint_anchor_accepted() {
    let coin = litecoin();
    let list = CheckpointList::new(vec![
        checkpoint(209_664, &"11".repeat(32), 1_348_000_000),
        checkpoint(211_680, ANCHOR_HASH, 1_348_300_000),
        checkpoint(213_696, &"22".repeat(32), 1_348_400_000),
    ]);
    coin.checkpoints_sanity_check(&list, list.as_map(), NetworkId::Main)
        .unwrap();
}

#[test]
fn test_checkpoint_anchor_wrong_hash() {
    let coin = litecoin();
    let list = CheckpointList::new(vec![checkpoint(211_680, &"33".repeat(32), 1_348_300_000)]);
    let err = coin
        .checkpoints_sanity_check(&list, list.as_map(), NetworkId::Main)
        .unwrap_err();
    assert!(matches!(err, ConsensusMismatchError::AnchorHash { .. }));
}

#[test]
fn test_checkpoint_anchor_wrong_height() {
    let coin = litecoin();
    let list = CheckpointList::new(vec![checkpoint(211_679, ANCHOR_HASH, 1_348_300_000)]);
    let err = coin
        .checkpoints_sanity_check(&list, list.as_map(), NetworkId::Main)
        .unwrap_err();
    assert_eq!(
        err,
        ConsensusMismatchError::AnchorHeight { expected: 211_680, actual: 211_679 }
    );
}

#[test]
fn test_checkpoint_anchor_skipped_off_main() {
    let coin = litecoin();
    let list = CheckpointList::new(vec![checkpoint(2016, &"44".repeat(32), 1_000)]);
    coin.checkpoints_sanity_check(&list, list.as_map(), NetworkId::Test)
        .unwrap();
}

#[test]
fn test_registry_hands_out_registered_coin() {
    let registry = CoinRegistry::new();
    let coin: Arc<dyn CoinDefinition> = Arc::new(litecoin());
    registry.register(Arc::clone(&coin)).unwrap();

    let active = registry.active().unwrap();
    assert!(Arc::ptr_eq(&active, &coin));
    assert_eq!(active.port(NetworkId::Test).unwrap(), 19333);
    assert!(registry.register(Arc::new(litecoin())).is_err());
}
