//! Checkpoint-building tool
//!
//! The entry point registers the coin, then hands the active definition to a
//! `CheckpointBuilder`.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{info, warn};

use crate::coin::{CoinDefinition, CoinRegistry};
use crate::config::{ConfigError, ToolConfig};
use crate::consensus::{CheckpointList, StoredCheckpoint};
use crate::error::CoinError;
use crate::node::verify_genesis;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Coin(#[from] CoinError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("checkpoint file: {0}")]
    Io(#[from] std::io::Error),
}

/// What a builder run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub loaded: usize,
    pub written: usize,
    pub latest: Option<StoredCheckpoint>,
}

/// Host-side checkpoint builder
pub trait CheckpointBuilder {
    fn build(&self, coin: &dyn CoinDefinition, config: &ToolConfig) -> Result<BuildReport, ToolError>;
}

/// Register `coin` as the active coin and run `builder` against it
pub fn run_checkpoint_builder(
    registry: &CoinRegistry,
    coin: Arc<dyn CoinDefinition>,
    builder: &dyn CheckpointBuilder,
    config: &ToolConfig,
) -> Result<BuildReport, ToolError> {
    registry.register(coin).map_err(CoinError::from)?;
    let coin = registry.active().map_err(CoinError::from)?;
    builder.build(coin.as_ref(), config)
}

/// Reads a JSON checkpoint list, sanity-checks it and writes the checkpoints
/// old enough to ship
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCheckpointBuilder;

impl JsonCheckpointBuilder {
    fn cutoff(coin: &dyn CoinDefinition, config: &ToolConfig) -> u64 {
        config.fast_catchup_time.unwrap_or_else(|| {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            now.saturating_sub(u64::from(coin.checkpoint_days_back()) * SECONDS_PER_DAY)
        })
    }
}

impl CheckpointBuilder for JsonCheckpointBuilder {
    fn build(&self, coin: &dyn CoinDefinition, config: &ToolConfig) -> Result<BuildReport, ToolError> {
        let network = config.network;
        verify_genesis(coin, network)?;

        if !coin.is_checkpointing_supported() {
            warn!(coin = coin.name(), "coin does not support checkpointing, writing empty list");
            CheckpointList::default().save_json(&config.output_path)?;
            return Ok(BuildReport { loaded: 0, written: 0, latest: None });
        }

        let loaded = CheckpointList::load_json(&config.checkpoints_path)?;
        coin.checkpoints_sanity_check(&loaded, loaded.as_map(), network)
            .map_err(CoinError::from)?;

        let cutoff = Self::cutoff(coin, config);
        let kept = CheckpointList::new(
            loaded
                .as_map()
                .range(..=cutoff)
                .map(|(_, cp)| cp.clone())
                .collect(),
        );
        kept.save_json(&config.output_path)?;

        let written = CheckpointList::load_json(&config.output_path)?;
        coin.checkpoints_sanity_check(&written, kept.as_map(), network)
            .map_err(CoinError::from)?;

        info!(
            coin = coin.name(),
            %network,
            loaded = loaded.len(),
            written = kept.len(),
            cutoff,
            "checkpoints written"
        );

        Ok(BuildReport {
            loaded: loaded.len(),
            written: kept.len(),
            latest: kept.latest().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::LitecoinDefinition;
    use crate::crypto::Hash;
    use crate::error::{ConsensusMismatchError, RegistryError};
    use crate::network::NetworkId;

    fn litecoin() -> Arc<dyn CoinDefinition> {
        Arc::new(LitecoinDefinition::new().unwrap())
    }

    fn checkpoint(height: u32, timestamp: u64) -> StoredCheckpoint {
        StoredCheckpoint {
            height,
            hash: Hash::from_bytes([height as u8; 32]),
            timestamp,
        }
    }

    #[test]
    fn test_builds_test_network_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig {
            network: NetworkId::Test,
            checkpoints_path: dir.path().join("in.json"),
            output_path: dir.path().join("out.json"),
            fast_catchup_time: Some(2_000),
        };
        CheckpointList::new(vec![checkpoint(2016, 1_000), checkpoint(4032, 2_000), checkpoint(6048, 3_000)])
            .save_json(&config.checkpoints_path)
            .unwrap();

        let registry = CoinRegistry::new();
        let report = run_checkpoint_builder(&registry, litecoin(), &JsonCheckpointBuilder, &config).unwrap();

        assert_eq!(report.loaded, 3);
        assert_eq!(report.written, 2);
        assert_eq!(report.latest.map(|cp| cp.height), Some(4032));
        assert_eq!(CheckpointList::load_json(&config.output_path).unwrap().len(), 2);
        assert!(registry.is_registered());
    }

    #[test]
    fn test_main_network_requires_anchor() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig {
            network: NetworkId::Main,
            checkpoints_path: dir.path().join("in.json"),
            output_path: dir.path().join("out.json"),
            fast_catchup_time: None,
        };
        CheckpointList::new(vec![checkpoint(2016, 1_000)])
            .save_json(&config.checkpoints_path)
            .unwrap();

        let registry = CoinRegistry::new();
        let err = run_checkpoint_builder(&registry, litecoin(), &JsonCheckpointBuilder, &config).unwrap_err();
        assert!(matches!(err, ToolError::Coin(CoinError::ConsensusMismatch(_))));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_shared_timestamps_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig {
            network: NetworkId::Test,
            checkpoints_path: dir.path().join("in.json"),
            output_path: dir.path().join("out.json"),
            fast_catchup_time: Some(2_000),
        };
        let records = serde_json::to_string(&[checkpoint(2016, 1_000), checkpoint(4032, 1_000)]).unwrap();
        std::fs::write(&config.checkpoints_path, records).unwrap();

        let registry = CoinRegistry::new();
        let err = run_checkpoint_builder(&registry, litecoin(), &JsonCheckpointBuilder, &config).unwrap_err();
        assert!(matches!(
            err,
            ToolError::Coin(CoinError::ConsensusMismatch(ConsensusMismatchError::CheckpointCount {
                store: 2,
                expected: 1,
            }))
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_main_network_output_keeps_anchor() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig {
            network: NetworkId::Main,
            checkpoints_path: dir.path().join("in.json"),
            output_path: dir.path().join("out.json"),
            fast_catchup_time: Some(1_348_300_000),
        };
        let anchor = StoredCheckpoint {
            height: 211_680,
            hash: Hash::from_hex(crate::coin::litecoin::MAIN_CHECKPOINT_ANCHOR.hash).unwrap(),
            timestamp: 1_348_300_000,
        };
        CheckpointList::new(vec![checkpoint(209_664, 1_348_000_000), anchor, checkpoint(213_696, 1_348_400_000)])
            .save_json(&config.checkpoints_path)
            .unwrap();

        let registry = CoinRegistry::new();
        let report = run_checkpoint_builder(&registry, litecoin(), &JsonCheckpointBuilder, &config).unwrap();
        assert_eq!(report.written, 2);
        assert_eq!(report.latest.map(|cp| cp.height), Some(211_680));
    }

    #[test]
    fn test_second_run_rejected_by_registry() {
        let registry = CoinRegistry::with_coin(litecoin());
        let err = run_checkpoint_builder(&registry, litecoin(), &JsonCheckpointBuilder, &ToolConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::Coin(CoinError::Registry(RegistryError::AlreadyRegistered { .. }))
        ));
    }
}
