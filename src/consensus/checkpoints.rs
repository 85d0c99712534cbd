//! Checkpoint sanity checking
//!
//! A checkpoint file is only trusted after its size matches what was parsed
//! and, on the main network, after the checkpoint just before a hardcoded
//! time matches a hardcoded (height, hash) anchor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

use crate::crypto::Hash;
use crate::error::ConsensusMismatchError;
use crate::network::NetworkId;

/// A checkpointed block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCheckpoint {
    /// Block height
    pub height: u32,
    /// Block hash
    #[serde(with = "hash_hex")]
    pub hash: Hash,
    /// Block timestamp (Unix epoch)
    pub timestamp: u64,
}

mod hash_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::crypto::Hash;

    pub fn serialize<S>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hash.to_hex())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Hash, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex: String = Deserialize::deserialize(deserializer)?;
        Hash::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Read-only checkpoint store consumed from the host engine
pub trait CheckpointStore {
    fn num_checkpoints(&self) -> usize;

    /// Latest checkpoint whose timestamp is at or before `time`
    fn checkpoint_before(&self, time: u64) -> Option<StoredCheckpoint>;
}

/// Hardcoded main-network anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointAnchor {
    /// Lookup time for the anchored checkpoint
    pub cutoff_time: u64,
    pub height: u32,
    /// Display hex of the anchored block hash
    pub hash: &'static str,
}

/// Checkpoints keyed by timestamp
pub type CheckpointMap = BTreeMap<u64, StoredCheckpoint>;

/// Sanity-check a loaded checkpoint set
///
/// Any mismatch aborts the load. Callers must not use any checkpoint from a
/// store that fails this check.
pub fn validate_checkpoints(
    store: &dyn CheckpointStore,
    checkpoints: &CheckpointMap,
    network: NetworkId,
    anchor: Option<&CheckpointAnchor>,
) -> Result<(), ConsensusMismatchError> {
    if store.num_checkpoints() != checkpoints.len() {
        error!(
            store = store.num_checkpoints(),
            loaded = checkpoints.len(),
            "checkpoint count mismatch"
        );
        return Err(ConsensusMismatchError::CheckpointCount {
            store: store.num_checkpoints(),
            expected: checkpoints.len(),
        });
    }

    let anchor = match (network, anchor) {
        (NetworkId::Main, Some(anchor)) => anchor,
        _ => {
            debug!(%network, count = checkpoints.len(), "checkpoint count verified");
            return Ok(());
        }
    };

    let checkpoint = store
        .checkpoint_before(anchor.cutoff_time)
        .ok_or(ConsensusMismatchError::MissingAnchor {
            cutoff: anchor.cutoff_time,
        })?;

    if checkpoint.height != anchor.height {
        error!(expected = anchor.height, actual = checkpoint.height, "anchor height mismatch");
        return Err(ConsensusMismatchError::AnchorHeight {
            expected: anchor.height,
            actual: checkpoint.height,
        });
    }

    let actual = checkpoint.hash.to_hex();
    if actual != anchor.hash {
        error!(expected = anchor.hash, %actual, "anchor hash mismatch");
        return Err(ConsensusMismatchError::AnchorHash {
            expected: anchor.hash.to_string(),
            actual,
        });
    }

    debug!(%network, height = anchor.height, "checkpoint anchor verified");
    Ok(())
}

/// In-memory checkpoint list
///
/// As a store it reports the number of records it was built from, so records
/// collapsed by a shared timestamp show up as a count mismatch against
/// `as_map`.
#[derive(Debug, Clone, Default)]
pub struct CheckpointList {
    checkpoints: CheckpointMap,
    records: usize,
}

impl CheckpointList {
    /// Create a new checkpoint list
    pub fn new(checkpoints: Vec<StoredCheckpoint>) -> Self {
        let records = checkpoints.len();
        Self {
            checkpoints: checkpoints
                .into_iter()
                .map(|cp| (cp.timestamp, cp))
                .collect(),
            records,
        }
    }

    /// Number of records the list was built from
    pub fn records(&self) -> usize {
        self.records
    }

    /// Load a JSON array of checkpoints
    pub fn load_json(path: &Path) -> std::io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let checkpoints: Vec<StoredCheckpoint> = serde_json::from_str(&data)?;
        Ok(Self::new(checkpoints))
    }

    /// Write as a JSON array of checkpoints
    pub fn save_json(&self, path: &Path) -> std::io::Result<()> {
        let checkpoints: Vec<&StoredCheckpoint> = self.checkpoints.values().collect();
        let data = serde_json::to_string_pretty(&checkpoints)?;
        fs::write(path, data)
    }

    pub fn as_map(&self) -> &CheckpointMap {
        &self.checkpoints
    }

    /// Get latest checkpoint
    pub fn latest(&self) -> Option<&StoredCheckpoint> {
        self.checkpoints.values().next_back()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

impl CheckpointStore for CheckpointList {
    fn num_checkpoints(&self) -> usize {
        self.records
    }

    fn checkpoint_before(&self, time: u64) -> Option<StoredCheckpoint> {
        self.checkpoints
            .range(..=time)
            .next_back()
            .map(|(_, cp)| cp.clone())
    }
}
