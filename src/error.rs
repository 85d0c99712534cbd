//! Error taxonomy for the coin definition layer
//!
//! Every failure is fatal to the operation that raised it. There is no
//! fallback to another network's values and no partial-trust mode.

use thiserror::Error;

/// A network was requested that the coin does not define
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("non-standard network `{network}` for coin `{coin}`")]
    NonStandardNetwork { network: String, coin: String },
    #[error("unknown network tag `{0}`")]
    UnknownNetworkTag(String),
}

/// A loaded checkpoint set disagrees with what the coin hardcodes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusMismatchError {
    #[error("checkpoint store holds {store} checkpoints but {expected} were loaded")]
    CheckpointCount { store: usize, expected: usize },
    #[error("no checkpoint at or before anchor time {cutoff}")]
    MissingAnchor { cutoff: u64 },
    #[error("anchor checkpoint height mismatch: expected {expected}, found {actual}")]
    AnchorHeight { expected: u32, actual: u32 },
    #[error("anchor checkpoint hash mismatch: expected {expected}, found {actual}")]
    AnchorHash { expected: String, actual: String },
}

/// Assembled genesis block does not hash to the published value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisIntegrityError {
    #[error("{coin} {network} genesis merkle root mismatch: expected {expected}, computed {actual}")]
    MerkleRoot {
        coin: String,
        network: String,
        expected: String,
        actual: String,
    },
    #[error("{coin} {network} genesis hash mismatch: expected {expected}, computed {actual}")]
    BlockHash {
        coin: String,
        network: String,
        expected: String,
        actual: String,
    },
    #[error("{coin} {network} genesis fails proof of work: {reason}")]
    ProofOfWork {
        coin: String,
        network: String,
        reason: String,
    },
    #[error("{coin} {network} genesis field `{field}` is not valid hex")]
    MalformedField {
        coin: String,
        network: String,
        field: &'static str,
    },
}

/// Coin registration misuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("coin `{existing}` already registered, refusing `{attempted}`")]
    AlreadyRegistered { existing: String, attempted: String },
    #[error("no coin registered")]
    NotRegistered,
}

/// Any failure raised by this layer
#[derive(Debug, Error)]
pub enum CoinError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    ConsensusMismatch(#[from] ConsensusMismatchError),
    #[error(transparent)]
    GenesisIntegrity(#[from] GenesisIntegrityError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, CoinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_standard_network_names_both() {
        let err = ConfigurationError::NonStandardNetwork {
            network: "regtest".to_string(),
            coin: "litecoin".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("regtest"));
        assert!(msg.contains("litecoin"));
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: CoinError = RegistryError::NotRegistered.into();
        assert!(matches!(err, CoinError::Registry(RegistryError::NotRegistered)));
    }
}
