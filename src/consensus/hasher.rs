//! Block hashing strategy
//!
//! A block has two hashes computed from the same header bytes: the identity
//! hash that links blocks and merkle trees, and the proof-of-work hash that
//! is compared against the difficulty target. Coins choose the pair once,
//! when their definition is built.

use thiserror::Error;

use super::block::HeaderView;
use super::difficulty::{compact_to_target, CompactTargetError};
use crate::crypto::{double_sha256, scrypt_digest, Hash, U256};

/// Hashing capability supplied by a coin
///
/// Implementations are stateless, so one instance may be shared by every
/// validation thread.
pub trait BlockHasher: Send + Sync {
    /// Hash used for chain linkage and merkle computation
    fn identity_hash(&self, header: &[u8]) -> Hash;

    /// Hash compared against the decoded difficulty target
    fn proof_of_work_hash(&self, header: &[u8]) -> Hash;

    fn hash_pair(&self, header: &[u8]) -> HeaderHashPair {
        HeaderHashPair {
            identity_hash: self.identity_hash(header),
            proof_of_work_hash: self.proof_of_work_hash(header),
        }
    }
}

/// Both hashes of one header. Computed per header, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderHashPair {
    pub identity_hash: Hash,
    pub proof_of_work_hash: Hash,
}

/// Double SHA-256 ids with scrypt proof of work
#[derive(Debug, Default, Clone, Copy)]
pub struct ScryptBlockHasher;

impl BlockHasher for ScryptBlockHasher {
    fn identity_hash(&self, header: &[u8]) -> Hash {
        double_sha256(header)
    }

    fn proof_of_work_hash(&self, header: &[u8]) -> Hash {
        scrypt_digest(header)
    }
}

/// Proof-of-work errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofOfWorkError {
    #[error("difficulty target is zero")]
    ZeroTarget,
    #[error("difficulty target {target} above proof-of-work limit {limit}")]
    TargetAboveLimit { target: U256, limit: U256 },
    #[error("proof-of-work hash {hash} above target {target}")]
    HashAboveTarget { hash: Hash, target: U256 },
    #[error(transparent)]
    Compact(#[from] CompactTargetError),
}

/// Validate proof of work
///
/// The proof-of-work hash, read as an integer, must not exceed the target
/// decoded from the header, and that target must not exceed `limit`.
pub fn check_proof_of_work(
    hasher: &dyn BlockHasher,
    header: &dyn HeaderView,
    limit: U256,
) -> Result<HeaderHashPair, ProofOfWorkError> {
    let target = compact_to_target(header.difficulty_target())?;
    if target.is_zero() {
        return Err(ProofOfWorkError::ZeroTarget);
    }
    if target > limit {
        return Err(ProofOfWorkError::TargetAboveLimit { target, limit });
    }

    let pair = hasher.hash_pair(&header.header_bytes());
    if pair.proof_of_work_hash.to_u256() > target {
        return Err(ProofOfWorkError::HashAboveTarget {
            hash: pair.proof_of_work_hash,
            target,
        });
    }

    Ok(pair)
}
