//! Block header as seen by this layer
//!
//! The host engine owns block serialization. This layer only needs read
//! access to a handful of header fields plus the raw 80-byte encoding,
//! expressed by `HeaderView`. `BlockHeader` is the concrete header used for
//! genesis assembly and tests.

use serde::{Deserialize, Serialize};

use crate::crypto::Hash;

/// Serialized header length
pub const HEADER_SIZE: usize = 80;

/// Read-only header abstraction consumed from the host engine
pub trait HeaderView {
    fn prev_hash(&self) -> Hash;
    fn merkle_root(&self) -> Hash;
    fn time(&self) -> u32;
    fn nonce(&self) -> u32;
    /// Compact-encoded difficulty target
    fn difficulty_target(&self) -> u32;
    /// Raw header bytes as they are hashed
    fn header_bytes(&self) -> Vec<u8>;
}

/// Block header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    /// Protocol version
    pub version: u32,
    /// Hash of the previous block
    pub prev_hash: Hash,
    /// Merkle root of all transactions
    pub merkle_root: Hash,
    /// Block timestamp (seconds since Unix epoch)
    pub time: u32,
    /// Difficulty target (compact representation)
    pub bits: u32,
    /// Nonce used for PoW
    pub nonce: u32,
}

impl BlockHeader {
    pub fn new(
        version: u32,
        prev_hash: Hash,
        merkle_root: Hash,
        time: u32,
        bits: u32,
        nonce: u32,
    ) -> Self {
        Self {
            version,
            prev_hash,
            merkle_root,
            time,
            bits,
            nonce,
        }
    }

    /// Serialize the header for hashing
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(&self.prev_hash.0);
        bytes[36..68].copy_from_slice(&self.merkle_root.0);
        bytes[68..72].copy_from_slice(&self.time.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.bits.to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// Check if this is a genesis header
    pub fn is_genesis(&self) -> bool {
        self.prev_hash == Hash::zero()
    }
}

impl HeaderView for BlockHeader {
    fn prev_hash(&self) -> Hash {
        self.prev_hash
    }

    fn merkle_root(&self) -> Hash {
        self.merkle_root
    }

    fn time(&self) -> u32 {
        self.time
    }

    fn nonce(&self) -> u32 {
        self.nonce
    }

    fn difficulty_target(&self) -> u32 {
        self.bits
    }

    fn header_bytes(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}
