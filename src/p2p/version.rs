//! Peer capability predicates
//!
//! Pure functions over the two fields of a peer's version message that
//! decide which optional protocol features the peer speaks.

/// Services bit: peer holds a full copy of the block chain
pub const NODE_NETWORK: u64 = 1;

/// Read-only view of a peer's version message
pub trait VersionInfo {
    fn client_version(&self) -> u32;
    /// Declared service flags
    fn local_services(&self) -> u64;
}

/// Plain version message fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMessage {
    pub client_version: u32,
    pub local_services: u64,
}

impl VersionInfo for VersionMessage {
    fn client_version(&self) -> u32 {
        self.client_version
    }

    fn local_services(&self) -> u64 {
        self.local_services
    }
}

pub fn supports_bloom_filtering(peer: &dyn VersionInfo, min_bloom_version: u32) -> bool {
    peer.client_version() >= min_bloom_version
}

pub fn supports_ping_pong(peer: &dyn VersionInfo, min_pong_version: u32) -> bool {
    peer.client_version() >= min_pong_version
}

pub fn has_block_chain(peer: &dyn VersionInfo) -> bool {
    peer.local_services() & NODE_NETWORK == NODE_NETWORK
}
