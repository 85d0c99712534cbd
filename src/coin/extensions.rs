//! Extension points
//!
//! The host engine asks the coin for one extension per engine object it
//! builds and calls it unconditionally. Every hook has a no-op default, so
//! a coin overrides only the hooks it needs and returns the shared
//! `NoopExtension` for the rest.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::consensus::{DifficultyContext, DifficultyError, HeaderView};
use crate::p2p::VersionInfo;

/// Hooks on block objects
pub trait BlockExtension: Send + Sync {
    /// Extra bytes a coin appends after the standard header
    fn extra_header_len(&self) -> usize {
        0
    }

    fn on_header_parsed(&self, _header: &dyn HeaderView) {}
}

/// Hooks on transaction objects
pub trait TransactionExtension: Send + Sync {
    /// Coin-specific payload appended to a transaction
    fn extra_payload_len(&self) -> usize {
        0
    }

    /// Overrides the engine's standardness verdict when `Some`
    fn is_standard_override(&self, _tx: &[u8]) -> Option<bool> {
        None
    }
}

/// Hooks on a single peer connection
pub trait PeerExtension: Send + Sync {
    fn on_version(&self, _version: &dyn VersionInfo) {}
}

/// Hooks on the peer group
pub trait PeerGroupExtension: Send + Sync {
    fn on_peer_count_changed(&self, _connected: usize) {}
}

/// Hooks on chain validation
pub trait BlockChainExtension: Send + Sync {
    fn check_difficulty_transition(&self, _ctx: &DifficultyContext) -> Result<(), DifficultyError> {
        Ok(())
    }
}

/// Hooks on transaction confidence tracking
pub trait TransactionConfidenceExtension: Send + Sync {
    fn on_depth_changed(&self, _depth: u32) {}
}

/// Wallet-specific behaviour
pub trait WalletExtension: Send + Sync {
    /// Replaces the coinbase maturity depth when `Some`
    fn coinbase_maturity_override(&self) -> Option<u32> {
        None
    }
}

/// Wire serializer hooks
pub trait SerializerExtension: Send + Sync {
    fn inventory_type_name(&self, _code: u32) -> Option<&'static str> {
        None
    }

    fn inventory_type_code(&self, _name: &str) -> Option<u32> {
        None
    }
}

/// Extension that does nothing at every hook
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExtension;

impl BlockExtension for NoopExtension {}
impl TransactionExtension for NoopExtension {}
impl PeerExtension for NoopExtension {}
impl PeerGroupExtension for NoopExtension {}
impl BlockChainExtension for NoopExtension {}
impl TransactionConfidenceExtension for NoopExtension {}
impl WalletExtension for NoopExtension {}
impl SerializerExtension for NoopExtension {}

static NOOP: Lazy<Arc<NoopExtension>> = Lazy::new(|| Arc::new(NoopExtension));

/// Shared no-op extension
pub fn noop_extension() -> Arc<NoopExtension> {
    Arc::clone(&NOOP)
}
