//! Active coin binding
//!
//! The registry is an ordinary value created by the process entry point and
//! passed by reference to whatever needs the coin. It accepts exactly one
//! registration; every later read sees the same fully built definition.

use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{error, info};

use super::CoinDefinition;
use crate::error::RegistryError;

/// Write-once holder for the active coin
#[derive(Default)]
pub struct CoinRegistry {
    active: OnceCell<Arc<dyn CoinDefinition>>,
}

impl CoinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the coin already bound
    pub fn with_coin(coin: Arc<dyn CoinDefinition>) -> Self {
        Self {
            active: OnceCell::with_value(coin),
        }
    }

    /// Bind the active coin. A second registration is rejected.
    pub fn register(&self, coin: Arc<dyn CoinDefinition>) -> Result<(), RegistryError> {
        let attempted = coin.name();
        self.active.set(coin).map_err(|_| {
            let existing = self.active.get().map(|c| c.name()).unwrap_or_default();
            error!(existing, attempted, "coin already registered");
            RegistryError::AlreadyRegistered {
                existing: existing.to_string(),
                attempted: attempted.to_string(),
            }
        })?;
        info!(coin = attempted, "coin registered");
        Ok(())
    }

    /// The active coin
    pub fn active(&self) -> Result<Arc<dyn CoinDefinition>, RegistryError> {
        self.active.get().cloned().ok_or(RegistryError::NotRegistered)
    }

    pub fn is_registered(&self) -> bool {
        self.active.get().is_some()
    }
}

impl std::fmt::Debug for CoinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active = self.active.get().map(|c| c.name());
        f.debug_struct("CoinRegistry").field("active", &active).finish()
    }
}
