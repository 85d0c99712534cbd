//! Network identities
//!
//! Closed set of deployments a coin can be asked about. Every lookup in the
//! layer is keyed by this type and matched exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Network identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NetworkId {
    /// Production network
    Main,
    /// Public test network
    Test,
    /// In-process network used by the host engine's own tests
    UnitTest,
    /// Local regression-test network (not every coin defines one)
    Regtest,
}

impl NetworkId {
    pub const ALL: [NetworkId; 4] = [
        NetworkId::Main,
        NetworkId::Test,
        NetworkId::UnitTest,
        NetworkId::Regtest,
    ];

    /// Stable string tag
    pub const fn tag(&self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Test => "test",
            NetworkId::UnitTest => "unitTest",
            NetworkId::Regtest => "regtest",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NetworkId {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkId::ALL
            .into_iter()
            .find(|id| id.tag() == s)
            .ok_or_else(|| ConfigurationError::UnknownNetworkTag(s.to_string()))
    }
}

/// Main/test value pair, the two-way selector every per-network constant
/// goes through.
///
/// The unit-test network reads the test value; coins special-case it
/// before calling `select` where it must differ.
#[derive(Debug, Clone, Copy)]
pub struct PerNetwork<T> {
    pub main: T,
    pub test: T,
}

impl<T: Copy> PerNetwork<T> {
    pub const fn new(main: T, test: T) -> Self {
        Self { main, test }
    }

    pub fn select(&self, network: NetworkId, coin: &str) -> Result<T, ConfigurationError> {
        match network {
            NetworkId::Main => Ok(self.main),
            NetworkId::Test | NetworkId::UnitTest => Ok(self.test),
            NetworkId::Regtest => Err(ConfigurationError::NonStandardNetwork {
                network: network.tag().to_string(),
                coin: coin.to_string(),
            }),
        }
    }
}
