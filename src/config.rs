//! Configuration for the checkpoint-building tool

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::network::NetworkId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Settings for one run of the checkpoint tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_network")]
    pub network: NetworkId,
    #[serde(default = "default_checkpoints_path")]
    pub checkpoints_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Drop checkpoints newer than this unix time; defaults to the coin's
    /// days-back window
    #[serde(default)]
    pub fast_catchup_time: Option<u64>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            checkpoints_path: default_checkpoints_path(),
            output_path: default_output_path(),
            fast_catchup_time: None,
        }
    }
}

fn default_network() -> NetworkId {
    NetworkId::Main
}

fn default_checkpoints_path() -> PathBuf {
    PathBuf::from("checkpoints.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("checkpoints.out.json")
}

impl ToolConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: ToolConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checkpoints_path.as_os_str().is_empty() {
            return Err(ConfigError::Missing("checkpoints_path"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Missing("output_path"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_empty() {
        let config = ToolConfig::from_toml("").unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let config = ToolConfig::from_toml(
            r#"
            network = "test"
            checkpoints_path = "in.json"
            output_path = "out.json"
            fast_catchup_time = 1348310800
            "#,
        )
        .unwrap();
        assert_eq!(config.network, NetworkId::Test);
        assert_eq!(config.checkpoints_path, PathBuf::from("in.json"));
        assert_eq!(config.fast_catchup_time, Some(1_348_310_800));
    }

    #[test]
    fn test_unknown_network_rejected() {
        assert!(matches!(
            ToolConfig::from_toml(r#"network = "mainnet""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(
            ToolConfig::from_toml(r#"output_path = """#),
            Err(ConfigError::Missing("output_path"))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "network = \"unitTest\"").unwrap();
        let config = ToolConfig::load(file.path()).unwrap();
        assert_eq!(config.network, NetworkId::UnitTest);

        let missing = file.path().with_extension("missing");
        assert!(matches!(ToolConfig::load(&missing), Err(ConfigError::Read { .. })));
    }
}
