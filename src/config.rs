use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// An error that can occur while loading the operator configuration.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// The operator configuration, loaded once at startup from a YAML file and
/// immutable afterwards.
///
/// All fields are required; a missing or malformed field fails the load
/// instead of surfacing at first use.
#[derive(Debug, Clone, Deserialize)]
pub struct OperatorConfig {
    /// The operator's on-chain address.
    pub operator_address: Address,
    /// HTTP endpoint of the execution client used for all contract calls.
    pub eth_rpc_url: Url,
    /// Path to the password-protected BLS keystore file.
    pub bls_private_key_store_path: PathBuf,
    /// Path to the password-protected ECDSA keystore file.
    pub ecdsa_private_key_store_path: PathBuf,
    /// Whether to run the on-chain registration on startup.
    ///
    /// Only the exact string `"true"` enables registration. Any other
    /// spelling (`"True"`, `"1"`, `"false"`, ...) disables it.
    #[serde(deserialize_with = "scalar_as_string")]
    pub register_operator_on_startup: String,
    /// `ip:port` on which operator metrics are exposed.
    pub eigen_metrics_ip_port_address: String,
}

impl OperatorConfig {
    /// Loads the configuration from the YAML file at the given path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Whether registration should run on startup. Exact string match only.
    pub fn registration_enabled(&self) -> bool {
        self.register_operator_on_startup == "true"
    }
}

/// Reads a YAML scalar as its string spelling, so that a bare `true` or `1`
/// in the config file behaves like the quoted string.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected a scalar value, got: {other:?}"))),
    }
}
