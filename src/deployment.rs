//! Deployment-address artifacts mapping contract role names to on-chain
//! addresses.

use std::{fs, path::Path};

use alloy::primitives::Address;
use serde::Deserialize;
use thiserror::Error;

/// Default location of the core-protocol deployment artifact.
pub const DEFAULT_CORE_ARTIFACT: &str = "contracts/script/deployments/core/31337.json";

/// Default location of the AVS deployment artifact.
pub const DEFAULT_AVS_ARTIFACT: &str =
    "contracts/script/deployments/incredible-squaring/31337.json";

/// Default deployment artifact listed by the `get_addresses` binary.
pub const DEFAULT_LISTER_ARTIFACT: &str =
    "eigenlayer-contracts/script/output/devnet/SLASHING_deploy_from_scratch_deployment_data.json";

/// An error that can occur while reading or resolving deployment addresses.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DeploymentError {
    #[error("Failed to read deployment file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse deployment file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Missing contract address: {0}")]
    MissingContract(String),
    #[error("Malformed address for contract {name}: {value}")]
    MalformedAddress { name: String, value: String },
}

/// The `addresses` table of a deployment artifact: a read-only mapping of
/// contract role names to on-chain addresses, in document order.
#[derive(Debug, Clone)]
pub struct DeploymentAddresses {
    entries: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct RawDeployment {
    addresses: serde_json::Map<String, serde_json::Value>,
}

impl DeploymentAddresses {
    /// Reads a deployment artifact from the JSON file at the given path.
    ///
    /// Every value in the `addresses` object must be a string.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, DeploymentError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses a deployment artifact from a JSON document.
    pub fn from_json(contents: &str) -> Result<Self, DeploymentError> {
        let raw: RawDeployment = serde_json::from_str(contents)?;

        let mut entries = Vec::with_capacity(raw.addresses.len());
        for (name, value) in raw.addresses {
            let Some(address) = value.as_str() else {
                return Err(DeploymentError::MalformedAddress { value: value.to_string(), name });
            };
            entries.push((name, address.to_owned()));
        }

        Ok(Self { entries })
    }

    /// The name/address pairs, in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, address)| (name.as_str(), address.as_str()))
    }

    /// The number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the address registered under the given contract name into
    /// checksummed canonical form.
    ///
    /// A missing name or an unparseable address is an error; clients must
    /// never be built from a partially resolved table.
    pub fn require(&self, name: &str) -> Result<Address, DeploymentError> {
        let value = self
            .entries
            .iter()
            .find(|(entry, _)| entry.as_str() == name)
            .map(|(_, address)| address.as_str())
            .ok_or_else(|| DeploymentError::MissingContract(name.to_owned()))?;

        value.parse().map_err(|_| DeploymentError::MalformedAddress {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }
}
