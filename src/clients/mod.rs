//! Reader/writer clients for the core restaking protocol and the AVS
//! registry contracts.
//!
//! All four clients are bound to one RPC endpoint; the writers additionally
//! carry the operator's transaction-signing key. None of them hold mutable
//! state after construction.

mod core;
pub use self::core::{CoreContracts, CoreReader, CoreWriter, OperatorProfile};

mod avs;
pub use self::avs::{AvsContracts, AvsRegistryReader, AvsRegistryWriter, OperatorStatus};

use alloy::signers::local::PrivateKeySigner;
use url::Url;

/// Shared configuration for building the four contract clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP endpoint of the execution client.
    pub eth_rpc_url: Url,
    /// Name of the AVS the operator enrolls into.
    pub avs_name: String,
    /// `ip:port` on which operator metrics are exposed.
    pub metrics_addr: String,
}

impl ClientConfig {
    /// Builds the read-only client for the core protocol contracts.
    pub fn build_core_reader(&self, contracts: CoreContracts) -> CoreReader {
        CoreReader::new(self.eth_rpc_url.clone(), contracts)
    }

    /// Builds the write client for the core protocol contracts, bound to the
    /// given transaction-signing key.
    pub fn build_core_writer(&self, contracts: CoreContracts, signer: PrivateKeySigner) -> CoreWriter {
        CoreWriter::new(self.eth_rpc_url.clone(), contracts, signer)
    }

    /// Builds the read-only client for the AVS registry contracts.
    pub fn build_avs_reader(&self, contracts: AvsContracts) -> AvsRegistryReader {
        AvsRegistryReader::new(self.eth_rpc_url.clone(), contracts)
    }

    /// Builds the write client for the AVS registry contracts, bound to the
    /// given transaction-signing key.
    pub fn build_avs_writer(&self, contracts: AvsContracts, signer: PrivateKeySigner) -> AvsRegistryWriter {
        AvsRegistryWriter::new(self.eth_rpc_url.clone(), contracts, signer)
    }
}
