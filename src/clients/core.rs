use alloy::{
    contract::Result as ContractResult,
    network::EthereumWallet,
    primitives::Address,
    providers::{ProviderBuilder, RootProvider},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    sol,
    transports::http::Http,
};
use reqwest::Client;
use url::Url;

use crate::deployment::{DeploymentAddresses, DeploymentError};

use DelegationManager::DelegationManagerInstance;

/// The fully-enumerated set of core-protocol contract addresses the clients
/// are built from. Resolved once from a deployment artifact, in checksummed
/// form.
#[derive(Debug, Clone, Copy)]
pub struct CoreContracts {
    /// The allocation manager contract.
    pub allocation_manager: Address,
    /// The AVS directory contract.
    pub avs_directory: Address,
    /// The delegation manager contract, target of operator registration.
    pub delegation_manager: Address,
    /// The permission controller contract.
    pub permission_controller: Address,
    /// The rewards coordinator contract.
    pub rewards_coordinator: Address,
    /// The strategy manager contract.
    pub strategy_manager: Address,
}

impl CoreContracts {
    /// Resolves the core contract set from a deployment-address table.
    /// Fails if any of the required names is absent or malformed.
    pub fn from_deployment(deployment: &DeploymentAddresses) -> Result<Self, DeploymentError> {
        Ok(Self {
            allocation_manager: deployment.require("allocationManager")?,
            avs_directory: deployment.require("avsDirectory")?,
            delegation_manager: deployment.require("delegation")?,
            permission_controller: deployment.require("permissionController")?,
            rewards_coordinator: deployment.require("rewardsCoordinator")?,
            strategy_manager: deployment.require("strategyManager")?,
        })
    }
}

/// The operator profile submitted to the delegation manager on registration.
#[derive(Debug, Clone)]
pub struct OperatorProfile {
    /// The operator's address.
    pub address: Address,
    /// Where operator earnings accrue.
    pub earnings_receiver: Address,
    /// Address allowed to approve delegations. Zero disables approval
    /// gating.
    pub delegation_approver: Address,
    /// Number of blocks a staker must wait before opting out of this
    /// operator.
    pub staker_opt_out_window_blocks: u32,
    /// URI pointing at operator metadata.
    pub metadata_url: String,
}

impl OperatorProfile {
    /// A self-delegating profile: earnings accrue to the operator itself, no
    /// delegation approval gating, zero opt-out window, no metadata.
    pub fn self_delegating(operator: Address) -> Self {
        Self {
            address: operator,
            earnings_receiver: operator,
            delegation_approver: Address::ZERO,
            staker_opt_out_window_blocks: 0,
            metadata_url: String::new(),
        }
    }
}

/// Read-only client for the core protocol contracts.
#[derive(Debug, Clone)]
pub struct CoreReader {
    delegation_manager: DelegationManagerInstance<Http<Client>, RootProvider<Http<Client>>>,
}

impl CoreReader {
    /// Creates a new `CoreReader` bound to the given execution client URL
    /// and core contract set.
    pub fn new(execution_client_url: Url, contracts: CoreContracts) -> Self {
        let provider = ProviderBuilder::new().on_http(execution_client_url);
        let delegation_manager = DelegationManager::new(contracts.delegation_manager, provider);

        Self { delegation_manager }
    }

    /// Whether the given address is registered as an operator with the
    /// delegation manager.
    pub async fn is_operator(&self, operator: Address) -> ContractResult<bool> {
        self.delegation_manager.isOperator(operator).call().await.map(|ret| ret._0)
    }
}

/// Write client for the core protocol contracts, bound to the operator's
/// transaction-signing key.
#[derive(Debug, Clone)]
pub struct CoreWriter {
    endpoint: Url,
    contracts: CoreContracts,
    signer: PrivateKeySigner,
}

impl CoreWriter {
    /// Creates a new `CoreWriter` bound to the given execution client URL,
    /// core contract set, and transaction-signing key.
    pub fn new(endpoint: Url, contracts: CoreContracts, signer: PrivateKeySigner) -> Self {
        Self { endpoint, contracts, signer }
    }

    /// Registers the sender as a protocol operator with the delegation
    /// manager and waits for the transaction to be included.
    pub async fn register_as_operator(
        &self,
        profile: OperatorProfile,
    ) -> eyre::Result<TransactionReceipt> {
        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet)
            .on_http(self.endpoint.clone());

        let delegation_manager = DelegationManager::new(self.contracts.delegation_manager, provider);

        let details = DelegationManager::OperatorDetails {
            earningsReceiver: profile.earnings_receiver,
            delegationApprover: profile.delegation_approver,
            stakerOptOutWindowBlocks: profile.staker_opt_out_window_blocks,
        };

        let call = delegation_manager.registerAsOperator(details, profile.metadata_url);
        let pending = call.send().await?;

        Ok(pending.get_receipt().await?)
    }
}

sol! {
    #[sol(rpc)]
    interface DelegationManager {
        struct OperatorDetails {
            address earningsReceiver;
            address delegationApprover;
            uint32 stakerOptOutWindowBlocks;
        }

        function registerAsOperator(
            OperatorDetails calldata registeringOperatorDetails,
            string calldata metadataURI
        ) external;

        function isOperator(address operator) external view returns (bool);
    }
}
