use alloy::{
    contract::Result as ContractResult,
    network::EthereumWallet,
    primitives::{Address, Bytes, Keccak256, B256, U256},
    providers::{ProviderBuilder, RootProvider},
    rpc::types::TransactionReceipt,
    signers::{local::PrivateKeySigner, SignerSync},
    sol,
    transports::http::Http,
};
use reqwest::Client;
use url::Url;

use crate::{
    bls::BlsKeypair,
    deployment::{DeploymentAddresses, DeploymentError},
};

use RegistryCoordinator::RegistryCoordinatorInstance;

/// The fully-enumerated set of AVS registry contract addresses the clients
/// are built from. Resolved once from a deployment artifact, in checksummed
/// form.
#[derive(Debug, Clone, Copy)]
pub struct AvsContracts {
    /// The registry coordinator contract, target of operator enrollment.
    pub registry_coordinator: Address,
    /// The operator state retriever contract.
    pub operator_state_retriever: Address,
    /// The AVS service manager contract.
    pub service_manager: Address,
    /// The stake registry contract.
    pub stake_registry: Address,
    /// The BLS APK registry contract.
    pub bls_apk_registry: Address,
    /// The strategy contract operators stake into.
    pub strategy: Address,
}

impl AvsContracts {
    /// Resolves the AVS contract set from a deployment-address table.
    /// Fails if any of the required names is absent or malformed.
    pub fn from_deployment(deployment: &DeploymentAddresses) -> Result<Self, DeploymentError> {
        Ok(Self {
            registry_coordinator: deployment.require("registryCoordinator")?,
            operator_state_retriever: deployment.require("operatorStateRetriever")?,
            service_manager: deployment.require("incredibleSquaringServiceManager")?,
            stake_registry: deployment.require("stakeRegistry")?,
            bls_apk_registry: deployment.require("blsapkRegistry")?,
            strategy: deployment.require("strategy")?,
        })
    }
}

/// Registration status of an operator in the registry coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorStatus {
    /// The operator has never registered with the coordinator.
    NeverRegistered,
    /// The operator is currently registered.
    Registered,
    /// The operator was registered and has since deregistered.
    Deregistered,
}

impl From<u8> for OperatorStatus {
    fn from(status: u8) -> Self {
        match status {
            1 => Self::Registered,
            2 => Self::Deregistered,
            _ => Self::NeverRegistered,
        }
    }
}

/// Read-only client for the AVS registry contracts.
#[derive(Debug, Clone)]
pub struct AvsRegistryReader {
    registry_coordinator: RegistryCoordinatorInstance<Http<Client>, RootProvider<Http<Client>>>,
}

impl AvsRegistryReader {
    /// Creates a new `AvsRegistryReader` bound to the given execution client
    /// URL and AVS contract set.
    pub fn new(execution_client_url: Url, contracts: AvsContracts) -> Self {
        let provider = ProviderBuilder::new().on_http(execution_client_url);
        let registry_coordinator =
            RegistryCoordinator::new(contracts.registry_coordinator, provider);

        Self { registry_coordinator }
    }

    /// The registration status of the given operator in the registry
    /// coordinator.
    pub async fn operator_status(&self, operator: Address) -> ContractResult<OperatorStatus> {
        self.registry_coordinator
            .getOperatorStatus(operator)
            .call()
            .await
            .map(|ret| OperatorStatus::from(ret._0))
    }
}

/// Write client for the AVS registry contracts, bound to the operator's
/// transaction-signing key.
#[derive(Debug, Clone)]
pub struct AvsRegistryWriter {
    endpoint: Url,
    contracts: AvsContracts,
    signer: PrivateKeySigner,
}

impl AvsRegistryWriter {
    /// Creates a new `AvsRegistryWriter` bound to the given execution client
    /// URL, AVS contract set, and transaction-signing key.
    pub fn new(endpoint: Url, contracts: AvsContracts, signer: PrivateKeySigner) -> Self {
        Self { endpoint, contracts, signer }
    }

    /// Enrolls the operator into the given quorums of the AVS registry and
    /// waits for the transaction to be included.
    ///
    /// Submits the BLS public key with a proof-of-possession signature, and
    /// an ECDSA registration signature bound to the given salt and expiry.
    pub async fn register_operator(
        &self,
        bls_keypair: &BlsKeypair,
        salt: B256,
        expiry: U256,
        quorum_numbers: &[u8],
        socket: &str,
    ) -> eyre::Result<TransactionReceipt> {
        let pubkey = Bytes::from(bls_keypair.public_key_bytes());

        // Proof of possession binding the BLS key to this operator and
        // coordinator.
        let pop_digest = {
            let mut hasher = Keccak256::new();
            hasher.update(self.signer.address());
            hasher.update(self.contracts.registry_coordinator);
            hasher.finalize()
        };
        let pop_signature = Bytes::from(bls_keypair.sign(pop_digest).to_bytes().to_vec());

        // Registration digest binding the operator, the AVS, the salt and
        // the expiry.
        let registration_digest = {
            let mut hasher = Keccak256::new();
            hasher.update(self.signer.address());
            hasher.update(self.contracts.service_manager);
            hasher.update(salt);
            hasher.update(expiry.to_be_bytes::<32>());
            hasher.finalize()
        };
        let signature = self.signer.sign_hash_sync(&registration_digest)?;

        let operator_signature = RegistryCoordinator::SignatureWithSaltAndExpiry {
            signature: Bytes::from(signature.as_bytes().to_vec()),
            salt,
            expiry,
        };

        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet)
            .on_http(self.endpoint.clone());

        let registry_coordinator =
            RegistryCoordinator::new(self.contracts.registry_coordinator, provider);

        let call = registry_coordinator.registerOperator(
            Bytes::from(quorum_numbers.to_vec()),
            socket.to_owned(),
            pubkey,
            pop_signature,
            operator_signature,
        );
        let pending = call.send().await?;

        Ok(pending.get_receipt().await?)
    }
}

sol! {
    #[sol(rpc)]
    interface RegistryCoordinator {
        struct SignatureWithSaltAndExpiry {
            bytes signature;
            bytes32 salt;
            uint256 expiry;
        }

        function registerOperator(
            bytes calldata quorumNumbers,
            string calldata socket,
            bytes calldata blsPubkey,
            bytes calldata blsPopSignature,
            SignatureWithSaltAndExpiry memory operatorSignature
        ) external;

        function getOperatorStatus(address operator) external view returns (uint8);
    }
}
