use std::{
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use alloy::primitives::{B256, U256};
use rand::{thread_rng, RngCore};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    clients::{
        AvsContracts, AvsRegistryReader, AvsRegistryWriter, ClientConfig, CoreContracts,
        CoreReader, CoreWriter, OperatorProfile,
    },
    config::OperatorConfig,
    deployment::DeploymentAddresses,
    keystore::{self, BLS_KEY_PASSWORD_ENV, ECDSA_KEY_PASSWORD_ENV},
    BlsKeypair,
};

/// Name of the AVS the operator enrolls into.
const AVS_NAME: &str = "incredible-squaring";

/// How long an AVS registration signature stays valid.
const REGISTRATION_SIG_TTL_SECS: u64 = 3600;

/// The single quorum the operator enrolls into.
const QUORUM_NUMBERS: &[u8] = &[0];

/// Socket advertised to the registry coordinator. Unused by this AVS.
const OPERATOR_SOCKET: &str = "Not Needed";

/// An error from the two-phase on-chain registration.
///
/// The two phases are not atomic and there is no compensating transaction:
/// a phase-2 failure leaves the operator registered with the protocol but
/// not enrolled in the AVS.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Phase 1 failed. The operator was not registered with the protocol.
    #[error("Protocol operator registration failed: {0}")]
    Protocol(eyre::Report),
    /// Phase 2 failed after phase 1 succeeded. The operator is registered
    /// with the protocol but not enrolled in the AVS.
    #[error("AVS enrollment failed, operator is protocol-registered but not enrolled: {0}")]
    Enrollment(eyre::Report),
}

/// An operator instance holding the decrypted keys and the four contract
/// clients. Construction is strictly linear: keys are loaded first, then
/// both deployment tables are fully resolved, then the clients are built.
#[derive(Debug)]
pub struct Operator {
    config: OperatorConfig,
    bls_keypair: BlsKeypair,
    core_reader: CoreReader,
    core_writer: CoreWriter,
    avs_reader: AvsRegistryReader,
    avs_writer: AvsRegistryWriter,
}

impl Operator {
    /// Loads both keys and builds the four contract clients from the given
    /// deployment artifacts.
    ///
    /// Keystore passwords are read from [`BLS_KEY_PASSWORD_ENV`] and
    /// [`ECDSA_KEY_PASSWORD_ENV`]; a missing variable falls back to an empty
    /// password with a warning. A failed decryption or an unresolved
    /// contract address aborts construction.
    pub fn new(
        config: OperatorConfig,
        core_deployment_path: impl AsRef<Path>,
        avs_deployment_path: impl AsRef<Path>,
    ) -> eyre::Result<Self> {
        let bls_keypair = keystore::decrypt_bls_keypair(
            &config.bls_private_key_store_path,
            &keystore::password_from_env(BLS_KEY_PASSWORD_ENV),
        )?;

        let signer = keystore::decrypt_ecdsa_signer(
            &config.ecdsa_private_key_store_path,
            &keystore::password_from_env(ECDSA_KEY_PASSWORD_ENV),
        )?;

        if signer.address() != config.operator_address {
            warn!(
                configured = %config.operator_address,
                derived = %signer.address(),
                "Configured operator address does not match the decrypted transaction key"
            );
        }

        let core_deployment = DeploymentAddresses::read_from_file(core_deployment_path)?;
        let avs_deployment = DeploymentAddresses::read_from_file(avs_deployment_path)?;

        let core_contracts = CoreContracts::from_deployment(&core_deployment)?;
        let avs_contracts = AvsContracts::from_deployment(&avs_deployment)?;

        let client_config = ClientConfig {
            eth_rpc_url: config.eth_rpc_url.clone(),
            avs_name: AVS_NAME.to_owned(),
            metrics_addr: config.eigen_metrics_ip_port_address.clone(),
        };

        let core_reader = client_config.build_core_reader(core_contracts);
        let core_writer = client_config.build_core_writer(core_contracts, signer.clone());
        let avs_reader = client_config.build_avs_reader(avs_contracts);
        let avs_writer = client_config.build_avs_writer(avs_contracts, signer);

        info!(
            operator = %config.operator_address,
            avs = %client_config.avs_name,
            metrics = %client_config.metrics_addr,
            "Operator clients built"
        );

        Ok(Self { config, bls_keypair, core_reader, core_writer, avs_reader, avs_writer })
    }

    /// Whether the config enables registration on startup. Only the exact
    /// string `"true"` does.
    pub fn registration_enabled(&self) -> bool {
        self.config.registration_enabled()
    }

    /// Runs the two-phase on-chain registration, waiting for inclusion of
    /// each transaction in turn:
    ///
    /// 1. register as a protocol operator with the delegation manager,
    /// 2. enroll the BLS key and stake into the AVS registry coordinator.
    ///
    /// Current on-chain status is logged beforehand but never short-circuits
    /// the flow; there is no retry and no rollback.
    pub async fn register(&self) -> Result<(), RegistrationError> {
        let operator = self.config.operator_address;

        match self.core_reader.is_operator(operator).await {
            Ok(true) => info!(%operator, "Operator is already known to the delegation manager"),
            Ok(false) => {}
            Err(err) => warn!(?err, "Failed to query operator status before registration"),
        }

        let profile = OperatorProfile::self_delegating(operator);
        let receipt = self
            .core_writer
            .register_as_operator(profile)
            .await
            .map_err(RegistrationError::Protocol)?;
        info!(tx = %receipt.transaction_hash, "Registered as protocol operator");

        let receipt = self
            .avs_writer
            .register_operator(
                &self.bls_keypair,
                registration_salt(),
                registration_expiry(),
                QUORUM_NUMBERS,
                OPERATOR_SOCKET,
            )
            .await
            .map_err(RegistrationError::Enrollment)?;
        info!(tx = %receipt.transaction_hash, "Enrolled operator in the AVS registry");

        match self.avs_reader.operator_status(operator).await {
            Ok(status) => info!(?status, "AVS registry status after enrollment"),
            Err(err) => warn!(?err, "Failed to query AVS registry status after enrollment"),
        }

        Ok(())
    }
}

/// A fresh 32-byte registration salt from the OS-seeded RNG.
fn registration_salt() -> B256 {
    let mut salt = [0u8; 32];
    thread_rng().fill_bytes(&mut salt);

    B256::from(salt)
}

/// Registration signature expiry, one hour from now. A clock before the
/// epoch degrades to the epoch instead of panicking.
fn registration_expiry() -> U256 {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();

    U256::from(now.as_secs() + REGISTRATION_SIG_TTL_SECS)
}
