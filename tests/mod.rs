use std::path::PathBuf;

use alloy::primitives::Address;

mod utils;
use utils::{
    avs_deployment_json, core_deployment_json, encrypt_keystore, operator_config_yaml, scratch_dir,
    write_file,
};

use squaring_operator::{
    bls::random_bls_secret, decrypt_bls_keypair, decrypt_ecdsa_signer, password_from_env,
    AvsContracts, CoreContracts, DeploymentAddresses, DeploymentError, KeystoreError, Operator,
    OperatorConfig, DEFAULT_AVS_ARTIFACT, DEFAULT_CORE_ARTIFACT, DEFAULT_LISTER_ARTIFACT,
};

/// The first pre-funded anvil dev account.
const ANVIL_SECRET_HEX: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const ANVIL_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

fn load_config(yaml: &str) -> Result<OperatorConfig, squaring_operator::ConfigError> {
    let dir = scratch_dir();
    let path = write_file(&dir, "operator.yaml", yaml);

    OperatorConfig::load(path)
}

#[test]
fn test_config_parses_typed_fields() -> eyre::Result<()> {
    let yaml = operator_config_yaml(
        &PathBuf::from("/keys/bls.json"),
        &PathBuf::from("/keys/ecdsa.json"),
        "true",
    );
    let config = load_config(&yaml)?;

    assert_eq!(config.operator_address, ANVIL_ADDRESS.parse::<Address>()?);
    assert_eq!(config.eth_rpc_url.as_str(), "http://localhost:8545/");
    assert_eq!(config.bls_private_key_store_path, PathBuf::from("/keys/bls.json"));
    assert_eq!(config.ecdsa_private_key_store_path, PathBuf::from("/keys/ecdsa.json"));
    assert_eq!(config.eigen_metrics_ip_port_address, "localhost:9090");
    assert!(config.registration_enabled());

    Ok(())
}

#[test]
fn test_config_accepts_bare_true_scalar() -> eyre::Result<()> {
    // An unquoted YAML `true` must behave like the string "true".
    let yaml = format!(
        r#"operator_address: "{ANVIL_ADDRESS}"
eth_rpc_url: "http://localhost:8545"
bls_private_key_store_path: "/keys/bls.json"
ecdsa_private_key_store_path: "/keys/ecdsa.json"
register_operator_on_startup: true
eigen_metrics_ip_port_address: "localhost:9090"
"#
    );
    let config = load_config(&yaml)?;

    assert_eq!(config.register_operator_on_startup, "true");
    assert!(config.registration_enabled());

    Ok(())
}

#[test]
fn test_registration_gate_requires_exact_true() -> eyre::Result<()> {
    for (value, enabled) in
        [("true", true), ("True", false), ("TRUE", false), ("1", false), ("false", false)]
    {
        let yaml = operator_config_yaml(
            &PathBuf::from("/keys/bls.json"),
            &PathBuf::from("/keys/ecdsa.json"),
            value,
        );
        let config = load_config(&yaml)?;

        assert_eq!(config.registration_enabled(), enabled, "flag value: {value:?}");
    }

    Ok(())
}

#[test]
fn test_config_missing_field_fails() {
    let yaml = r#"operator_address: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
bls_private_key_store_path: "/keys/bls.json"
ecdsa_private_key_store_path: "/keys/ecdsa.json"
register_operator_on_startup: "false"
eigen_metrics_ip_port_address: "localhost:9090"
"#;

    assert!(load_config(yaml).is_err());
}

#[test]
fn test_config_malformed_address_fails() {
    let yaml = operator_config_yaml(
        &PathBuf::from("/keys/bls.json"),
        &PathBuf::from("/keys/ecdsa.json"),
        "false",
    )
    .replace(ANVIL_ADDRESS, "not-an-address");

    assert!(load_config(&yaml).is_err());
}

#[test]
fn test_deployment_entries_in_document_order() -> eyre::Result<()> {
    let deployment = DeploymentAddresses::from_json(
        r#"{"addresses":{"a":"0x0000000000000000000000000000000000000001","b":"0x0000000000000000000000000000000000000002"}}"#,
    )?;

    assert_eq!(deployment.len(), 2);
    assert!(!deployment.is_empty());

    let lines: Vec<String> =
        deployment.entries().map(|(name, address)| format!("{name}: {address}")).collect();

    assert_eq!(
        lines,
        vec![
            "a: 0x0000000000000000000000000000000000000001",
            "b: 0x0000000000000000000000000000000000000002",
        ]
    );

    Ok(())
}

#[test]
fn test_deployment_checksums_addresses() -> eyre::Result<()> {
    // Lowercase in the artifact, checksummed after resolution.
    let deployment = DeploymentAddresses::from_json(
        r#"{"addresses":{"delegation":"0x5fbdb2315678afecb367f032d93f642f64180aa3"}}"#,
    )?;

    let address = deployment.require("delegation")?;
    assert_eq!(address.to_string(), "0x5FbDB2315678afecb367f032d93F642f64180aa3");

    Ok(())
}

#[test]
fn test_deployment_missing_contract_fails() -> eyre::Result<()> {
    let deployment = DeploymentAddresses::from_json(&core_deployment_json())?;

    let err = deployment.require("registryCoordinator").unwrap_err();
    assert!(matches!(err, DeploymentError::MissingContract(name) if name == "registryCoordinator"));

    Ok(())
}

#[test]
fn test_deployment_malformed_address_fails() -> eyre::Result<()> {
    let deployment = DeploymentAddresses::from_json(r#"{"addresses":{"delegation":"0x123"}}"#)?;

    let err = deployment.require("delegation").unwrap_err();
    assert!(matches!(err, DeploymentError::MalformedAddress { name, .. } if name == "delegation"));

    Ok(())
}

#[test]
fn test_contract_sets_resolve_from_artifacts() -> eyre::Result<()> {
    let core = DeploymentAddresses::from_json(&core_deployment_json())?;
    let core_contracts = CoreContracts::from_deployment(&core)?;
    assert_eq!(
        core_contracts.delegation_manager,
        "0x0000000000000000000000000000000000000003".parse::<Address>()?
    );

    // The AVS artifact keys follow the deployment script's spellings,
    // including `blsapkRegistry` and `incredibleSquaringServiceManager`.
    let avs = DeploymentAddresses::from_json(&avs_deployment_json())?;
    let avs_contracts = AvsContracts::from_deployment(&avs)?;
    assert_eq!(
        avs_contracts.service_manager,
        "0x0000000000000000000000000000000000000013".parse::<Address>()?
    );
    assert_eq!(
        avs_contracts.bls_apk_registry,
        "0x0000000000000000000000000000000000000015".parse::<Address>()?
    );

    Ok(())
}

#[test]
fn test_default_artifact_paths() {
    assert_eq!(DEFAULT_CORE_ARTIFACT, "contracts/script/deployments/core/31337.json");
    assert_eq!(DEFAULT_AVS_ARTIFACT, "contracts/script/deployments/incredible-squaring/31337.json");
    assert_eq!(
        DEFAULT_LISTER_ARTIFACT,
        "eigenlayer-contracts/script/output/devnet/SLASHING_deploy_from_scratch_deployment_data.json"
    );
}

#[test]
fn test_ecdsa_keystore_round_trip() -> eyre::Result<()> {
    let dir = scratch_dir();
    let secret = hex::decode(ANVIL_SECRET_HEX)?;
    let path = encrypt_keystore(&dir, &secret, "hunter2");

    let signer = decrypt_ecdsa_signer(&path, "hunter2")?;
    assert_eq!(signer.address(), ANVIL_ADDRESS.parse::<Address>()?);

    Ok(())
}

#[test]
fn test_bls_keystore_round_trip() -> eyre::Result<()> {
    let dir = scratch_dir();
    let secret = random_bls_secret();
    let expected_pubkey = secret.sk_to_pk().to_bytes().to_vec();
    let path = encrypt_keystore(&dir, &secret.to_bytes(), "hunter2");

    let keypair = decrypt_bls_keypair(&path, "hunter2")?;
    assert_eq!(keypair.public_key_bytes(), expected_pubkey);

    Ok(())
}

#[test]
fn test_keystore_wrong_password_fails() -> eyre::Result<()> {
    let dir = scratch_dir();
    let secret = hex::decode(ANVIL_SECRET_HEX)?;
    let path = encrypt_keystore(&dir, &secret, "hunter2");

    let err = decrypt_ecdsa_signer(&path, "wrong").unwrap_err();
    assert!(matches!(err, KeystoreError::Decrypt(_)));

    Ok(())
}

#[test]
fn test_keystore_empty_password_fallback_fails() -> eyre::Result<()> {
    // The warn-and-default empty password must not decrypt a protected store.
    let dir = scratch_dir();
    let secret = random_bls_secret();
    let path = encrypt_keystore(&dir, &secret.to_bytes(), "hunter2");

    assert!(decrypt_bls_keypair(&path, "").is_err());

    Ok(())
}

#[test]
fn test_password_from_env() {
    std::env::set_var("SQUARING_OPERATOR_TEST_PASSWORD", "hunter2");
    assert_eq!(password_from_env("SQUARING_OPERATOR_TEST_PASSWORD"), "hunter2");

    std::env::remove_var("SQUARING_OPERATOR_TEST_PASSWORD");
    assert_eq!(password_from_env("SQUARING_OPERATOR_TEST_PASSWORD"), "");
}

#[test]
fn test_operator_construction() -> eyre::Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    let dir = scratch_dir();
    let bls_secret = random_bls_secret();
    let bls_keystore = encrypt_keystore(&dir, &bls_secret.to_bytes(), "bls-pass");
    let ecdsa_keystore = encrypt_keystore(&dir, &hex::decode(ANVIL_SECRET_HEX)?, "ecdsa-pass");

    let config_path = write_file(
        &dir,
        "operator.yaml",
        &operator_config_yaml(&bls_keystore, &ecdsa_keystore, "false"),
    );
    let core_deployment = write_file(&dir, "core.json", &core_deployment_json());
    let avs_deployment = write_file(&dir, "avs.json", &avs_deployment_json());

    // Without passwords the empty-string fallback fails decryption and no
    // client is built.
    std::env::remove_var("OPERATOR_BLS_KEY_PASSWORD");
    std::env::remove_var("OPERATOR_ECDSA_KEY_PASSWORD");
    let config = OperatorConfig::load(&config_path)?;
    assert!(Operator::new(config, &core_deployment, &avs_deployment).is_err());

    // With the right passwords construction goes through key loading and
    // client building; registration stays disabled by the config.
    std::env::set_var("OPERATOR_BLS_KEY_PASSWORD", "bls-pass");
    std::env::set_var("OPERATOR_ECDSA_KEY_PASSWORD", "ecdsa-pass");
    let config = OperatorConfig::load(&config_path)?;
    let operator = Operator::new(config, &core_deployment, &avs_deployment)?;
    assert!(!operator.registration_enabled());

    std::env::remove_var("OPERATOR_BLS_KEY_PASSWORD");
    std::env::remove_var("OPERATOR_ECDSA_KEY_PASSWORD");

    Ok(())
}
