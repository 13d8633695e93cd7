use std::path::{Path, PathBuf};

use rand::{distributions::Alphanumeric, Rng};

/// Creates a fresh scratch directory under the system temp dir.
pub fn scratch_dir() -> PathBuf {
    let suffix: String =
        rand::thread_rng().sample_iter(&Alphanumeric).take(12).map(char::from).collect();
    let dir = std::env::temp_dir().join(format!("squaring-operator-test-{suffix}"));
    std::fs::create_dir_all(&dir).expect("Failed to create scratch dir");

    dir
}

/// Writes the given contents to a file in the given directory.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write file");

    path
}

/// Encrypts the given secret into a keystore file in the given directory,
/// returning the keystore path.
pub fn encrypt_keystore(dir: &Path, secret: &[u8], password: &str) -> PathBuf {
    let name = eth_keystore::encrypt_key(dir, &mut rand::thread_rng(), secret, password, None)
        .expect("Failed to encrypt keystore");

    dir.join(name)
}

/// A deployment artifact JSON with the full core-protocol contract set.
pub fn core_deployment_json() -> String {
    r#"{
        "addresses": {
            "allocationManager": "0x0000000000000000000000000000000000000001",
            "avsDirectory": "0x0000000000000000000000000000000000000002",
            "delegation": "0x0000000000000000000000000000000000000003",
            "permissionController": "0x0000000000000000000000000000000000000004",
            "rewardsCoordinator": "0x0000000000000000000000000000000000000005",
            "strategyManager": "0x0000000000000000000000000000000000000006"
        }
    }"#
    .to_owned()
}

/// A deployment artifact JSON with the full AVS registry contract set.
pub fn avs_deployment_json() -> String {
    r#"{
        "addresses": {
            "registryCoordinator": "0x0000000000000000000000000000000000000011",
            "operatorStateRetriever": "0x0000000000000000000000000000000000000012",
            "incredibleSquaringServiceManager": "0x0000000000000000000000000000000000000013",
            "stakeRegistry": "0x0000000000000000000000000000000000000014",
            "blsapkRegistry": "0x0000000000000000000000000000000000000015",
            "strategy": "0x0000000000000000000000000000000000000016"
        }
    }"#
    .to_owned()
}

/// An operator config YAML pointing at the given keystore paths.
pub fn operator_config_yaml(
    bls_keystore: &Path,
    ecdsa_keystore: &Path,
    register_on_startup: &str,
) -> String {
    format!(
        r#"operator_address: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
eth_rpc_url: "http://localhost:8545"
bls_private_key_store_path: "{}"
ecdsa_private_key_store_path: "{}"
register_operator_on_startup: "{}"
eigen_metrics_ip_port_address: "localhost:9090"
"#,
        bls_keystore.display(),
        ecdsa_keystore.display(),
        register_on_startup,
    )
}
