//! Decryption of the operator's keys from password-protected keystore files.

use std::path::Path;

use alloy::signers::local::PrivateKeySigner;
use blst::min_pk::SecretKey as BlsSecretKey;
use thiserror::Error;
use tracing::warn;

use crate::bls::BlsKeypair;

/// Environment variable holding the BLS keystore password.
pub const BLS_KEY_PASSWORD_ENV: &str = "OPERATOR_BLS_KEY_PASSWORD";

/// Environment variable holding the ECDSA keystore password.
pub const ECDSA_KEY_PASSWORD_ENV: &str = "OPERATOR_ECDSA_KEY_PASSWORD";

/// An error that can occur when decrypting a key from a keystore file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum KeystoreError {
    #[error("Failed to decrypt keystore: {0}")]
    Decrypt(#[from] eth_keystore::KeystoreError),
    #[error("Keystore did not contain a valid BLS secret key: {0:?}")]
    InvalidBlsKey(blst::BLST_ERROR),
    #[error("Keystore did not contain a valid ECDSA secret key: {0}")]
    InvalidEcdsaKey(#[from] alloy::signers::k256::ecdsa::Error),
}

/// Reads a keystore password from the given environment variable.
///
/// A missing variable is downgraded to an empty password with a warning;
/// decryption of a protected store will then fail downstream.
pub fn password_from_env(var: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| {
        warn!("{} not set, using an empty password", var);
        String::new()
    })
}

/// Decrypts the operator's BLS key pair from the keystore at the given path.
pub fn decrypt_bls_keypair(
    path: impl AsRef<Path>,
    password: &str,
) -> Result<BlsKeypair, KeystoreError> {
    let secret_bytes = eth_keystore::decrypt_key(path, password)?;
    let secret = BlsSecretKey::from_bytes(&secret_bytes).map_err(KeystoreError::InvalidBlsKey)?;

    Ok(BlsKeypair::new(secret))
}

/// Decrypts the operator's transaction-signing key from the keystore at the
/// given path.
pub fn decrypt_ecdsa_signer(
    path: impl AsRef<Path>,
    password: &str,
) -> Result<PrivateKeySigner, KeystoreError> {
    let secret_bytes = eth_keystore::decrypt_key(path, password)?;

    Ok(PrivateKeySigner::from_slice(&secret_bytes)?)
}
