#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod config;
pub use config::{ConfigError, OperatorConfig};

pub mod bls;
pub use bls::BlsKeypair;

mod keystore;
pub use keystore::{
    decrypt_bls_keypair, decrypt_ecdsa_signer, password_from_env, KeystoreError,
    BLS_KEY_PASSWORD_ENV, ECDSA_KEY_PASSWORD_ENV,
};

mod deployment;
pub use deployment::{
    DeploymentAddresses, DeploymentError, DEFAULT_AVS_ARTIFACT, DEFAULT_CORE_ARTIFACT,
    DEFAULT_LISTER_ARTIFACT,
};

mod clients;
pub use clients::{
    AvsContracts, AvsRegistryReader, AvsRegistryWriter, ClientConfig, CoreContracts, CoreReader,
    CoreWriter, OperatorProfile, OperatorStatus,
};

mod operator;
pub use operator::{Operator, RegistrationError};
