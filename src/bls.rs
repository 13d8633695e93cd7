//! BLS signing primitives for the operator's attestation key.

use std::fmt;

use blst::{
    min_pk::{PublicKey as BlsPublicKey, SecretKey as BlsSecretKey, Signature as BlsSignature},
    BLST_ERROR,
};
use rand::{thread_rng, RngCore};

/// The BLS Domain Separator used in Ethereum 2.0.
pub const BLS_DST_PREFIX: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Sign the given data with the given BLS secret key.
/// Returns the BLS signature.
#[inline]
pub fn sign_with_prefix(key: &BlsSecretKey, data: impl AsRef<[u8]>) -> BlsSignature {
    key.sign(data.as_ref(), BLS_DST_PREFIX, &[])
}

/// Verify the given BLS signature against the given message digest and the public key.
/// Returns `true` if the signature is valid, `false` otherwise.
#[inline]
pub fn verify_signature(
    signature: &BlsSignature,
    pubkey: &BlsPublicKey,
    digest: impl AsRef<[u8]>,
) -> bool {
    signature.verify(false, digest.as_ref(), BLS_DST_PREFIX, &[], pubkey, true) ==
        BLST_ERROR::BLST_SUCCESS
}

/// Generate a random BLS secret key.
pub fn random_bls_secret() -> BlsSecretKey {
    let mut rng = thread_rng();
    let mut ikm = [0u8; 32];
    rng.fill_bytes(&mut ikm);
    BlsSecretKey::key_gen(&ikm, &[]).unwrap()
}

/// The BLS key pair the operator uses to sign attestations for the AVS
/// quorum. Held in memory only, never persisted or transmitted in plaintext.
#[derive(Clone)]
pub struct BlsKeypair {
    secret: BlsSecretKey,
    public: BlsPublicKey,
}

impl BlsKeypair {
    /// Creates a key pair from an existing secret key.
    pub fn new(secret: BlsSecretKey) -> Self {
        let public = secret.sk_to_pk();
        Self { secret, public }
    }

    /// The public key.
    pub fn public_key(&self) -> &BlsPublicKey {
        &self.public
    }

    /// The public key in compressed form, as submitted on-chain.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.public.to_bytes().to_vec()
    }

    /// Signs the given digest with the secret key.
    pub fn sign(&self, digest: impl AsRef<[u8]>) -> BlsSignature {
        sign_with_prefix(&self.secret, digest)
    }
}

impl fmt::Debug for BlsKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlsKeypair")
            .field("public", &alloy::hex::encode_prefixed(self.public.to_bytes()))
            .finish_non_exhaustive()
    }
}
