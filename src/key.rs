use std::fmt;

use ed25519_dalek::{Signer, SigningKey, SECRET_KEY_LENGTH};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Signature algorithms recognized by a key store
///
/// A store instance supports exactly one algorithm; `Ed25519` is the only
/// one implemented.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAlgorithm {
    Ed25519,
}

impl KeyAlgorithm {
    /// The fixed algorithm tag, as accepted by [`KeyStore::create`]
    ///
    /// [`KeyStore::create`]: crate::store::KeyStore::create
    pub fn name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Ed25519 => "ed25519",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ed25519" => Some(KeyAlgorithm::Ed25519),
            _ => None,
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Algorithm tag plus raw public key bytes
///
/// The public half of a stored key pair, derived on demand; never persisted
/// separately from its private entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PublicKey {
    pub algorithm: KeyAlgorithm,
    pub key: Vec<u8>,
}

impl PublicKey {
    /// Stable identifier for this key: lowercase hex of the SHA-256 digest
    /// of the raw public key bytes
    ///
    /// Recomputable by any consumer holding the public key, so signatures
    /// can be matched to the key that produced them without consulting the
    /// store.
    pub fn key_id(&self) -> String {
        hex::encode(Sha256::digest(&self.key))
    }

    /// Hex representation of the raw public key bytes
    pub fn key_hex(&self) -> String {
        hex::encode(&self.key)
    }
}

/// Algorithm tag plus raw private key bytes
///
/// Only exported through [`KeyStore::get_private_key`] for controlled use
/// by a trusted caller (key export/backup); importable back through
/// [`KeyStore::import_key`].
///
/// [`KeyStore::get_private_key`]: crate::store::KeyStore::get_private_key
/// [`KeyStore::import_key`]: crate::store::KeyStore::import_key
#[derive(Clone)]
pub struct PrivateKey {
    algorithm: KeyAlgorithm,
    key: Vec<u8>,
}

impl PrivateKey {
    pub fn new(algorithm: KeyAlgorithm, key: Vec<u8>) -> Self {
        Self { algorithm, key }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }
}

// Key material must never leak through logging or error formatting
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm)
            .field("key", &"[redacted]")
            .finish()
    }
}

/// Ed25519 key pair
///
/// Owns the signing key; the public half and the key id are derived on
/// demand.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new key pair with cryptographically secure randomness
    ///
    /// A failing randomness source surfaces as [`Error::KeyGeneration`];
    /// it is never retried here.
    pub fn generate() -> Result<Self> {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        getrandom::fill(&mut seed).map_err(|e| Error::KeyGeneration(e.to_string()))?;
        Ok(Self::from_seed(&seed))
    }

    /// Create a key pair from a 32-byte seed
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Rebuild a key pair from exported private key material
    pub fn from_private_key(private: &PrivateKey) -> Result<Self> {
        let seed: [u8; SECRET_KEY_LENGTH] = private.as_bytes().try_into().map_err(|_| {
            Error::InvalidKeyMaterial(format!(
                "expected {} byte {} seed, got {} bytes",
                SECRET_KEY_LENGTH,
                private.algorithm(),
                private.as_bytes().len()
            ))
        })?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            algorithm: KeyAlgorithm::Ed25519,
            key: self.signing_key.verifying_key().to_bytes().to_vec(),
        }
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey::new(KeyAlgorithm::Ed25519, self.signing_key.to_bytes().to_vec())
    }

    /// Identifier derived from the public half; see [`PublicKey::key_id`]
    pub fn key_id(&self) -> String {
        self.public_key().key_id()
    }

    /// Sign a message, returning the 64-byte signature
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    use super::*;

    #[test]
    fn test_generate_sign_verify() {
        let key = KeyPair::generate().unwrap();
        let message = b"test message";
        let signature = key.sign(message);

        let public = key.public_key();
        let verifying_key =
            VerifyingKey::from_bytes(public.key.as_slice().try_into().unwrap()).unwrap();
        assert!(verifying_key
            .verify(message, &Signature::from_bytes(&signature))
            .is_ok());

        // Wrong message should fail
        assert!(verifying_key
            .verify(b"wrong message", &Signature::from_bytes(&signature))
            .is_err());
    }

    #[test]
    fn test_key_from_seed() {
        let seed = [42u8; 32];
        let key1 = KeyPair::from_seed(&seed);
        let key2 = KeyPair::from_seed(&seed);

        // Same seed should produce same keys
        assert_eq!(key1.public_key(), key2.public_key());
        assert_eq!(key1.key_id(), key2.key_id());
    }

    #[test]
    fn test_key_id_is_sha256_of_public_key() {
        let key = KeyPair::generate().unwrap();
        let public = key.public_key();

        let id = public.key_id();
        assert_eq!(id.len(), 64);
        assert_eq!(id, hex::encode(Sha256::digest(&public.key)));
        assert_eq!(public.key_hex(), hex::encode(&public.key));
    }

    #[test]
    fn test_private_key_round_trip() {
        let key = KeyPair::generate().unwrap();
        let rebuilt = KeyPair::from_private_key(&key.private_key()).unwrap();
        assert_eq!(key.key_id(), rebuilt.key_id());
    }

    #[test]
    fn test_private_key_wrong_length_rejected() {
        let private = PrivateKey::new(KeyAlgorithm::Ed25519, vec![7u8; 16]);
        assert!(matches!(
            KeyPair::from_private_key(&private),
            Err(Error::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn test_private_key_debug_redacted() {
        let key = KeyPair::generate().unwrap();
        let formatted = format!("{:?}", key.private_key());
        assert!(formatted.contains("[redacted]"));
        assert!(!formatted.contains(&hex::encode(key.private_key().as_bytes())));
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(KeyAlgorithm::Ed25519.name(), "ed25519");
        assert_eq!(
            KeyAlgorithm::from_name("ed25519"),
            Some(KeyAlgorithm::Ed25519)
        );
        assert_eq!(KeyAlgorithm::from_name("ecdsa"), None);
    }
}
