use std::{collections::HashMap, sync::RwLock};

use crate::{
    error::{Error, Result},
    key::{KeyAlgorithm, KeyPair, PrivateKey, PublicKey},
    signature::Signature,
};

/// The unit stored in the registry: a role label and the key material
/// registered under a key id
struct KeyEntry {
    role: String,
    key: KeyPair,
}

/// In-memory Ed25519 signing key store
///
/// Holds key pairs keyed by id, each bound to a logical role, and signs
/// arbitrary payloads on demand. Registry invariant: every stored id is
/// the SHA-256-derived id of its own public key, and no two entries share
/// an id.
///
/// Safe for concurrent use from multiple threads sharing one instance;
/// reads proceed concurrently, mutations take the registry lock
/// exclusively. The store is an explicitly constructed value with no
/// global state; callers hold and pass a reference (or `Arc`).
pub struct KeyStore {
    keys: RwLock<HashMap<String, KeyEntry>>,
}

impl KeyStore {
    /// Create a new empty key store
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Generate a new key pair bound to `role` and return the public key
    ///
    /// `algorithm` must be the fixed tag `"ed25519"`; any other value is
    /// rejected with [`Error::UnsupportedAlgorithm`]. Randomness failure
    /// surfaces as [`Error::KeyGeneration`] and leaves the registry
    /// unchanged; retrying is the caller's decision.
    pub fn create(&self, role: &str, algorithm: &str) -> Result<PublicKey> {
        if KeyAlgorithm::from_name(algorithm).is_none() {
            return Err(Error::UnsupportedAlgorithm(algorithm.to_string()));
        }

        let key = KeyPair::generate()?;
        let public = key.public_key();
        let key_id = self.add_key(role, key)?;
        tracing::debug!(key_id = %key_id, role = %role, "generated signing key");
        Ok(public)
    }

    /// Register externally constructed private key material under `role`
    ///
    /// The registry id is always recomputed from the key's own public half;
    /// a caller-supplied id is never trusted.
    pub fn import_key(&self, role: &str, private: &PrivateKey) -> Result<PublicKey> {
        let key = KeyPair::from_private_key(private)?;
        let public = key.public_key();
        let key_id = self.add_key(role, key)?;
        tracing::debug!(key_id = %key_id, role = %role, "imported signing key");
        Ok(public)
    }

    /// Insert an entry keyed by the id derived from its own public key
    fn add_key(&self, role: &str, key: KeyPair) -> Result<String> {
        let key_id = key.key_id();
        let mut keys = self.keys.write().map_err(|_| Error::write_lock())?;
        keys.insert(
            key_id.clone(),
            KeyEntry {
                role: role.to_string(),
                key,
            },
        );
        Ok(key_id)
    }

    /// Sign `message` with each of the requested keys
    ///
    /// Output order matches the order of `key_ids`. Fails with
    /// [`Error::KeyNotFound`] naming the offending id if any requested key
    /// is absent; no partial signature list is produced. Signing reads the
    /// registry and changes no key state.
    pub fn sign(&self, key_ids: &[&str], message: &[u8]) -> Result<Vec<Signature>> {
        let keys = self.keys.read().map_err(|_| Error::read_lock())?;

        let mut signatures = Vec::with_capacity(key_ids.len());
        for &key_id in key_ids {
            let entry = keys
                .get(key_id)
                .ok_or_else(|| Error::KeyNotFound(key_id.to_string()))?;
            signatures.push(Signature {
                key_id: key_id.to_string(),
                method: KeyAlgorithm::Ed25519,
                signature: entry.key.sign(message).to_vec(),
            });
        }
        Ok(signatures)
    }

    /// Derive and return the public key for `key_id`
    pub fn get_key(&self, key_id: &str) -> Result<PublicKey> {
        let keys = self.keys.read().map_err(|_| Error::read_lock())?;

        keys.get(key_id)
            .map(|entry| entry.key.public_key())
            .ok_or_else(|| Error::KeyNotFound(key_id.to_string()))
    }

    /// Return the stored private key material and its role
    ///
    /// Intended for controlled use by a trusted caller, e.g. key export.
    pub fn get_private_key(&self, key_id: &str) -> Result<(PrivateKey, String)> {
        let keys = self.keys.read().map_err(|_| Error::read_lock())?;

        keys.get(key_id)
            .map(|entry| (entry.key.private_key(), entry.role.clone()))
            .ok_or_else(|| Error::KeyNotFound(key_id.to_string()))
    }

    /// Best-effort batch lookup of public keys
    ///
    /// Ids absent from the registry are omitted from the result, not an
    /// error.
    pub fn public_keys(&self, key_ids: &[&str]) -> Result<HashMap<String, PublicKey>> {
        let keys = self.keys.read().map_err(|_| Error::read_lock())?;

        let mut found = HashMap::new();
        for &key_id in key_ids {
            if let Some(entry) = keys.get(key_id) {
                found.insert(key_id.to_string(), entry.key.public_key());
            }
        }
        Ok(found)
    }

    /// List the ids of all keys bound to `role`
    ///
    /// Order is unspecified.
    pub fn list_keys(&self, role: &str) -> Result<Vec<String>> {
        let keys = self.keys.read().map_err(|_| Error::read_lock())?;

        Ok(keys
            .iter()
            .filter(|(_, entry)| entry.role == role)
            .map(|(id, _)| id.clone())
            .collect())
    }

    /// Full inventory snapshot: key id to role
    pub fn list_all_keys(&self) -> Result<HashMap<String, String>> {
        let keys = self.keys.read().map_err(|_| Error::read_lock())?;

        Ok(keys
            .iter()
            .map(|(id, entry)| (id.clone(), entry.role.clone()))
            .collect())
    }

    /// Delete the entry for `key_id` if present
    ///
    /// Removing an absent id is a no-op, never an error.
    pub fn remove_key(&self, key_id: &str) -> Result<()> {
        let mut keys = self.keys.write().map_err(|_| Error::write_lock())?;

        if keys.remove(key_id).is_some() {
            tracing::debug!(key_id = %key_id, "removed signing key");
        }
        Ok(())
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}
