//! Signet Keys
//!
//! This library provides an in-memory signing key store for trust metadata
//! signing: it generates and holds Ed25519 key pairs, associates each key
//! with a logical role, and produces signatures over arbitrary byte
//! payloads on demand.
//!
//! Persistence, trust policy, and metadata serialization are the concern
//! of the layers that own a [`KeyStore`]; this crate only covers the key
//! registry and its signing, generation, and lookup operations.

pub mod error;
pub mod key;
pub mod signature;
pub mod store;

// Re-export core functionality
pub use error::{Error, Result};
pub use key::{KeyAlgorithm, KeyPair, PrivateKey, PublicKey};
pub use signature::Signature;
pub use store::KeyStore;
