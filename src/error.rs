use thiserror::Error;

/// Error type for key store operations
#[derive(Error, Debug)]
pub enum Error {
    /// `create` was called with an algorithm this store does not implement
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The secure randomness source or key-derivation primitive failed
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// A lookup or signing request referenced a key id absent from the registry
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Imported key material does not match the store's algorithm
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Serialization of an exported value failed
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Registry lock error
    #[error("lock error: {0}")]
    Lock(String),
}

impl Error {
    pub(crate) fn read_lock() -> Self {
        Error::Lock("failed to acquire read lock".to_string())
    }

    pub(crate) fn write_lock() -> Self {
        Error::Lock("failed to acquire write lock".to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
