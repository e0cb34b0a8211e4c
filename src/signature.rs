use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    key::KeyAlgorithm,
};

/// A signature produced by one stored key over a message
///
/// Produced fresh per signing call and not retained by the store. `key_id`
/// names the key that signed, so consumers can match the signature to its
/// public key without consulting the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    pub key_id: String,
    pub method: KeyAlgorithm,
    pub signature: Vec<u8>,
}

impl Signature {
    /// Hex representation of the signature bytes
    pub fn signature_hex(&self) -> String {
        hex::encode(&self.signature)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Encoding(e.to_string()))
    }

    /// Deserialize from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Encoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let sig = Signature {
            key_id: "ab".repeat(32),
            method: KeyAlgorithm::Ed25519,
            signature: vec![1, 2, 3, 4],
        };

        let json = sig.to_json().unwrap();
        assert!(json.contains("\"ed25519\""));

        let parsed = Signature::from_json(&json).unwrap();
        assert_eq!(parsed.key_id, sig.key_id);
        assert_eq!(parsed.method, sig.method);
        assert_eq!(parsed.signature, sig.signature);
    }

    #[test]
    fn test_signature_hex() {
        let sig = Signature {
            key_id: "id".to_string(),
            method: KeyAlgorithm::Ed25519,
            signature: vec![0xde, 0xad, 0xbe, 0xef],
        };
        assert_eq!(sig.signature_hex(), "deadbeef");
    }
}
