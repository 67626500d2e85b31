//! Static field-encryption key material.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// How configured key text maps to key bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    /// The UTF-8 bytes of the string are the key (how the console's keys
    /// have always been configured).
    #[default]
    Utf8,
    Base64,
    Hex,
}

impl std::str::FromStr for KeyEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" | "raw" => Ok(KeyEncoding::Utf8),
            "base64" => Ok(KeyEncoding::Base64),
            "hex" => Ok(KeyEncoding::Hex),
            other => Err(format!("unknown key encoding: {other}")),
        }
    }
}

/// Opaque key bytes, immutable once loaded and wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: Vec<u8>,
}

impl EncryptionKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            return Err(CryptoError::InvalidKeyEncoding("key is empty".into()));
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Parse configured key text.
    pub fn parse(text: &str, encoding: KeyEncoding) -> Result<Self, CryptoError> {
        match encoding {
            KeyEncoding::Utf8 => Self::from_bytes(text.as_bytes()),
            KeyEncoding::Base64 => {
                let mut bytes = crate::base64::decode_lenient(text)
                    .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
                let key = Self::from_bytes(&bytes);
                bytes.zeroize();
                key
            }
            KeyEncoding::Hex => {
                let mut bytes = hex::decode(text.trim())
                    .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
                let key = Self::from_bytes(&bytes);
                bytes.zeroize();
                key
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_key_uses_raw_bytes() {
        let key = EncryptionKey::parse("sixteen byte key", KeyEncoding::Utf8).unwrap();
        assert_eq!(key.as_bytes(), b"sixteen byte key");
        assert_eq!(key.len(), 16);
    }

    #[test]
    fn hex_and_base64_keys() {
        let hex_key = EncryptionKey::parse("000102030405060708090a0b0c0d0e0f", KeyEncoding::Hex)
            .unwrap();
        assert_eq!(hex_key.as_bytes(), &(0u8..16).collect::<Vec<_>>()[..]);

        let b64_key =
            EncryptionKey::parse("AAECAwQFBgcICQoLDA0ODw==", KeyEncoding::Base64).unwrap();
        assert_eq!(b64_key.as_bytes(), hex_key.as_bytes());
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert!(EncryptionKey::parse("", KeyEncoding::Utf8).is_err());
        assert!(EncryptionKey::parse("zz", KeyEncoding::Hex).is_err());
        assert!(EncryptionKey::parse("***", KeyEncoding::Base64).is_err());
    }

    #[test]
    fn debug_does_not_leak_bytes() {
        let key = EncryptionKey::parse("super-secret-key", KeyEncoding::Utf8).unwrap();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("16"));
    }

    #[test]
    fn encoding_parses() {
        assert_eq!("HEX".parse::<KeyEncoding>().unwrap(), KeyEncoding::Hex);
        assert_eq!("utf-8".parse::<KeyEncoding>().unwrap(), KeyEncoding::Utf8);
        assert!("pem".parse::<KeyEncoding>().is_err());
    }
}
