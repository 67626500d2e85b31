//! AES-256-GCM encryption for sealed field values.
//!
//! Wire format v1:
//! [1 byte: version=1][12 bytes: IV][N bytes: ciphertext + tag]

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::CryptoError;
use crate::types::{
    AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, CURRENT_VERSION, SUPPORTED_VERSIONS,
};

/// Generate a random 12-byte IV for AES-GCM.
pub fn generate_iv() -> Result<[u8; AES_GCM_IV_LENGTH], CryptoError> {
    let mut iv = [0u8; AES_GCM_IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(iv)
}

/// AES-256-GCM cipher bound to one field key.
///
/// Writes v1 wire format: [version=1][IV:12][ciphertext+tag]
pub struct SealedCipher {
    cipher: Aes256Gcm,
}

impl SealedCipher {
    /// Create a new cipher from a 32-byte key.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != AES_KEY_LENGTH {
            return Err(CryptoError::InvalidKeyLength {
                expected: &[AES_KEY_LENGTH],
                got: key.len(),
            });
        }
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
        Ok(Self { cipher })
    }

    /// Encrypt data with a fresh random IV.
    pub fn seal(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let iv = generate_iv()?;
        let nonce = Nonce::from_slice(&iv);

        let ciphertext = self
            .cipher
            .encrypt(nonce, data)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

        let mut result = Vec::with_capacity(1 + iv.len() + ciphertext.len());
        result.push(CURRENT_VERSION);
        result.extend_from_slice(&iv);
        result.extend_from_slice(&ciphertext);
        Ok(result)
    }

    /// Decrypt a v1 blob.
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let min_length = 1 + AES_GCM_IV_LENGTH + AES_GCM_TAG_LENGTH;
        if sealed.len() < min_length {
            return Err(CryptoError::DataTooShort);
        }

        let version = sealed[0];
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(CryptoError::UnsupportedVersion(version));
        }

        let iv = &sealed[1..1 + AES_GCM_IV_LENGTH];
        let ciphertext = &sealed[1 + AES_GCM_IV_LENGTH..];
        let nonce = Nonce::from_slice(iv);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
    }
}

impl std::fmt::Debug for SealedCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SealedCipher")
    }
}
