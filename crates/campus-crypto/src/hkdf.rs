//! HKDF-SHA256 key derivation.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::CryptoError;
use crate::types::{AES_KEY_LENGTH, FIELD_KEY_SALT};

/// Derive a 256-bit key using HKDF-SHA256.
///
/// # Arguments
/// * `ikm` - Input keying material
/// * `salt` - Salt for domain separation
/// * `info` - Context and application-specific info
pub fn hkdf_derive(
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
) -> Result<[u8; AES_KEY_LENGTH], CryptoError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = [0u8; AES_KEY_LENGTH];
    hk.expand(info, &mut okm)
        .map_err(|e| CryptoError::KeyDerivationFailed(format!("HKDF expand failed: {}", e)))?;
    Ok(okm)
}

/// Derive the sealed-scheme field key for a content domain.
pub fn derive_field_key(
    key_material: &[u8],
    domain: &str,
) -> Result<[u8; AES_KEY_LENGTH], CryptoError> {
    hkdf_derive(key_material, FIELD_KEY_SALT, domain.as_bytes())
}
