use serde::{Deserialize, Serialize};

/// Wire format version for sealed field values.
///
/// Version 1: AES-256-GCM with an HKDF-derived per-domain key
/// Format: [version=1:1B][IV:12B][ciphertext+tag]
pub const CURRENT_VERSION: u8 = 1;

/// Supported sealed wire format versions (for decryption).
pub const SUPPORTED_VERSIONS: &[u8] = &[1];

/// Text prefix marking a sealed field value. Base64 never produces `.`,
/// so the prefix cannot collide with a legacy ciphertext.
pub const SEALED_PREFIX: &str = "v1.";

/// AES-GCM IV length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_IV_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// AES-256 key length in bytes.
pub const AES_KEY_LENGTH: usize = 32;

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// Raw key lengths accepted by the legacy ECB scheme (AES-128/192/256).
pub const LEGACY_KEY_LENGTHS: &[usize] = &[16, 24, 32];

/// Minimum key material length for the sealed scheme (input to HKDF).
pub const MIN_SEALED_KEY_MATERIAL: usize = 16;

/// HKDF salt for deriving sealed field keys.
pub const FIELD_KEY_SALT: &[u8] = b"campus-admin/field-codec";

/// Encryption scheme used by a field codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodecScheme {
    /// AES-ECB with PKCS7 padding, base64 text. Deterministic: identical
    /// plaintexts produce identical ciphertexts under the same key. Only for
    /// reading and writing data produced by the existing console.
    LegacyEcb,
    /// AES-256-GCM with a random IV per value, `v1.`-prefixed base64 text.
    #[default]
    Sealed,
}

impl CodecScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodecScheme::LegacyEcb => "legacy-ecb",
            CodecScheme::Sealed => "sealed",
        }
    }
}

impl std::str::FromStr for CodecScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy-ecb" | "legacy" | "ecb" => Ok(CodecScheme::LegacyEcb),
            "sealed" | "gcm" => Ok(CodecScheme::Sealed),
            other => Err(format!("unknown codec scheme: {other}")),
        }
    }
}

impl std::fmt::Display for CodecScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
