use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected one of {expected:?} bytes, got {got}")]
    InvalidKeyLength { expected: &'static [usize], got: usize },

    #[error("No key configured for domain \"{0}\"")]
    MissingKey(String),

    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("Encrypted data too short")]
    DataTooShort,

    #[error("Unsupported encryption version: {0}")]
    UnsupportedVersion(u8),

    #[error("Value is not codec ciphertext")]
    NotCiphertext,

    #[error("Base64 decoding failed: {0}")]
    InvalidBase64(String),

    #[error("Invalid PKCS7 padding")]
    InvalidPadding,

    #[error("Ciphertext length {0} is not a multiple of the block size")]
    InvalidBlockLength(usize),

    #[error("Decrypted bytes are not valid UTF-8")]
    InvalidUtf8,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
