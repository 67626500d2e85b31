//! Field-level encryption for content records: legacy AES-ECB, sealed
//! AES-256-GCM, HKDF key derivation, and the base64 text form stored in the
//! document store.

pub mod aes_gcm;
pub mod base64;
pub mod codec;
pub mod ecb;
pub mod error;
pub mod hkdf;
pub mod key;
pub mod types;

pub use aes_gcm::SealedCipher;
pub use codec::{CodecOutcome, FieldCodec};
pub use ecb::{decrypt_ecb, encrypt_ecb};
pub use error::CryptoError;
pub use hkdf::{derive_field_key, hkdf_derive};
pub use key::{EncryptionKey, KeyEncoding};
pub use types::{CodecScheme, CURRENT_VERSION, SEALED_PREFIX, SUPPORTED_VERSIONS};
