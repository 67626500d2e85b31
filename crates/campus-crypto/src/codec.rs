//! Field-level string codec.
//!
//! A `FieldCodec` encrypts and decrypts single string values for one content
//! domain. Failures never escape as panics: the `encrypt`/`decrypt` methods
//! return a [`CodecOutcome`] that either carries the converted value or the
//! untouched input together with the reason.

use tracing::warn;
use zeroize::Zeroizing;

use crate::aes_gcm::SealedCipher;
use crate::base64;
use crate::ecb::{check_key as check_legacy_key, decrypt_ecb, encrypt_ecb};
use crate::error::CryptoError;
use crate::hkdf::derive_field_key;
use crate::key::EncryptionKey;
use crate::types::{CodecScheme, MIN_SEALED_KEY_MATERIAL, SEALED_PREFIX};

// ============================================================================
// CodecOutcome
// ============================================================================

/// Result of a best-effort codec call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecOutcome {
    /// The value was encrypted or decrypted.
    Converted(String),
    /// The operation failed; `input` is returned exactly as given.
    Unchanged { input: String, error: CryptoError },
}

impl CodecOutcome {
    /// The best-effort string: the converted value, or the original input.
    pub fn value(&self) -> &str {
        match self {
            CodecOutcome::Converted(v) => v,
            CodecOutcome::Unchanged { input, .. } => input,
        }
    }

    pub fn into_value(self) -> String {
        match self {
            CodecOutcome::Converted(v) => v,
            CodecOutcome::Unchanged { input, .. } => input,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, CodecOutcome::Converted(_))
    }

    pub fn error(&self) -> Option<&CryptoError> {
        match self {
            CodecOutcome::Converted(_) => None,
            CodecOutcome::Unchanged { error, .. } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<String, CryptoError> {
        match self {
            CodecOutcome::Converted(v) => Ok(v),
            CodecOutcome::Unchanged { error, .. } => Err(error),
        }
    }
}

// ============================================================================
// FieldCodec
// ============================================================================

enum Keying {
    Legacy(Zeroizing<Vec<u8>>),
    Sealed {
        cipher: SealedCipher,
        /// Raw key kept for reading un-migrated legacy values.
        legacy: Option<Zeroizing<Vec<u8>>>,
    },
    Unkeyed(CryptoError),
}

/// String codec for one content domain.
pub struct FieldCodec {
    label: String,
    scheme: CodecScheme,
    keying: Keying,
}

impl FieldCodec {
    /// Build a codec for `label` (the domain name, also the HKDF info for
    /// sealed keys).
    ///
    /// `accept_legacy` only applies to the sealed scheme: values without the
    /// `v1.` prefix are then decrypted as legacy ECB with the same raw key.
    pub fn new(
        label: impl Into<String>,
        scheme: CodecScheme,
        key: &EncryptionKey,
        accept_legacy: bool,
    ) -> Result<Self, CryptoError> {
        let label = label.into();
        let keying = match scheme {
            CodecScheme::LegacyEcb => {
                check_legacy_key(key.as_bytes())?;
                Keying::Legacy(Zeroizing::new(key.as_bytes().to_vec()))
            }
            CodecScheme::Sealed => {
                if key.len() < MIN_SEALED_KEY_MATERIAL {
                    return Err(CryptoError::InvalidKeyLength {
                        expected: &[MIN_SEALED_KEY_MATERIAL],
                        got: key.len(),
                    });
                }
                let derived = Zeroizing::new(derive_field_key(key.as_bytes(), &label)?);
                let cipher = SealedCipher::new(&derived[..])?;
                let legacy = if accept_legacy {
                    check_legacy_key(key.as_bytes())?;
                    Some(Zeroizing::new(key.as_bytes().to_vec()))
                } else {
                    None
                };
                Keying::Sealed { cipher, legacy }
            }
        };
        Ok(Self {
            label,
            scheme,
            keying,
        })
    }

    /// A codec with no usable key. Every operation returns the input
    /// unchanged with `reason`.
    pub fn unkeyed(label: impl Into<String>, scheme: CodecScheme, reason: CryptoError) -> Self {
        Self {
            label: label.into(),
            scheme,
            keying: Keying::Unkeyed(reason),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn scheme(&self) -> CodecScheme {
        self.scheme
    }

    pub fn is_keyed(&self) -> bool {
        !matches!(self.keying, Keying::Unkeyed(_))
    }

    /// Encrypt a plaintext field value.
    pub fn try_encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        match &self.keying {
            Keying::Legacy(key) => {
                let ciphertext = encrypt_ecb(key, plaintext.as_bytes())?;
                Ok(base64::encode(&ciphertext))
            }
            Keying::Sealed { cipher, .. } => {
                let sealed = cipher.seal(plaintext.as_bytes())?;
                Ok(format!("{}{}", SEALED_PREFIX, base64::encode(&sealed)))
            }
            Keying::Unkeyed(reason) => Err(reason.clone()),
        }
    }

    /// Decrypt a stored field value. Whitespace anywhere in the input is
    /// ignored.
    pub fn try_decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let compact = base64::strip_whitespace(ciphertext);
        let bytes = match &self.keying {
            Keying::Legacy(key) => decrypt_ecb(key, &base64::decode(&compact)?)?,
            Keying::Sealed { cipher, legacy } => match compact.strip_prefix(SEALED_PREFIX) {
                Some(body) => cipher.open(&base64::decode(body)?)?,
                None => match legacy {
                    Some(key) => decrypt_ecb(key, &base64::decode(&compact)?)?,
                    None => return Err(CryptoError::NotCiphertext),
                },
            },
            Keying::Unkeyed(reason) => return Err(reason.clone()),
        };
        String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8)
    }

    /// Best-effort encrypt. On failure the plaintext comes back unchanged.
    pub fn encrypt(&self, plaintext: &str) -> CodecOutcome {
        match self.try_encrypt(plaintext) {
            Ok(v) => CodecOutcome::Converted(v),
            Err(error) => {
                warn!(domain = %self.label, %error, "field encryption failed, keeping plaintext");
                CodecOutcome::Unchanged {
                    input: plaintext.to_string(),
                    error,
                }
            }
        }
    }

    /// Best-effort decrypt. On failure the input comes back unchanged.
    pub fn decrypt(&self, ciphertext: &str) -> CodecOutcome {
        match self.try_decrypt(ciphertext) {
            Ok(v) => CodecOutcome::Converted(v),
            Err(error) => {
                warn!(domain = %self.label, %error, "field decryption failed, returning input");
                CodecOutcome::Unchanged {
                    input: ciphertext.to_string(),
                    error,
                }
            }
        }
    }
}

impl std::fmt::Debug for FieldCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCodec")
            .field("label", &self.label)
            .field("scheme", &self.scheme)
            .field("keyed", &self.is_keyed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyEncoding;

    fn key(text: &str) -> EncryptionKey {
        EncryptionKey::parse(text, KeyEncoding::Utf8).unwrap()
    }

    fn legacy() -> FieldCodec {
        FieldCodec::new("materials", CodecScheme::LegacyEcb, &key("0123456789abcdef"), false)
            .unwrap()
    }

    fn sealed() -> FieldCodec {
        FieldCodec::new("materials", CodecScheme::Sealed, &key("0123456789abcdef"), false)
            .unwrap()
    }

    const SAMPLES: &[&str] = &[
        "",
        "Intro",
        "Data Structures/Unit 1",
        "Ünïcödé: 数据结构 🚀",
        "exactly sixteen!",
        "a much longer value that spans several AES blocks of sixteen bytes each",
    ];

    #[test]
    fn legacy_round_trip() {
        let codec = legacy();
        for s in SAMPLES {
            let ct = codec.try_encrypt(s).unwrap();
            assert_ne!(&ct, s);
            assert_eq!(codec.try_decrypt(&ct).unwrap(), *s);
        }
    }

    #[test]
    fn sealed_round_trip() {
        let codec = sealed();
        for s in SAMPLES {
            let ct = codec.try_encrypt(s).unwrap();
            assert!(ct.starts_with(SEALED_PREFIX));
            assert_eq!(codec.try_decrypt(&ct).unwrap(), *s);
        }
    }

    #[test]
    fn legacy_is_deterministic() {
        let codec = legacy();
        assert_eq!(
            codec.try_encrypt("same").unwrap(),
            codec.try_encrypt("same").unwrap()
        );
    }

    #[test]
    fn sealed_is_not_deterministic() {
        let codec = sealed();
        assert_ne!(
            codec.try_encrypt("same").unwrap(),
            codec.try_encrypt("same").unwrap()
        );
    }

    #[test]
    fn legacy_output_is_padded_base64_of_whole_blocks() {
        let ct = legacy().try_encrypt("Intro").unwrap();
        let raw = base64::decode(&ct).unwrap();
        assert_eq!(raw.len(), 16);
        assert_eq!(ct.len(), 24);
    }

    #[test]
    fn tolerates_trailing_and_embedded_whitespace() {
        for codec in [legacy(), sealed()] {
            let ct = codec.try_encrypt("Operating Systems").unwrap();
            let trailing = format!("{}\n  ", ct);
            assert_eq!(codec.decrypt(&trailing).into_value(), "Operating Systems");
            let split = format!("{}\n{}", &ct[..8], &ct[8..]);
            assert_eq!(codec.decrypt(&split).into_value(), "Operating Systems");
        }
    }

    #[test]
    fn garbage_comes_back_literally() {
        for codec in [legacy(), sealed()] {
            let out = codec.decrypt("not-valid-ciphertext!!!");
            assert!(!out.is_converted());
            assert_eq!(out.value(), "not-valid-ciphertext!!!");
            assert!(out.error().is_some());
        }
    }

    #[test]
    fn plaintext_is_not_ciphertext_for_sealed() {
        let out = sealed().decrypt("Intro");
        assert_eq!(out.error(), Some(&CryptoError::NotCiphertext));
        assert_eq!(out.into_value(), "Intro");
    }

    #[test]
    fn wrong_key_degrades() {
        let ct = legacy().try_encrypt("secret notes").unwrap();
        let other = FieldCodec::new(
            "materials",
            CodecScheme::LegacyEcb,
            &key("fedcba9876543210"),
            false,
        )
        .unwrap();
        let out = other.decrypt(&ct);
        // A wrong key either breaks the padding or yields different bytes
        assert_ne!(out.value(), "secret notes");
    }

    #[test]
    fn sealed_domains_do_not_share_keys() {
        let placement =
            FieldCodec::new("placement", CodecScheme::Sealed, &key("0123456789abcdef"), false)
                .unwrap();
        let ct = sealed().try_encrypt("cross-domain").unwrap();
        assert!(placement.try_decrypt(&ct).is_err());
    }

    #[test]
    fn sealed_reads_legacy_when_allowed() {
        let legacy_ct = legacy().try_encrypt("old record").unwrap();
        let migrating =
            FieldCodec::new("materials", CodecScheme::Sealed, &key("0123456789abcdef"), true)
                .unwrap();
        assert_eq!(migrating.try_decrypt(&legacy_ct).unwrap(), "old record");
        assert!(migrating.try_encrypt("new").unwrap().starts_with(SEALED_PREFIX));
        assert!(sealed().try_decrypt(&legacy_ct).is_err());
    }

    #[test]
    fn legacy_rejects_odd_key_lengths() {
        let err = FieldCodec::new("users", CodecScheme::LegacyEcb, &key("short"), false)
            .unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyLength { got: 5, .. }));
    }

    #[test]
    fn sealed_accepts_long_key_material() {
        let codec = FieldCodec::new(
            "users",
            CodecScheme::Sealed,
            &key("a passphrase that is longer than thirty-two bytes"),
            false,
        )
        .unwrap();
        let ct = codec.try_encrypt("x").unwrap();
        assert_eq!(codec.try_decrypt(&ct).unwrap(), "x");
    }

    #[test]
    fn unkeyed_codec_passes_values_through() {
        let codec = FieldCodec::unkeyed(
            "users",
            CodecScheme::LegacyEcb,
            CryptoError::MissingKey("users".into()),
        );
        assert!(!codec.is_keyed());

        let enc = codec.encrypt("plain");
        assert_eq!(enc.value(), "plain");
        assert_eq!(enc.error(), Some(&CryptoError::MissingKey("users".into())));

        let dec = codec.decrypt("abc");
        assert_eq!(dec.into_result(), Err(CryptoError::MissingKey("users".into())));
    }

    #[test]
    fn debug_hides_key_material() {
        let rendered = format!("{:?}", legacy());
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(rendered.contains("materials"));
    }
}
