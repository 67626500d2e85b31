//! Legacy AES-ECB with PKCS7 padding.
//!
//! Every block is encrypted independently, so equal plaintexts under the same
//! key give equal ciphertexts. Only here to read and write values produced by
//! the existing console.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::error::CryptoError;
use crate::types::{AES_BLOCK_SIZE, LEGACY_KEY_LENGTHS};

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;
type Aes192EcbEnc = ecb::Encryptor<Aes192>;
type Aes192EcbDec = ecb::Decryptor<Aes192>;
type Aes256EcbEnc = ecb::Encryptor<Aes256>;
type Aes256EcbDec = ecb::Decryptor<Aes256>;

pub(crate) fn check_key(key: &[u8]) -> Result<(), CryptoError> {
    if LEGACY_KEY_LENGTHS.contains(&key.len()) {
        Ok(())
    } else {
        Err(CryptoError::InvalidKeyLength {
            expected: LEGACY_KEY_LENGTHS,
            got: key.len(),
        })
    }
}

fn bad_key<E: std::fmt::Display>(e: E) -> CryptoError {
    CryptoError::EncryptionFailed(e.to_string())
}

/// Encrypt bytes with AES-ECB/PKCS7. The key length picks AES-128/192/256.
pub fn encrypt_ecb(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_key(key)?;
    let ciphertext = match key.len() {
        16 => Aes128EcbEnc::new_from_slice(key)
            .map_err(bad_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => Aes192EcbEnc::new_from_slice(key)
            .map_err(bad_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        _ => Aes256EcbEnc::new_from_slice(key)
            .map_err(bad_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    };
    Ok(ciphertext)
}

/// Decrypt AES-ECB/PKCS7 bytes.
pub fn decrypt_ecb(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_key(key)?;
    if ciphertext.is_empty() {
        return Err(CryptoError::DataTooShort);
    }
    if ciphertext.len() % AES_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidBlockLength(ciphertext.len()));
    }
    let plaintext = match key.len() {
        16 => Aes128EcbDec::new_from_slice(key)
            .map_err(bad_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => Aes192EcbDec::new_from_slice(key)
            .map_err(bad_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        _ => Aes256EcbDec::new_from_slice(key)
            .map_err(bad_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
    };
    plaintext.map_err(|_| CryptoError::InvalidPadding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fips197_aes128_first_block() {
        // FIPS-197 Appendix C.1. PKCS7 appends a full padding block after
        // a block-aligned plaintext, so only the first block is the vector.
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let pt = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        let ct = encrypt_ecb(&key, &pt).unwrap();
        assert_eq!(ct.len(), 32);
        assert_eq!(hex::encode(&ct[..16]), "69c4e0d86a7b0430d8cdb78070b4c55a");
        assert_eq!(decrypt_ecb(&key, &ct).unwrap(), pt);
    }

    #[test]
    fn fips197_aes256_first_block() {
        // FIPS-197 Appendix C.3
        let key =
            hex::decode("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f")
                .unwrap();
        let pt = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        let ct = encrypt_ecb(&key, &pt).unwrap();
        assert_eq!(hex::encode(&ct[..16]), "8ea2b7ca516745bfeafc49904b496089");
    }

    #[test]
    fn aes192_round_trip() {
        let key = [7u8; 24];
        let ct = encrypt_ecb(&key, b"middle key size").unwrap();
        assert_eq!(decrypt_ecb(&key, &ct).unwrap(), b"middle key size");
    }

    #[test]
    fn identical_blocks_leak() {
        let key = [1u8; 16];
        let ct = encrypt_ecb(&key, &[0xAB; 32]).unwrap();
        assert_eq!(ct[..16], ct[16..32]);
    }

    #[test]
    fn empty_plaintext_is_one_padding_block() {
        let key = [3u8; 16];
        let ct = encrypt_ecb(&key, b"").unwrap();
        assert_eq!(ct.len(), 16);
        assert!(decrypt_ecb(&key, &ct).unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_key_length() {
        let err = encrypt_ecb(&[0u8; 10], b"x").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyLength { got: 10, .. }));
    }

    #[test]
    fn rejects_partial_block() {
        let err = decrypt_ecb(&[0u8; 16], &[0u8; 15]).unwrap_err();
        assert_eq!(err, CryptoError::InvalidBlockLength(15));
    }

    #[test]
    fn rejects_empty_ciphertext() {
        assert_eq!(decrypt_ecb(&[0u8; 16], &[]).unwrap_err(), CryptoError::DataTooShort);
    }

    #[test]
    fn wrong_key_breaks_padding_or_content() {
        let ct = encrypt_ecb(&[1u8; 16], b"secret").unwrap();
        match decrypt_ecb(&[2u8; 16], &ct) {
            Err(e) => assert_eq!(e, CryptoError::InvalidPadding),
            Ok(pt) => assert_ne!(pt, b"secret"),
        }
    }
}
