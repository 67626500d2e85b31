use base64ct::{Base64, Encoding};

use crate::error::CryptoError;

/// Standard (padded) base64 encode, the text form stored for legacy values.
pub fn encode(data: &[u8]) -> String {
    Base64::encode_string(data)
}

/// Standard base64 decode.
pub fn decode(s: &str) -> Result<Vec<u8>, CryptoError> {
    Base64::decode_vec(s).map_err(|e| CryptoError::InvalidBase64(e.to_string()))
}

/// Decode after removing every whitespace character. Stored values pick up
/// line breaks and indentation when edited by hand.
pub fn decode_lenient(s: &str) -> Result<Vec<u8>, CryptoError> {
    decode(&strip_whitespace(s))
}

pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
