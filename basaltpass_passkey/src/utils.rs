use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use thiserror::Error;

/// URL-safe alphabet, never emits padding, accepts input with or without it.
/// Non-zero trailing bits in the last symbol are ignored on decode.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes bytes as Base64URL text without `=` padding.
pub fn base64url_encode(input: impl AsRef<[u8]>) -> String {
    BASE64URL.encode(input)
}

/// Decodes Base64URL text into bytes.
///
/// Trailing `=` padding is optional. Characters outside the URL-safe alphabet
/// (including `+` and `/`) are rejected.
pub fn base64url_decode(input: &str) -> Result<Vec<u8>, UtilError> {
    BASE64URL
        .decode(input)
        .map_err(|e| UtilError::Decode(format!("Failed to decode base64url: {e}")))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UtilError {
    #[error("Decode error: {0}")]
    Decode(String),
}
