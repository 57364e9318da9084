//! Printable form of sealed bytes: standard base64 with padding, no wrapping.

use crate::error::CodecError;
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Encodes bytes as standard, padded base64 on a single line.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard, padded base64.
///
/// # Errors
///
/// Returns [`CodecError::InvalidEncoding`] on characters outside the alphabet,
/// bad padding or a truncated final group.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(text)
        .map_err(|_| CodecError::InvalidEncoding)
}
