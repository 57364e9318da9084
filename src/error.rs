use thiserror::Error;

/// Failures produced by the codec.
///
/// Authentication failures are reported the same way whatever the cause
/// (wrong key, corruption or tampering).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid key length: expected 64 hex characters")]
    InvalidKeyLength,

    #[error("invalid key encoding: key must be hexadecimal")]
    InvalidKeyEncoding,

    #[error("input is empty")]
    EmptyInput,

    #[error("invalid base64 encoding")]
    InvalidEncoding,

    #[error("malformed ciphertext")]
    MalformedCiphertext,

    #[error("invalid key or corrupted data")]
    AuthenticationFailed,

    #[error("decrypted data is not valid UTF-8")]
    InvalidUtf8,

    #[error("OS random generator unavailable")]
    RandomUnavailable,

    #[error("encryption failed")]
    EncryptionFailed,
}
