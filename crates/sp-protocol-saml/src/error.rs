//! SAML error types.
//!
//! A caller must always be able to tell a malformed document apart from
//! a well-formed but untrusted one, and both apart from infrastructure
//! failures. The variants here group into those three classes and the
//! HTTP boundary maps them to 400 / 401 / 500.

use thiserror::Error;

/// Result type for SAML operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// SAML protocol errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// Invalid inbound message format or content.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid SAML response format or content.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Missing required element or attribute.
    #[error("missing required element: {0}")]
    MissingElement(String),

    /// Base64 decoding error.
    #[error("base64 decode error: {0}")]
    Base64Decode(String),

    /// Deflate compression error.
    #[error("deflate error: {0}")]
    Deflate(String),

    /// XML signature validation failed.
    #[error("signature validation failed: {0}")]
    SignatureInvalid(String),

    /// One or more validation policy checks failed.
    #[error("assertion validation failed: {}", reasons.join("; "))]
    ValidationFailed {
        /// The accumulated failure reasons, in check order.
        reasons: Vec<String>,
    },

    /// The assertion was already consumed once.
    #[error("assertion replay detected: {0}")]
    ReplayDetected(String),

    /// Cryptographic material could not be used.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Durable store operation failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SamlError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidResponse(_)
            | Self::XmlParse(_)
            | Self::MissingElement(_)
            | Self::Base64Decode(_)
            | Self::Deflate(_) => 400,
            Self::SignatureInvalid(_) | Self::ValidationFailed { .. } | Self::ReplayDetected(_) => {
                401
            }
            Self::Crypto(_) | Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true for errors caused by a malformed inbound document.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        self.http_status() == 400
    }
}

impl From<quick_xml::Error> for SamlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<base64::DecodeError> for SamlError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64Decode(err.to_string())
    }
}

impl From<std::io::Error> for SamlError {
    fn from(err: std::io::Error) -> Self {
        Self::Deflate(err.to_string())
    }
}

impl From<sp_cache::CacheError> for SamlError {
    fn from(err: sp_cache::CacheError) -> Self {
        Self::Storage(err.to_string())
    }
}
