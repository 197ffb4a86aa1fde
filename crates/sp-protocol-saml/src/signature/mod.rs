//! XML Signature verification support.
//!
//! The service provider only verifies signatures, never creates them.
//! RSA with SHA-256 is the default; SHA-384/512 can be allowed by
//! configuration. SHA-1 and any algorithm outside the allow-list is
//! rejected, so a downgrade to a weak or "none" algorithm cannot
//! succeed.

mod validator;

pub use validator::XmlSignatureValidator;

#[cfg(test)]
pub(crate) use validator::tests as test_fixtures;

use sp_core::SignatureAlgorithmId;

use crate::types::{canonicalization_algorithms, digest_algorithms, signature_algorithms};

/// Signature algorithm declared by an inbound document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureAlgorithm {
    /// RSA with SHA-256 (default).
    #[default]
    RsaSha256,
    /// RSA with SHA-384.
    RsaSha384,
    /// RSA with SHA-512.
    RsaSha512,
    /// Legacy RSA with SHA-1 (recognized so it can be rejected).
    RsaSha1,
}

impl SignatureAlgorithm {
    /// Returns the URI for this signature algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::RsaSha256 => signature_algorithms::RSA_SHA256,
            Self::RsaSha384 => signature_algorithms::RSA_SHA384,
            Self::RsaSha512 => signature_algorithms::RSA_SHA512,
            Self::RsaSha1 => signature_algorithms::RSA_SHA1,
        }
    }

    /// Returns the corresponding digest algorithm URI.
    #[must_use]
    pub const fn digest_uri(&self) -> &'static str {
        match self {
            Self::RsaSha256 => digest_algorithms::SHA256,
            Self::RsaSha384 => digest_algorithms::SHA384,
            Self::RsaSha512 => digest_algorithms::SHA512,
            Self::RsaSha1 => "http://www.w3.org/2000/09/xmldsig#sha1",
        }
    }

    /// Parses a signature algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            signature_algorithms::RSA_SHA256 => Some(Self::RsaSha256),
            signature_algorithms::RSA_SHA384 => Some(Self::RsaSha384),
            signature_algorithms::RSA_SHA512 => Some(Self::RsaSha512),
            signature_algorithms::RSA_SHA1 => Some(Self::RsaSha1),
            _ => None,
        }
    }

    /// Maps this algorithm to its allow-list identifier.
    ///
    /// SHA-1 has no identifier: it can never be allow-listed.
    #[must_use]
    pub const fn allow_list_id(&self) -> Option<SignatureAlgorithmId> {
        match self {
            Self::RsaSha256 => Some(SignatureAlgorithmId::Rs256),
            Self::RsaSha384 => Some(SignatureAlgorithmId::Rs384),
            Self::RsaSha512 => Some(SignatureAlgorithmId::Rs512),
            Self::RsaSha1 => None,
        }
    }
}

/// Canonicalization algorithm declared by an inbound document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanonicalizationAlgorithm {
    /// Exclusive C14N without comments (default).
    #[default]
    ExclusiveC14N,
    /// C14N without comments.
    C14N,
}

impl CanonicalizationAlgorithm {
    /// Returns the URI for this canonicalization algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::ExclusiveC14N => canonicalization_algorithms::EXCLUSIVE_C14N,
            Self::C14N => canonicalization_algorithms::C14N,
        }
    }

    /// Parses a canonicalization algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            canonicalization_algorithms::EXCLUSIVE_C14N => Some(Self::ExclusiveC14N),
            canonicalization_algorithms::C14N => Some(Self::C14N),
            _ => None,
        }
    }
}

/// Extracted `<ds:Signature>` element of a signed SAML document.
#[derive(Debug, Clone)]
pub struct XmlSignature {
    /// The signature algorithm used.
    pub algorithm: SignatureAlgorithm,
    /// The canonicalization algorithm used.
    pub canonicalization: CanonicalizationAlgorithm,
    /// The reference URI (the ID of the signed element).
    pub reference_uri: String,
    /// The digest value (base64 encoded).
    pub digest_value: String,
    /// The signature value (base64 encoded).
    pub signature_value: String,
    /// The literal `SignedInfo` element text as it appears in the
    /// document. The RSA signature is verified over its canonical form,
    /// never over a reconstruction.
    pub signed_info: String,
}
