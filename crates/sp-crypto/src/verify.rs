//! RSA signature verification.
//!
//! SAML 2.0 interoperability requires RSA PKCS#1 v1.5 with SHA-2. The
//! accepted algorithm set is decided by the caller's allow-list; this
//! module only knows how to verify the algorithms it names.

use aws_lc_rs::signature::{
    self, UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_2048_8192_SHA384,
    RSA_PKCS1_2048_8192_SHA512,
};
use thiserror::Error;

/// Errors from signature verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The public key could not be used for verification.
    #[error("invalid public key: {0}")]
    InvalidKey(String),
}

/// RSA signature algorithms supported for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaAlgorithm {
    /// RSA PKCS#1 v1.5 with SHA-256.
    Rs256,
    /// RSA PKCS#1 v1.5 with SHA-384.
    Rs384,
    /// RSA PKCS#1 v1.5 with SHA-512.
    Rs512,
}

/// Verifies an RSA PKCS#1 v1.5 signature.
///
/// # Arguments
///
/// * `public_key_der` - public key in DER form (`SubjectPublicKeyInfo`
///   as extracted from an X.509 certificate)
/// * `data` - the signed data
/// * `sig` - the signature to check
/// * `algorithm` - which digest the signature uses
///
/// Returns `Ok(false)` for a well-formed but non-matching signature;
/// errors are reserved for unusable key material.
pub fn rsa_verify(
    public_key_der: &[u8],
    data: &[u8],
    sig: &[u8],
    algorithm: RsaAlgorithm,
) -> Result<bool, VerifyError> {
    let verification_alg: &dyn signature::VerificationAlgorithm = match algorithm {
        RsaAlgorithm::Rs256 => &RSA_PKCS1_2048_8192_SHA256,
        RsaAlgorithm::Rs384 => &RSA_PKCS1_2048_8192_SHA384,
        RsaAlgorithm::Rs512 => &RSA_PKCS1_2048_8192_SHA512,
    };

    let public_key = UnparsedPublicKey::new(verification_alg, public_key_der);

    match public_key.verify(data, sig) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_key_does_not_verify() {
        let result = rsa_verify(b"not a key", b"data", b"sig", RsaAlgorithm::Rs256);
        // aws-lc-rs reports an unusable key as a verification failure,
        // which callers must treat as "not verified".
        assert!(matches!(result, Ok(false)));
    }
}
