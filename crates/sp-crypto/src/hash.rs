//! SHA-2 digest helpers.

use aws_lc_rs::digest;

/// Computes a SHA-256 digest.
#[must_use]
pub fn sha256(data: &[u8]) -> Vec<u8> {
    digest::digest(&digest::SHA256, data).as_ref().to_vec()
}

/// Computes a SHA-384 digest.
#[must_use]
pub fn sha384(data: &[u8]) -> Vec<u8> {
    digest::digest(&digest::SHA384, data).as_ref().to_vec()
}

/// Computes a SHA-512 digest.
#[must_use]
pub fn sha512(data: &[u8]) -> Vec<u8> {
    digest::digest(&digest::SHA512, data).as_ref().to_vec()
}
