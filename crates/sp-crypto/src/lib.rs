//! # sp-crypto
//!
//! Cryptographic primitives for the SAML service provider:
//!
//! - [`random`] - cryptographically secure random generation for request
//!   IDs and session tokens
//! - [`hash`] - SHA-2 digests used for XML digest verification
//! - [`verify`] - RSA PKCS#1 v1.5 signature verification via aws-lc-rs
//!
//! This crate never signs anything; the service provider only verifies
//! material produced by the identity provider.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod hash;
pub mod random;
pub mod verify;

pub use hash::{sha256, sha384, sha512};
pub use random::{generate_request_id, generate_session_id, random_alphanumeric, random_bytes};
pub use verify::{rsa_verify, RsaAlgorithm, VerifyError};
