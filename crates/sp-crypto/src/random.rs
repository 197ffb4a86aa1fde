//! Cryptographically secure random generation.
//!
//! Request IDs and session tokens must be unguessable; everything here
//! draws from the thread-local CSPRNG.

use rand::distr::{Alphanumeric, SampleString};
use rand::Rng;

/// Generates `len` cryptographically secure random bytes.
#[must_use]
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes[..]);
    bytes
}

/// Generates a cryptographically secure alphanumeric string.
#[must_use]
pub fn random_alphanumeric(len: usize) -> String {
    let mut rng = rand::rng();
    Alphanumeric.sample_string(&mut rng, len)
}

/// Generates a session identifier.
///
/// 32 alphanumeric characters carry about 190 bits of entropy
/// (log2(62^32)), comfortably above the 128-bit minimum required to
/// make guessing infeasible.
#[must_use]
pub fn generate_session_id() -> String {
    random_alphanumeric(32)
}

/// Generates an AuthnRequest message ID.
///
/// SAML message IDs must be valid XML NCNames, so the value is prefixed
/// with an underscore.
#[must_use]
pub fn generate_request_id() -> String {
    format!("_{}", random_alphanumeric(32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_bytes_produces_correct_length() {
        assert_eq!(random_bytes(16).len(), 16);
        assert_eq!(random_bytes(32).len(), 32);
    }

    #[test]
    fn random_bytes_produces_different_values() {
        assert_ne!(random_bytes(32), random_bytes(32));
    }

    #[test]
    fn random_alphanumeric_only_contains_valid_chars() {
        let s = random_alphanumeric(1000);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn session_id_format() {
        let id = generate_session_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn session_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_session_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn request_id_is_an_ncname() {
        let id = generate_request_id();
        assert!(id.starts_with('_'));
        assert_eq!(id.len(), 33);
    }
}
