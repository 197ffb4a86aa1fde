//! Core SAML types and data structures.

mod assertion;
mod authn_request;
mod constants;

pub use assertion::AssertionRecord;
pub use authn_request::AuthnRequest;
pub use constants::*;
