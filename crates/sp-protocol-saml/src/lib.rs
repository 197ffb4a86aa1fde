//! SAML 2.0 protocol core for the service provider.
//!
//! This crate covers the trust boundary of the service provider:
//!
//! - **AuthnRequest construction** - build and serialize outbound
//!   authentication requests
//! - **Response parsing** - decode the IdP's POST-bound response into a
//!   structured [`types::AssertionRecord`]
//! - **XML signature verification** - check the assertion against the
//!   single configured IdP certificate
//! - **Validation policy** - the ordered trust checks (status, issuer,
//!   audience, time window, signature) with accumulated failure reasons
//! - **Replay protection** - atomic check-and-mark of consumed
//!   assertion IDs
//! - **Bindings** - HTTP-Redirect encoding for outbound requests and
//!   HTTP-POST decoding for inbound responses
//!
//! No field of a parsed assertion may be acted on before the full
//! validation policy passes and the replay guard accepts the assertion.
//!
//! # SAML Specifications
//!
//! - [SAML 2.0 Core](https://docs.oasis-open.org/security/saml/v2.0/saml-core-2.0-os.pdf)
//! - [SAML 2.0 Bindings](https://docs.oasis-open.org/security/saml/v2.0/saml-bindings-2.0-os.pdf)
//! - [XML Signature](https://www.w3.org/TR/xmldsig-core1/)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bindings;
pub mod error;
pub mod metadata;
pub mod parser;
pub mod replay;
pub mod signature;
pub mod types;
pub mod validation;

pub use error::{SamlError, SamlResult};
pub use replay::{ReplayCheck, ReplayGuard};
pub use types::*;
pub use validation::{ValidationPolicy, ValidationVerdict};
