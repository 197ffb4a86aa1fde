//! # sp-core
//!
//! Core configuration for the SAML 2.0 service provider.
//!
//! The [`SpConfig`] value is loaded once at startup, validated, and then
//! shared immutably with every component that needs it. No part of the
//! system mutates configuration after startup.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;

pub use config::{SignatureAlgorithmId, SpConfig};
