//! # sp-session
//!
//! Session issuance and lookup for the service provider.
//!
//! A session is created only after an assertion has passed the full
//! validation policy and the replay guard. Records live in the cache
//! backend under a TTL matching the configured session duration, so
//! expiry needs no sweeper.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod record;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use record::SessionRecord;
pub use store::SessionStore;
