//! Parsed assertion data.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured view of one inbound SAML response.
///
/// Produced by the response parser, consumed exactly once by the
/// validation policy. Every field is untrusted until the full policy
/// passes; downstream components (replay guard, session store) must not
/// act on any field before then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionRecord {
    /// Top-level status code URI of the response.
    pub status_code: String,

    /// Unique identifier of the assertion (replay key).
    pub assertion_id: String,

    /// Entity ID of the asserting identity provider.
    pub issuer: String,

    /// Subject NameID; empty string when absent.
    pub name_id: String,

    /// Lower bound of the validity window, if declared.
    pub not_before: Option<DateTime<Utc>>,

    /// Upper bound of the validity window, if declared.
    pub not_on_or_after: Option<DateTime<Utc>>,

    /// Audience restriction, if declared.
    pub audience: Option<String>,

    /// Subject attributes. Repeated values keep their declared order;
    /// attribute names are case-sensitive opaque strings.
    pub attributes: HashMap<String, Vec<String>>,

    /// The raw response document, kept for signature verification.
    pub raw_xml: String,
}
