//! Session record model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated user's session.
///
/// Created from a validated assertion; the user identity and attribute
/// bag are copied out of the assertion so the raw document does not
/// need to be retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique session identifier, also the cookie value.
    pub session_id: String,
    /// The authenticated principal (the assertion's NameID).
    pub user: String,
    /// Attributes carried by the assertion, values in declared order.
    pub attributes: HashMap<String, Vec<String>>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}
