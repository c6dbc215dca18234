//! Pending-turn token
//!
//! Identifies a single placeholder entry in the conversation log. The
//! delayed replace operation must present the token that was handed out at
//! append time; a token invalidated by a clear or a newer append mutates
//! nothing.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token identifying one pending (placeholder) turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingToken(Uuid);

impl PendingToken {
    /// Create a new random token
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PendingToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PendingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
