//! Conversation log entity - The ordered transcript of one session
//!
//! Append-only apart from `clear` and the pending-turn protocol. While a
//! pending token is outstanding, the placeholder is always the last turn;
//! any append or clear invalidates the token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Turn;
use crate::errors::DomainError;
use crate::value_objects::{PendingToken, SessionId};

/// The ordered sequence of turns in one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationLog {
    id: SessionId,
    turns: Vec<Turn>,
    pending: Option<PendingToken>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ConversationLog {
    /// Create a new empty log
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            turns: Vec::new(),
            pending: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get the session identifier
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Get the turns in insertion order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Get the number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Get the last turn
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// When the log was created
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the log was last mutated
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether a placeholder turn is outstanding
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Append a turn, preserving insertion order
    ///
    /// An outstanding placeholder is removed first and its token invalidated,
    /// so a new cycle can never strand a stale placeholder in the middle of
    /// the log.
    pub fn append(&mut self, turn: Turn) {
        self.drop_pending();
        self.turns.push(turn);
        self.updated_at = Utc::now();
    }

    /// Reset the log to empty, invalidating any pending token
    pub fn clear(&mut self) {
        self.turns.clear();
        self.pending = None;
        self.updated_at = Utc::now();
    }

    /// Swap the last turn for another
    pub fn replace_last(&mut self, turn: Turn) -> Result<(), DomainError> {
        let last = self.turns.last_mut().ok_or(DomainError::EmptyLog)?;
        *last = turn;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Append a placeholder turn and hand out the token that later commits it
    ///
    /// A previous placeholder still outstanding is dropped first; its token
    /// becomes stale.
    pub fn begin_pending(&mut self, placeholder: Turn) -> PendingToken {
        self.drop_pending();
        self.turns.push(placeholder);
        let token = PendingToken::new();
        self.pending = Some(token);
        self.updated_at = Utc::now();
        token
    }

    /// Swap the placeholder for the real turn
    ///
    /// Fails without mutating if `token` is not the current pending entry
    /// (the log was cleared, or a newer append superseded the placeholder).
    pub fn resolve_pending(&mut self, token: PendingToken, turn: Turn) -> Result<(), DomainError> {
        if self.pending != Some(token) {
            return Err(DomainError::StalePendingTurn(token.to_string()));
        }
        self.pending = None;
        self.replace_last(turn)
    }

    /// Remove the placeholder without committing a turn
    ///
    /// A stale token is a no-op.
    pub fn cancel_pending(&mut self, token: PendingToken) {
        if self.pending == Some(token) {
            self.drop_pending();
            self.updated_at = Utc::now();
        }
    }

    fn drop_pending(&mut self) {
        if self.pending.take().is_some() {
            self.turns.pop();
        }
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}
