//! Session-keyed storage abstraction.
//!
//! Live assessment sessions and archived reports both live behind
//! [`SessionStore`], so a caller can swap the in-memory map for a persistent
//! backend without touching the scorer or the tracker.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::Result;
use crate::types::SessionId;

/// Key-value storage of per-session state.
pub trait SessionStore<V>: Send + Sync {
    /// Fetch a copy of the value stored for a session.
    fn get(&self, session_id: &SessionId) -> Result<Option<V>>;

    /// Insert or replace the value for a session.
    fn put(&self, session_id: SessionId, value: V) -> Result<()>;

    /// Remove and return the value for a session.
    fn remove(&self, session_id: &SessionId) -> Result<Option<V>>;

    /// Whether a value is stored for the session.
    fn contains(&self, session_id: &SessionId) -> Result<bool> {
        Ok(self.get(session_id)?.is_some())
    }

    /// All stored session ids, in no particular order.
    fn ids(&self) -> Result<Vec<SessionId>>;
}

/// In-memory store backed by a `HashMap`.
#[derive(Debug)]
pub struct InMemorySessionStore<V> {
    entries: RwLock<HashMap<SessionId, V>>,
}

impl<V> InMemorySessionStore<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for InMemorySessionStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> SessionStore<V> for InMemorySessionStore<V> {
    fn get(&self, session_id: &SessionId) -> Result<Option<V>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(session_id).cloned())
    }

    fn put(&self, session_id: SessionId, value: V) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id, value);
        Ok(())
    }

    fn remove(&self, session_id: &SessionId) -> Result<Option<V>> {
        Ok(self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id))
    }

    fn contains(&self, session_id: &SessionId) -> Result<bool> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(session_id))
    }

    fn ids(&self) -> Result<Vec<SessionId>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }
}
