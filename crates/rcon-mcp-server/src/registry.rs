//! Registry of live gateway sessions

use crate::mcp::Request;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Identifier handed to a client in the SSE endpoint event
pub type SessionId = Uuid;

/// Routes posted messages to the inbound queue of their session
///
/// Only the sending half of each session's inbound queue lives here; the
/// session task owns everything else. Removing an entry closes the queue,
/// which ends the session task.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, mpsc::Sender<Request>>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session
    pub fn register(&self, session_id: SessionId, inbound: mpsc::Sender<Request>) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id, inbound);
    }

    /// Inbound queue of a session
    pub fn sender(&self, session_id: &SessionId) -> Option<mpsc::Sender<Request>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }

    /// Remove a session, returning whether it was present
    pub fn remove(&self, session_id: &SessionId) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id)
            .is_some()
    }

    /// Drop every session, used on shutdown
    pub fn close_all(&self) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of live sessions
    pub fn count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
