//! In-memory session store keyed by client id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::message::Message;

/// Which of a client's two conversation logs a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Questions answered against an uploaded document.
    Pdf,
    /// General-knowledge questions answered by the remote model.
    Ai,
}

impl LogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::Pdf => "pdf",
            LogKind::Ai => "ai",
        }
    }
}

/// A client's full history: the two logs are kept separate so switching
/// between document and general chat never interleaves transcripts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionLogs {
    pub pdf: Vec<Message>,
    pub ai: Vec<Message>,
}

impl SessionLogs {
    fn log_mut(&mut self, kind: LogKind) -> &mut Vec<Message> {
        match kind {
            LogKind::Pdf => &mut self.pdf,
            LogKind::Ai => &mut self.ai,
        }
    }
}

/// Session store holding every client's history in process memory.
///
/// Sessions are created on first touch and never evicted; all history is
/// lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionLogs>>,
}

impl InMemorySessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a snapshot of a client's history, creating an empty session if
    /// the client is new.
    pub async fn get_or_create(&self, client_id: &str) -> SessionLogs {
        {
            let sessions = self.sessions.read().await;
            if let Some(logs) = sessions.get(client_id) {
                return logs.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions.entry(client_id.to_string()).or_default().clone()
    }

    /// Append a single message to one of a client's logs.
    pub async fn append(&self, client_id: &str, kind: LogKind, message: Message) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(client_id.to_string()).or_default().log_mut(kind).push(message);
        debug!(client.id = %client_id, log = kind.as_str(), "message recorded");
    }

    /// Append a question and its answer as one unit, so no reader can
    /// observe the question without its answer.
    pub async fn append_exchange(
        &self,
        client_id: &str,
        kind: LogKind,
        user: Message,
        assistant: Message,
    ) {
        let mut sessions = self.sessions.write().await;
        let log = sessions.entry(client_id.to_string()).or_default().log_mut(kind);
        log.push(user);
        log.push(assistant);
        debug!(client.id = %client_id, log = kind.as_str(), "exchange recorded");
    }

    /// Number of known clients.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether any client has a session.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
