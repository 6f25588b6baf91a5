//! In-memory document index.
//!
//! The index maps a document id to its processed [`DocumentEntry`]. Entries
//! are inserted fully constructed behind an `Arc`, so a concurrent reader
//! either sees the whole entry or nothing — never a partially built one.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::document::DocumentEntry;

/// The in-memory store of processed documents.
///
/// No update or delete is exposed: a document id, once inserted, is
/// immutable for the process lifetime, and all state vanishes on restart.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    entries: RwLock<HashMap<String, Arc<DocumentEntry>>>,
}

impl DocumentIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a processed document. The insert is atomic from the readers'
    /// perspective.
    pub async fn put(&self, entry: DocumentEntry) -> Arc<DocumentEntry> {
        let entry = Arc::new(entry);
        let mut entries = self.entries.write().await;
        entries.insert(entry.document_id.clone(), Arc::clone(&entry));
        entry
    }

    /// Look up a document by id. An unknown id is `None`, never a fault.
    pub async fn get(&self, document_id: &str) -> Option<Arc<DocumentEntry>> {
        let entries = self.entries.read().await;
        entries.get(document_id).cloned()
    }

    /// Number of indexed documents.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the index holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
