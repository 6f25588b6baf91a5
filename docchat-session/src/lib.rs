//! Per-client chat history.
//!
//! Each client id owns two independent logs: one for document
//! question-answering and one for general-knowledge chat. The store is
//! process-local and unbounded; persistence is out of scope.

pub mod message;
pub mod store;

pub use message::{Message, Role};
pub use store::{InMemorySessionStore, LogKind, SessionLogs};
