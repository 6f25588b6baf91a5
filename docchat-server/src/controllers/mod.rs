//! Request handlers, one module per API surface.

pub mod chat;
pub mod session;
pub mod status;
pub mod upload;
