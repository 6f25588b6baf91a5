//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use docchat_gemini::GeminiClient;
use docchat_rag::RagPipeline;
use docchat_session::InMemorySessionStore;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RagPipeline>,
    pub sessions: Arc<InMemorySessionStore>,
    /// Remote chat gateway; `None` when no API key was configured, in which
    /// case general chat returns an upstream error instead of failing boot.
    pub gateway: Option<Arc<GeminiClient>>,
    /// Set by the warmup task once both local models answer readiness
    /// probes. Requests are accepted before that; only `/api/status`
    /// reports the flag.
    pub models_ready: Arc<AtomicBool>,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(
        pipeline: Arc<RagPipeline>,
        sessions: Arc<InMemorySessionStore>,
        gateway: Option<Arc<GeminiClient>>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            pipeline,
            sessions,
            gateway,
            models_ready: Arc::new(AtomicBool::new(false)),
            upload_dir,
        }
    }

    pub fn models_ready(&self) -> bool {
        self.models_ready.load(Ordering::Relaxed)
    }

    pub fn set_models_ready(&self) {
        self.models_ready.store(true, Ordering::Relaxed);
    }
}
