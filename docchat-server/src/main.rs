use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use docchat_gemini::GeminiClient;
use docchat_rag::{OllamaEmbeddingProvider, OllamaSynthesizer, RagPipeline};
use docchat_server::{AppState, Settings, create_router};
use docchat_session::InMemorySessionStore;

/// How often the warmup task probes the local models until they answer.
const WARMUP_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docchat=info,tower_http=info")),
        )
        .init();

    let config_path =
        PathBuf::from(std::env::var("DOCCHAT_CONFIG").unwrap_or_else(|_| "config.yaml".into()));
    let settings = if config_path.exists() {
        Settings::load(&config_path)?
    } else {
        info!(path = %config_path.display(), "no config file found, using defaults");
        Settings::default()
    };

    tokio::fs::create_dir_all(&settings.upload_dir)
        .await
        .with_context(|| format!("failed to create '{}'", settings.upload_dir.display()))?;

    let embedder = OllamaEmbeddingProvider::new(
        &settings.inference_url,
        &settings.embedding_model,
        settings.embedding_dimensions,
    )?;
    let synthesizer = OllamaSynthesizer::new(&settings.inference_url, &settings.generation_model)?;
    let pipeline = Arc::new(
        RagPipeline::builder()
            .config(settings.rag_config()?)
            .embedding_provider(Arc::new(embedder))
            .synthesizer(Arc::new(synthesizer))
            .build()?,
    );

    let gateway = match GeminiClient::from_env() {
        Ok(client) => {
            info!(model = %client.model(), "remote chat gateway configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!(reason = %e, "remote chat gateway disabled");
            None
        }
    };

    let state = AppState::new(
        pipeline,
        Arc::new(InMemorySessionStore::new()),
        gateway,
        settings.upload_dir.clone(),
    );

    spawn_warmup_probe(state.clone());

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind '{addr}'"))?;
    info!(%addr, "listening");

    axum::serve(listener, create_router(state)).await.context("server exited")?;
    Ok(())
}

/// Poll the local models until both answer, then flip the readiness flag.
/// The server accepts requests the whole time; clients watch `/api/status`.
fn spawn_warmup_probe(state: AppState) {
    tokio::spawn(async move {
        loop {
            if state.pipeline.is_ready().await {
                state.set_models_ready();
                info!("local models ready");
                return;
            }
            tokio::time::sleep(WARMUP_POLL_INTERVAL).await;
        }
    });
}
