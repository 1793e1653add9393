mod config;
mod diagnosis;
mod directory;
mod errors;
mod extract;
mod llm_client;
mod routes;
mod sessions;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::diagnosis::provider::LlmDiagnosisProvider;
use crate::directory::Directory;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::sessions::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FormaDiag API v{}", env!("CARGO_PKG_VERSION"));

    // Generate the mock expert directory once for the process lifetime.
    // Stand-in for an external directory service; intentionally not persisted.
    let mut rng = StdRng::from_entropy();
    let directory = Arc::new(Directory::generate(&mut rng));
    info!("Mock expert directory generated ({} records)", directory.experts().len());

    // Initialize LLM client (credential arrives per request, not here)
    let llm = LlmClient::new(config.inference_url.clone(), config.llm_timeout_secs)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        provider: Arc::new(LlmDiagnosisProvider::new(llm)),
        directory,
        sessions: SessionStore::new(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
