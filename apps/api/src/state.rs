use std::sync::Arc;

use crate::config::Config;
use crate::diagnosis::provider::DiagnosisProvider;
use crate::directory::Directory;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable diagnosis backend. Production: `LlmDiagnosisProvider`;
    /// tests swap in a mock without touching handlers.
    pub provider: Arc<dyn DiagnosisProvider>,
    /// Mock expert directory, generated once at startup and immutable.
    pub directory: Arc<Directory>,
    /// Per-session cache of the last successful diagnosis.
    pub sessions: SessionStore,
    pub config: Config,
}
