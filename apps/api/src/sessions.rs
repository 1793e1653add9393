//! Session-scoped diagnosis cache.
//!
//! The last successful diagnosis per session, held in process memory only.
//! A new successful request overwrites the entry whole; a failed request
//! never touches it. No persistence across restarts.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::diagnosis::models::DiagnosisResult;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, DiagnosisResult>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached result for this session.
    pub fn insert(&self, session_id: Uuid, result: DiagnosisResult) {
        let mut sessions = self.inner.write().unwrap_or_else(|e| e.into_inner());
        sessions.insert(session_id, result);
    }

    pub fn get(&self, session_id: &Uuid) -> Option<DiagnosisResult> {
        let sessions = self.inner.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(session_id).cloned()
    }
}
