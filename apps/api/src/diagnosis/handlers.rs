//! Axum route handlers for the diagnosis flow.

use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::diagnosis::metrics::{compute_metrics, radar_series, DiagnosisMetrics, RadarPoint};
use crate::diagnosis::models::DiagnosisResult;
use crate::errors::AppError;
use crate::extract::extract_strategy_text;
use crate::state::AppState;

/// Per-request inference credential. Never persisted, never logged.
const API_KEY_HEADER: &str = "x-api-key";
/// Optional session to overwrite; a fresh one is created when absent.
const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Serialize)]
pub struct DiagnosisResponse {
    pub session_id: Uuid,
    pub diagnosis: DiagnosisResult,
    pub metrics: DiagnosisMetrics,
    /// Severity-by-gap series for the radar chart.
    pub radar: Vec<RadarPoint>,
}

/// POST /api/v1/diagnosis
///
/// Multipart body: `pain_points` text field (required, non-empty) and an
/// optional `strategy_pdf` file. Runs the whole flow: credential check →
/// input check → PDF text extraction → single inference call → cache.
/// On any failure the session's previously cached result is left untouched.
pub async fn handle_diagnose(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<DiagnosisResponse>, AppError> {
    // Both precondition checks happen before any request is attempted.
    let api_key = header_value(&headers, API_KEY_HEADER).ok_or(AppError::MissingCredential)?;

    let session_id = match header_value(&headers, SESSION_HEADER) {
        Some(raw) => raw
            .parse::<Uuid>()
            .map_err(|_| AppError::MissingInput(format!("{SESSION_HEADER} must be a UUID")))?,
        None => Uuid::new_v4(),
    };

    let mut pain_points: Option<String> = None;
    let mut strategy_pdf: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MissingInput(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some("pain_points") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::MissingInput(format!("invalid pain_points field: {e}")))?;
                pain_points = Some(text);
            }
            Some("strategy_pdf") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::MissingInput(format!("invalid strategy_pdf field: {e}")))?;
                if !bytes.is_empty() {
                    strategy_pdf = Some(bytes.to_vec());
                }
            }
            // Unknown fields are ignored, not rejected.
            _ => {}
        }
    }

    let pain_points = pain_points.unwrap_or_default();
    if pain_points.trim().is_empty() {
        return Err(AppError::MissingInput(
            "pain_points cannot be empty".to_string(),
        ));
    }

    let strategy_text = extract_strategy_text(strategy_pdf.as_deref())?;

    let diagnosis = state
        .provider
        .diagnose(&api_key, &pain_points, &strategy_text)
        .await?;

    // Only a success reaches the cache.
    state.sessions.insert(session_id, diagnosis.clone());

    Ok(Json(render_diagnosis(session_id, diagnosis)))
}

/// GET /api/v1/diagnosis/:session_id
///
/// Returns the most recent successfully cached diagnosis with its metrics.
pub async fn handle_get_diagnosis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<DiagnosisResponse>, AppError> {
    let diagnosis = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    Ok(Json(render_diagnosis(session_id, diagnosis)))
}

fn render_diagnosis(session_id: Uuid, diagnosis: DiagnosisResult) -> DiagnosisResponse {
    let metrics = compute_metrics(&diagnosis);
    let radar = radar_series(&diagnosis);
    DiagnosisResponse {
        session_id,
        metrics,
        radar,
        diagnosis,
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
