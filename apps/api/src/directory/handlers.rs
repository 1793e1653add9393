//! Axum route handlers for expert matching and the schedule stub.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::matching::{filter_experts, ExpertSelection, SpecialtyFilter};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExpertsQuery {
    /// "all" (default) or a specialty name to match by containment.
    pub specialty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExpertsResponse {
    pub session_id: Uuid,
    pub filter: String,
    /// Specialties the diagnosis recommended — the UI builds its filter
    /// selector from these plus "all".
    pub recommended_specialties: Vec<String>,
    #[serde(flatten)]
    pub selection: ExpertSelection,
}

/// GET /api/v1/diagnosis/:session_id/experts?specialty=…
///
/// Filters the mock directory against the session's cached diagnosis.
pub async fn handle_list_experts(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ExpertsQuery>,
) -> Result<Json<ExpertsResponse>, AppError> {
    let diagnosis = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let filter = SpecialtyFilter::parse(query.specialty.as_deref());
    let selection = filter_experts(
        &state.directory,
        &diagnosis.recommended_specialties,
        &filter,
        state.config.demo_fallback,
        &mut rand::thread_rng(),
    );

    Ok(Json(ExpertsResponse {
        session_id,
        filter: match &filter {
            SpecialtyFilter::All => "all".to_string(),
            SpecialtyFilter::Named(name) => name.clone(),
        },
        recommended_specialties: diagnosis.recommended_specialties,
        selection,
    }))
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub expert_id: String,
    pub expert_name: String,
    pub message: String,
    pub scheduled_at: DateTime<Utc>,
    /// Always true: no email is sent and no calendar event is created.
    pub simulated: bool,
}

/// POST /api/v1/experts/:expert_id/schedule
///
/// Pure acknowledgment stub — the demo's stand-in for a real calendar/email
/// integration. No side effect beyond the response body.
pub async fn handle_schedule(
    State(state): State<AppState>,
    Path(expert_id): Path<String>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let expert = state
        .directory
        .get(&expert_id)
        .ok_or_else(|| AppError::NotFound(format!("Expert {expert_id} not found")))?;

    Ok(Json(ScheduleResponse {
        expert_id: expert.id.clone(),
        expert_name: expert.name.clone(),
        message: format!(
            "Request sent to {}. A calendar event was simulated for this demo.",
            expert.email
        ),
        scheduled_at: Utc::now(),
        simulated: true,
    }))
}
