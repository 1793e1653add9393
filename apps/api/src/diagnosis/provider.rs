//! Diagnosis Requester — the narrow seam around the remote inference call.
//!
//! `AppState` holds an `Arc<dyn DiagnosisProvider>`, so the underlying model
//! provider is swappable (and mockable in tests) without touching handlers or
//! presentation logic.

use async_trait::async_trait;
use tracing::info;

use crate::diagnosis::models::{DiagnosisResult, RawDiagnosis};
use crate::diagnosis::prompts::{DIAGNOSIS_PROMPT_TEMPLATE, DIAGNOSIS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Document text is truncated to this many characters before prompt
/// inclusion, bounding the request payload.
pub const MAX_STRATEGY_CHARS: usize = 2000;

/// Request in, structured result or typed error out. One attempt per call;
/// retrying is the caller's (i.e. the user's) decision.
#[async_trait]
pub trait DiagnosisProvider: Send + Sync {
    async fn diagnose(
        &self,
        api_key: &str,
        pain_points: &str,
        strategy_text: &str,
    ) -> Result<DiagnosisResult, AppError>;
}

/// Production provider backed by the shared `LlmClient`.
pub struct LlmDiagnosisProvider {
    llm: LlmClient,
}

impl LlmDiagnosisProvider {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl DiagnosisProvider for LlmDiagnosisProvider {
    async fn diagnose(
        &self,
        api_key: &str,
        pain_points: &str,
        strategy_text: &str,
    ) -> Result<DiagnosisResult, AppError> {
        let prompt = DIAGNOSIS_PROMPT_TEMPLATE
            .replace("{pain_points}", pain_points)
            .replace("{strategy_text}", &truncate_chars(strategy_text, MAX_STRATEGY_CHARS));

        let raw: RawDiagnosis = self
            .llm
            .call_json(api_key, DIAGNOSIS_SYSTEM, &prompt)
            .await
            .map_err(|e| AppError::Diagnosis(format!("inference call failed: {e}")))?;

        let result = DiagnosisResult::from(raw);
        info!(
            "Diagnosis parsed: {} gaps, {} plan modules, {} recommended specialties",
            result.identified_gaps.len(),
            result.recommended_plan.len(),
            result.recommended_specialties.len()
        );

        Ok(result)
    }
}

/// Truncates on a character boundary, never mid-codepoint.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}
