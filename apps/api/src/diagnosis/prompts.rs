// All LLM prompt constants for the diagnosis flow.

/// System prompt for the training-gap diagnosis — enforces JSON-only output.
pub const DIAGNOSIS_SYSTEM: &str =
    "You are a senior HR consultant specialized in corporate training. \
    Analyze a company's stated pain points and strategic context and produce \
    a training-gap diagnosis. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Diagnosis prompt template.
/// Replace `{pain_points}` and `{strategy_text}` before sending; the strategy
/// text must already be truncated by the caller.
pub const DIAGNOSIS_PROMPT_TEMPLATE: &str = r#"Analyze the company's training needs below and produce a diagnosis.

Return a JSON object with this EXACT schema (no extra fields):
{
  "diagnosis_summary": "Executive summary of the detected problem (max 50 words)",
  "identified_gaps": [
    {"gap": "Name of the gap", "severity": 7, "category": "Tecnica"}
  ],
  "recommended_plan": [
    {"module": "Module name", "duration": "Estimated hours", "objective": "Learning objective"}
  ],
  "recommended_specialties": ["Especialidad1", "Especialidad2"]
}

Rules:
- "severity" is an integer from 1 (mild) to 10 (critical).
- "category" is one of: "Tecnica", "Blanda", "Estrategica".
- "recommended_specialties" should be drawn from this consultant directory
  where applicable: "Liderazgo", "Python & Data", "Soft Skills", "Agile",
  "Ventas", "Ciberseguridad".

PAIN POINTS / TRAINING NEEDS:
{pain_points}

STRATEGIC CONTEXT (extracted from uploaded document, may be truncated):
{strategy_text}"#;
