//! Diagnosis data model and the defensive conversion from raw model output.

use serde::{Deserialize, Serialize};

/// One identified skill/competency deficiency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapEntry {
    pub gap: String,
    /// Bounded 1..=10.
    pub severity: u8,
    /// Free-form tag, e.g. "Tecnica", "Blanda", "Estrategica".
    pub category: String,
}

/// One recommended training unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanModule {
    pub module: String,
    pub duration: String,
    pub objective: String,
}

/// The structured output of one successful diagnosis request. Created whole,
/// never partially updated; a new successful request replaces it entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub diagnosis_summary: String,
    pub identified_gaps: Vec<GapEntry>,
    pub recommended_plan: Vec<PlanModule>,
    pub recommended_specialties: Vec<String>,
}

pub(crate) const DEFAULT_SUMMARY: &str = "No summary provided by the model.";
const DEFAULT_SEVERITY: f64 = 5.0;

/// Raw reply shape. Every field is optional: the model is instructed to honor
/// the schema but is not trusted to. Severity is accepted as any number.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDiagnosis {
    #[serde(default)]
    diagnosis_summary: Option<String>,
    #[serde(default)]
    identified_gaps: Vec<RawGap>,
    #[serde(default)]
    recommended_plan: Vec<RawPlanModule>,
    #[serde(default)]
    recommended_specialties: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawGap {
    #[serde(default)]
    gap: Option<String>,
    #[serde(default)]
    severity: Option<f64>,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlanModule {
    #[serde(default)]
    module: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    objective: Option<String>,
}

impl From<RawDiagnosis> for DiagnosisResult {
    /// Applies explicit defaults for absent fields and drops entries that are
    /// unusable (a gap or module with no name). Severity is rounded and
    /// clamped into 1..=10.
    fn from(raw: RawDiagnosis) -> Self {
        let identified_gaps = raw
            .identified_gaps
            .into_iter()
            .filter_map(|g| {
                let gap = g.gap.filter(|name| !name.trim().is_empty())?;
                let severity = g.severity.unwrap_or(DEFAULT_SEVERITY).round();
                Some(GapEntry {
                    gap,
                    severity: severity.clamp(1.0, 10.0) as u8,
                    category: g.category.unwrap_or_else(|| "General".to_string()),
                })
            })
            .collect();

        let recommended_plan = raw
            .recommended_plan
            .into_iter()
            .filter_map(|m| {
                let module = m.module.filter(|name| !name.trim().is_empty())?;
                Some(PlanModule {
                    module,
                    duration: m.duration.unwrap_or_else(|| "N/A".to_string()),
                    objective: m.objective.unwrap_or_default(),
                })
            })
            .collect();

        DiagnosisResult {
            diagnosis_summary: raw
                .diagnosis_summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            identified_gaps,
            recommended_plan,
            recommended_specialties: raw.recommended_specialties,
        }
    }
}
