//! Summary metrics and chart feeds computed from a cached diagnosis.

use serde::Serialize;

use crate::diagnosis::models::DiagnosisResult;

/// Display string when the gap list is empty and no average exists.
pub const NOT_APPLICABLE: &str = "not applicable";

/// The three headline metrics of the results dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisMetrics {
    pub gap_count: usize,
    pub module_count: usize,
    /// `None` when the gap list is empty — never a division by zero.
    pub average_severity: Option<f64>,
    /// Ready-to-render form of `average_severity`, e.g. "7.0" or
    /// "not applicable".
    pub average_severity_display: String,
}

/// One axis of the gap radar plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub axis: String,
    pub value: u8,
}

pub fn compute_metrics(result: &DiagnosisResult) -> DiagnosisMetrics {
    let gap_count = result.identified_gaps.len();

    let average_severity = if gap_count == 0 {
        None
    } else {
        let total: u32 = result.identified_gaps.iter().map(|g| g.severity as u32).sum();
        let mean = total as f64 / gap_count as f64;
        Some((mean * 10.0).round() / 10.0)
    };

    DiagnosisMetrics {
        gap_count,
        module_count: result.recommended_plan.len(),
        average_severity,
        average_severity_display: average_severity
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
    }
}

/// Severity series keyed by gap name, in reply order. The chart closes the
/// polygon; this feed does not repeat the first point.
pub fn radar_series(result: &DiagnosisResult) -> Vec<RadarPoint> {
    result
        .identified_gaps
        .iter()
        .map(|g| RadarPoint {
            axis: g.gap.clone(),
            value: g.severity,
        })
        .collect()
}
