//! Expert matching — filters the directory against the AI-recommended
//! specialties, with a demo-mode fallback so the caller never sees an empty
//! list unless the fallback is switched off.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::directory::{Directory, ExpertRecord};

/// Sample size when a specific specialty filter matches nothing.
pub const FALLBACK_SPECIFIC: usize = 3;
/// Sample size when the "all" filter matches nothing.
pub const FALLBACK_ALL: usize = 5;

/// The caller's filter selection. "all" (the default) means "everything the
/// diagnosis recommended"; anything else is a single specialty to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialtyFilter {
    All,
    Named(String),
}

impl SpecialtyFilter {
    /// Parses the `specialty` query parameter. Absent or "all" (any case)
    /// selects the default.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => SpecialtyFilter::All,
            Some(s) if s.trim().is_empty() || s.trim().eq_ignore_ascii_case("all") => {
                SpecialtyFilter::All
            }
            Some(s) => SpecialtyFilter::Named(s.trim().to_string()),
        }
    }
}

/// The outcome of a filter pass. `fallback` is true when the match set was
/// empty and a random sample was substituted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertSelection {
    pub experts: Vec<ExpertRecord>,
    pub fallback: bool,
}

/// Selects experts for the given filter.
///
/// Named filter: case-insensitive substring match on the specialty field.
/// "All": experts whose specialty is a member of the recommended set.
/// Either way, an empty match set falls back to a random sample
/// (3 for named, 5 for "all") when `demo_fallback` is on — intentional demo
/// behavior, not a bug. With the fallback off, empty means empty.
pub fn filter_experts(
    directory: &Directory,
    recommended: &[String],
    filter: &SpecialtyFilter,
    demo_fallback: bool,
    rng: &mut impl Rng,
) -> ExpertSelection {
    let (matched, sample_size) = match filter {
        SpecialtyFilter::Named(needle) => {
            let needle = needle.to_lowercase();
            let matched: Vec<ExpertRecord> = directory
                .experts()
                .iter()
                .filter(|e| e.specialty.as_str().to_lowercase().contains(&needle))
                .cloned()
                .collect();
            (matched, FALLBACK_SPECIFIC)
        }
        SpecialtyFilter::All => {
            let matched: Vec<ExpertRecord> = directory
                .experts()
                .iter()
                .filter(|e| recommended.iter().any(|r| r == e.specialty.as_str()))
                .cloned()
                .collect();
            (matched, FALLBACK_ALL)
        }
    };

    if !matched.is_empty() {
        return ExpertSelection {
            experts: matched,
            fallback: false,
        };
    }

    if !demo_fallback {
        return ExpertSelection {
            experts: Vec::new(),
            fallback: false,
        };
    }

    let sample: Vec<ExpertRecord> = directory
        .experts()
        .choose_multiple(rng, sample_size)
        .cloned()
        .collect();

    ExpertSelection {
        experts: sample,
        fallback: true,
    }
}
