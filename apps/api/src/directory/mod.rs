//! Mock expert directory — a stand-in for an external directory service.
//!
//! Generated exactly once at process start and held immutable in `AppState`.
//! Explicit state rather than hidden memoization so tests and multi-session
//! deployments get a directory they can see and share.

pub mod handlers;
pub mod matching;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed size of the mock directory.
pub const DIRECTORY_SIZE: usize = 15;

/// The fixed specialty set. The model is steered toward recommending from
/// this set, but its reply may contain anything — matching is defensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specialty {
    #[serde(rename = "Liderazgo")]
    Liderazgo,
    #[serde(rename = "Python & Data")]
    PythonData,
    #[serde(rename = "Soft Skills")]
    SoftSkills,
    #[serde(rename = "Agile")]
    Agile,
    #[serde(rename = "Ventas")]
    Ventas,
    #[serde(rename = "Ciberseguridad")]
    Ciberseguridad,
}

impl Specialty {
    pub const ALL: [Specialty; 6] = [
        Specialty::Liderazgo,
        Specialty::PythonData,
        Specialty::SoftSkills,
        Specialty::Agile,
        Specialty::Ventas,
        Specialty::Ciberseguridad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Liderazgo => "Liderazgo",
            Specialty::PythonData => "Python & Data",
            Specialty::SoftSkills => "Soft Skills",
            Specialty::Agile => "Agile",
            Specialty::Ventas => "Ventas",
            Specialty::Ciberseguridad => "Ciberseguridad",
        }
    }
}

/// One mock expert/consultant record. Immutable after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertRecord {
    pub id: String,
    pub name: String,
    pub specialty: Specialty,
    /// One decimal place, within [3.5, 5.0].
    pub rating: f64,
    /// USD per hour, within [50, 200].
    pub hourly_rate: u32,
    pub email: String,
}

const FIRST_NAMES: [&str; 12] = [
    "Lucia", "Mateo", "Sofia", "Alejandro", "Carmen", "Javier", "Valentina", "Diego", "Marta",
    "Pablo", "Elena", "Andres",
];

const LAST_NAMES: [&str; 12] = [
    "Garcia", "Martinez", "Lopez", "Sanchez", "Fernandez", "Romero", "Navarro", "Torres", "Vega",
    "Molina", "Serrano", "Castro",
];

/// The in-memory table of expert records, ordered by id.
#[derive(Debug, Clone)]
pub struct Directory {
    experts: Vec<ExpertRecord>,
}

impl Directory {
    /// Generates the fixed-size mock table. Attributes are drawn uniformly:
    /// specialty over the fixed set, rating over [3.5, 5.0] rounded to one
    /// decimal, hourly rate over [50, 200].
    pub fn generate(rng: &mut impl Rng) -> Self {
        let experts = (0..DIRECTORY_SIZE)
            .map(|i| {
                let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Lucia");
                let last = LAST_NAMES.choose(rng).copied().unwrap_or("Garcia");
                let specialty = *Specialty::ALL.choose(rng).unwrap_or(&Specialty::Liderazgo);
                let rating = (rng.gen_range(3.5..=5.0) * 10.0_f64).round() / 10.0;

                ExpertRecord {
                    id: format!("EXP-{}", i + 100),
                    name: format!("{first} {last}"),
                    specialty,
                    rating,
                    hourly_rate: rng.gen_range(50..=200),
                    email: format!(
                        "{}.{}@consultores.example",
                        first.to_lowercase(),
                        last.to_lowercase()
                    ),
                }
            })
            .collect();

        Self { experts }
    }

    /// Builds a directory from fixed records. Test seam — production code
    /// only ever generates.
    #[cfg(test)]
    pub(crate) fn from_records(experts: Vec<ExpertRecord>) -> Self {
        Self { experts }
    }

    pub fn experts(&self) -> &[ExpertRecord] {
        &self.experts
    }

    pub fn get(&self, id: &str) -> Option<&ExpertRecord> {
        self.experts.iter().find(|e| e.id == id)
    }
}
