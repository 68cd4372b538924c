//! Patient and procedure context: validated weight, duration, age and ASA class.

use serde::{Deserialize, Serialize};

use crate::config::defaults::{MAX_DURATION_MINUTES, MAX_WEIGHT_KG, MIN_WEIGHT_KG};

// ============================================================================
// Validated Scalars
// ============================================================================

/// Patient body weight in kilograms, within
/// `[MIN_WEIGHT_KG, MAX_WEIGHT_KG]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct BodyWeight(f64);

impl BodyWeight {
    /// Returns `None` for NaN or out-of-range weights.
    pub fn new(kg: f64) -> Option<Self> {
        (MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&kg).then_some(Self(kg))
    }

    pub const fn kg(self) -> f64 {
        self.0
    }
}

/// Procedure duration in minutes, in `(0, MAX_DURATION_MINUTES]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ProcedureDuration(f64);

impl ProcedureDuration {
    /// Returns `None` for zero, negative, NaN or over-long durations.
    pub fn new(minutes: f64) -> Option<Self> {
        (minutes > 0.0 && minutes <= MAX_DURATION_MINUTES).then_some(Self(minutes))
    }

    pub const fn minutes(self) -> f64 {
        self.0
    }

    pub fn hours(self) -> f64 {
        self.0 / 60.0
    }
}

// ============================================================================
// ASA Physical Status
// ============================================================================

/// ASA physical-status classification (I = healthy .. VI = brain-dead donor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AsaClass {
    I,
    II,
    III,
    IV,
    V,
    VI,
}

impl AsaClass {
    pub const ALL: [Self; 6] = [Self::I, Self::II, Self::III, Self::IV, Self::V, Self::VI];

    pub const fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(Self::I),
            2 => Some(Self::II),
            3 => Some(Self::III),
            4 => Some(Self::IV),
            5 => Some(Self::V),
            6 => Some(Self::VI),
            _ => None,
        }
    }

    pub const fn score(self) -> u8 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
            Self::IV => 4,
            Self::V => 5,
            Self::VI => 6,
        }
    }

    /// Short clinical description shown next to the selector.
    pub const fn description(self) -> &'static str {
        match self {
            Self::I => "Normal healthy patient",
            Self::II => "Mild systemic disease",
            Self::III => "Severe systemic disease",
            Self::IV => "Severe systemic disease, constant threat to life",
            Self::V => "Moribund, not expected to survive without the operation",
            Self::VI => "Declared brain-dead organ donor",
        }
    }
}

impl TryFrom<u8> for AsaClass {
    type Error = String;

    fn try_from(score: u8) -> Result<Self, Self::Error> {
        Self::from_score(score).ok_or_else(|| format!("ASA score must be 1-6, got {score}"))
    }
}

impl From<AsaClass> for u8 {
    fn from(class: AsaClass) -> Self {
        class.score()
    }
}

impl std::fmt::Display for AsaClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let roman = match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
            Self::VI => "VI",
        };
        write!(f, "ASA {roman}")
    }
}

// ============================================================================
// Patient Context
// ============================================================================

/// Everything known about the patient and procedure for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatientContext {
    pub weight: BodyWeight,
    pub age_years: Option<u32>,
    pub asa: Option<AsaClass>,
    pub duration: ProcedureDuration,
}
