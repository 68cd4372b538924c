//! Form payload validation.
//!
//! The dashboard posts whatever the form currently holds; every field may be
//! missing. Validation turns that into a [`ValidatedInput`] or a
//! [`ValidationError`], which callers treat as "no update".

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::defaults::{MAX_AGE_YEARS, MAX_DURATION_MINUTES, MAX_WEIGHT_KG, MIN_WEIGHT_KG};
use crate::types::{
    AsaClass, BodyWeight, DrugCatalog, DrugSelection, PatientContext, ProcedureDuration,
};

/// Raw form state as submitted by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Patient weight (kg)
    #[serde(default)]
    pub weight: Option<f64>,
    /// Patient age (years). Numeric inputs may send fractions; those are
    /// rejected by [`validate`], not by deserialization.
    #[serde(default)]
    pub age: Option<f64>,
    /// ASA physical-status score (1-6)
    #[serde(default, alias = "asa")]
    pub asa_score: Option<f64>,
    /// Selected catalog drug ids
    #[serde(default)]
    pub drugs: Option<Vec<String>>,
    /// Procedure duration (minutes)
    #[serde(default, alias = "duration")]
    pub duration_minutes: Option<f64>,
    /// Seed for the illustrative random values; fresh entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Input that passed validation. Only constructed by [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    patient: PatientContext,
    drugs: DrugSelection,
}

impl ValidatedInput {
    pub const fn patient(&self) -> &PatientContext {
        &self.patient
    }

    pub const fn drugs(&self) -> &DrugSelection {
        &self.drugs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("patient weight is required")]
    MissingWeight,

    #[error("patient weight must be between {} and {} kg", MIN_WEIGHT_KG, MAX_WEIGHT_KG)]
    InvalidWeight,

    #[error("procedure duration is required")]
    MissingDuration,

    #[error("procedure duration must be positive and at most {} minutes", MAX_DURATION_MINUTES)]
    InvalidDuration,

    #[error("select at least one drug")]
    EmptyDrugSelection,

    #[error("unknown drug '{0}'")]
    UnknownDrug(String),

    #[error("patient age is required")]
    MissingAge,

    #[error("patient age must be a whole number of years between 1 and {}", MAX_AGE_YEARS)]
    InvalidAge,

    #[error("ASA score is required")]
    MissingAsaScore,

    #[error("ASA score must be between 1 and 6")]
    InvalidAsaScore,
}

impl ValidationError {
    /// Stable machine-readable code for API clients.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingWeight => "MISSING_WEIGHT",
            Self::InvalidWeight => "INVALID_WEIGHT",
            Self::MissingDuration => "MISSING_DURATION",
            Self::InvalidDuration => "INVALID_DURATION",
            Self::EmptyDrugSelection => "EMPTY_DRUG_SELECTION",
            Self::UnknownDrug(_) => "UNKNOWN_DRUG",
            Self::MissingAge => "MISSING_AGE",
            Self::InvalidAge => "INVALID_AGE",
            Self::MissingAsaScore => "MISSING_ASA_SCORE",
            Self::InvalidAsaScore => "INVALID_ASA_SCORE",
        }
    }
}

/// Validate a form payload against the catalog.
///
/// Checks run in form order (weight, duration, drugs, age, ASA) and the first
/// failure is returned. With `require_patient_profile`, age and ASA score are
/// mandatory as well.
pub fn validate(
    request: &RecommendationRequest,
    catalog: &DrugCatalog,
    require_patient_profile: bool,
) -> Result<ValidatedInput, ValidationError> {
    let weight = request
        .weight
        .ok_or(ValidationError::MissingWeight)
        .and_then(|w| BodyWeight::new(w).ok_or(ValidationError::InvalidWeight))?;

    let duration = request
        .duration_minutes
        .ok_or(ValidationError::MissingDuration)
        .and_then(|d| ProcedureDuration::new(d).ok_or(ValidationError::InvalidDuration))?;

    let ids = request.drugs.as_deref().unwrap_or_default();
    let profiles = ids
        .iter()
        .map(|id| {
            catalog
                .get(id)
                .cloned()
                .ok_or_else(|| ValidationError::UnknownDrug(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let drugs = DrugSelection::new(profiles).ok_or(ValidationError::EmptyDrugSelection)?;

    let age_years = match request.age {
        Some(age) => Some(
            whole_number(age, 1, MAX_AGE_YEARS).ok_or(ValidationError::InvalidAge)?,
        ),
        None if require_patient_profile => return Err(ValidationError::MissingAge),
        None => None,
    };

    let asa = match request.asa_score {
        Some(score) => Some(
            whole_number(score, 1, 6)
                .and_then(|s| u8::try_from(s).ok())
                .and_then(AsaClass::from_score)
                .ok_or(ValidationError::InvalidAsaScore)?,
        ),
        None if require_patient_profile => return Err(ValidationError::MissingAsaScore),
        None => None,
    };

    Ok(ValidatedInput {
        patient: PatientContext {
            weight,
            age_years,
            asa,
            duration,
        },
        drugs,
    })
}

/// `value` as an integer in `[min, max]`, or `None` when it is fractional,
/// non-finite or out of range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(value: f64, min: u32, max: u32) -> Option<u32> {
    let in_range = value >= f64::from(min) && value <= f64::from(max);
    (in_range && value.fract() == 0.0).then_some(value as u32)
}
