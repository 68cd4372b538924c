//! Dosage and risk-score placeholders.
//!
//! Both formulas are simple placeholders with no randomness; every number
//! they produce can be checked by hand.

use crate::config::defaults::DOSAGE_FACTOR_MG_PER_KG_MIN;
use crate::types::{BodyWeight, DrugId, DrugSelection, ProcedureDuration, RecommendationResult};

/// Recommended dosage (mg) for one drug: `weight * 0.1 * duration`.
///
/// The drug does not currently influence the result.
pub fn compute_dosage(weight: BodyWeight, _drug: &DrugId, duration: ProcedureDuration) -> f64 {
    weight.kg() * DOSAGE_FACTOR_MG_PER_KG_MIN * duration.minutes()
}

/// Unitless aggregate risk: `|drugs| * duration / weight`.
///
/// `BodyWeight` is strictly positive, so the division is always defined.
pub fn compute_risk_score(
    weight: BodyWeight,
    drugs: &DrugSelection,
    duration: ProcedureDuration,
) -> f64 {
    drugs.len() as f64 * duration.minutes() / weight.kg()
}

/// Per-drug dosage lines followed by the risk score line.
pub fn dosage_recommendations(result: &RecommendationResult) -> Vec<String> {
    result
        .dosage_per_drug
        .iter()
        .map(|(id, mg)| format!("{}: {mg:.2} mg", result.drug_name(id)))
        .chain(std::iter::once(format!("Risk Score: {:.2}", result.risk_score)))
        .collect()
}
