//! Recommendation Engine
//!
//! Pure, synchronous transformation from validated patient/procedure input
//! into a [`RecommendationResult`]. No I/O, no shared state: all randomness
//! comes from the generator the caller passes in, so a seeded generator
//! reproduces the output bit for bit.
//!
//! ## Operations
//! - `compute_dosage()` / `compute_risk_score()` - placeholder formulas
//! - `compute_drug_timeline()` - decaying concentration curves with jitter
//! - `compute_environmental_impact()` - kg CO2e, linear in hours
//! - `compute_risk_comparison()` / `compute_cost_savings()` /
//!   `compute_dosage_comparison()` - current vs optimized datasets
//! - `summarize()` / `dosage_recommendations()` - text blocks
//!
//! Random draws happen in a fixed order (timeline, risk, dosage comparison,
//! cost) which is part of the reproducibility contract.

pub mod comparison;
pub mod dosage;
pub mod impact;
pub mod summary;
pub mod timeline;
pub mod validation;

pub use comparison::{
    compute_cost_savings, compute_dosage_comparison, compute_risk_comparison,
    risk_reduction_percent,
};
pub use dosage::{compute_dosage, compute_risk_score, dosage_recommendations};
pub use impact::compute_environmental_impact;
pub use summary::{format_thousands, summarize};
pub use timeline::compute_drug_timeline;
pub use validation::{validate, RecommendationRequest, ValidatedInput, ValidationError};

use rand::Rng;
use tracing::debug;

use crate::config::{DashboardConfig, EngineConfig};
use crate::types::{DrugCatalog, RecommendationResult};

/// Engine bound to one catalog and one set of tuning constants.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: DrugCatalog,
    settings: EngineConfig,
}

impl RecommendationEngine {
    pub const fn new(catalog: DrugCatalog, settings: EngineConfig) -> Self {
        Self { catalog, settings }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.catalog.clone(), config.engine.clone())
    }

    pub const fn catalog(&self) -> &DrugCatalog {
        &self.catalog
    }

    pub const fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    /// Validate a form payload against this engine's catalog and settings.
    pub fn validate(&self, request: &RecommendationRequest) -> Result<ValidatedInput, ValidationError> {
        validate(request, &self.catalog, self.settings.require_patient_profile)
    }

    /// Validate and compute in one step. `Err` means "no update": the caller
    /// keeps whatever it rendered last.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        request: &RecommendationRequest,
        rng: &mut R,
    ) -> Result<RecommendationResult, ValidationError> {
        let input = self.validate(request)?;
        Ok(self.recommend(&input, rng))
    }

    /// Compute the full result for validated input.
    pub fn recommend<R: Rng + ?Sized>(&self, input: &ValidatedInput, rng: &mut R) -> RecommendationResult {
        let patient = input.patient();
        let drugs = input.drugs();
        let s = &self.settings;

        let dosage_per_drug = drugs
            .ids()
            .map(|id| (id.clone(), compute_dosage(patient.weight, id, patient.duration)))
            .collect();
        let risk_score = compute_risk_score(patient.weight, drugs, patient.duration);

        let timeline = compute_drug_timeline(
            patient.duration,
            drugs,
            s.timeline_samples,
            s.jitter_clamp_sigma,
            rng,
        );
        let risk_comparison = compute_risk_comparison(&s.risk, rng);
        let dosage_comparison = compute_dosage_comparison(drugs, &s.dosage_comparison, rng);
        let cost_savings = compute_cost_savings(&s.cost, rng);
        let environmental_impact = compute_environmental_impact(drugs, patient.duration);

        let mut result = RecommendationResult {
            patient: *patient,
            drug_names: drugs.iter().map(|d| (d.id.clone(), d.name.clone())).collect(),
            dosage_per_drug,
            risk_score,
            timeline,
            risk_comparison,
            dosage_comparison,
            cost_savings,
            environmental_impact,
            summary_text: Vec::new(),
            recommendation_text: Vec::new(),
        };
        result.summary_text = summarize(&result);
        result.recommendation_text = dosage_recommendations(&result);

        debug!(
            drugs = drugs.len(),
            weight_kg = patient.weight.kg(),
            duration_min = patient.duration.minutes(),
            risk_score,
            "Recommendation computed"
        );

        result
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(DrugCatalog::default(), EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DrugId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(weight: f64, drugs: &[&str], duration: f64) -> RecommendationRequest {
        RecommendationRequest {
            weight: Some(weight),
            drugs: Some(drugs.iter().map(|d| (*d).to_string()).collect()),
            duration_minutes: Some(duration),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_case_single_drug() {
        let engine = RecommendationEngine::default();
        let mut rng = StdRng::seed_from_u64(1);
        let result = engine.evaluate(&request(70.0, &["drug_a"], 60.0), &mut rng).unwrap();

        let id = DrugId::from("drug_a");
        assert!((result.dosage_per_drug[&id] - 420.0).abs() < 1e-9);
        assert!((result.risk_score - 0.857).abs() < 1e-3);
        assert_eq!(result.environmental_impact[&id], 8.5);
        assert_eq!(result.timeline[&id].len(), 100);
        assert_eq!(result.drug_name(&id), "Propofol");
    }

    #[test]
    fn test_reference_case_two_drugs() {
        let engine = RecommendationEngine::default();
        let mut rng = StdRng::seed_from_u64(2);
        let result = engine
            .evaluate(&request(50.0, &["drug_a", "drug_b"], 30.0), &mut rng)
            .unwrap();
        assert!((result.risk_score - 1.2).abs() < 1e-12);
        assert_eq!(result.dosage_per_drug.len(), 2);
        assert_eq!(result.dosage_comparison.len(), 2);
    }

    #[test]
    fn test_same_seed_same_output() {
        let engine = RecommendationEngine::default();
        let req = request(82.0, &["drug_c", "drug_a"], 95.0);
        let first = engine.evaluate(&req, &mut StdRng::seed_from_u64(99)).unwrap();
        let second = engine.evaluate(&req, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seed_changes_random_parts_only() {
        let engine = RecommendationEngine::default();
        let req = request(82.0, &["drug_b"], 95.0);
        let a = engine.evaluate(&req, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = engine.evaluate(&req, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(a.dosage_per_drug, b.dosage_per_drug);
        assert_eq!(a.risk_score, b.risk_score);
        assert_eq!(a.environmental_impact, b.environmental_impact);
        assert_ne!(a.cost_savings, b.cost_savings);
    }

    #[test]
    fn test_incomplete_input_is_no_update() {
        let engine = RecommendationEngine::default();
        let mut rng = StdRng::seed_from_u64(0);
        let err = engine.evaluate(&request(70.0, &[], 60.0), &mut rng).unwrap_err();
        assert_eq!(err, ValidationError::EmptyDrugSelection);
    }

    #[test]
    fn test_summary_lines() {
        let engine = RecommendationEngine::default();
        let mut rng = StdRng::seed_from_u64(4);
        let result = engine
            .evaluate(&request(70.0, &["drug_a", "drug_c"], 120.0), &mut rng)
            .unwrap();

        assert_eq!(result.summary_text.len(), 3);
        assert!(result.summary_text[0].starts_with("Total Potential Savings: $"));
        assert_eq!(result.summary_text[1], "Risk Reduction: 40.0%");
        // (8.5 + 9.1) * 2 hours
        assert_eq!(result.summary_text[2], "Total Environmental Impact: 35.2 kg CO2e");
    }

    #[test]
    fn test_recommendation_text_lists_each_drug_then_score() {
        let engine = RecommendationEngine::default();
        let mut rng = StdRng::seed_from_u64(4);
        let result = engine
            .evaluate(&request(70.0, &["drug_b", "drug_a"], 60.0), &mut rng)
            .unwrap();
        assert_eq!(
            result.recommendation_text,
            vec![
                "Propofol: 420.00 mg".to_string(),
                "Remifentanil: 420.00 mg".to_string(),
                "Risk Score: 1.71".to_string(),
            ]
        );
    }
}
