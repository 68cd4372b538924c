//! Recommendation output types.
//!
//! A [`RecommendationResult`] is recomputed on every trigger and never stored.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{DrugId, PatientContext};

/// One sample on a drug concentration curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// Minutes since induction
    pub time: f64,
    pub concentration: f64,
}

/// Side-effect risk for one category, current practice vs optimized protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskComparison {
    pub category: String,
    pub current_percent: f64,
    pub optimized_percent: f64,
}

/// Current-practice dosage relative to the optimal reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DosageComparison {
    pub current_relative: f64,
    pub optimal_relative: f64,
}

/// Cost estimate for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSaving {
    pub category: String,
    pub baseline: f64,
    pub optimized: f64,
    pub savings: f64,
}

/// Full engine output for one trigger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub patient: PatientContext,
    /// Display names of the selected drugs
    pub drug_names: BTreeMap<DrugId, String>,
    /// Recommended dosage per drug (mg)
    pub dosage_per_drug: BTreeMap<DrugId, f64>,
    pub risk_score: f64,
    pub timeline: BTreeMap<DrugId, Vec<TimelinePoint>>,
    /// In configured category order
    pub risk_comparison: Vec<RiskComparison>,
    pub dosage_comparison: BTreeMap<DrugId, DosageComparison>,
    /// In configured category order
    pub cost_savings: Vec<CostSaving>,
    /// kg CO2e per drug
    pub environmental_impact: BTreeMap<DrugId, f64>,
    pub summary_text: Vec<String>,
    pub recommendation_text: Vec<String>,
}

impl RecommendationResult {
    pub fn total_savings(&self) -> f64 {
        self.cost_savings.iter().map(|c| c.savings).sum()
    }

    pub fn total_environmental_impact(&self) -> f64 {
        self.environmental_impact.values().sum()
    }

    /// Display name for a drug, falling back to its id.
    pub fn drug_name<'a>(&'a self, id: &'a DrugId) -> &'a str {
        self.drug_names.get(id).map_or(id.as_str(), String::as_str)
    }
}
