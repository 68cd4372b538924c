//! Environmental impact estimate (kg CO2e), linear in procedure hours.

use std::collections::BTreeMap;

use crate::types::{DrugId, DrugSelection, ProcedureDuration};

pub fn compute_environmental_impact(
    drugs: &DrugSelection,
    duration: ProcedureDuration,
) -> BTreeMap<DrugId, f64> {
    drugs
        .iter()
        .map(|d| (d.id.clone(), d.impact_kg_co2e_per_hour * duration.minutes() / 60.0))
        .collect()
}
