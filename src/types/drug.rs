//! Drug catalog and per-request drug selection.
//!
//! The catalog is fixed configuration data loaded once at startup. A
//! [`DrugSelection`] is the validated, non-empty subset chosen for one
//! computation; it carries resolved profiles so the engine never has to look
//! anything up.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier of a catalog drug (e.g. `drug_a`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrugId(String);

impl DrugId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DrugId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DrugId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// Drug Profile
// ============================================================================

/// Fixed per-drug constants used by the illustrative calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugProfile {
    pub id: DrugId,
    /// Display name shown in charts and text
    pub name: String,
    /// Baseline environmental impact (kg CO2e per hour of use)
    pub impact_kg_co2e_per_hour: f64,
    /// Concentration at t = 0 for the timeline curve
    pub peak_concentration: f64,
    /// Exponential decay constant (minutes)
    pub decay_minutes: f64,
    /// Standard deviation of the timeline jitter
    pub jitter_sd: f64,
}

impl DrugProfile {
    fn builtin(id: &str, name: &str, impact: f64, peak: f64, decay: f64, jitter_sd: f64) -> Self {
        Self {
            id: DrugId::from(id),
            name: name.to_string(),
            impact_kg_co2e_per_hour: impact,
            peak_concentration: peak,
            decay_minutes: decay,
            jitter_sd,
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Ordered list of drugs the dashboard offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugCatalog {
    #[serde(default = "default_drugs")]
    pub drugs: Vec<DrugProfile>,
}

fn default_drugs() -> Vec<DrugProfile> {
    vec![
        DrugProfile::builtin("drug_a", "Propofol", 8.5, 2.0, 30.0, 0.1),
        DrugProfile::builtin("drug_b", "Remifentanil", 6.2, 1.5, 20.0, 0.05),
        DrugProfile::builtin("drug_c", "Rocuronium", 9.1, 1.0, 40.0, 0.08),
    ]
}

impl Default for DrugCatalog {
    fn default() -> Self {
        Self {
            drugs: default_drugs(),
        }
    }
}

impl DrugCatalog {
    pub const fn new(drugs: Vec<DrugProfile>) -> Self {
        Self { drugs }
    }

    pub fn get(&self, id: &str) -> Option<&DrugProfile> {
        self.drugs.iter().find(|d| d.id.as_str() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrugProfile> {
        self.drugs.iter()
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Non-empty set of selected drugs, ordered by id.
///
/// Ordering is part of the contract: random draws are taken in this order,
/// so the same seed always yields the same output.
#[derive(Debug, Clone, PartialEq)]
pub struct DrugSelection {
    drugs: BTreeMap<DrugId, DrugProfile>,
}

impl DrugSelection {
    /// Returns `None` when `profiles` is empty. Duplicates collapse.
    pub fn new(profiles: impl IntoIterator<Item = DrugProfile>) -> Option<Self> {
        let drugs: BTreeMap<_, _> = profiles.into_iter().map(|p| (p.id.clone(), p)).collect();
        (!drugs.is_empty()).then_some(Self { drugs })
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrugProfile> {
        self.drugs.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &DrugId> {
        self.drugs.keys()
    }

    pub fn get(&self, id: &DrugId) -> Option<&DrugProfile> {
        self.drugs.get(id)
    }
}
