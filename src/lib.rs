//! Anesthesia Dashboard: perioperative decision-support illustrations
//!
//! Turns a patient/procedure description into dosage suggestions, a risk
//! score, concentration timelines and current-vs-optimized comparisons.
//!
//! ## Architecture
//!
//! - **Types**: validated patient context, drug catalog, result records
//! - **Engine**: pure computation, randomness injected by the caller
//! - **Config**: TOML file with catalog and model constants
//! - **API**: axum server, chart specs and the embedded dashboard page

pub mod api;
pub mod config;
pub mod engine;
pub mod types;

pub use config::DashboardConfig;

pub use engine::{RecommendationEngine, RecommendationRequest, ValidationError};

pub use types::{
    AsaClass, BodyWeight, DrugCatalog, DrugId, DrugProfile, DrugSelection, PatientContext,
    ProcedureDuration, RecommendationResult,
};
