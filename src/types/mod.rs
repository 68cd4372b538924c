//! Core domain types shared by the engine, config and API layers.

mod drug;
mod patient;
mod recommendation;

pub use drug::{DrugCatalog, DrugId, DrugProfile, DrugSelection};
pub use patient::{AsaClass, BodyWeight, PatientContext, ProcedureDuration};
pub use recommendation::{
    CostSaving, DosageComparison, RecommendationResult, RiskComparison, TimelinePoint,
};
