//! Current-practice vs optimized comparisons: side-effect risk, relative
//! dosage and cost.
//!
//! Each comparison draws a random baseline and derives the optimized value
//! deterministically from it, so the optimized/current ratio is exact for
//! every seed.

use rand::Rng;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

use crate::config::{CostModelConfig, DosageComparisonConfig, RiskModelConfig};
use crate::types::{CostSaving, DosageComparison, DrugId, DrugSelection, RiskComparison};

/// Uniform sample from `[min, max)`. Returns `min` when the range is empty
/// (only reachable with an unvalidated config).
fn sample_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Per-category side-effect risk, in percent.
///
/// `current_percent` is the sampled baseline probability times 100;
/// `optimized_percent` is exactly `current_percent * optimized_fraction`.
pub fn compute_risk_comparison<R: Rng + ?Sized>(
    model: &RiskModelConfig,
    rng: &mut R,
) -> Vec<RiskComparison> {
    model
        .categories
        .iter()
        .map(|category| {
            let current_percent = sample_between(rng, model.baseline_min, model.baseline_max) * 100.0;
            RiskComparison {
                category: category.clone(),
                current_percent,
                optimized_percent: current_percent * model.optimized_fraction,
            }
        })
        .collect()
}

/// Percentage reduction of mean risk from current practice to the
/// optimized protocol. Zero when there is nothing to compare.
pub fn risk_reduction_percent(comparisons: &[RiskComparison]) -> f64 {
    if comparisons.is_empty() {
        return 0.0;
    }
    let mean_current = comparisons.iter().map(|c| c.current_percent).mean();
    let mean_optimized = comparisons.iter().map(|c| c.optimized_percent).mean();
    if mean_current > 0.0 {
        (1.0 - mean_optimized / mean_current) * 100.0
    } else {
        0.0
    }
}

/// Per-drug current-practice dosage relative to the optimal reference.
pub fn compute_dosage_comparison<R: Rng + ?Sized>(
    drugs: &DrugSelection,
    model: &DosageComparisonConfig,
    rng: &mut R,
) -> BTreeMap<DrugId, DosageComparison> {
    drugs
        .ids()
        .map(|id| {
            let comparison = DosageComparison {
                current_relative: sample_between(rng, model.current_min, model.current_max),
                optimal_relative: model.optimal_reference,
            };
            (id.clone(), comparison)
        })
        .collect()
}

/// Per-category cost baseline, optimized cost and the difference.
pub fn compute_cost_savings<R: Rng + ?Sized>(model: &CostModelConfig, rng: &mut R) -> Vec<CostSaving> {
    model
        .categories
        .iter()
        .map(|category| {
            let baseline = sample_between(rng, model.baseline_min, model.baseline_max);
            let optimized = baseline * model.optimized_fraction;
            CostSaving {
                category: category.clone(),
                baseline,
                optimized,
                savings: baseline - optimized,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DrugCatalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_risk_values_stay_in_configured_range() {
        let model = RiskModelConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            for c in compute_risk_comparison(&model, &mut rng) {
                assert!((30.0..=60.0).contains(&c.current_percent), "{}", c.current_percent);
                assert_eq!(c.optimized_percent, c.current_percent * 0.6);
            }
        }
    }

    #[test]
    fn test_risk_categories_keep_configured_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let categories: Vec<String> = compute_risk_comparison(&RiskModelConfig::default(), &mut rng)
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(
            categories,
            vec!["Delirium", "PONV", "Respiratory Depression", "Delayed Recovery"]
        );
    }

    #[test]
    fn test_risk_reduction_matches_fraction() {
        let mut rng = StdRng::seed_from_u64(11);
        let comparisons = compute_risk_comparison(&RiskModelConfig::default(), &mut rng);
        assert!((risk_reduction_percent(&comparisons) - 40.0).abs() < 1e-9);
        assert_eq!(risk_reduction_percent(&[]), 0.0);
    }

    #[test]
    fn test_cost_savings_are_baseline_minus_optimized() {
        let model = CostModelConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let savings = compute_cost_savings(&model, &mut rng);
        assert_eq!(savings.len(), 4);
        for s in savings {
            assert!((1000.0..=5000.0).contains(&s.baseline));
            assert_eq!(s.optimized, s.baseline * 0.7);
            assert_eq!(s.savings, s.baseline - s.optimized);
            assert!(s.savings > 0.0);
        }
    }

    #[test]
    fn test_dosage_comparison_per_drug() {
        let drugs = DrugSelection::new(DrugCatalog::default().iter().cloned()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let comparison =
            compute_dosage_comparison(&drugs, &DosageComparisonConfig::default(), &mut rng);
        assert_eq!(comparison.len(), 3);
        for c in comparison.values() {
            assert!((0.8..=1.2).contains(&c.current_relative));
            assert_eq!(c.optimal_relative, 1.0);
        }
    }

    #[test]
    fn test_sample_between_stays_in_half_open_range() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..1000 {
            let v = sample_between(&mut rng, 0.8, 1.2);
            assert!((0.8..1.2).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_degenerate_range_returns_min() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sample_between(&mut rng, 2.0, 2.0), 2.0);
    }
}
