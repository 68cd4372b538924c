//! Illustrative concentration-over-time curves.
//!
//! Not a pharmacokinetic model: each drug follows `peak * exp(-t / decay)`
//! with bounded normal jitter, purely so the chart has something to show.

use rand::Rng;
use rand_distr::StandardNormal;
use std::collections::BTreeMap;

use crate::types::{DrugId, DrugSelection, ProcedureDuration, TimelinePoint};

/// Evenly spaced sample times over `[0, duration]`, endpoints included.
pub fn sample_times(duration: ProcedureDuration, samples: usize) -> Vec<f64> {
    let samples = samples.max(2);
    let step = duration.minutes() / (samples - 1) as f64;
    (0..samples)
        .map(|i| {
            if i == samples - 1 {
                duration.minutes()
            } else {
                i as f64 * step
            }
        })
        .collect()
}

/// Simulate a concentration curve for every selected drug.
///
/// Jitter is `jitter_sd * z` with `z ~ N(0, 1)` clamped to
/// `[-clamp_sigma, clamp_sigma]`. Drugs are drawn in id order and samples in
/// time order, so a seeded generator always reproduces the same curves.
pub fn compute_drug_timeline<R: Rng + ?Sized>(
    duration: ProcedureDuration,
    drugs: &DrugSelection,
    samples: usize,
    clamp_sigma: f64,
    rng: &mut R,
) -> BTreeMap<DrugId, Vec<TimelinePoint>> {
    let times = sample_times(duration, samples);
    let bound = if clamp_sigma.is_finite() {
        clamp_sigma.abs()
    } else {
        f64::MAX
    };

    drugs
        .iter()
        .map(|drug| {
            let points = times
                .iter()
                .map(|&t| {
                    let z: f64 = rng.sample(StandardNormal);
                    let jitter = drug.jitter_sd * z.max(-bound).min(bound);
                    TimelinePoint {
                        time: t,
                        concentration: drug.peak_concentration * (-t / drug.decay_minutes).exp()
                            + jitter,
                    }
                })
                .collect();
            (drug.id.clone(), points)
        })
        .collect()
}
