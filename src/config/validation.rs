//! Config validation: unknown-key detection with Levenshtein suggestions
//! and numeric range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Unknown keys never break a config.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `DashboardConfig`.
///
/// Keys inside `[[catalog.drugs]]` entries are listed without an index.
/// Any new field added to `DashboardConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [server]
        "server",
        "server.addr",
        // [engine]
        "engine",
        "engine.timeline_samples",
        "engine.jitter_clamp_sigma",
        "engine.require_patient_profile",
        // [engine.risk]
        "engine.risk",
        "engine.risk.categories",
        "engine.risk.baseline_min",
        "engine.risk.baseline_max",
        "engine.risk.optimized_fraction",
        // [engine.cost]
        "engine.cost",
        "engine.cost.categories",
        "engine.cost.baseline_min",
        "engine.cost.baseline_max",
        "engine.cost.optimized_fraction",
        // [engine.dosage_comparison]
        "engine.dosage_comparison",
        "engine.dosage_comparison.current_min",
        "engine.dosage_comparison.current_max",
        "engine.dosage_comparison.optimal_reference",
        // [[catalog.drugs]]
        "catalog",
        "catalog.drugs",
        "catalog.drugs.id",
        "catalog.drugs.name",
        "catalog.drugs.impact_kg_co2e_per_hour",
        "catalog.drugs.peak_concentration",
        "catalog.drugs.decay_minutes",
        "catalog.drugs.jitter_sd",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Arrays of tables contribute their members' keys
/// under the array's own path.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        for nested in walk_toml_keys(item, &path) {
                            if !keys.contains(&nested) {
                                keys.push(nested);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Find the closest known key within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Check the numeric ranges of a parsed config.
///
/// Returns (errors, warnings). Errors are values the engine cannot work
/// with; warnings are legal but unusual.
pub fn validate_ranges(config: &super::DashboardConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let e = &config.engine;

    if e.timeline_samples < 2 {
        errors.push(format!(
            "engine.timeline_samples = {} must be >= 2",
            e.timeline_samples
        ));
    } else if e.timeline_samples > 10_000 {
        warnings.push(ValidationWarning {
            field: "engine.timeline_samples".to_string(),
            message: format!(
                "engine.timeline_samples = {} is unusually large for a chart",
                e.timeline_samples
            ),
            suggestion: None,
        });
    }
    check_finite_non_negative(e.jitter_clamp_sigma, "engine.jitter_clamp_sigma", &mut errors);

    check_model(
        "engine.risk",
        &e.risk.categories,
        (e.risk.baseline_min, e.risk.baseline_max),
        e.risk.optimized_fraction,
        &mut errors,
    );
    if e.risk.baseline_min < 0.0 || e.risk.baseline_max > 1.0 {
        errors.push(format!(
            "engine.risk baseline range [{:.2}, {:.2}] must lie within [0, 1] (probabilities)",
            e.risk.baseline_min, e.risk.baseline_max
        ));
    }
    check_model(
        "engine.cost",
        &e.cost.categories,
        (e.cost.baseline_min, e.cost.baseline_max),
        e.cost.optimized_fraction,
        &mut errors,
    );

    let d = &e.dosage_comparison;
    check_range(
        d.current_min,
        d.current_max,
        "engine.dosage_comparison.current",
        &mut errors,
    );
    if !(d.optimal_reference.is_finite() && d.optimal_reference > 0.0) {
        errors.push(format!(
            "engine.dosage_comparison.optimal_reference = {} must be > 0",
            d.optimal_reference
        ));
    }

    validate_catalog(&config.catalog, &mut errors, &mut warnings);

    (errors, warnings)
}

fn validate_catalog(
    catalog: &crate::types::DrugCatalog,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ValidationWarning>,
) {
    if catalog.is_empty() {
        errors.push("catalog.drugs must list at least one drug".to_string());
        return;
    }

    let mut seen = HashSet::new();
    for drug in catalog.iter() {
        let id = drug.id.as_str();
        if id.trim().is_empty() {
            errors.push("catalog.drugs: id must not be empty".to_string());
        } else if !seen.insert(id) {
            errors.push(format!("catalog.drugs: duplicate id '{id}'"));
        }
        if drug.name.trim().is_empty() {
            warnings.push(ValidationWarning {
                field: format!("catalog.drugs[{id}].name"),
                message: format!("Drug '{id}' has no display name; charts will show the id"),
                suggestion: None,
            });
        }
        check_finite_non_negative(
            drug.impact_kg_co2e_per_hour,
            &format!("catalog.drugs[{id}].impact_kg_co2e_per_hour"),
            errors,
        );
        check_finite_non_negative(
            drug.peak_concentration,
            &format!("catalog.drugs[{id}].peak_concentration"),
            errors,
        );
        check_finite_non_negative(drug.jitter_sd, &format!("catalog.drugs[{id}].jitter_sd"), errors);
        if !(drug.decay_minutes.is_finite() && drug.decay_minutes > 0.0) {
            errors.push(format!(
                "catalog.drugs[{id}].decay_minutes = {} must be > 0 (used as divisor)",
                drug.decay_minutes
            ));
        }
    }
}

fn check_model(
    name: &str,
    categories: &[String],
    (min, max): (f64, f64),
    fraction: f64,
    errors: &mut Vec<String>,
) {
    if categories.is_empty() {
        errors.push(format!("{name}.categories must not be empty"));
    }
    if categories.iter().any(|c| c.trim().is_empty()) {
        errors.push(format!("{name}.categories must not contain blank names"));
    }
    check_range(min, max, &format!("{name}.baseline"), errors);
    if !(fraction.is_finite() && fraction > 0.0 && fraction <= 1.0) {
        errors.push(format!(
            "{name}.optimized_fraction = {fraction} must be in (0, 1]"
        ));
    }
}

fn check_range(min: f64, max: f64, name: &str, errors: &mut Vec<String>) {
    // NaN/Inf comparisons silently pass, catch them explicitly
    if !min.is_finite() || !max.is_finite() {
        errors.push(format!(
            "{name}: values must be finite (got min={min}, max={max})"
        ));
        return;
    }
    if min >= max {
        errors.push(format!("{name}: min ({min:.3}) must be < max ({max:.3})"));
    }
}

fn check_finite_non_negative(value: f64, name: &str, errors: &mut Vec<String>) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(format!("{name} = {value} must be a finite value >= 0"));
    }
}
