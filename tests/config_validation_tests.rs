//! Config Validation Tests
//!
//! Typo detection and range validation of the dashboard config, plus
//! loading from files on disk. Exercises the config layer independently
//! from the HTTP server.

use std::io::Write;

use anesthesia_dashboard::config::validation::{
    known_config_keys, suggest_correction, validate_ranges, validate_unknown_keys,
};
use anesthesia_dashboard::config::{ConfigError, DashboardConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_risk_fraction_warns_with_suggestion() {
    let toml_str = r#"
[engine.risk]
optimized_fracton = 0.5
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("optimized_fracton"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("engine.risk.optimized_fraction"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn typo_inside_catalog_entry_is_detected() {
    let toml_str = r#"
[[catalog.drugs]]
id = "drug_a"
name = "Propofol"
decay_minuts = 30.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "catalog.drugs.decay_minuts");
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("catalog.drugs.decay_minutes")
    );
}

#[test]
fn unrelated_key_has_no_suggestion() {
    let warnings = validate_unknown_keys("[completely_unrelated]\nfoo = 1\n");
    assert!(!warnings.is_empty());
    assert!(warnings.iter().all(|w| w.suggestion.is_none()));
}

#[test]
fn valid_config_produces_no_key_warnings() {
    let toml_str = DashboardConfig::default().to_toml().unwrap();
    let warnings = validate_unknown_keys(&toml_str);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn suggestion_prefers_closest_key() {
    let known = known_config_keys();
    assert_eq!(
        suggest_correction("server.adr", &known).as_deref(),
        Some("server.addr")
    );
    assert_eq!(suggest_correction("zzzzzzzzzzzz", &known), None);
}

#[test]
fn unknown_keys_do_not_break_loading() {
    let toml_str = r#"
[server]
addr = "0.0.0.0:9000"
colour = "blue"
"#;
    let config = DashboardConfig::from_toml_str(toml_str).expect("unknown keys only warn");
    assert_eq!(config.server.addr, "0.0.0.0:9000");
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn default_config_has_no_range_errors_or_warnings() {
    let (errors, warnings) = validate_ranges(&DashboardConfig::default());
    assert!(errors.is_empty(), "{errors:?}");
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn risk_range_outside_probability_bounds_is_error() {
    let mut config = DashboardConfig::default();
    config.engine.risk.baseline_max = 1.4;
    let (errors, _) = validate_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("within [0, 1]")), "{errors:?}");
}

#[test]
fn negative_impact_is_error() {
    let mut config = DashboardConfig::default();
    config.catalog.drugs[2].impact_kg_co2e_per_hour = -1.0;
    let (errors, _) = validate_ranges(&config);
    assert!(errors
        .iter()
        .any(|e| e.contains("catalog.drugs[drug_c].impact_kg_co2e_per_hour")));
}

#[test]
fn empty_catalog_is_error() {
    let mut config = DashboardConfig::default();
    config.catalog.drugs.clear();
    let (errors, _) = validate_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("at least one drug")));
}

#[test]
fn blank_drug_name_is_only_a_warning() {
    let mut config = DashboardConfig::default();
    config.catalog.drugs[0].name = String::new();
    let (errors, warnings) = validate_ranges(&config);
    assert!(errors.is_empty());
    assert_eq!(warnings.len(), 1);
}

#[test]
fn huge_sample_count_is_only_a_warning() {
    let mut config = DashboardConfig::default();
    config.engine.timeline_samples = 50_000;
    let (errors, warnings) = validate_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "engine.timeline_samples"));
}

// ============================================================================
// Loading From Disk
// ============================================================================

#[test]
fn load_from_file_reads_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
addr = "0.0.0.0:8123"

[engine]
timeline_samples = 250

[engine.cost]
optimized_fraction = 0.5
"#
    )
    .unwrap();

    let config = DashboardConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.server.addr, "0.0.0.0:8123");
    assert_eq!(config.engine.timeline_samples, 250);
    assert_eq!(config.engine.cost.optimized_fraction, 0.5);
    assert_eq!(config.catalog.len(), 3);
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DashboardConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)), "got {err:?}");
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn load_from_malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine\ntimeline_samples = ").unwrap();
    let err = DashboardConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)), "got {err:?}");
}

#[test]
fn load_from_out_of_range_file_is_validation_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine.dosage_comparison]\ncurrent_min = 2.0\ncurrent_max = 1.0").unwrap();
    let err = DashboardConfig::load_from_file(file.path()).unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.contains("engine.dosage_comparison.current")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn saved_config_loads_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard_config.toml");

    let mut original = DashboardConfig::default();
    original.engine.require_patient_profile = true;
    original.engine.risk.categories.push("Hypotension".to_string());
    std::fs::write(&path, original.to_toml().unwrap()).unwrap();

    assert_eq!(DashboardConfig::load_from_file(&path).unwrap(), original);
}
