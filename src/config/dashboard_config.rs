//! Dashboard Configuration - engine constants and drug catalog as TOML values
//!
//! Every tunable used by the recommendation engine lives here. Each struct
//! implements `Default` with the dashboard's stock values, so an absent or
//! partial config file behaves exactly like the built-in setup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::types::DrugCatalog;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration, built once at startup and shared read-only.
///
/// Load with `DashboardConfig::load()` which searches:
/// 1. `$ANESTHESIA_DASHBOARD_CONFIG` env var
/// 2. `./dashboard_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Recommendation engine tuning
    #[serde(default)]
    pub engine: EngineConfig,

    /// Drugs offered in the selector
    #[serde(default)]
    pub catalog: DrugCatalog,
}

impl DashboardConfig {
    /// Load configuration using the standard search order:
    /// 1. `$ANESTHESIA_DASHBOARD_CONFIG` environment variable
    /// 2. `./dashboard_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), drugs = config.catalog.len(), "Loaded dashboard config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(drugs = config.catalog.len(), "Loaded dashboard config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate ranges and catalog consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Resolve the bind address: CLI flag, then env var, then config file.
    pub fn server_addr(&self, cli_override: Option<&str>) -> String {
        if let Some(addr) = cli_override {
            return addr.to_string();
        }
        std::env::var(defaults::SERVER_ADDR_ENV_VAR).unwrap_or_else(|_| self.server.addr.clone())
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({path}): {err}", path = .0.display(), err = .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({path}): {err}", path = .0.display(), err = .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Server Config
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `ANESTHESIA_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Engine Config
// ============================================================================

/// Recommendation engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Points per drug on the concentration timeline
    #[serde(default = "default_timeline_samples")]
    pub timeline_samples: usize,

    /// Jitter clamp, in standard deviations
    #[serde(default = "default_jitter_clamp_sigma")]
    pub jitter_clamp_sigma: f64,

    /// Require age and ASA score before computing
    #[serde(default)]
    pub require_patient_profile: bool,

    #[serde(default)]
    pub risk: RiskModelConfig,

    #[serde(default)]
    pub cost: CostModelConfig,

    #[serde(default)]
    pub dosage_comparison: DosageComparisonConfig,
}

fn default_timeline_samples() -> usize {
    defaults::TIMELINE_SAMPLES
}
fn default_jitter_clamp_sigma() -> f64 {
    defaults::JITTER_CLAMP_SIGMA
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeline_samples: default_timeline_samples(),
            jitter_clamp_sigma: default_jitter_clamp_sigma(),
            require_patient_profile: false,
            risk: RiskModelConfig::default(),
            cost: CostModelConfig::default(),
            dosage_comparison: DosageComparisonConfig::default(),
        }
    }
}

// ============================================================================
// Side-Effect Risk Model
// ============================================================================

/// Current-practice risk is sampled per category from
/// `[baseline_min, baseline_max)` (probabilities); the optimized protocol is
/// `optimized_fraction` of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskModelConfig {
    #[serde(default = "default_risk_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_risk_baseline_min")]
    pub baseline_min: f64,

    #[serde(default = "default_risk_baseline_max")]
    pub baseline_max: f64,

    /// 0.6 = 40% reduction
    #[serde(default = "default_risk_optimized_fraction")]
    pub optimized_fraction: f64,
}

fn default_risk_categories() -> Vec<String> {
    ["Delirium", "PONV", "Respiratory Depression", "Delayed Recovery"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_risk_baseline_min() -> f64 {
    0.3
}
fn default_risk_baseline_max() -> f64 {
    0.6
}
fn default_risk_optimized_fraction() -> f64 {
    0.6
}

impl Default for RiskModelConfig {
    fn default() -> Self {
        Self {
            categories: default_risk_categories(),
            baseline_min: default_risk_baseline_min(),
            baseline_max: default_risk_baseline_max(),
            optimized_fraction: default_risk_optimized_fraction(),
        }
    }
}

// ============================================================================
// Cost Model
// ============================================================================

/// Baseline cost is sampled per category from `[baseline_min, baseline_max)`
/// (dollars); optimized cost is `optimized_fraction` of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModelConfig {
    #[serde(default = "default_cost_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_cost_baseline_min")]
    pub baseline_min: f64,

    #[serde(default = "default_cost_baseline_max")]
    pub baseline_max: f64,

    /// 0.7 = 30% reduction
    #[serde(default = "default_cost_optimized_fraction")]
    pub optimized_fraction: f64,
}

fn default_cost_categories() -> Vec<String> {
    ["Drug Cost", "Recovery Time", "Complications", "Environmental"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_cost_baseline_min() -> f64 {
    1000.0
}
fn default_cost_baseline_max() -> f64 {
    5000.0
}
fn default_cost_optimized_fraction() -> f64 {
    0.7
}

impl Default for CostModelConfig {
    fn default() -> Self {
        Self {
            categories: default_cost_categories(),
            baseline_min: default_cost_baseline_min(),
            baseline_max: default_cost_baseline_max(),
            optimized_fraction: default_cost_optimized_fraction(),
        }
    }
}

// ============================================================================
// Dosage Comparison
// ============================================================================

/// Simulated current-practice dosage relative to the optimal reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosageComparisonConfig {
    #[serde(default = "default_current_min")]
    pub current_min: f64,

    #[serde(default = "default_current_max")]
    pub current_max: f64,

    #[serde(default = "default_optimal_reference")]
    pub optimal_reference: f64,
}

fn default_current_min() -> f64 {
    0.8
}
fn default_current_max() -> f64 {
    1.2
}
fn default_optimal_reference() -> f64 {
    1.0
}

impl Default for DosageComparisonConfig {
    fn default() -> Self {
        Self {
            current_min: default_current_min(),
            current_max: default_current_max(),
            optimal_reference: default_optimal_reference(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
