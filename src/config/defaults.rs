//! System-wide default constants.
//!
//! Centralises magic numbers used across the engine and the HTTP service.

// ============================================================================
// Engine
// ============================================================================

/// Placeholder dosage factor: mg per kg of body weight per minute.
pub const DOSAGE_FACTOR_MG_PER_KG_MIN: f64 = 0.1;

/// Accepted patient weight range (kg). The lower bound keeps the risk score
/// finite; the upper bound keeps the dosage finite.
pub const MIN_WEIGHT_KG: f64 = 0.1;
pub const MAX_WEIGHT_KG: f64 = 1000.0;

/// Longest accepted procedure (minutes): one week.
pub const MAX_DURATION_MINUTES: f64 = 10_080.0;

/// Oldest accepted patient age (years).
pub const MAX_AGE_YEARS: u32 = 150;

/// Points per drug on the concentration timeline.
pub const TIMELINE_SAMPLES: usize = 100;

/// Timeline jitter is clamped to this many standard deviations.
pub const JITTER_CLAMP_SIGMA: f64 = 3.0;

// ============================================================================
// HTTP Server
// ============================================================================

/// Default bind address. Port 8050 matches the dashboard's historical port.
pub const SERVER_ADDR: &str = "127.0.0.1:8050";

/// Maximum accepted request body (bytes). Form payloads are tiny.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// ============================================================================
// Environment Variables
// ============================================================================

/// Path to a TOML config file.
pub const CONFIG_ENV_VAR: &str = "ANESTHESIA_DASHBOARD_CONFIG";

/// Overrides `server.addr`.
pub const SERVER_ADDR_ENV_VAR: &str = "ANESTHESIA_SERVER_ADDR";

/// Comma-separated list of allowed CORS origins.
pub const CORS_ORIGINS_ENV_VAR: &str = "ANESTHESIA_CORS_ORIGINS";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "dashboard_config.toml";
