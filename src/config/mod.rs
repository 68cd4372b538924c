//! Dashboard Configuration Module
//!
//! Engine constants and the drug catalog, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line (hard error on failure)
//! 2. `ANESTHESIA_DASHBOARD_CONFIG` environment variable (path to TOML file)
//! 3. `dashboard_config.toml` in the current working directory
//! 4. Built-in defaults
//!
//! ## Usage
//!
//! The config is built once in `main()` and turned into a
//! `RecommendationEngine`, which the HTTP state shares behind an `Arc`.
//! Nothing mutates it after startup.
//!
//! ```ignore
//! let config = DashboardConfig::load();
//! let state = DashboardState::new(RecommendationEngine::from_config(&config));
//! ```

mod dashboard_config;
pub mod defaults;
pub mod validation;

pub use dashboard_config::*;
