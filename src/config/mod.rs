//! Configuration loading and management for the Feasibility Engine.
//!
//! This module provides the solver, reconciliation and KPI settings and a
//! loader that reads them from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use feasibility_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Tie-out tolerance: {}", config.reconciliation().tie_out_tolerance);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, IrrConfig, KpiOptions, ReconciliationConfig};
