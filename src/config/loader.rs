//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, IrrConfig, KpiOptions, ReconciliationConfig};

/// Loads and provides access to engine configuration.
///
/// # File Format
///
/// ```text
/// irr:
///   guesses: [0.1, 0.0, 0.2, -0.1, 0.3]
///   tolerance: 0.0001
///   max_iterations: 200
/// reconciliation:
///   tie_out_tolerance: 0.01
/// kpi:
///   discountRate: 0.008
/// ```
///
/// Any section or field may be omitted and falls back to its default.
///
/// # Example
///
/// ```no_run
/// use feasibility_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml")?;
/// println!("IRR guesses: {:?}", loader.irr().guesses);
/// # Ok::<(), feasibility_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read
    /// - [`EngineError::ConfigParseError`] if the YAML is invalid or a setting is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        // An empty document deserializes to unit, not to a defaulted struct.
        let config = if content.trim().is_empty() {
            EngineConfig::default()
        } else {
            serde_yaml::from_str::<EngineConfig>(content).map_err(|e| {
                EngineError::ConfigParseError {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            })?
        };

        if let Some(message) = config.check() {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message,
            });
        }

        tracing::debug!(
            path,
            guesses = config.irr.guesses.len(),
            tie_out_tolerance = %config.reconciliation.tie_out_tolerance,
            "Loaded engine configuration"
        );

        Ok(Self { config })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the IRR solver settings.
    pub fn irr(&self) -> &IrrConfig {
        &self.config.irr
    }

    /// Returns the tie-out settings.
    pub fn reconciliation(&self) -> &ReconciliationConfig {
        &self.config.reconciliation
    }

    /// Returns the KPI settings.
    pub fn kpi(&self) -> &KpiOptions {
        &self.config.kpi
    }
}
