//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the income
//! calculation registry from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{BusinessConstants, EngineConfig, IncomeCalculationConfig};

/// Layout of `income_types.yaml`.
#[derive(Debug, Deserialize)]
struct IncomeTypesFile {
    income_types: Vec<IncomeCalculationConfig>,
}

/// Loads the income calculation registry from a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── constants.yaml     # Business thresholds
/// └── income_types.yaml  # Per-income-type calculation behavior
/// ```
///
/// # Example
///
/// ```no_run
/// use income_engine::config::ConfigLoader;
/// use income_engine::models::IncomeType;
///
/// let loader = ConfigLoader::load("./config")?;
/// let overtime = loader.config().calculation_config(IncomeType::Overtime)?;
/// println!("Overtime window: {:?}", overtime.rolling_window_months);
/// # Ok::<(), income_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Either file is missing
    /// - Either file contains invalid YAML
    /// - Any entry breaks a registry invariant
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let constants = Self::load_yaml::<BusinessConstants>(&path.join("constants.yaml"))?;
        let income_types = Self::load_yaml::<IncomeTypesFile>(&path.join("income_types.yaml"))?;

        debug!(
            path = %path.display(),
            income_types = income_types.income_types.len(),
            "Loaded income calculation configuration"
        );

        let config = EngineConfig::new(constants, income_types.income_types)?;
        Ok(Self { config })
    }

    /// Wraps the built-in registry.
    pub fn builtin() -> Self {
        Self {
            config: EngineConfig::builtin().clone(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded registry.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the registry.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}
