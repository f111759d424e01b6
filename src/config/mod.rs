//! Configuration loading and management for the income eligibility engine.
//!
//! The registry maps each employment-based income type to the parameters of
//! the unified calculation pipeline: whether a base salary applies, how many
//! months of the financial year must pass before prior-year income becomes
//! optional, the override priority order, and the rolling window length.
//!
//! # Example
//!
//! ```
//! use income_engine::config::EngineConfig;
//! use income_engine::models::IncomeType;
//!
//! let config = EngineConfig::builtin();
//! assert_eq!(config.constants().minimum_employment_days, 180);
//! assert!(config.calculation_config(IncomeType::Bonus).is_err());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BusinessConstants, EngineConfig, IncomeCalculationConfig, PriorityTier};
