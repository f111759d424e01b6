//! Configuration types for income calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! drive the employment-based calculation pipeline. They can be built in
//! code or deserialized from YAML configuration files.

use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::IncomeType;

/// A source the final allowable amount may be taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    /// Commission actually received year to date.
    ActualYtd,
    /// Manually supplied annual figure.
    Override,
    /// The formula-calculated figure.
    Calculated,
}

/// Thresholds shared by every income type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessConstants {
    /// Minimum days of employment before variable income is recognized.
    pub minimum_employment_days: i64,
    /// Days per year used by the pay-cycle conversion (leap years ignored).
    pub days_in_year: i64,
    /// MONTHLY pay-cycle fractions above this round up, others round down.
    pub monthly_rounding_threshold: Decimal,
}

impl Default for BusinessConstants {
    fn default() -> Self {
        Self {
            minimum_employment_days: 180,
            days_in_year: 365,
            monthly_rounding_threshold: Decimal::new(25, 2),
        }
    }
}

/// Calculation behavior for one employment-based income type.
///
/// # Example
///
/// ```
/// use income_engine::config::{EngineConfig, PriorityTier};
/// use income_engine::models::IncomeType;
///
/// let config = EngineConfig::builtin()
///     .calculation_config(IncomeType::Commissions)
///     .unwrap();
/// assert!(config.has_base_income);
/// assert_eq!(config.last_fy_required_months, 12);
/// assert_eq!(config.priority_tiers[0], PriorityTier::ActualYtd);
/// assert_eq!(config.rolling_window_months, Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeCalculationConfig {
    /// The income type this entry configures.
    pub income_type: IncomeType,
    /// Whether a base salary is subtracted from payslip figures.
    pub has_base_income: bool,
    /// Months into the FY before prior-FY income stops being required.
    pub last_fy_required_months: u32,
    /// Sources for the final amount, in priority order.
    pub priority_tiers: Vec<PriorityTier>,
    /// Length of the trailing aggregation window, if one applies.
    #[serde(default)]
    pub rolling_window_months: Option<u32>,
}

impl IncomeCalculationConfig {
    fn standard(income_type: IncomeType, has_base_income: bool) -> Self {
        Self {
            income_type,
            has_base_income,
            last_fy_required_months: 6,
            priority_tiers: vec![PriorityTier::Override, PriorityTier::Calculated],
            rolling_window_months: Some(6),
        }
    }

    fn commissions() -> Self {
        Self {
            income_type: IncomeType::Commissions,
            has_base_income: true,
            last_fy_required_months: 12,
            priority_tiers: vec![
                PriorityTier::ActualYtd,
                PriorityTier::Override,
                PriorityTier::Calculated,
            ],
            rolling_window_months: Some(12),
        }
    }

    /// Checks the entry against the registry invariants.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidConfig {
            income_type: self.income_type.to_string(),
            message,
        };

        if !self.income_type.is_employment_based() {
            return Err(invalid(
                "only employment-based income types use the pay-cycle pipeline".to_string(),
            ));
        }

        if !matches!(self.last_fy_required_months, 6 | 12) {
            return Err(invalid(format!(
                "last_fy_required_months must be 6 or 12, got {}",
                self.last_fy_required_months
            )));
        }

        if let Some(months) = self.rolling_window_months {
            if !matches!(months, 6 | 12) {
                return Err(invalid(format!(
                    "rolling_window_months must be 6 or 12, got {}",
                    months
                )));
            }
        }

        if self.priority_tiers.last() != Some(&PriorityTier::Calculated) {
            return Err(invalid(
                "priority_tiers must end with 'calculated'".to_string(),
            ));
        }

        for (index, tier) in self.priority_tiers.iter().enumerate() {
            if self.priority_tiers[..index].contains(tier) {
                return Err(invalid(format!("priority tier {:?} listed twice", tier)));
            }
        }

        Ok(())
    }
}

/// The process-wide configuration registry.
///
/// Built once and read-only thereafter; shared freely between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    constants: BusinessConstants,
    income_types: HashMap<IncomeType, IncomeCalculationConfig>,
}

static BUILTIN: LazyLock<EngineConfig> = LazyLock::new(EngineConfig::default);

impl EngineConfig {
    /// Creates a registry from its parts, validating every entry.
    pub fn new(
        constants: BusinessConstants,
        configs: Vec<IncomeCalculationConfig>,
    ) -> EngineResult<Self> {
        let mut income_types = HashMap::new();
        for config in configs {
            config.validate()?;
            let income_type = config.income_type;
            if income_types.insert(income_type, config).is_some() {
                return Err(EngineError::InvalidConfig {
                    income_type: income_type.to_string(),
                    message: "configured more than once".to_string(),
                });
            }
        }

        Ok(Self {
            constants,
            income_types,
        })
    }

    /// Returns the built-in registry.
    pub fn builtin() -> &'static EngineConfig {
        &BUILTIN
    }

    /// Returns the shared business constants.
    pub fn constants(&self) -> &BusinessConstants {
        &self.constants
    }

    /// Looks up the calculation configuration for an income type.
    pub fn calculation_config(&self, income_type: IncomeType) -> EngineResult<&IncomeCalculationConfig> {
        self.income_types
            .get(&income_type)
            .ok_or(EngineError::MissingCalculationConfig { income_type })
    }

    /// Returns every configured entry.
    pub fn calculation_configs(&self) -> impl Iterator<Item = &IncomeCalculationConfig> {
        self.income_types.values()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let configs = [
            IncomeCalculationConfig::standard(IncomeType::Overtime, true),
            IncomeCalculationConfig::standard(IncomeType::Casual, false),
            IncomeCalculationConfig::standard(IncomeType::ContractVariable, false),
            IncomeCalculationConfig::commissions(),
        ];

        Self {
            constants: BusinessConstants::default(),
            income_types: configs
                .into_iter()
                .map(|config| (config.income_type, config))
                .collect(),
        }
    }
}
