//! Income classification enums.
//!
//! This module defines the income types the engine understands, the
//! verification methods an applicant may present, and the pay frequencies
//! used to annualize payslip figures.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of irregular income being assessed.
///
/// OVERTIME, CASUAL, CONTRACT_VARIABLE and COMMISSIONS are employment-based
/// and run through the pay-cycle pipeline. BONUS and the two INVESTMENT types
/// compare financial-year totals instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeType {
    /// Overtime paid on top of a base salary.
    Overtime,
    /// Casual employment income.
    Casual,
    /// Variable contract income.
    ContractVariable,
    /// Commissions paid on top of a base salary.
    Commissions,
    /// Annual bonus.
    Bonus,
    /// Dividends and other share income.
    InvestmentShares,
    /// Interest income.
    InvestmentInterest,
}

impl IncomeType {
    /// Every income type, in declaration order.
    pub const ALL: [IncomeType; 7] = [
        IncomeType::Overtime,
        IncomeType::Casual,
        IncomeType::ContractVariable,
        IncomeType::Commissions,
        IncomeType::Bonus,
        IncomeType::InvestmentShares,
        IncomeType::InvestmentInterest,
    ];

    /// Returns the wire representation of the income type.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeType::Overtime => "OVERTIME",
            IncomeType::Casual => "CASUAL",
            IncomeType::ContractVariable => "CONTRACT_VARIABLE",
            IncomeType::Commissions => "COMMISSIONS",
            IncomeType::Bonus => "BONUS",
            IncomeType::InvestmentShares => "INVESTMENT_SHARES",
            IncomeType::InvestmentInterest => "INVESTMENT_INTEREST",
        }
    }

    /// Returns true if the type is assessed from payslips and employment dates.
    ///
    /// # Examples
    ///
    /// ```
    /// use income_engine::models::IncomeType;
    ///
    /// assert!(IncomeType::Commissions.is_employment_based());
    /// assert!(!IncomeType::Bonus.is_employment_based());
    /// ```
    pub fn is_employment_based(&self) -> bool {
        matches!(
            self,
            IncomeType::Overtime
                | IncomeType::Casual
                | IncomeType::ContractVariable
                | IncomeType::Commissions
        )
    }

    /// Returns the verification methods accepted for this income type.
    ///
    /// An empty slice means the request must not carry a verification method.
    pub fn allowed_verification_methods(&self) -> &'static [VerificationMethod] {
        match self {
            IncomeType::Overtime => &[
                VerificationMethod::NonEssentialServices,
                VerificationMethod::EssentialServices,
            ],
            IncomeType::Bonus => &[
                VerificationMethod::OneYearVerification,
                VerificationMethod::TwoYearVerification,
            ],
            IncomeType::Casual
            | IncomeType::ContractVariable
            | IncomeType::Commissions
            | IncomeType::InvestmentShares
            | IncomeType::InvestmentInterest => &[],
        }
    }
}

impl fmt::Display for IncomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the applicant's income has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationMethod {
    /// Overtime worked outside an essential-services role.
    NonEssentialServices,
    /// Overtime worked in an essential-services role.
    EssentialServices,
    /// Bonus verified from the current financial year only.
    OneYearVerification,
    /// Bonus verified across the current and prior financial years.
    TwoYearVerification,
}

impl VerificationMethod {
    /// Returns the wire representation of the verification method.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::NonEssentialServices => "NON_ESSENTIAL_SERVICES",
            VerificationMethod::EssentialServices => "ESSENTIAL_SERVICES",
            VerificationMethod::OneYearVerification => "ONE_YEAR_VERIFICATION",
            VerificationMethod::TwoYearVerification => "TWO_YEAR_VERIFICATION",
        }
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often the applicant is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalaryFrequency {
    /// Paid every week.
    Weekly,
    /// Paid every two weeks.
    Fortnightly,
    /// Paid every calendar month.
    Monthly,
}

impl SalaryFrequency {
    /// Returns the number of pay cycles in a year.
    ///
    /// # Examples
    ///
    /// ```
    /// use income_engine::models::SalaryFrequency;
    ///
    /// assert_eq!(SalaryFrequency::Weekly.periods_per_year(), 52);
    /// assert_eq!(SalaryFrequency::Fortnightly.periods_per_year(), 26);
    /// assert_eq!(SalaryFrequency::Monthly.periods_per_year(), 12);
    /// ```
    pub fn periods_per_year(&self) -> u32 {
        match self {
            SalaryFrequency::Weekly => 52,
            SalaryFrequency::Fortnightly => 26,
            SalaryFrequency::Monthly => 12,
        }
    }

    /// Returns the annualization multiplier as a decimal.
    pub fn multiplier(&self) -> Decimal {
        Decimal::from(self.periods_per_year())
    }
}
