//! Income calculation request model.
//!
//! A request is a tagged union keyed by `incomeType`. Each variant carries
//! only the fields its formula needs, so a CASUAL request has no base income
//! and a BONUS request has no payslip dates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{IncomeType, SalaryFrequency, VerificationMethod};

/// Request for OVERTIME income, earned on top of a base salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRequest {
    /// Essential or non-essential services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<VerificationMethod>,
    /// How often the applicant is paid.
    pub salary_frequency: SalaryFrequency,
    /// Base salary per pay cycle.
    pub base_income: Decimal,
    /// End date of the latest payslip.
    pub end_date_latest_payslip: NaiveDate,
    /// Date employment started.
    pub employment_start_date: NaiveDate,
    /// Year-to-date gross amount on the latest payslip.
    pub ytd_amount_latest_payslip: Decimal,
    /// Total income for the prior financial year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fy_annual_income: Option<Decimal>,
    /// Manually supplied annual figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_override_amount: Option<Decimal>,
}

/// Request for CASUAL or CONTRACT_VARIABLE income, which has no base salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableIncomeRequest {
    /// Must be absent for these income types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<VerificationMethod>,
    /// How often the applicant is paid.
    pub salary_frequency: SalaryFrequency,
    /// End date of the latest payslip.
    pub end_date_latest_payslip: NaiveDate,
    /// Date employment started.
    pub employment_start_date: NaiveDate,
    /// Year-to-date gross amount on the latest payslip.
    pub ytd_amount_latest_payslip: Decimal,
    /// Total income for the prior financial year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fy_annual_income: Option<Decimal>,
    /// Manually supplied annual figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_override_amount: Option<Decimal>,
}

/// Request for COMMISSIONS income, earned on top of a base salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionsRequest {
    /// Must be absent for commissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<VerificationMethod>,
    /// How often the applicant is paid.
    pub salary_frequency: SalaryFrequency,
    /// Base salary per pay cycle.
    pub base_income: Decimal,
    /// End date of the latest payslip.
    pub end_date_latest_payslip: NaiveDate,
    /// Date employment started.
    pub employment_start_date: NaiveDate,
    /// Year-to-date gross amount on the latest payslip.
    pub ytd_amount_latest_payslip: Decimal,
    /// Total income for the prior financial year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fy_annual_income: Option<Decimal>,
    /// Manually supplied annual figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_override_amount: Option<Decimal>,
    /// Commission actually received year to date, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_ytd_commission: Option<Decimal>,
}

/// Request for BONUS income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusRequest {
    /// One-year or two-year verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<VerificationMethod>,
    /// Bonus received in the current financial year.
    pub current_fy_bonus: Decimal,
    /// Bonus received in the prior financial year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fy_bonus: Option<Decimal>,
}

/// Request for INVESTMENT_SHARES or INVESTMENT_INTEREST income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequest {
    /// Must be absent for investment income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<VerificationMethod>,
    /// Income for the current financial year.
    pub current_fy: Decimal,
    /// Income for the prior financial year.
    pub last_fy: Decimal,
}

/// A validated, strongly-typed income calculation request.
///
/// # Example
///
/// ```
/// use income_engine::models::{IncomeRequest, IncomeType};
///
/// let json = r#"{
///     "incomeType": "BONUS",
///     "verificationMethod": "ONE_YEAR_VERIFICATION",
///     "currentFyBonus": 45000
/// }"#;
/// let request: IncomeRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.income_type(), IncomeType::Bonus);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "incomeType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeRequest {
    /// Overtime income.
    Overtime(OvertimeRequest),
    /// Casual income.
    Casual(VariableIncomeRequest),
    /// Variable contract income.
    ContractVariable(VariableIncomeRequest),
    /// Commission income.
    Commissions(CommissionsRequest),
    /// Bonus income.
    Bonus(BonusRequest),
    /// Share investment income.
    InvestmentShares(InvestmentRequest),
    /// Interest investment income.
    InvestmentInterest(InvestmentRequest),
}

/// The fields shared by every employment-based request, flattened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmploymentIncome {
    /// The employment-based income type.
    pub income_type: IncomeType,
    /// Verification method as supplied.
    pub verification_method: Option<VerificationMethod>,
    /// How often the applicant is paid.
    pub salary_frequency: SalaryFrequency,
    /// Base salary per pay cycle, when the type has one.
    pub base_income: Option<Decimal>,
    /// End date of the latest payslip.
    pub end_date_latest_payslip: NaiveDate,
    /// Date employment started.
    pub employment_start_date: NaiveDate,
    /// Year-to-date gross amount on the latest payslip.
    pub ytd_amount_latest_payslip: Decimal,
    /// Total income for the prior financial year.
    pub last_fy_annual_income: Option<Decimal>,
    /// Manually supplied annual figure.
    pub annual_override_amount: Option<Decimal>,
    /// Commission actually received year to date.
    pub actual_ytd_commission: Option<Decimal>,
}

/// The fields of a BONUS or INVESTMENT request, flattened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualIncome {
    /// BONUS, INVESTMENT_SHARES or INVESTMENT_INTEREST.
    pub income_type: IncomeType,
    /// Verification method as supplied.
    pub verification_method: Option<VerificationMethod>,
    /// Current financial year figure.
    pub current_fy: Decimal,
    /// Prior financial year figure.
    pub last_fy: Option<Decimal>,
}

/// The two calculation pipelines a request can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IncomeFamily {
    /// Pay-cycle driven: OVERTIME, CASUAL, CONTRACT_VARIABLE, COMMISSIONS.
    Employment(EmploymentIncome),
    /// Financial-year comparison: BONUS and both INVESTMENT types.
    Annual(AnnualIncome),
}

impl IncomeRequest {
    /// Returns the income type of the active variant.
    pub fn income_type(&self) -> IncomeType {
        match self {
            IncomeRequest::Overtime(_) => IncomeType::Overtime,
            IncomeRequest::Casual(_) => IncomeType::Casual,
            IncomeRequest::ContractVariable(_) => IncomeType::ContractVariable,
            IncomeRequest::Commissions(_) => IncomeType::Commissions,
            IncomeRequest::Bonus(_) => IncomeType::Bonus,
            IncomeRequest::InvestmentShares(_) => IncomeType::InvestmentShares,
            IncomeRequest::InvestmentInterest(_) => IncomeType::InvestmentInterest,
        }
    }

    /// Returns the verification method carried by the request, if any.
    pub fn verification_method(&self) -> Option<VerificationMethod> {
        match self {
            IncomeRequest::Overtime(req) => req.verification_method,
            IncomeRequest::Casual(req) | IncomeRequest::ContractVariable(req) => {
                req.verification_method
            }
            IncomeRequest::Commissions(req) => req.verification_method,
            IncomeRequest::Bonus(req) => req.verification_method,
            IncomeRequest::InvestmentShares(req) | IncomeRequest::InvestmentInterest(req) => {
                req.verification_method
            }
        }
    }

    /// Splits the request into its calculation family.
    pub fn family(&self) -> IncomeFamily {
        let income_type = self.income_type();
        match self {
            IncomeRequest::Overtime(req) => IncomeFamily::Employment(EmploymentIncome {
                income_type,
                verification_method: req.verification_method,
                salary_frequency: req.salary_frequency,
                base_income: Some(req.base_income),
                end_date_latest_payslip: req.end_date_latest_payslip,
                employment_start_date: req.employment_start_date,
                ytd_amount_latest_payslip: req.ytd_amount_latest_payslip,
                last_fy_annual_income: req.last_fy_annual_income,
                annual_override_amount: req.annual_override_amount,
                actual_ytd_commission: None,
            }),
            IncomeRequest::Casual(req) | IncomeRequest::ContractVariable(req) => {
                IncomeFamily::Employment(EmploymentIncome {
                    income_type,
                    verification_method: req.verification_method,
                    salary_frequency: req.salary_frequency,
                    base_income: None,
                    end_date_latest_payslip: req.end_date_latest_payslip,
                    employment_start_date: req.employment_start_date,
                    ytd_amount_latest_payslip: req.ytd_amount_latest_payslip,
                    last_fy_annual_income: req.last_fy_annual_income,
                    annual_override_amount: req.annual_override_amount,
                    actual_ytd_commission: None,
                })
            }
            IncomeRequest::Commissions(req) => IncomeFamily::Employment(EmploymentIncome {
                income_type,
                verification_method: req.verification_method,
                salary_frequency: req.salary_frequency,
                base_income: Some(req.base_income),
                end_date_latest_payslip: req.end_date_latest_payslip,
                employment_start_date: req.employment_start_date,
                ytd_amount_latest_payslip: req.ytd_amount_latest_payslip,
                last_fy_annual_income: req.last_fy_annual_income,
                annual_override_amount: req.annual_override_amount,
                actual_ytd_commission: req.actual_ytd_commission,
            }),
            IncomeRequest::Bonus(req) => IncomeFamily::Annual(AnnualIncome {
                income_type,
                verification_method: req.verification_method,
                current_fy: req.current_fy_bonus,
                last_fy: req.last_fy_bonus,
            }),
            IncomeRequest::InvestmentShares(req) | IncomeRequest::InvestmentInterest(req) => {
                IncomeFamily::Annual(AnnualIncome {
                    income_type,
                    verification_method: req.verification_method,
                    current_fy: req.current_fy,
                    last_fy: Some(req.last_fy),
                })
            }
        }
    }

    /// Flattens an employment-based request.
    ///
    /// Returns `None` for BONUS and INVESTMENT requests.
    pub fn employment_income(&self) -> Option<EmploymentIncome> {
        match self.family() {
            IncomeFamily::Employment(income) => Some(income),
            IncomeFamily::Annual(_) => None,
        }
    }

    /// Flattens a BONUS or INVESTMENT request.
    ///
    /// Returns `None` for employment-based requests.
    pub fn annual_income(&self) -> Option<AnnualIncome> {
        match self.family() {
            IncomeFamily::Annual(income) => Some(income),
            IncomeFamily::Employment(_) => None,
        }
    }

    /// Returns every money field present on the request, keyed by its wire name.
    pub fn money_fields(&self) -> Vec<(&'static str, Decimal)> {
        let mut fields = Vec::new();
        let mut push = |name: &'static str, value: Option<Decimal>| {
            if let Some(value) = value {
                fields.push((name, value));
            }
        };

        if let Some(income) = self.employment_income() {
            push("baseIncome", income.base_income);
            push("ytdAmountLatestPayslip", Some(income.ytd_amount_latest_payslip));
            push("lastFyAnnualIncome", income.last_fy_annual_income);
            push("annualOverrideAmount", income.annual_override_amount);
            push("actualYtdCommission", income.actual_ytd_commission);
        }

        match self {
            IncomeRequest::Bonus(req) => {
                push("currentFyBonus", Some(req.current_fy_bonus));
                push("lastFyBonus", req.last_fy_bonus);
            }
            IncomeRequest::InvestmentShares(req) | IncomeRequest::InvestmentInterest(req) => {
                push("currentFy", Some(req.current_fy));
                push("lastFy", Some(req.last_fy));
            }
            _ => {}
        }

        fields
    }
}
