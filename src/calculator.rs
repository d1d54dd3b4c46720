//! The take-home calculator: validated input, pure computation, derived
//! result.

use crate::tax::paye::round2;
use crate::tax::{deemed_payment, limited_company, LimitedBreakdown, PayeBreakdown, TaxBandTable};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ir35Status {
    Inside,
    Outside,
}

impl std::fmt::Display for Ir35Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ir35Status::Inside => write!(f, "inside"),
            Ir35Status::Outside => write!(f, "outside"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("day rate must be positive: {0}")]
    NonPositiveDayRate(Decimal),
    #[error("days per week must be greater than 0 and at most 5: {0}")]
    DaysPerWeekOutOfRange(Decimal),
    #[error("weeks per year must be between 1 and 52: {0}")]
    WeeksPerYearOutOfRange(u32),
}

/// A validated engagement: construction via `new` is the only way to get
/// one, so `compute` never sees out-of-range values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorInput {
    day_rate: Decimal,
    days_per_week: Decimal,
    weeks_per_year: u32,
    status: Ir35Status,
}

impl CalculatorInput {
    pub fn new(
        day_rate: Decimal,
        days_per_week: Decimal,
        weeks_per_year: u32,
        status: Ir35Status,
    ) -> Result<Self, InputError> {
        if day_rate <= Decimal::ZERO {
            return Err(InputError::NonPositiveDayRate(day_rate));
        }
        if days_per_week <= Decimal::ZERO || days_per_week > dec!(5) {
            return Err(InputError::DaysPerWeekOutOfRange(days_per_week));
        }
        if weeks_per_year == 0 || weeks_per_year > 52 {
            return Err(InputError::WeeksPerYearOutOfRange(weeks_per_year));
        }
        Ok(CalculatorInput {
            day_rate,
            days_per_week,
            weeks_per_year,
            status,
        })
    }

    pub fn day_rate(&self) -> Decimal {
        self.day_rate
    }

    pub fn days_per_week(&self) -> Decimal {
        self.days_per_week
    }

    pub fn weeks_per_year(&self) -> u32 {
        self.weeks_per_year
    }

    pub fn status(&self) -> Ir35Status {
        self.status
    }

    /// Billable days in a year
    pub fn days_per_year(&self) -> Decimal {
        self.days_per_week * Decimal::from(self.weeks_per_year)
    }
}

/// Scenario-specific line items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum Breakdown {
    DeemedEmployment(PayeBreakdown),
    LimitedCompany(LimitedBreakdown),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorResult {
    pub gross_annual: Decimal,
    /// Income tax, plus corporation and dividend tax for the limited
    /// company scenario
    pub estimated_tax: Decimal,
    /// Employee NI
    pub estimated_ni: Decimal,
    /// Employer NI borne by the fee payer / company
    pub employer_deductions: Decimal,
    pub net_annual: Decimal,
    pub net_monthly: Decimal,
    pub net_daily: Decimal,
    pub breakdown: Breakdown,
}

impl CalculatorResult {
    /// Net as a share of gross, in percent
    pub fn retention_pct(&self) -> Decimal {
        if self.gross_annual.is_zero() {
            return Decimal::ZERO;
        }
        round2(self.net_annual / self.gross_annual * dec!(100))
    }
}

/// Compute take-home pay for an engagement. Pure: no I/O, same input and
/// band table always give the same result.
pub fn compute(input: &CalculatorInput, bands: &TaxBandTable) -> CalculatorResult {
    let gross_annual = input.day_rate * input.days_per_year();

    let (estimated_tax, estimated_ni, employer_deductions, breakdown) = match input.status {
        Ir35Status::Inside => {
            let b = deemed_payment(gross_annual, bands);
            (
                b.income_tax,
                b.employee_ni,
                b.employer_ni,
                Breakdown::DeemedEmployment(b),
            )
        }
        Ir35Status::Outside => {
            let b = limited_company(gross_annual, bands);
            (
                b.corporation_tax + b.salary_income_tax + b.dividend_tax,
                b.employee_ni,
                b.employer_ni,
                Breakdown::LimitedCompany(b),
            )
        }
    };

    let net_annual = gross_annual - estimated_tax - estimated_ni - employer_deductions;
    let net_monthly = round2(net_annual / dec!(12));
    let net_daily = round2(net_annual / input.days_per_year());

    CalculatorResult {
        gross_annual,
        estimated_tax,
        estimated_ni,
        employer_deductions,
        net_annual,
        net_monthly,
        net_daily,
        breakdown,
    }
}
