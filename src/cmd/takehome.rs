//! Takehome command - take-home pay for a single engagement

use super::{format_gbp, load_bands, StatusArg};
use crate::calculator::{compute, Breakdown, CalculatorInput, CalculatorResult, Ir35Status};
use crate::tax::TaxYear;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TakeHomeCommand {
    /// Day rate in GBP
    #[arg(short = 'r', long)]
    day_rate: Decimal,

    /// Billable days per week (up to 5; fractions allowed)
    #[arg(short, long, default_value = "5")]
    days_per_week: Decimal,

    /// Billable weeks per year (the default allows for non-billable time)
    #[arg(short, long, default_value_t = 46)]
    weeks_per_year: u32,

    /// IR35 status of the engagement
    #[arg(short, long, value_enum, default_value_t = StatusArg::Inside)]
    status: StatusArg,

    /// Tax year (e.g., 2026 for 2025/26); defaults to the current year
    #[arg(short, long)]
    year: Option<i32>,

    /// JSON file overriding the built-in tax band table
    #[arg(short, long)]
    bands: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Take-home data for JSON output
#[derive(Debug, Serialize)]
struct TakeHomeData {
    tax_year: String,
    status: String,
    day_rate: String,
    days_per_week: String,
    weeks_per_year: u32,
    gross_annual: String,
    estimated_tax: String,
    estimated_ni: String,
    employer_deductions: String,
    net_annual: String,
    net_monthly: String,
    net_daily: String,
    retention_pct: String,
}

impl TakeHomeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (tax_year, table) = load_bands(self.year, self.bands.as_deref())?;
        let status: Ir35Status = self.status.into();
        let input =
            CalculatorInput::new(self.day_rate, self.days_per_week, self.weeks_per_year, status)?;
        let result = compute(&input, &table);

        if self.json {
            self.print_json(&result, tax_year, status)
        } else {
            self.print_text(&result, tax_year, status);
            Ok(())
        }
    }

    fn print_text(&self, result: &CalculatorResult, year: TaxYear, status: Ir35Status) {
        println!();
        println!("TAKE-HOME PAY ({}) - {} IR35", year.display(), status);
        println!();

        println!("ENGAGEMENT");
        println!(
            "  Day rate: {} | Days/week: {} | Weeks/year: {}",
            format_gbp(self.day_rate),
            self.days_per_week,
            self.weeks_per_year
        );
        println!("  Gross annual: {}", format_gbp(result.gross_annual));
        println!();

        println!("DEDUCTIONS");
        match &result.breakdown {
            Breakdown::DeemedEmployment(b) => {
                println!("  Employer NI (deemed): {}", format_gbp(b.employer_ni));
                println!(
                    "  Income tax: {} (allowance {})",
                    format_gbp(b.income_tax),
                    format_gbp(b.personal_allowance)
                );
                println!("  Employee NI: {}", format_gbp(b.employee_ni));
            }
            Breakdown::LimitedCompany(b) => {
                println!(
                    "  Director salary: {} | Employer NI: {}",
                    format_gbp(b.salary),
                    format_gbp(b.employer_ni)
                );
                println!(
                    "  Corporation tax: {} (on profit {})",
                    format_gbp(b.corporation_tax),
                    format_gbp(b.profit_before_tax)
                );
                println!(
                    "  Dividends: {} | Dividend tax: {}",
                    format_gbp(b.dividends),
                    format_gbp(b.dividend_tax)
                );
                println!(
                    "  Income tax on salary: {} | Employee NI: {}",
                    format_gbp(b.salary_income_tax),
                    format_gbp(b.employee_ni)
                );
            }
        }
        println!();

        println!("NET");
        println!(
            "  Annual: {} | Monthly: {} | Per billable day: {}",
            format_gbp(result.net_annual),
            format_gbp(result.net_monthly),
            format_gbp(result.net_daily)
        );
        println!("  Retention: {}% of gross", result.retention_pct());
        println!();
    }

    fn print_json(
        &self,
        result: &CalculatorResult,
        year: TaxYear,
        status: Ir35Status,
    ) -> anyhow::Result<()> {
        let data = TakeHomeData {
            tax_year: year.display(),
            status: status.to_string(),
            day_rate: format!("{:.2}", self.day_rate),
            days_per_week: self.days_per_week.to_string(),
            weeks_per_year: self.weeks_per_year,
            gross_annual: format!("{:.2}", result.gross_annual),
            estimated_tax: format!("{:.2}", result.estimated_tax),
            estimated_ni: format!("{:.2}", result.estimated_ni),
            employer_deductions: format!("{:.2}", result.employer_deductions),
            net_annual: format!("{:.2}", result.net_annual),
            net_monthly: format!("{:.2}", result.net_monthly),
            net_daily: format!("{:.2}", result.net_daily),
            retention_pct: format!("{:.2}", result.retention_pct()),
        };
        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}
