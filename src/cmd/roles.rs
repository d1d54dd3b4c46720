//! Roles command - earnings estimates for fractional executive roles

use super::{format_gbp, load_bands, StatusArg};
use crate::calculator::{compute, CalculatorInput, Ir35Status};
use crate::roles::{default_roles, read_rates_csv, RoleRate};
use crate::tax::TaxBandTable;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RolesCommand {
    /// IR35 status to assume for the estimates
    #[arg(short, long, value_enum, default_value_t = StatusArg::Outside)]
    status: StatusArg,

    /// Billable days per week (fractional engagements are typically 1-3)
    #[arg(short, long, default_value = "2")]
    days_per_week: Decimal,

    /// Billable weeks per year
    #[arg(short, long, default_value_t = 46)]
    weeks_per_year: u32,

    /// Tax year (e.g., 2026 for 2025/26); defaults to the current year
    #[arg(short, long)]
    year: Option<i32>,

    /// JSON file overriding the built-in tax band table
    #[arg(short, long)]
    bands: Option<PathBuf>,

    /// CSV file of role day rates (role,low,typical,high), replacing the
    /// built-in presets
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct RoleRow {
    #[tabled(rename = "Role")]
    role: String,

    #[tabled(rename = "Point")]
    point: String,

    #[tabled(rename = "Day Rate")]
    day_rate: String,

    #[tabled(rename = "Gross Annual")]
    gross_annual: String,

    #[tabled(rename = "Net Annual")]
    net_annual: String,

    #[tabled(rename = "Retention")]
    retention: String,
}

/// Estimate for JSON output
#[derive(Debug, Serialize)]
struct RoleEstimate {
    role: String,
    point: String,
    day_rate: String,
    gross_annual: String,
    net_annual: String,
    net_monthly: String,
    retention_pct: String,
}

impl RolesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (tax_year, table) = load_bands(self.year, self.bands.as_deref())?;
        let status: Ir35Status = self.status.into();

        let roles = match &self.rates {
            Some(path) => read_rates_csv(File::open(path)?)?,
            None => default_roles(),
        };

        let estimates = self.estimates(&roles, status, &table)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&estimates)?);
            return Ok(());
        }

        println!();
        println!(
            "ROLE EARNINGS ESTIMATES ({}) - {} IR35, {} days/week, {} weeks/year",
            tax_year.display(),
            status,
            self.days_per_week,
            self.weeks_per_year
        );
        println!();

        let rows: Vec<RoleRow> = estimates
            .into_iter()
            .map(|e| RoleRow {
                role: e.role,
                point: e.point,
                day_rate: e.day_rate,
                gross_annual: e.gross_annual,
                net_annual: e.net_annual,
                retention: format!("{}%", e.retention_pct),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        Ok(())
    }

    fn estimates(
        &self,
        roles: &[RoleRate],
        status: Ir35Status,
        table: &TaxBandTable,
    ) -> anyhow::Result<Vec<RoleEstimate>> {
        let mut estimates = Vec::new();
        for role in roles {
            let points = [
                ("low", role.low),
                ("typical", role.typical),
                ("high", role.high),
            ];
            for (point, day_rate) in points {
                let input = CalculatorInput::new(
                    day_rate,
                    self.days_per_week,
                    self.weeks_per_year,
                    status,
                )?;
                let result = compute(&input, table);
                estimates.push(RoleEstimate {
                    role: role.role.clone(),
                    point: point.to_string(),
                    day_rate: format_gbp(day_rate),
                    gross_annual: format_gbp(result.gross_annual),
                    net_annual: format_gbp(result.net_annual),
                    net_monthly: format_gbp(result.net_monthly),
                    retention_pct: result.retention_pct().to_string(),
                });
            }
        }
        Ok(estimates)
    }
}
