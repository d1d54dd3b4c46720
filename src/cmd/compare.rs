//! Compare command - inside vs outside IR35 side by side

use super::{format_gbp, load_bands};
use crate::calculator::{compute, CalculatorInput, CalculatorResult, Ir35Status};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Day rate in GBP
    #[arg(short = 'r', long)]
    day_rate: Decimal,

    /// Billable days per week (up to 5; fractions allowed)
    #[arg(short, long, default_value = "5")]
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

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct CompareRow {
    #[tabled(rename = "")]
    line: String,

    #[tabled(rename = "Inside IR35")]
    inside: String,

    #[tabled(rename = "Outside IR35")]
    outside: String,
}

/// Both scenarios for JSON output
#[derive(Debug, Serialize)]
struct CompareData {
    tax_year: String,
    inside: CalculatorResult,
    outside: CalculatorResult,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (tax_year, table) = load_bands(self.year, self.bands.as_deref())?;

        let scenario = |status: Ir35Status| -> anyhow::Result<CalculatorResult> {
            let input = CalculatorInput::new(
                self.day_rate,
                self.days_per_week,
                self.weeks_per_year,
                status,
            )?;
            Ok(compute(&input, &table))
        };
        let inside = scenario(Ir35Status::Inside)?;
        let outside = scenario(Ir35Status::Outside)?;

        if self.json {
            let data = CompareData {
                tax_year: tax_year.display(),
                inside,
                outside,
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        println!();
        println!(
            "IR35 COMPARISON ({}) - {}/day, {} days/week, {} weeks/year",
            tax_year.display(),
            format_gbp(self.day_rate),
            self.days_per_week,
            self.weeks_per_year
        );
        println!();
        self.print_table(&inside, &outside);
        println!();
        Ok(())
    }

    fn print_table(&self, inside: &CalculatorResult, outside: &CalculatorResult) {
        let money = |f: fn(&CalculatorResult) -> Decimal| {
            (format_gbp(f(inside)), format_gbp(f(outside)))
        };
        let rows: Vec<CompareRow> = [
            ("Gross annual", money(|r| r.gross_annual)),
            ("Estimated tax", money(|r| r.estimated_tax)),
            ("Employee NI", money(|r| r.estimated_ni)),
            ("Employer deductions", money(|r| r.employer_deductions)),
            ("Net annual", money(|r| r.net_annual)),
            ("Net monthly", money(|r| r.net_monthly)),
            ("Net per billable day", money(|r| r.net_daily)),
            (
                "Retention",
                (
                    format!("{}%", inside.retention_pct()),
                    format!("{}%", outside.retention_pct()),
                ),
            ),
        ]
        .into_iter()
        .map(|(line, (inside, outside))| CompareRow {
            line: line.to_string(),
            inside,
            outside,
        })
        .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
}
