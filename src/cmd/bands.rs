//! Bands command - show the band table in force for a tax year

use super::{format_gbp, load_bands};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BandsCommand {
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
struct BandRow {
    #[tabled(rename = "Section")]
    section: &'static str,

    #[tabled(rename = "Item")]
    item: &'static str,

    #[tabled(rename = "Value")]
    value: String,
}

impl BandsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (tax_year, table) = load_bands(self.year, self.bands.as_deref())?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&table)?);
            return Ok(());
        }

        let pct = |rate: Decimal| format!("{}%", rate * dec!(100));
        let income = &table.income;
        let ni = &table.ni;
        let corp = &table.corporation;
        let div = &table.dividends;
        let rows = vec![
            BandRow {
                section: "Income tax",
                item: "Personal allowance",
                value: format_gbp(income.personal_allowance),
            },
            BandRow {
                section: "Income tax",
                item: "Allowance taper threshold",
                value: format_gbp(income.allowance_taper_threshold),
            },
            BandRow {
                section: "Income tax",
                item: "Basic rate",
                value: format!("{} to {}", pct(income.basic_rate), format_gbp(income.basic_limit)),
            },
            BandRow {
                section: "Income tax",
                item: "Higher rate",
                value: format!(
                    "{} to {}",
                    pct(income.higher_rate),
                    format_gbp(income.higher_limit)
                ),
            },
            BandRow {
                section: "Income tax",
                item: "Additional rate",
                value: pct(income.additional_rate),
            },
            BandRow {
                section: "Employee NI",
                item: "Primary threshold",
                value: format_gbp(ni.primary_threshold),
            },
            BandRow {
                section: "Employee NI",
                item: "Upper earnings limit",
                value: format_gbp(ni.upper_earnings_limit),
            },
            BandRow {
                section: "Employee NI",
                item: "Main / upper rate",
                value: format!("{} / {}", pct(ni.main_rate), pct(ni.upper_rate)),
            },
            BandRow {
                section: "Employer NI",
                item: "Secondary threshold",
                value: format_gbp(ni.secondary_threshold),
            },
            BandRow {
                section: "Employer NI",
                item: "Rate",
                value: pct(ni.employer_rate),
            },
            BandRow {
                section: "Corporation tax",
                item: "Small profits rate",
                value: format!(
                    "{} to {}",
                    pct(corp.small_profits_rate),
                    format_gbp(corp.small_profits_limit)
                ),
            },
            BandRow {
                section: "Corporation tax",
                item: "Main rate",
                value: format!(
                    "{} from {}",
                    pct(corp.main_rate),
                    format_gbp(corp.main_rate_limit)
                ),
            },
            BandRow {
                section: "Corporation tax",
                item: "Marginal relief fraction",
                value: corp.marginal_relief_fraction.to_string(),
            },
            BandRow {
                section: "Dividends",
                item: "Allowance",
                value: format_gbp(div.allowance),
            },
            BandRow {
                section: "Dividends",
                item: "Rates (basic/higher/additional)",
                value: format!(
                    "{} / {} / {}",
                    pct(div.basic_rate),
                    pct(div.higher_rate),
                    pct(div.additional_rate)
                ),
            },
            BandRow {
                section: "Limited company",
                item: "Director salary",
                value: format_gbp(table.director_salary),
            },
        ];

        println!();
        println!("TAX BANDS ({})", tax_year.display());
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
            .to_string();
        println!("{}", table);
        println!();
        Ok(())
    }
}
