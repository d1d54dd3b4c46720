pub mod bands;
pub mod compare;
pub mod roles;
pub mod schema;
pub mod takehome;

use crate::calculator::Ir35Status;
use crate::tax::{TaxBandTable, TaxYear};
use clap::ValueEnum;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::Path;

/// Resolve the band table: a JSON file if given, otherwise the built-in
/// table for the requested (or current) tax year.
pub fn load_bands(
    year: Option<i32>,
    path: Option<&Path>,
) -> anyhow::Result<(TaxYear, TaxBandTable)> {
    let tax_year = year.map(TaxYear).unwrap_or_else(TaxYear::current);
    let table = match path {
        Some(path) => {
            log::info!("Loading band table from {}", path.display());
            TaxBandTable::from_json(File::open(path)?)?
        }
        None => TaxBandTable::for_year(tax_year),
    };
    Ok((tax_year, table))
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StatusArg {
    #[default]
    Inside,
    Outside,
}

impl From<StatusArg> for Ir35Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Inside => Ir35Status::Inside,
            StatusArg::Outside => Ir35Status::Outside,
        }
    }
}

pub(crate) fn format_gbp(amount: Decimal) -> String {
    format!("£{:.2}", amount)
}
