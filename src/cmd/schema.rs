//! Schema command - print expected input formats

use crate::tax::TaxBandTable;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the band table config file (--bands)
    JsonSchema,
    /// CSV header row for the role rates file (--rates)
    CsvHeader,
    /// CSV column descriptions for the role rates file
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(TaxBandTable);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", CSV_COLUMNS.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Role Rates CSV Format");
        println!("=====================");
        println!();
        for (name, required, description) in CSV_FIELD_DESCRIPTIONS {
            let req = if *required { "required" } else { "optional" };
            println!("{:10} ({:8})  {}", name, req, description);
        }
        println!();
        println!("Day rates are in GBP and must satisfy 0 < low <= typical <= high");
        Ok(())
    }
}

const CSV_COLUMNS: &[&str] = &["role", "low", "typical", "high"];

const CSV_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    ("role", true, "Role name (e.g., CFO, CTO)"),
    ("low", true, "Low day rate"),
    ("typical", true, "Typical day rate"),
    ("high", true, "High day rate"),
];
