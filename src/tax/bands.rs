use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// UK Tax Year (runs 6 April to 5 April)
/// The year value represents the end year (e.g., 2026 = 2025/26 tax year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Create a tax year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        let year = date.year();
        // Tax year starts 6 April
        if date >= NaiveDate::from_ymd_opt(year, 4, 6).unwrap() {
            TaxYear(year + 1)
        } else {
            TaxYear(year)
        }
    }

    /// The tax year in force today
    pub fn current() -> Self {
        TaxYear::from_date(chrono::Local::now().date_naive())
    }

    /// Start date of the tax year (6 April of previous year)
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0 - 1, 4, 6).unwrap()
    }

    /// End date of the tax year (5 April)
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 4, 5).unwrap()
    }

    /// Display as "2025/26" format
    pub fn display(&self) -> String {
        format!("{}/{}", self.0 - 1, self.0 % 100)
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BandTableError {
    #[error("{field} must be between 0 and 1: {rate}")]
    RateOutOfRange { field: &'static str, rate: Decimal },
    #[error("{field} must be non-negative: {value}")]
    NegativeThreshold { field: &'static str, value: Decimal },
    #[error("{lower} ({lower_value}) must not exceed {upper} ({upper_value})")]
    ThresholdsOutOfOrder {
        lower: &'static str,
        upper: &'static str,
        lower_value: Decimal,
        upper_value: Decimal,
    },
}

/// Income tax bands. Band limits are on taxable income, i.e. after the
/// personal allowance has been deducted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IncomeTaxBands {
    /// Tax-free personal allowance
    #[schemars(with = "f64")]
    pub personal_allowance: Decimal,
    /// Total income above this tapers the allowance away (£1 per £2)
    #[schemars(with = "f64")]
    pub allowance_taper_threshold: Decimal,
    /// Taxable income up to this limit is taxed at the basic rate
    #[schemars(with = "f64")]
    pub basic_limit: Decimal,
    /// Taxable income up to this limit is taxed at the higher rate
    #[schemars(with = "f64")]
    pub higher_limit: Decimal,
    #[schemars(with = "f64")]
    pub basic_rate: Decimal,
    #[schemars(with = "f64")]
    pub higher_rate: Decimal,
    #[schemars(with = "f64")]
    pub additional_rate: Decimal,
}

/// National Insurance thresholds and rates (employee Class 1 + employer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NiBands {
    /// Employee NI is due on earnings above this
    #[schemars(with = "f64")]
    pub primary_threshold: Decimal,
    /// Earnings above this attract the upper rate instead of the main rate
    #[schemars(with = "f64")]
    pub upper_earnings_limit: Decimal,
    #[schemars(with = "f64")]
    pub main_rate: Decimal,
    #[schemars(with = "f64")]
    pub upper_rate: Decimal,
    /// Employer NI is due on earnings above this
    #[schemars(with = "f64")]
    pub secondary_threshold: Decimal,
    #[schemars(with = "f64")]
    pub employer_rate: Decimal,
}

/// Corporation tax with small-profits rate and marginal relief
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CorporationTaxBands {
    /// Profits up to this limit pay the small-profits rate
    #[schemars(with = "f64")]
    pub small_profits_limit: Decimal,
    /// Profits above this limit pay the main rate with no relief
    #[schemars(with = "f64")]
    pub main_rate_limit: Decimal,
    #[schemars(with = "f64")]
    pub small_profits_rate: Decimal,
    #[schemars(with = "f64")]
    pub main_rate: Decimal,
    /// Marginal relief fraction applied to (main_rate_limit - profit)
    #[schemars(with = "f64")]
    pub marginal_relief_fraction: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DividendBands {
    #[schemars(with = "f64")]
    pub allowance: Decimal,
    #[schemars(with = "f64")]
    pub basic_rate: Decimal,
    #[schemars(with = "f64")]
    pub higher_rate: Decimal,
    #[schemars(with = "f64")]
    pub additional_rate: Decimal,
}

/// All thresholds and rates used by the calculators.
///
/// Thresholds change every tax year, so the table is passed into the
/// calculation rather than hard-coded: `for_year` gives the built-in
/// illustrative figures, `from_json` loads a custom table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxBandTable {
    pub income: IncomeTaxBands,
    pub ni: NiBands,
    pub corporation: CorporationTaxBands,
    pub dividends: DividendBands,
    /// Director salary assumed in the limited-company blend
    #[schemars(with = "f64")]
    pub director_salary: Decimal,
}

impl TaxBandTable {
    /// Built-in illustrative band table for a tax year.
    ///
    /// 2025/26 onwards reflects the lower employer NI threshold and 15%
    /// rate; earlier years fall back to 2024/25 figures.
    pub fn for_year(year: TaxYear) -> Self {
        let (secondary_threshold, employer_rate) = match year.0 {
            // 2025/26 onwards: ST £5,000, employer rate 15%
            2026.. => (dec!(5000), dec!(0.15)),
            // 2024/25 and earlier: ST £9,100, employer rate 13.8%
            _ => (dec!(9100), dec!(0.138)),
        };

        TaxBandTable {
            income: IncomeTaxBands {
                personal_allowance: dec!(12570),
                allowance_taper_threshold: dec!(100000),
                basic_limit: dec!(37700),
                higher_limit: dec!(125140),
                basic_rate: dec!(0.20),
                higher_rate: dec!(0.40),
                additional_rate: dec!(0.45),
            },
            ni: NiBands {
                primary_threshold: dec!(12570),
                upper_earnings_limit: dec!(50270),
                main_rate: dec!(0.08),
                upper_rate: dec!(0.02),
                secondary_threshold,
                employer_rate,
            },
            corporation: CorporationTaxBands {
                small_profits_limit: dec!(50000),
                main_rate_limit: dec!(250000),
                small_profits_rate: dec!(0.19),
                main_rate: dec!(0.25),
                // 3/200
                marginal_relief_fraction: dec!(0.015),
            },
            dividends: DividendBands {
                allowance: dec!(500),
                basic_rate: dec!(0.0875),
                higher_rate: dec!(0.3375),
                additional_rate: dec!(0.3935),
            },
            director_salary: dec!(12570),
        }
    }

    /// Load and validate a band table from JSON
    pub fn from_json<R: Read>(reader: R) -> anyhow::Result<Self> {
        let table: TaxBandTable = serde_json::from_reader(reader)?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), BandTableError> {
        let rates = [
            ("income.basic_rate", self.income.basic_rate),
            ("income.higher_rate", self.income.higher_rate),
            ("income.additional_rate", self.income.additional_rate),
            ("ni.main_rate", self.ni.main_rate),
            ("ni.upper_rate", self.ni.upper_rate),
            ("ni.employer_rate", self.ni.employer_rate),
            (
                "corporation.small_profits_rate",
                self.corporation.small_profits_rate,
            ),
            ("corporation.main_rate", self.corporation.main_rate),
            (
                "corporation.marginal_relief_fraction",
                self.corporation.marginal_relief_fraction,
            ),
            ("dividends.basic_rate", self.dividends.basic_rate),
            ("dividends.higher_rate", self.dividends.higher_rate),
            ("dividends.additional_rate", self.dividends.additional_rate),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(BandTableError::RateOutOfRange { field, rate });
            }
        }

        let thresholds = [
            ("income.personal_allowance", self.income.personal_allowance),
            (
                "income.allowance_taper_threshold",
                self.income.allowance_taper_threshold,
            ),
            ("income.basic_limit", self.income.basic_limit),
            ("income.higher_limit", self.income.higher_limit),
            ("ni.primary_threshold", self.ni.primary_threshold),
            ("ni.upper_earnings_limit", self.ni.upper_earnings_limit),
            ("ni.secondary_threshold", self.ni.secondary_threshold),
            (
                "corporation.small_profits_limit",
                self.corporation.small_profits_limit,
            ),
            ("corporation.main_rate_limit", self.corporation.main_rate_limit),
            ("dividends.allowance", self.dividends.allowance),
            ("director_salary", self.director_salary),
        ];
        for (field, value) in thresholds {
            if value < Decimal::ZERO {
                return Err(BandTableError::NegativeThreshold { field, value });
            }
        }

        let ordered = [
            (
                ("income.basic_limit", self.income.basic_limit),
                ("income.higher_limit", self.income.higher_limit),
            ),
            (
                ("ni.primary_threshold", self.ni.primary_threshold),
                ("ni.upper_earnings_limit", self.ni.upper_earnings_limit),
            ),
            (
                (
                    "corporation.small_profits_limit",
                    self.corporation.small_profits_limit,
                ),
                (
                    "corporation.main_rate_limit",
                    self.corporation.main_rate_limit,
                ),
            ),
        ];
        for ((lower, lower_value), (upper, upper_value)) in ordered {
            if lower_value > upper_value {
                return Err(BandTableError::ThresholdsOutOfOrder {
                    lower,
                    upper,
                    lower_value,
                    upper_value,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_year_from_date_before_april_6() {
        // 5 April 2025 is in 2024/25 tax year
        let date = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
        assert_eq!(TaxYear::from_date(date), TaxYear(2025));
    }

    #[test]
    fn tax_year_from_date_on_april_6() {
        // 6 April 2025 is in 2025/26 tax year
        let date = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        assert_eq!(TaxYear::from_date(date), TaxYear(2026));
    }

    #[test]
    fn tax_year_display() {
        assert_eq!(TaxYear(2025).display(), "2024/25");
        assert_eq!(TaxYear(2026).display(), "2025/26");
    }

    #[test]
    fn tax_year_start_end_dates() {
        let ty = TaxYear(2026);
        assert_eq!(ty.start_date(), NaiveDate::from_ymd_opt(2025, 4, 6).unwrap());
        assert_eq!(ty.end_date(), NaiveDate::from_ymd_opt(2026, 4, 5).unwrap());
    }

    #[test]
    fn employer_ni_changes_in_2025_26() {
        let current = TaxBandTable::for_year(TaxYear(2026));
        assert_eq!(current.ni.secondary_threshold, dec!(5000));
        assert_eq!(current.ni.employer_rate, dec!(0.15));

        let prior = TaxBandTable::for_year(TaxYear(2025));
        assert_eq!(prior.ni.secondary_threshold, dec!(9100));
        assert_eq!(prior.ni.employer_rate, dec!(0.138));
    }

    #[test]
    fn builtin_tables_are_valid() {
        assert_eq!(TaxBandTable::for_year(TaxYear(2025)).validate(), Ok(()));
        assert_eq!(TaxBandTable::for_year(TaxYear(2026)).validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut table = TaxBandTable::for_year(TaxYear(2026));
        table.income.basic_rate = dec!(1.2);
        assert_eq!(
            table.validate(),
            Err(BandTableError::RateOutOfRange {
                field: "income.basic_rate",
                rate: dec!(1.2),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_threshold() {
        let mut table = TaxBandTable::for_year(TaxYear(2026));
        table.income.personal_allowance = dec!(-1);
        assert_eq!(
            table.validate(),
            Err(BandTableError::NegativeThreshold {
                field: "income.personal_allowance",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_rejects_unordered_bands() {
        let mut table = TaxBandTable::for_year(TaxYear(2026));
        table.income.higher_limit = dec!(30000);
        assert!(matches!(
            table.validate(),
            Err(BandTableError::ThresholdsOutOfOrder { .. })
        ));
    }

    #[test]
    fn from_json_roundtrip() {
        let table = TaxBandTable::for_year(TaxYear(2026));
        let json = serde_json::to_string(&table).unwrap();
        let loaded = TaxBandTable::from_json(json.as_bytes()).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn from_json_rejects_invalid_table() {
        let mut table = TaxBandTable::for_year(TaxYear(2026));
        table.ni.employer_rate = dec!(2);
        let json = serde_json::to_string(&table).unwrap();
        assert!(TaxBandTable::from_json(json.as_bytes()).is_err());
    }
}
