//! Day-rate presets for fractional executive roles, with an optional CSV
//! override.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::io::Read;

/// A role with low / typical / high day-rate points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRate {
    pub role: String,
    pub low: Decimal,
    pub typical: Decimal,
    pub high: Decimal,
}

#[derive(Debug, thiserror::Error)]
pub enum RolesError {
    #[error("invalid rates csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("{role}: day rates must be positive and ordered low <= typical <= high")]
    InvalidRates { role: String },
    #[error("rates csv contains no records")]
    Empty,
}

/// Illustrative UK market day rates for fractional executive roles
pub fn default_roles() -> Vec<RoleRate> {
    [
        ("CFO", dec!(900), dec!(1200), dec!(1500)),
        ("CTO", dec!(850), dec!(1100), dec!(1400)),
        ("COO", dec!(800), dec!(1000), dec!(1300)),
        ("CMO", dec!(750), dec!(950), dec!(1200)),
        ("CPO", dec!(800), dec!(1000), dec!(1250)),
    ]
    .into_iter()
    .map(|(role, low, typical, high)| RoleRate {
        role: role.to_string(),
        low,
        typical,
        high,
    })
    .collect()
}

/// CSV record: role,low,typical,high
#[derive(Debug, Deserialize)]
struct RoleRateRecord {
    role: String,
    low: Decimal,
    typical: Decimal,
    high: Decimal,
}

/// Read role rates from CSV, replacing the built-in presets
pub fn read_rates_csv<R: Read>(reader: R) -> Result<Vec<RoleRate>, RolesError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rates = Vec::new();
    for record in rdr.deserialize() {
        let record: RoleRateRecord = record?;
        if record.low <= Decimal::ZERO
            || record.low > record.typical
            || record.typical > record.high
        {
            return Err(RolesError::InvalidRates { role: record.role });
        }
        rates.push(RoleRate {
            role: record.role,
            low: record.low,
            typical: record.typical,
            high: record.high,
        });
    }
    if rates.is_empty() {
        return Err(RolesError::Empty);
    }
    log::info!("Read {} role rate records", rates.len());
    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roles_are_ordered() {
        for role in default_roles() {
            assert!(role.low > Decimal::ZERO, "{}", role.role);
            assert!(role.low <= role.typical, "{}", role.role);
            assert!(role.typical <= role.high, "{}", role.role);
        }
    }

    #[test]
    fn reads_rates_csv() {
        let csv = "role,low,typical,high\nCFO,900,1200,1500\nCISO,850,1050,1300\n";
        let rates = read_rates_csv(csv.as_bytes()).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].role, "CFO");
        assert_eq!(rates[1].typical, dec!(1050));
    }

    #[test]
    fn rejects_unordered_rates() {
        let csv = "role,low,typical,high\nCFO,1200,900,1500\n";
        assert!(matches!(
            read_rates_csv(csv.as_bytes()),
            Err(RolesError::InvalidRates { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_rates() {
        let csv = "role,low,typical,high\nCFO,0,900,1500\n";
        assert!(matches!(
            read_rates_csv(csv.as_bytes()),
            Err(RolesError::InvalidRates { .. })
        ));
    }

    #[test]
    fn rejects_empty_csv() {
        let csv = "role,low,typical,high\n";
        assert!(matches!(read_rates_csv(csv.as_bytes()), Err(RolesError::Empty)));
    }
}
