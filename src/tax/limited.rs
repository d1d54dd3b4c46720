//! Limited-company blend (outside IR35) calculation.

use super::bands::{CorporationTaxBands, TaxBandTable};
use super::paye::{band_split, employee_ni, income_tax, round2, tapered_allowance};
use rust_decimal::Decimal;
use serde::Serialize;

/// Line items for a limited-company computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitedBreakdown {
    pub salary: Decimal,
    pub employer_ni: Decimal,
    pub profit_before_tax: Decimal,
    pub corporation_tax: Decimal,
    /// Post-tax profit, all distributed
    pub dividends: Decimal,
    /// Personal allowance after tapering on salary + dividends
    pub personal_allowance: Decimal,
    pub salary_income_tax: Decimal,
    pub employee_ni: Decimal,
    pub dividend_tax: Decimal,
}

/// Outside IR35 the fee is company revenue: a director salary is drawn,
/// corporation tax is paid on the remaining profit, and the post-tax profit
/// is distributed as dividends taxed on top of the salary.
pub fn limited_company(gross: Decimal, bands: &TaxBandTable) -> LimitedBreakdown {
    let ni = &bands.ni;
    let salary = bands.director_salary.min(gross);
    // employer NI limited to what the fee can fund after salary
    let employer_ni = round2(
        ((salary - ni.secondary_threshold).max(Decimal::ZERO) * ni.employer_rate)
            .min(gross - salary),
    );
    let profit_before_tax = gross - salary - employer_ni;
    let corporation_tax = round2(corporation_tax(profit_before_tax, &bands.corporation));
    let dividends = profit_before_tax - corporation_tax;

    let total_income = salary + dividends;
    let personal_allowance = tapered_allowance(total_income, &bands.income);

    // salary fills the bands first
    let salary_taxable = (salary - personal_allowance).max(Decimal::ZERO);
    let salary_income_tax = round2(income_tax(salary_taxable, &bands.income));
    let employee_ni = round2(employee_ni(salary, ni));

    // dividends stack on top; the dividend allowance is taxed at nil but
    // still occupies band space
    let allowance_left = (personal_allowance - salary).max(Decimal::ZERO);
    let dividends_in_bands = (dividends - allowance_left).max(Decimal::ZERO);
    let nil_slice = dividends_in_bands.min(bands.dividends.allowance);
    let (basic, higher, additional) = band_split(
        salary_taxable + nil_slice,
        salary_taxable + dividends_in_bands,
        &bands.income,
    );
    let dividend_tax = round2(
        basic * bands.dividends.basic_rate
            + higher * bands.dividends.higher_rate
            + additional * bands.dividends.additional_rate,
    );

    log::debug!(
        "limited company: gross {} -> salary {}, profit {}, corp tax {}, dividends {}, dividend tax {}",
        gross,
        salary,
        profit_before_tax,
        corporation_tax,
        dividends,
        dividend_tax
    );

    LimitedBreakdown {
        salary,
        employer_ni,
        profit_before_tax,
        corporation_tax,
        dividends,
        personal_allowance,
        salary_income_tax,
        employee_ni,
        dividend_tax,
    }
}

/// Corporation tax: small-profits rate up to the lower limit, main rate
/// above the upper limit, marginal relief in between
pub(crate) fn corporation_tax(profit: Decimal, bands: &CorporationTaxBands) -> Decimal {
    if profit <= Decimal::ZERO {
        Decimal::ZERO
    } else if profit <= bands.small_profits_limit {
        profit * bands.small_profits_rate
    } else if profit >= bands.main_rate_limit {
        profit * bands.main_rate
    } else {
        profit * bands.main_rate
            - (bands.main_rate_limit - profit) * bands.marginal_relief_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::bands::{TaxBandTable, TaxYear};
    use rust_decimal_macros::dec;

    fn bands() -> TaxBandTable {
        TaxBandTable::for_year(TaxYear(2026))
    }

    #[test]
    fn corporation_tax_small_profits_rate() {
        assert_eq!(corporation_tax(dec!(40000), &bands().corporation), dec!(7600));
    }

    #[test]
    fn corporation_tax_main_rate() {
        assert_eq!(
            corporation_tax(dec!(300000), &bands().corporation),
            dec!(75000)
        );
    }

    #[test]
    fn corporation_tax_marginal_relief() {
        // 25% of 100,000 less (250,000 - 100,000) * 3/200
        assert_eq!(
            corporation_tax(dec!(100000), &bands().corporation),
            dec!(22750)
        );
    }

    #[test]
    fn corporation_tax_continuous_at_band_edges() {
        let corp = bands().corporation;
        assert_eq!(corporation_tax(dec!(50000), &corp), dec!(9500));
        assert_eq!(corporation_tax(dec!(250000), &corp), dec!(62500));
    }

    #[test]
    fn corporation_tax_zero_profit() {
        assert_eq!(corporation_tax(Decimal::ZERO, &bands().corporation), Decimal::ZERO);
    }

    #[test]
    fn fee_splits_into_salary_employer_ni_and_profit() {
        let b = limited_company(dec!(110400), &bands());
        assert_eq!(b.salary, dec!(12570));
        // 15% of (12,570 - 5,000)
        assert_eq!(b.employer_ni, dec!(1135.50));
        assert_eq!(b.profit_before_tax, dec!(96694.50));
        assert_eq!(
            b.salary + b.employer_ni + b.profit_before_tax,
            dec!(110400)
        );
    }

    #[test]
    fn marginal_relief_applies_to_mid_range_profit() {
        let b = limited_company(dec!(110400), &bands());
        assert_eq!(b.corporation_tax, dec!(21874.04));
        assert_eq!(b.dividends, dec!(74820.46));
    }

    #[test]
    fn pa_level_salary_attracts_no_personal_tax() {
        let b = limited_company(dec!(110400), &bands());
        assert_eq!(b.salary_income_tax, Decimal::ZERO);
        assert_eq!(b.employee_ni, Decimal::ZERO);
    }

    #[test]
    fn dividend_tax_stacks_on_top_of_salary() {
        let b = limited_company(dec!(110400), &bands());
        // 74,820.46 of dividends: 500 at nil, 37,200 @ 8.75%, 37,120.46 @ 33.75%
        assert_eq!(b.dividend_tax, dec!(15783.16));
    }

    #[test]
    fn salary_capped_at_gross_for_small_fees() {
        let b = limited_company(dec!(8000), &bands());
        assert_eq!(b.salary, dec!(8000));
        assert_eq!(b.employer_ni, Decimal::ZERO);
        assert_eq!(b.profit_before_tax, Decimal::ZERO);
        assert_eq!(b.dividends, Decimal::ZERO);
        assert_eq!(b.dividend_tax, Decimal::ZERO);
    }
}
