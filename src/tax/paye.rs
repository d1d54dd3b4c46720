//! Deemed employment (inside IR35) calculation.

use super::bands::{IncomeTaxBands, NiBands, TaxBandTable};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

/// Round to whole pence, half-up
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Line items for a deemed-employment computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayeBreakdown {
    /// Deemed salary after the employer NI carve-out
    pub deemed_salary: Decimal,
    pub employer_ni: Decimal,
    /// Personal allowance after tapering
    pub personal_allowance: Decimal,
    pub income_tax: Decimal,
    pub employee_ni: Decimal,
}

/// Inside IR35 the whole fee is treated as employment income. The fee
/// payer's employer NI comes out of the fee first, so the deemed salary `d`
/// solves `d + employer_ni(d) = gross`.
pub fn deemed_payment(gross: Decimal, bands: &TaxBandTable) -> PayeBreakdown {
    let ni = &bands.ni;
    let deemed_salary = if gross > ni.secondary_threshold {
        round2(
            ni.secondary_threshold
                + (gross - ni.secondary_threshold) / (Decimal::ONE + ni.employer_rate),
        )
    } else {
        gross
    };
    let employer_ni = gross - deemed_salary;

    let personal_allowance = tapered_allowance(deemed_salary, &bands.income);
    let taxable = (deemed_salary - personal_allowance).max(Decimal::ZERO);
    let income_tax = round2(income_tax(taxable, &bands.income));
    let employee_ni = round2(employee_ni(deemed_salary, ni));

    log::debug!(
        "deemed payment: gross {} -> deemed {} (employer NI {}), tax {}, employee NI {}",
        gross,
        deemed_salary,
        employer_ni,
        income_tax,
        employee_ni
    );

    PayeBreakdown {
        deemed_salary,
        employer_ni,
        personal_allowance,
        income_tax,
        employee_ni,
    }
}

/// Personal allowance, reduced £1 for every £2 of income above the taper
/// threshold
pub(crate) fn tapered_allowance(income: Decimal, bands: &IncomeTaxBands) -> Decimal {
    if income <= bands.allowance_taper_threshold {
        return bands.personal_allowance;
    }
    let reduction = (income - bands.allowance_taper_threshold) / dec!(2);
    (bands.personal_allowance - reduction).max(Decimal::ZERO)
}

/// Portion of [from, to) falling within [lo, hi)
pub(crate) fn overlap(from: Decimal, to: Decimal, lo: Decimal, hi: Decimal) -> Decimal {
    (to.min(hi) - from.max(lo)).max(Decimal::ZERO)
}

/// Split a span of taxable income [from, to) across the three bands
pub(crate) fn band_split(
    from: Decimal,
    to: Decimal,
    bands: &IncomeTaxBands,
) -> (Decimal, Decimal, Decimal) {
    let basic = overlap(from, to, Decimal::ZERO, bands.basic_limit);
    let higher = overlap(from, to, bands.basic_limit, bands.higher_limit);
    let additional = overlap(from, to, bands.higher_limit, Decimal::MAX);
    (basic, higher, additional)
}

/// Progressive income tax on taxable income (allowance already deducted)
pub(crate) fn income_tax(taxable: Decimal, bands: &IncomeTaxBands) -> Decimal {
    let (basic, higher, additional) = band_split(Decimal::ZERO, taxable, bands);
    log::debug!(
        "income tax bands: basic {}, higher {}, additional {}",
        basic,
        higher,
        additional
    );
    basic * bands.basic_rate + higher * bands.higher_rate + additional * bands.additional_rate
}

/// Employee Class 1 NI on earnings
pub(crate) fn employee_ni(earnings: Decimal, ni: &NiBands) -> Decimal {
    let main = overlap(
        Decimal::ZERO,
        earnings,
        ni.primary_threshold,
        ni.upper_earnings_limit,
    );
    let upper = (earnings - ni.upper_earnings_limit).max(Decimal::ZERO);
    main * ni.main_rate + upper * ni.upper_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::bands::{TaxBandTable, TaxYear};

    fn bands() -> TaxBandTable {
        TaxBandTable::for_year(TaxYear(2026))
    }

    #[test]
    fn deemed_salary_plus_employer_ni_equals_gross() {
        let b = deemed_payment(dec!(110400), &bands());
        assert_eq!(b.deemed_salary + b.employer_ni, dec!(110400));
        assert_eq!(b.deemed_salary, dec!(96652.17));
        assert_eq!(b.employer_ni, dec!(13747.83));
    }

    #[test]
    fn no_employer_ni_below_secondary_threshold() {
        let b = deemed_payment(dec!(4000), &bands());
        assert_eq!(b.deemed_salary, dec!(4000));
        assert_eq!(b.employer_ni, Decimal::ZERO);
        assert_eq!(b.income_tax, Decimal::ZERO);
        assert_eq!(b.employee_ni, Decimal::ZERO);
    }

    #[test]
    fn income_tax_spans_basic_and_higher_bands() {
        let b = deemed_payment(dec!(110400), &bands());
        // taxable 84,082.17: 37,700 @ 20% + 46,382.17 @ 40%
        assert_eq!(b.income_tax, dec!(26092.87));
    }

    #[test]
    fn employee_ni_at_primary_threshold_is_zero() {
        assert_eq!(employee_ni(dec!(12570), &bands().ni), Decimal::ZERO);
    }

    #[test]
    fn employee_ni_at_upper_earnings_limit() {
        // (50,270 - 12,570) @ 8%
        assert_eq!(employee_ni(dec!(50270), &bands().ni), dec!(3016));
    }

    #[test]
    fn employee_ni_above_upper_earnings_limit_uses_upper_rate() {
        // 3,016 + 10,000 @ 2%
        assert_eq!(employee_ni(dec!(60270), &bands().ni), dec!(3216));
    }

    #[test]
    fn allowance_not_tapered_at_threshold() {
        let income = bands().income;
        assert_eq!(tapered_allowance(dec!(100000), &income), dec!(12570));
    }

    #[test]
    fn allowance_tapered_above_threshold() {
        let income = bands().income;
        // £10,000 over: reduced by £5,000
        assert_eq!(tapered_allowance(dec!(110000), &income), dec!(7570));
    }

    #[test]
    fn allowance_fully_tapered() {
        let income = bands().income;
        assert_eq!(tapered_allowance(dec!(130000), &income), Decimal::ZERO);
    }

    #[test]
    fn band_split_covers_all_three_bands() {
        let income = bands().income;
        let (basic, higher, additional) = band_split(Decimal::ZERO, dec!(150000), &income);
        assert_eq!(basic, dec!(37700));
        assert_eq!(higher, dec!(87440));
        assert_eq!(additional, dec!(24860));
    }

    #[test]
    fn band_split_of_offset_span() {
        let income = bands().income;
        // span entirely within the higher band
        let (basic, higher, additional) = band_split(dec!(40000), dec!(50000), &income);
        assert_eq!(basic, Decimal::ZERO);
        assert_eq!(higher, dec!(10000));
        assert_eq!(additional, Decimal::ZERO);
    }
}
