//! Cash-flow discounting engine.
//!
//! Builds the periodic coupon + bullet schedule and discounts each payment at
//! the per-period yield. Price is the running sum of the discounted payments,
//! accumulated in period order, so it always equals the sum of the schedule's
//! present values exactly.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::bond::inputs::{BondInputs, MAX_YEARS_TO_MATURITY};
use crate::error::FinCalcError;
use crate::types::{Money, Percent};
use crate::FinCalcResult;

/// Largest schedule the engine will build: the longest accepted maturity
/// paid monthly.
pub const MAX_TOTAL_PERIODS: u32 = MAX_YEARS_TO_MATURITY as u32 * 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One scheduled payment and its present value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// 1-based period index
    pub period: u32,
    /// Approximate payment date; cosmetic, never used in discounting
    pub date: NaiveDate,
    pub coupon: Money,
    /// Face value in the final period, zero otherwise
    pub principal: Money,
    pub total_payment: Money,
    pub present_value: Money,
}

/// Per-period terms shared by pricing, risk metrics and the curve sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodTerms {
    pub payments_per_year: u32,
    pub total_periods: u32,
    pub coupon_payment: Money,
    pub yield_per_period: f64,
}

impl PeriodTerms {
    /// Derive the period terms for `inputs`, discounting at `yield_pct`
    /// instead of the input yield.
    pub fn at_yield(inputs: &BondInputs, yield_pct: Percent) -> Self {
        let payments_per_year = inputs.frequency.payments_per_year();
        let ppy = f64::from(payments_per_year);
        Self {
            payments_per_year,
            total_periods: total_periods(inputs.years_to_maturity, payments_per_year),
            coupon_payment: inputs.face_value * (inputs.coupon_rate / 100.0) / ppy,
            yield_per_period: (yield_pct / 100.0) / ppy,
        }
    }

    pub fn for_inputs(inputs: &BondInputs) -> Self {
        Self::at_yield(inputs, inputs.yield_to_maturity)
    }

    fn one_plus_yield(&self) -> FinCalcResult<f64> {
        let one_plus_y = 1.0 + self.yield_per_period;
        if one_plus_y == 0.0 {
            return Err(FinCalcError::DivisionByZero {
                context: "bond pricing: (1 + yield_per_period) is zero".to_string(),
            });
        }
        Ok(one_plus_y)
    }

    fn ensure_bounded(&self) -> FinCalcResult<()> {
        if self.total_periods > MAX_TOTAL_PERIODS {
            return Err(FinCalcError::InvalidInput {
                field: "years_to_maturity".into(),
                reason: format!(
                    "Schedule of {} periods exceeds the {MAX_TOTAL_PERIODS}-period limit",
                    self.total_periods
                ),
            });
        }
        Ok(())
    }
}

/// A full discounted schedule at one yield.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedSchedule {
    pub terms: PeriodTerms,
    pub cash_flows: Vec<CashFlow>,
    pub price: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Number of coupon periods: `ceil(years × payments_per_year)`, never below one
/// for positive maturities.
pub fn total_periods(years_to_maturity: f64, payments_per_year: u32) -> u32 {
    let periods = (years_to_maturity * f64::from(payments_per_year)).ceil();
    if periods <= 0.0 {
        0
    } else if periods >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        periods as u32
    }
}

/// Generate and discount the cash-flow schedule for `inputs` at `yield_pct`.
/// Payment dates step forward from `as_of`.
pub fn discount_cash_flows(
    inputs: &BondInputs,
    yield_pct: Percent,
    as_of: NaiveDate,
) -> FinCalcResult<DiscountedSchedule> {
    let terms = PeriodTerms::at_yield(inputs, yield_pct);
    terms.ensure_bounded()?;
    let one_plus_y = terms.one_plus_yield()?;
    let months_per_period = inputs.frequency.months_per_period();

    let mut cash_flows = Vec::with_capacity(terms.total_periods as usize);
    let mut price = 0.0;

    for i in 1..=terms.total_periods {
        let principal = if i == terms.total_periods {
            inputs.face_value
        } else {
            0.0
        };
        let total_payment = terms.coupon_payment + principal;
        let present_value = total_payment / discount_base(one_plus_y, i);
        price += present_value;

        cash_flows.push(CashFlow {
            period: i,
            date: payment_date(as_of, i, months_per_period),
            coupon: terms.coupon_payment,
            principal,
            total_payment,
            present_value,
        });
    }

    tracing::debug!(
        periods = terms.total_periods,
        yield_pct,
        price,
        "discounted bond cash flows"
    );

    Ok(DiscountedSchedule {
        terms,
        cash_flows,
        price,
    })
}

/// Price only, at an arbitrary yield. Same loop and summation order as
/// [`discount_cash_flows`], without materialising the schedule.
pub fn price_at_yield(inputs: &BondInputs, yield_pct: Percent) -> FinCalcResult<Money> {
    let terms = PeriodTerms::at_yield(inputs, yield_pct);
    terms.ensure_bounded()?;
    let one_plus_y = terms.one_plus_yield()?;

    let mut price = 0.0;
    for i in 1..=terms.total_periods {
        let payment = if i == terms.total_periods {
            terms.coupon_payment + inputs.face_value
        } else {
            terms.coupon_payment
        };
        price += payment / discount_base(one_plus_y, i);
    }
    Ok(price)
}

/// `(1 + y)^period`. Periods are bounded by [`MAX_TOTAL_PERIODS`], well inside `i32`.
fn discount_base(one_plus_y: f64, period: u32) -> f64 {
    one_plus_y.powi(i32::try_from(period).unwrap_or(i32::MAX))
}

/// `as_of` advanced by `period × months_per_period` months, clamped to month end.
fn payment_date(as_of: NaiveDate, period: u32, months_per_period: u32) -> NaiveDate {
    as_of
        .checked_add_months(Months::new(period.saturating_mul(months_per_period)))
        .unwrap_or(NaiveDate::MAX)
}
