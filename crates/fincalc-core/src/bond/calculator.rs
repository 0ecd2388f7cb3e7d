//! One full bond calculation: discount, derive risk metrics, sweep the curve,
//! and assemble a serializable [`CalculationResult`].

use chrono::{Local, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::bond::curve::{price_yield_curve, PriceYieldPoint};
use crate::bond::inputs::{input_warnings, validate_inputs, BondInputs};
use crate::bond::pricing::{discount_cash_flows, CashFlow};
use crate::bond::risk::{
    accrued_interest, credit_risk, current_yield, interest_rate_risk, price_position,
    recommendation, risk_metrics, PricePosition, RiskLevel,
};
use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything computed for one set of inputs. Plain data only, so it can be
/// persisted verbatim and reloaded later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Sum of the discounted cash flows (full / dirty price)
    pub price: Money,
    /// Echo of the input yield, in percent
    pub yield_to_maturity: Percent,
    pub current_yield: Percent,
    pub macaulay_duration: Years,
    pub modified_duration: Years,
    pub convexity: f64,
    pub dirty_price: Money,
    pub clean_price: Money,
    pub accrued_interest: Money,
    pub coupon_payment: Money,
    pub annual_coupon: Money,
    pub total_periods: u32,
    pub total_coupon_income: Money,
    /// Holding-to-maturity return over the whole life, in percent
    pub total_return: Percent,
    pub annualized_return: Percent,
    pub price_position: PricePosition,
    pub interest_rate_risk: RiskLevel,
    pub credit_risk: RiskLevel,
    pub recommendation: String,
    pub cash_flows: Vec<CashFlow>,
    pub price_yield_curve: Vec<PriceYieldPoint>,
}

impl CalculationResult {
    /// Equality on every field except the cosmetic cash-flow dates.
    pub fn same_numbers(&self, other: &CalculationResult) -> bool {
        let strip = |r: &CalculationResult| {
            let mut r = r.clone();
            for cf in &mut r.cash_flows {
                cf.date = NaiveDate::MIN;
            }
            r
        };
        strip(self) == strip(other)
    }

    /// Name of the first numeric field that is NaN or infinite, if any.
    /// JSON has no encoding for those, so such a result cannot be stored.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let scalars = [
            ("price", self.price),
            ("yield_to_maturity", self.yield_to_maturity),
            ("current_yield", self.current_yield),
            ("macaulay_duration", self.macaulay_duration),
            ("modified_duration", self.modified_duration),
            ("convexity", self.convexity),
            ("dirty_price", self.dirty_price),
            ("clean_price", self.clean_price),
            ("accrued_interest", self.accrued_interest),
            ("coupon_payment", self.coupon_payment),
            ("annual_coupon", self.annual_coupon),
            ("total_coupon_income", self.total_coupon_income),
            ("total_return", self.total_return),
            ("annualized_return", self.annualized_return),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Some(name);
        }
        let flows_finite = self.cash_flows.iter().all(|cf| {
            [cf.coupon, cf.principal, cf.total_payment, cf.present_value]
                .iter()
                .all(|v| v.is_finite())
        });
        if !flows_finite {
            return Some("cash_flows");
        }
        let curve_finite = self
            .price_yield_curve
            .iter()
            .all(|p| p.yield_pct.is_finite() && p.price.is_finite());
        if !curve_finite {
            return Some("price_yield_curve");
        }
        None
    }
}

/// Headline figures rounded for display: money to cents, ratios to 2 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSummary {
    pub price: Decimal,
    pub clean_price: Decimal,
    pub accrued_interest: Decimal,
    pub current_yield: Decimal,
    pub yield_to_maturity: Decimal,
    pub macaulay_duration: Decimal,
    pub modified_duration: Decimal,
    pub convexity: Decimal,
    pub total_return: Decimal,
    pub annualized_return: Decimal,
    pub interest_rate_risk: RiskLevel,
    pub credit_risk: RiskLevel,
    pub recommendation: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a bond with cash-flow dates anchored on today's local date.
pub fn calculate_bond(
    inputs: &BondInputs,
) -> FinCalcResult<ComputationOutput<CalculationResult>> {
    calculate_bond_as_of(inputs, Local::now().date_naive())
}

/// Price a bond with cash-flow dates anchored on `as_of`. Every numeric field
/// is independent of `as_of`.
pub fn calculate_bond_as_of(
    inputs: &BondInputs,
    as_of: NaiveDate,
) -> FinCalcResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();

    validate_inputs(inputs)?;
    let mut warnings = input_warnings(inputs);

    let result = build_result(inputs, as_of, &mut warnings)?;
    if let Some(field) = result.first_non_finite() {
        return Err(FinCalcError::NonFiniteResult {
            field: field.to_string(),
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "frequency": inputs.frequency,
        "day_count": inputs.day_count.label(),
        "day_count_usage": "informational only; periods are equal-length",
        "accrued_interest": "one third of a coupon period",
        "credit_risk": "coupon-rate heuristic",
        "curve": "11 points, yield ± 5 in 1-point steps, each floored at 0.5%",
        "cash_flow_dates_from": as_of.to_string(),
    });

    Ok(with_metadata(
        "Bond Pricing — discounted cash flows with Macaulay/modified duration and convexity",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Round a result for display.
pub fn summarize(result: &CalculationResult) -> BondSummary {
    BondSummary {
        price: round2(result.price),
        clean_price: round2(result.clean_price),
        accrued_interest: round2(result.accrued_interest),
        current_yield: round2(result.current_yield),
        yield_to_maturity: round2(result.yield_to_maturity),
        macaulay_duration: round2(result.macaulay_duration),
        modified_duration: round2(result.modified_duration),
        convexity: round2(result.convexity),
        total_return: round2(result.total_return),
        annualized_return: round2(result.annualized_return),
        interest_rate_risk: result.interest_rate_risk,
        credit_risk: result.credit_risk,
        recommendation: result.recommendation.clone(),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn build_result(
    inputs: &BondInputs,
    as_of: NaiveDate,
    warnings: &mut Vec<String>,
) -> FinCalcResult<CalculationResult> {
    let schedule = discount_cash_flows(inputs, inputs.yield_to_maturity, as_of)?;
    let metrics = risk_metrics(&schedule)?;
    let price = schedule.price;
    let terms = schedule.terms;

    let annual_coupon = inputs.face_value * inputs.coupon_rate / 100.0;
    let accrued = accrued_interest(terms.coupon_payment);
    let total_coupon_income = terms.coupon_payment * f64::from(terms.total_periods);

    let redemption_value = total_coupon_income + inputs.face_value;
    let total_return = (redemption_value - price) / price * 100.0;
    let growth = redemption_value / price;
    let annualized_return = if growth > 0.0 {
        (growth.powf(1.0 / inputs.years_to_maturity) - 1.0) * 100.0
    } else {
        warnings.push("Total payments are not positive; annualized return floored at -100%".into());
        -100.0
    };

    let position = price_position(price, inputs.face_value);
    let rate_risk = interest_rate_risk(metrics.modified_duration);
    let credit = credit_risk(inputs.coupon_rate);

    tracing::debug!(
        price,
        modified_duration = metrics.modified_duration,
        ?position,
        "bond calculation complete"
    );

    Ok(CalculationResult {
        price,
        yield_to_maturity: inputs.yield_to_maturity,
        current_yield: current_yield(inputs.face_value, inputs.coupon_rate, price)?,
        macaulay_duration: metrics.macaulay_duration,
        modified_duration: metrics.modified_duration,
        convexity: metrics.convexity,
        dirty_price: price,
        clean_price: price - accrued,
        accrued_interest: accrued,
        coupon_payment: terms.coupon_payment,
        annual_coupon,
        total_periods: terms.total_periods,
        total_coupon_income,
        total_return,
        annualized_return,
        price_position: position,
        interest_rate_risk: rate_risk,
        credit_risk: credit,
        recommendation: recommendation(position, rate_risk, credit),
        cash_flows: schedule.cash_flows,
        price_yield_curve: price_yield_curve(inputs)?,
    })
}

fn round2(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or_default()
}
