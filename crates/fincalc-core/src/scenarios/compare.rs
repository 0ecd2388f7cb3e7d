//! Side-by-side comparison of saved scenarios. Tabulates fields that were
//! already computed; nothing is re-priced here.

use serde::{Deserialize, Serialize};

use crate::bond::{CouponFrequency, PriceYieldPoint, RiskLevel};
use crate::scenarios::store::SavedScenario;
use crate::types::{Money, Percent, Years};

/// Most scenarios a single comparison may hold.
pub const MAX_COMPARE: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub id: String,
    pub name: String,
    pub face_value: Money,
    pub coupon_rate: Percent,
    pub years_to_maturity: Years,
    pub frequency: CouponFrequency,
    pub price: Money,
    pub yield_to_maturity: Percent,
    pub current_yield: Percent,
    pub macaulay_duration: Years,
    pub modified_duration: Years,
    pub convexity: f64,
    pub total_return: Percent,
    pub interest_rate_risk: RiskLevel,
    pub credit_risk: RiskLevel,
}

/// One scenario's curve, labelled for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub id: String,
    pub name: String,
    pub points: Vec<PriceYieldPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonView {
    pub rows: Vec<ComparisonRow>,
    pub curves: Vec<ComparisonSeries>,
}

/// Build the comparison tables for `scenarios`, in the given order.
pub fn build_comparison(scenarios: &[SavedScenario]) -> ComparisonView {
    let rows = scenarios
        .iter()
        .map(|s| ComparisonRow {
            id: s.id.clone(),
            name: s.name.clone(),
            face_value: s.inputs.face_value,
            coupon_rate: s.inputs.coupon_rate,
            years_to_maturity: s.inputs.years_to_maturity,
            frequency: s.inputs.frequency,
            price: s.result.price,
            yield_to_maturity: s.result.yield_to_maturity,
            current_yield: s.result.current_yield,
            macaulay_duration: s.result.macaulay_duration,
            modified_duration: s.result.modified_duration,
            convexity: s.result.convexity,
            total_return: s.result.total_return,
            interest_rate_risk: s.result.interest_rate_risk,
            credit_risk: s.result.credit_risk,
        })
        .collect();

    let curves = scenarios
        .iter()
        .map(|s| ComparisonSeries {
            id: s.id.clone(),
            name: s.name.clone(),
            points: s.result.price_yield_curve.clone(),
        })
        .collect();

    ComparisonView { rows, curves }
}
