//! Bond calculator: pricing, duration / convexity, price-yield curve.

pub mod calculator;
pub mod curve;
pub mod inputs;
pub mod pricing;
pub mod risk;
pub mod share;

pub use calculator::{
    calculate_bond, calculate_bond_as_of, summarize, BondSummary, CalculationResult,
};
pub use curve::{price_yield_curve, PriceYieldPoint};
pub use inputs::{validate_inputs, BondInputs, CouponFrequency, DayCountConvention, RawBondInputs};
pub use pricing::{discount_cash_flows, price_at_yield, CashFlow};
pub use risk::{PricePosition, RiskLevel};
pub use share::ShareParams;
