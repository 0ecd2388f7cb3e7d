//! Price-yield curve: the pricing loop re-run across a yield sweep.

use serde::{Deserialize, Serialize};

use crate::bond::inputs::BondInputs;
use crate::bond::pricing::price_at_yield;
use crate::types::{Money, Percent};
use crate::FinCalcResult;

/// Points in the sweep, endpoints included.
pub const CURVE_POINTS: usize = 11;
/// Distance of each sweep endpoint from the input yield, in percentage points.
pub const CURVE_HALF_WIDTH: Percent = 5.0;
/// Spacing between sweep points, in percentage points.
pub const CURVE_STEP: Percent = 1.0;
/// No sweep point is priced below this yield.
pub const MIN_CURVE_YIELD: Percent = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceYieldPoint {
    pub yield_pct: Percent,
    pub price: Money,
}

/// Price `inputs` at `ytm - 5, ytm - 4, ..., ytm + 5`, each point floored at
/// 0.5%. Yields never decrease along the curve; points below the floor
/// collapse onto it.
pub fn price_yield_curve(inputs: &BondInputs) -> FinCalcResult<Vec<PriceYieldPoint>> {
    let start = inputs.yield_to_maturity - CURVE_HALF_WIDTH;

    (0..CURVE_POINTS)
        .map(|k| {
            let yield_pct = (start + k as f64 * CURVE_STEP).max(MIN_CURVE_YIELD);
            Ok(PriceYieldPoint {
                yield_pct,
                price: price_at_yield(inputs, yield_pct)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::inputs::{CouponFrequency, DayCountConvention};

    fn bond(ytm: f64) -> BondInputs {
        BondInputs {
            face_value: 1000.0,
            coupon_rate: 5.0,
            years_to_maturity: 10.0,
            yield_to_maturity: ytm,
            frequency: CouponFrequency::Semiannual,
            day_count: DayCountConvention::Thirty360,
        }
    }

    #[test]
    fn test_unfloored_sweep_uses_one_point_steps() {
        let curve = price_yield_curve(&bond(8.0)).unwrap();
        assert_eq!(curve.len(), CURVE_POINTS);
        for (k, point) in curve.iter().enumerate() {
            assert!((point.yield_pct - (3.0 + k as f64)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_floor_applies_per_point() {
        let curve = price_yield_curve(&bond(2.0)).unwrap();
        let yields: Vec<f64> = curve.iter().map(|p| p.yield_pct).collect();
        assert_eq!(
            yields,
            vec![0.5, 0.5, 0.5, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
        );
    }

    #[test]
    fn test_deeply_negative_yield_keeps_increasing_order() {
        let curve = price_yield_curve(&BondInputs {
            frequency: CouponFrequency::Annual,
            ..bond(-8.0)
        })
        .unwrap();
        assert_eq!(curve.len(), CURVE_POINTS);
        for point in &curve {
            assert_eq!(point.yield_pct, MIN_CURVE_YIELD);
        }
        for pair in curve.windows(2) {
            assert!(pair[0].yield_pct <= pair[1].yield_pct);
            assert_eq!(pair[0].price, pair[1].price);
        }
    }

    #[test]
    fn test_curve_prices_fall_as_yield_rises() {
        let curve = price_yield_curve(&bond(6.0)).unwrap();
        for pair in curve.windows(2) {
            assert!(pair[1].price <= pair[0].price);
        }
    }

    #[test]
    fn test_curve_point_at_input_yield_matches_price() {
        let input = bond(6.0);
        let curve = price_yield_curve(&input).unwrap();
        // ytm = 6 → sweep 1..=11, input yield sits at index 5
        let mid = curve[5];
        assert!((mid.yield_pct - 6.0).abs() < 1e-12);
        let direct = price_at_yield(&input, 6.0).unwrap();
        assert!((mid.price - direct).abs() < 1e-9);
    }
}
