//! Risk metrics derived from a discounted schedule, plus the heuristic labels
//! and recommendation text shown next to them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bond::pricing::DiscountedSchedule;
use crate::error::FinCalcError;
use crate::types::{Money, Percent, Years};
use crate::FinCalcResult;

/// Price within this distance of face value counts as par.
const PAR_TOLERANCE: Money = 0.01;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        })
    }
}

/// Where the price sits relative to face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricePosition {
    Discount,
    Par,
    Premium,
}

/// Duration / convexity figures for one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub macaulay_duration: Years,
    pub modified_duration: Years,
    pub convexity: f64,
}

// ---------------------------------------------------------------------------
// Duration & convexity
// ---------------------------------------------------------------------------

/// Macaulay duration, modified duration and convexity of `schedule`.
pub fn risk_metrics(schedule: &DiscountedSchedule) -> FinCalcResult<RiskMetrics> {
    let price = schedule.price;
    if price == 0.0 {
        return Err(FinCalcError::DivisionByZero {
            context: "duration: bond price is zero".to_string(),
        });
    }

    let ppy = f64::from(schedule.terms.payments_per_year);
    let one_plus_y = 1.0 + schedule.terms.yield_per_period;

    let mut weighted_time = 0.0;
    let mut convexity_sum = 0.0;
    for cf in &schedule.cash_flows {
        let i = f64::from(cf.period);
        weighted_time += (i / ppy) * cf.present_value;
        convexity_sum += i * (i + 1.0) / (ppy * ppy) * cf.present_value;
    }

    let macaulay_duration = weighted_time / price;
    let modified_duration = macaulay_duration / one_plus_y;
    let convexity = convexity_sum / (price * one_plus_y * one_plus_y);

    Ok(RiskMetrics {
        macaulay_duration,
        modified_duration,
        convexity,
    })
}

// ---------------------------------------------------------------------------
// Yield, accrued interest
// ---------------------------------------------------------------------------

/// Annual coupon over price, in percent.
pub fn current_yield(face_value: Money, coupon_rate: Percent, price: Money) -> FinCalcResult<Percent> {
    if price == 0.0 {
        return Err(FinCalcError::DivisionByZero {
            context: "current yield: bond price is zero".to_string(),
        });
    }
    Ok(face_value * coupon_rate / 100.0 / price * 100.0)
}

/// Placeholder accrual: one third of a period's coupon. No settlement date is
/// involved.
pub fn accrued_interest(coupon_payment: Money) -> Money {
    coupon_payment / 3.0
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Interest-rate risk from modified duration: under 5 Low, under 10 Medium.
pub fn interest_rate_risk(modified_duration: Years) -> RiskLevel {
    if modified_duration < 5.0 {
        RiskLevel::Low
    } else if modified_duration < 10.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Coupon-rate heuristic, not a credit model: 6% and up High, 4% and up Medium.
pub fn credit_risk(coupon_rate: Percent) -> RiskLevel {
    if coupon_rate >= 6.0 {
        RiskLevel::High
    } else if coupon_rate >= 4.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn price_position(price: Money, face_value: Money) -> PricePosition {
    if (price - face_value).abs() < PAR_TOLERANCE {
        PricePosition::Par
    } else if price < face_value {
        PricePosition::Discount
    } else {
        PricePosition::Premium
    }
}

/// Guidance sentence combining price position with both risk labels.
pub fn recommendation(
    position: PricePosition,
    rate_risk: RiskLevel,
    credit: RiskLevel,
) -> String {
    let pricing = match position {
        PricePosition::Discount => {
            "This bond trades at a discount to face value: its yield exceeds its coupon, \
             so part of the return comes from price appreciation toward par at maturity."
        }
        PricePosition::Premium => {
            "This bond trades at a premium to face value: its coupon exceeds the market yield, \
             and the premium amortizes away as the bond approaches maturity."
        }
        PricePosition::Par => {
            "This bond trades at par: its coupon rate matches the market yield."
        }
    };

    let rate = match rate_risk {
        RiskLevel::Low => {
            "Low duration keeps its price relatively stable when interest rates move."
        }
        RiskLevel::Medium => {
            "Moderate duration means noticeable price swings when interest rates move."
        }
        RiskLevel::High => {
            "High duration makes its price very sensitive to interest rate changes; \
             consider whether you can hold to maturity."
        }
    };

    format!("{pricing} {rate} Credit risk indicator: {credit} (based on coupon level only).")
}
