//! Share links: the five primitive inputs encoded as URL query parameters,
//! e.g. `face=1000&coupon=5&years=10&yield=6&freq=s`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::bond::inputs::{
    parse_lenient, validate_inputs, BondInputs, CouponFrequency, DayCountConvention,
};
use crate::error::FinCalcError;
use crate::types::{Money, Percent, Years};
use crate::FinCalcResult;

const KEY_FACE: &str = "face";
const KEY_COUPON: &str = "coupon";
const KEY_YEARS: &str = "years";
const KEY_YIELD: &str = "yield";
const KEY_FREQ: &str = "freq";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShareParams {
    pub face_value: Money,
    pub coupon_rate: Percent,
    pub years_to_maturity: Years,
    pub yield_to_maturity: Percent,
    pub frequency: CouponFrequency,
}

impl From<&BondInputs> for ShareParams {
    fn from(inputs: &BondInputs) -> Self {
        Self {
            face_value: inputs.face_value,
            coupon_rate: inputs.coupon_rate,
            years_to_maturity: inputs.years_to_maturity,
            yield_to_maturity: inputs.yield_to_maturity,
            frequency: inputs.frequency,
        }
    }
}

impl ShareParams {
    /// Share parameters for inputs that pass validation; a link is only
    /// handed out for a bond that can actually be priced.
    pub fn for_inputs(inputs: &BondInputs) -> FinCalcResult<Self> {
        validate_inputs(inputs)?;
        Ok(Self::from(inputs))
    }

    /// Inputs for recomputation. Day count is not shared and takes its default.
    pub fn to_inputs(&self) -> BondInputs {
        BondInputs {
            face_value: self.face_value,
            coupon_rate: self.coupon_rate,
            years_to_maturity: self.years_to_maturity,
            yield_to_maturity: self.yield_to_maturity,
            frequency: self.frequency,
            day_count: DayCountConvention::default(),
        }
    }

    /// Query string without the leading `?`.
    pub fn to_query(&self) -> String {
        format!(
            "{KEY_FACE}={}&{KEY_COUPON}={}&{KEY_YEARS}={}&{KEY_YIELD}={}&{KEY_FREQ}={}",
            self.face_value,
            self.coupon_rate,
            self.years_to_maturity,
            self.yield_to_maturity,
            self.frequency.initial(),
        )
    }

    /// Decode a query string, a `?`-prefixed query, or a full URL. Values may
    /// be percent-encoded (`%73`, `+`). Unknown keys are ignored; every one of
    /// the five keys must be present.
    pub fn from_query(query: &str) -> FinCalcResult<Self> {
        let query = match query.split_once('?') {
            Some((_, q)) => q,
            None => query,
        };
        let query = query.split('#').next().unwrap_or_default();

        let params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        Ok(Self {
            face_value: parse_lenient(required(&params, KEY_FACE)?),
            coupon_rate: parse_lenient(required(&params, KEY_COUPON)?),
            years_to_maturity: parse_lenient(required(&params, KEY_YEARS)?),
            yield_to_maturity: parse_lenient(required(&params, KEY_YIELD)?),
            frequency: required(&params, KEY_FREQ)?.parse()?,
        })
    }
}

fn required<'a>(params: &'a HashMap<String, String>, key: &str) -> FinCalcResult<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| FinCalcError::InvalidInput {
            field: key.to_string(),
            reason: format!("Share link is missing the '{key}' parameter"),
        })
}
