//! Bond calculator inputs: typed record, lenient string parsing, validation.
//!
//! Parsing never fails on numeric text. Anything that does not start with a
//! number coerces to zero, and the positivity checks in [`validate_inputs`]
//! then reject the zero where it matters (face value, years to maturity).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinCalcError;
use crate::types::{Money, Percent, Years};
use crate::FinCalcResult;

/// Longest maturity accepted; bounds the schedule at 1200 monthly periods.
pub const MAX_YEARS_TO_MATURITY: Years = 100.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Coupon payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponFrequency {
    Annual,
    Semiannual,
    Quarterly,
    Monthly,
}

impl CouponFrequency {
    pub const ALL: [CouponFrequency; 4] = [
        CouponFrequency::Annual,
        CouponFrequency::Semiannual,
        CouponFrequency::Quarterly,
        CouponFrequency::Monthly,
    ];

    pub fn payments_per_year(self) -> u32 {
        match self {
            CouponFrequency::Annual => 1,
            CouponFrequency::Semiannual => 2,
            CouponFrequency::Quarterly => 4,
            CouponFrequency::Monthly => 12,
        }
    }

    /// Months between two coupon dates.
    pub fn months_per_period(self) -> u32 {
        12 / self.payments_per_year()
    }

    /// Single-letter code used in share links.
    pub fn initial(self) -> char {
        match self {
            CouponFrequency::Annual => 'a',
            CouponFrequency::Semiannual => 's',
            CouponFrequency::Quarterly => 'q',
            CouponFrequency::Monthly => 'm',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CouponFrequency::Annual => "annual",
            CouponFrequency::Semiannual => "semiannual",
            CouponFrequency::Quarterly => "quarterly",
            CouponFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for CouponFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouponFrequency {
    type Err = FinCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "annual" | "annually" | "a" | "1" => Ok(CouponFrequency::Annual),
            "semiannual" | "semiannually" | "s" | "2" => Ok(CouponFrequency::Semiannual),
            "quarterly" | "q" | "4" => Ok(CouponFrequency::Quarterly),
            "monthly" | "m" | "12" => Ok(CouponFrequency::Monthly),
            _ => Err(FinCalcError::InvalidInput {
                field: "frequency".into(),
                reason: format!(
                    "Unknown coupon frequency '{s}'; expected annual, semiannual, quarterly or monthly"
                ),
            }),
        }
    }
}

/// Day count convention. Informational only: echoed into results, never used
/// in discounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// 30/360 US corporate convention
    #[default]
    Thirty360,
    /// ACT/360 money market convention
    Actual360,
    /// ACT/365 fixed
    Actual365,
    /// ACT/ACT (US Treasury)
    ActualActual,
}

impl DayCountConvention {
    pub fn label(self) -> &'static str {
        match self {
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::Actual360 => "Actual/360",
            DayCountConvention::Actual365 => "Actual/365",
            DayCountConvention::ActualActual => "Actual/Actual",
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = FinCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .replace(['/', '-', '_', ' '], "");
        match normalized.as_str() {
            "30360" | "thirty360" => Ok(DayCountConvention::Thirty360),
            "actual360" | "act360" => Ok(DayCountConvention::Actual360),
            "actual365" | "act365" => Ok(DayCountConvention::Actual365),
            "actualactual" | "actact" => Ok(DayCountConvention::ActualActual),
            _ => Err(FinCalcError::InvalidInput {
                field: "day_count".into(),
                reason: format!("Unknown day count convention '{s}'"),
            }),
        }
    }
}

/// Validated-shape inputs for one bond calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondInputs {
    /// Par / face value (typically 1000)
    pub face_value: Money,
    /// Annual coupon rate in percent (5.0 = 5%)
    pub coupon_rate: Percent,
    /// Years remaining to maturity; fractional years round the period count up
    pub years_to_maturity: Years,
    /// Yield to maturity in percent
    pub yield_to_maturity: Percent,
    pub frequency: CouponFrequency,
    #[serde(default)]
    pub day_count: DayCountConvention,
}

/// Untrusted form values, one string per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBondInputs {
    pub face_value: String,
    pub coupon_rate: String,
    pub years_to_maturity: String,
    pub yield_to_maturity: String,
    pub frequency: String,
    #[serde(default)]
    pub day_count: Option<String>,
}

impl RawBondInputs {
    /// Coerce every field to its typed form. Numbers never fail (they fall back
    /// to zero); only an unrecognised frequency or day count is an error.
    pub fn parse(&self) -> FinCalcResult<BondInputs> {
        let day_count = match self.day_count.as_deref() {
            Some(s) if !s.trim().is_empty() => s.parse()?,
            _ => DayCountConvention::default(),
        };
        Ok(BondInputs {
            face_value: parse_lenient(&self.face_value),
            coupon_rate: parse_lenient(&self.coupon_rate),
            years_to_maturity: parse_lenient(&self.years_to_maturity),
            yield_to_maturity: parse_lenient(&self.yield_to_maturity),
            frequency: self.frequency.parse()?,
            day_count,
        })
    }

    /// Parse then validate: the path every form submission takes.
    pub fn parse_and_validate(&self) -> FinCalcResult<BondInputs> {
        let inputs = self.parse()?;
        validate_inputs(&inputs)?;
        Ok(inputs)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse the longest numeric prefix of `s`, returning 0.0 when there is none
/// or when the value is not finite. `"5%"` is 5, `"1e3"` is 1000, `"abc"` is 0.
pub fn parse_lenient(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    // An exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject inputs that cannot produce a bond: non-positive face value or
/// maturity. Coupon and yield are deliberately not range-checked.
pub fn validate_inputs(inputs: &BondInputs) -> FinCalcResult<()> {
    for (field, value) in [
        ("face_value", inputs.face_value),
        ("coupon_rate", inputs.coupon_rate),
        ("years_to_maturity", inputs.years_to_maturity),
        ("yield_to_maturity", inputs.yield_to_maturity),
    ] {
        if !value.is_finite() {
            return Err(FinCalcError::InvalidInput {
                field: field.into(),
                reason: "Value must be a finite number".into(),
            });
        }
    }
    if !(inputs.face_value > 0.0) {
        return Err(FinCalcError::InvalidInput {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if !(inputs.years_to_maturity > 0.0) {
        return Err(FinCalcError::InvalidInput {
            field: "years_to_maturity".into(),
            reason: "Years to maturity must be positive".into(),
        });
    }
    if inputs.years_to_maturity > MAX_YEARS_TO_MATURITY {
        return Err(FinCalcError::InvalidInput {
            field: "years_to_maturity".into(),
            reason: format!("Years to maturity must not exceed {MAX_YEARS_TO_MATURITY}"),
        });
    }
    Ok(())
}

/// Soft warnings for inputs that are accepted but unusual.
pub(crate) fn input_warnings(inputs: &BondInputs) -> Vec<String> {
    let mut warnings = Vec::new();
    if inputs.coupon_rate < 0.0 {
        warnings.push(format!(
            "Negative coupon rate ({}%) accepted; cash flows include negative coupons",
            inputs.coupon_rate
        ));
    }
    if inputs.yield_to_maturity < 0.0 {
        warnings.push(format!(
            "Negative yield to maturity ({}%) accepted; discount factors exceed one",
            inputs.yield_to_maturity
        ));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(face: &str, years: &str) -> RawBondInputs {
        RawBondInputs {
            face_value: face.into(),
            coupon_rate: "5".into(),
            years_to_maturity: years.into(),
            yield_to_maturity: "6".into(),
            frequency: "semiannual".into(),
            day_count: None,
        }
    }

    #[test]
    fn test_parse_lenient_prefixes() {
        assert_eq!(parse_lenient("1000"), 1000.0);
        assert_eq!(parse_lenient("  5.25 "), 5.25);
        assert_eq!(parse_lenient("5%"), 5.0);
        assert_eq!(parse_lenient("1e3"), 1000.0);
        assert_eq!(parse_lenient("2e"), 2.0);
        assert_eq!(parse_lenient("-3.5abc"), -3.5);
        assert_eq!(parse_lenient(".5"), 0.5);
        assert_eq!(parse_lenient("7."), 7.0);
    }

    #[test]
    fn test_parse_lenient_garbage_is_zero() {
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("abc"), 0.0);
        assert_eq!(parse_lenient("-"), 0.0);
        assert_eq!(parse_lenient("."), 0.0);
        assert_eq!(parse_lenient("1e999"), 0.0);
    }

    #[test]
    fn test_frequency_codes() {
        for freq in CouponFrequency::ALL {
            let from_initial: CouponFrequency = freq.initial().to_string().parse().unwrap();
            let from_name: CouponFrequency = freq.as_str().parse().unwrap();
            let from_count: CouponFrequency = freq.payments_per_year().to_string().parse().unwrap();
            assert_eq!(from_initial, freq);
            assert_eq!(from_name, freq);
            assert_eq!(from_count, freq);
        }
        assert_eq!("Semi-Annual".parse::<CouponFrequency>().unwrap(), CouponFrequency::Semiannual);
        assert!("weekly".parse::<CouponFrequency>().is_err());
    }

    #[test]
    fn test_day_count_labels_parse() {
        assert_eq!("30/360".parse::<DayCountConvention>().unwrap(), DayCountConvention::Thirty360);
        assert_eq!("ACT/ACT".parse::<DayCountConvention>().unwrap(), DayCountConvention::ActualActual);
        assert_eq!("actual/365".parse::<DayCountConvention>().unwrap(), DayCountConvention::Actual365);
        assert!("bus/252".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_garbage_face_value_fails_validation() {
        let err = raw("abc", "10").parse_and_validate().unwrap_err();
        match err {
            FinCalcError::InvalidInput { field, .. } => assert_eq!(field, "face_value"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_years_fails_validation() {
        let err = raw("1000", "0").parse_and_validate().unwrap_err();
        match err {
            FinCalcError::InvalidInput { field, .. } => assert_eq!(field, "years_to_maturity"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_maturity_above_cap_fails_validation() {
        let err = raw("1000", "1e12").parse_and_validate().unwrap_err();
        match err {
            FinCalcError::InvalidInput { field, .. } => assert_eq!(field, "years_to_maturity"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        assert!(raw("1000", "100").parse_and_validate().is_ok());
        assert!(raw("1000", "100.01").parse_and_validate().is_err());
    }

    #[test]
    fn test_non_finite_values_fail_validation() {
        let mut input = raw("1000", "10").parse().unwrap();
        input.yield_to_maturity = f64::NAN;
        assert!(matches!(
            validate_inputs(&input),
            Err(FinCalcError::InvalidInput { ref field, .. }) if field == "yield_to_maturity"
        ));
        input.yield_to_maturity = 6.0;
        input.face_value = f64::INFINITY;
        assert!(matches!(
            validate_inputs(&input),
            Err(FinCalcError::InvalidInput { ref field, .. }) if field == "face_value"
        ));
    }

    #[test]
    fn test_negative_coupon_is_accepted_with_warning() {
        let mut input = raw("1000", "10");
        input.coupon_rate = "-2".into();
        let parsed = input.parse_and_validate().unwrap();
        assert_eq!(parsed.coupon_rate, -2.0);
        assert_eq!(input_warnings(&parsed).len(), 1);
    }

    #[test]
    fn test_day_count_defaults_when_blank() {
        let mut input = raw("1000", "10");
        input.day_count = Some("  ".into());
        assert_eq!(input.parse().unwrap().day_count, DayCountConvention::Thirty360);
    }
}
