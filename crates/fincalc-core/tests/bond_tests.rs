use chrono::NaiveDate;
use fincalc_core::bond::{
    calculate_bond, calculate_bond_as_of, price_yield_curve, validate_inputs, BondInputs,
    CouponFrequency, DayCountConvention, PricePosition, RawBondInputs, ShareParams,
};
use fincalc_core::bond::inputs::MAX_YEARS_TO_MATURITY;
use fincalc_core::FinCalcError;
use proptest::prelude::*;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
}

fn bond(face: f64, coupon: f64, years: f64, ytm: f64, frequency: CouponFrequency) -> BondInputs {
    BondInputs {
        face_value: face,
        coupon_rate: coupon,
        years_to_maturity: years,
        yield_to_maturity: ytm,
        frequency,
        day_count: DayCountConvention::Thirty360,
    }
}

fn frequency() -> impl Strategy<Value = CouponFrequency> {
    prop_oneof![
        Just(CouponFrequency::Annual),
        Just(CouponFrequency::Semiannual),
        Just(CouponFrequency::Quarterly),
        Just(CouponFrequency::Monthly),
    ]
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_discount_bond_reference_price() {
    // 5% semi-annual, 10y, priced at 6%: textbook 925.61
    let input = bond(1000.0, 5.0, 10.0, 6.0, CouponFrequency::Semiannual);
    let result = calculate_bond_as_of(&input, as_of()).unwrap().result;
    assert!(
        (result.price - 925.61).abs() < 0.005,
        "Expected price ~925.61, got {}",
        result.price
    );
    assert!(
        (result.modified_duration - 7.665).abs() < 0.001,
        "Expected modified duration ~7.665, got {}",
        result.modified_duration
    );
}

#[test]
fn test_par_bond_annual_five_years() {
    let input = bond(1000.0, 6.0, 5.0, 6.0, CouponFrequency::Annual);
    let result = calculate_bond_as_of(&input, as_of()).unwrap().result;

    assert!(
        (result.price - 1000.0).abs() < 0.005,
        "Expected par price, got {}",
        result.price
    );
    assert_eq!(result.price_position, PricePosition::Par);
    assert_eq!(result.cash_flows.len(), 5);
    for cf in &result.cash_flows[..4] {
        assert!((cf.total_payment - 60.0).abs() < 1e-9);
    }
    assert!((result.cash_flows[4].total_payment - 1060.0).abs() < 1e-9);
}

#[test]
fn test_curve_is_part_of_result() {
    let input = bond(1000.0, 5.0, 10.0, 6.0, CouponFrequency::Semiannual);
    let result = calculate_bond_as_of(&input, as_of()).unwrap().result;
    assert_eq!(result.price_yield_curve, price_yield_curve(&input).unwrap());
}

#[test]
fn test_idempotent_apart_from_dates() {
    let input = bond(1000.0, 4.25, 12.5, 5.1, CouponFrequency::Quarterly);
    let first = calculate_bond(&input).unwrap().result;
    let second = calculate_bond(&input).unwrap().result;
    assert!(first.same_numbers(&second));

    let pinned_a = calculate_bond_as_of(&input, as_of()).unwrap().result;
    let pinned_b = calculate_bond_as_of(&input, as_of()).unwrap().result;
    assert_eq!(pinned_a, pinned_b);
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_unparseable_years_blocks_calculation() {
    let raw = RawBondInputs {
        face_value: "1000".into(),
        coupon_rate: "5".into(),
        years_to_maturity: "ten".into(),
        yield_to_maturity: "6".into(),
        frequency: "s".into(),
        day_count: None,
    };
    let parsed = raw.parse().unwrap();
    assert_eq!(parsed.years_to_maturity, 0.0);
    match calculate_bond(&parsed) {
        Err(FinCalcError::InvalidInput { field, .. }) => assert_eq!(field, "years_to_maturity"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_negative_face_value_rejected() {
    let input = bond(-1000.0, 5.0, 10.0, 6.0, CouponFrequency::Annual);
    assert!(validate_inputs(&input).is_err());
}

#[test]
fn test_share_link_recomputes_same_price() {
    let input = bond(500.0, 3.5, 7.0, 4.0, CouponFrequency::Monthly);
    let query = ShareParams::from(&input).to_query();
    let restored = ShareParams::from_query(&query).unwrap().to_inputs();
    let a = calculate_bond_as_of(&input, as_of()).unwrap().result;
    let b = calculate_bond_as_of(&restored, as_of()).unwrap().result;
    assert_eq!(a, b);
}

// ===========================================================================
// Edge inputs
// ===========================================================================

#[test]
fn test_huge_maturity_is_rejected_not_allocated() {
    let input = bond(1000.0, 5.0, 1e12, 6.0, CouponFrequency::Monthly);
    match calculate_bond_as_of(&input, as_of()) {
        Err(FinCalcError::InvalidInput { field, .. }) => assert_eq!(field, "years_to_maturity"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_tiny_maturity_never_yields_infinite_fields() {
    let input = bond(1000.0, 5.0, 0.00001, 6.0, CouponFrequency::Semiannual);
    match calculate_bond_as_of(&input, as_of()) {
        Err(FinCalcError::NonFiniteResult { field }) => assert_eq!(field, "annualized_return"),
        other => panic!("Expected NonFiniteResult, got {other:?}"),
    }
}

#[test]
fn test_negative_yield_curve_runs_upward_from_floor() {
    let input = bond(1000.0, 5.0, 10.0, -8.0, CouponFrequency::Annual);
    let result = calculate_bond_as_of(&input, as_of()).unwrap().result;
    let curve = &result.price_yield_curve;
    assert_eq!(curve.first().unwrap().yield_pct, 0.5);
    assert_eq!(curve.last().unwrap().yield_pct, 0.5);
    assert!(result.price > curve[0].price);
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn prop_par_when_yield_equals_coupon(
        face in 100.0f64..100_000.0,
        rate in 0.5f64..15.0,
        years in 1u32..=30,
        freq in frequency(),
    ) {
        let input = bond(face, rate, f64::from(years), rate, freq);
        let price = calculate_bond_as_of(&input, as_of()).unwrap().result.price;
        let tolerance = 0.01 * face / 1000.0;
        prop_assert!((price - face).abs() <= tolerance, "price {} face {}", price, face);
    }

    #[test]
    fn prop_discount_and_premium(
        rate in 0.5f64..12.0,
        spread in 0.25f64..3.0,
        years in 1u32..=30,
        freq in frequency(),
    ) {
        let discount = bond(1000.0, rate, f64::from(years), rate + spread, freq);
        let premium = bond(1000.0, rate + spread, f64::from(years), rate, freq);
        prop_assert!(calculate_bond_as_of(&discount, as_of()).unwrap().result.price < 1000.0);
        prop_assert!(calculate_bond_as_of(&premium, as_of()).unwrap().result.price > 1000.0);
    }

    #[test]
    fn prop_price_matches_sum_of_present_values(
        coupon in 0.0f64..12.0,
        ytm in 0.0f64..15.0,
        years in 0.1f64..30.0,
        freq in frequency(),
    ) {
        let input = bond(1000.0, coupon, years, ytm, freq);
        let result = calculate_bond_as_of(&input, as_of()).unwrap().result;
        let sum: f64 = result.cash_flows.iter().map(|cf| cf.present_value).sum();
        prop_assert!((sum - result.price).abs() <= 1e-6 * result.price.abs());
    }

    #[test]
    fn prop_modified_below_macaulay_for_positive_yield(
        coupon in 0.0f64..12.0,
        ytm in 0.01f64..15.0,
        years in 0.5f64..30.0,
        freq in frequency(),
    ) {
        let input = bond(1000.0, coupon, years, ytm, freq);
        let result = calculate_bond_as_of(&input, as_of()).unwrap().result;
        prop_assert!(result.modified_duration < result.macaulay_duration);
    }

    #[test]
    fn prop_modified_equals_macaulay_at_zero_yield(
        coupon in 0.0f64..12.0,
        years in 0.5f64..30.0,
        freq in frequency(),
    ) {
        let input = bond(1000.0, coupon, years, 0.0, freq);
        let result = calculate_bond_as_of(&input, as_of()).unwrap().result;
        prop_assert_eq!(result.modified_duration, result.macaulay_duration);
    }

    #[test]
    fn prop_curve_non_increasing(
        coupon in 0.0f64..12.0,
        ytm in -30.0f64..15.0,
        years in 0.5f64..30.0,
        freq in frequency(),
    ) {
        let input = bond(1000.0, coupon, years, ytm, freq);
        let curve = price_yield_curve(&input).unwrap();
        prop_assert_eq!(curve.len(), 11);
        for pair in curve.windows(2) {
            prop_assert!(pair[0].yield_pct <= pair[1].yield_pct);
            prop_assert!(pair[1].price <= pair[0].price);
        }
        for point in &curve {
            prop_assert!(point.yield_pct >= 0.5);
        }
    }

    #[test]
    fn prop_valid_inputs_give_finite_result_or_typed_error(
        coupon in -5.0f64..20.0,
        ytm in -50.0f64..50.0,
        years in 1e-6f64..MAX_YEARS_TO_MATURITY,
        freq in frequency(),
    ) {
        let input = bond(1000.0, coupon, years, ytm, freq);
        match calculate_bond_as_of(&input, as_of()) {
            Ok(out) => prop_assert_eq!(out.result.first_non_finite(), None),
            Err(FinCalcError::NonFiniteResult { .. }) | Err(FinCalcError::DivisionByZero { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}
