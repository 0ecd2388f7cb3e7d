use clap::Args;
use serde_json::{json, Value};

use fincalc_core::bond::{
    self, BondInputs, CalculationResult, RawBondInputs, ShareParams,
};
use fincalc_core::ComputationOutput;

use crate::input;

/// Bond inputs: flags, a share link, a JSON/YAML file, or JSON on stdin
#[derive(Args, Debug, Clone, Default)]
pub struct BondArgs {
    /// Path to JSON or YAML input file
    #[arg(long, conflicts_with = "share")]
    pub input: Option<String>,

    /// Share link or query string (face=..&coupon=..&years=..&yield=..&freq=..)
    #[arg(long)]
    pub share: Option<String>,

    /// Face (par) value
    #[arg(long, allow_hyphen_values = true)]
    pub face_value: Option<String>,

    /// Annual coupon rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub coupon_rate: Option<String>,

    /// Years to maturity
    #[arg(long, allow_hyphen_values = true)]
    pub years: Option<String>,

    /// Yield to maturity in percent
    #[arg(long = "yield", allow_hyphen_values = true)]
    pub yield_to_maturity: Option<String>,

    /// annual, semiannual, quarterly or monthly (or a/s/q/m)
    #[arg(long)]
    pub frequency: Option<String>,

    /// 30/360, actual/360, actual/365 or actual/actual
    #[arg(long)]
    pub day_count: Option<String>,
}

impl BondArgs {
    fn has_flags(&self) -> bool {
        self.face_value.is_some()
            || self.coupon_rate.is_some()
            || self.years.is_some()
            || self.yield_to_maturity.is_some()
            || self.frequency.is_some()
    }

    fn raw(&self) -> RawBondInputs {
        RawBondInputs {
            face_value: self.face_value.clone().unwrap_or_default(),
            coupon_rate: self.coupon_rate.clone().unwrap_or_default(),
            years_to_maturity: self.years.clone().unwrap_or_default(),
            yield_to_maturity: self.yield_to_maturity.clone().unwrap_or_default(),
            frequency: self.frequency.clone().unwrap_or_default(),
            day_count: self.day_count.clone(),
        }
    }
}

/// Resolve the bond inputs from whichever source was given. Values are not
/// validated here; the calculation does that.
pub fn resolve_inputs(args: &BondArgs) -> Result<BondInputs, Box<dyn std::error::Error>> {
    if let Some(ref link) = args.share {
        let mut inputs = ShareParams::from_query(link)?.to_inputs();
        if let Some(ref day_count) = args.day_count {
            inputs.day_count = day_count.parse()?;
        }
        return Ok(inputs);
    }
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if args.has_flags() {
        return Ok(args.raw().parse()?);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("bond inputs required: use --face-value/--coupon-rate/--years/--yield/--frequency, \
         --share <link>, --input <file>, or JSON on stdin"
        .into())
}

/// Inputs plus the full calculation, for commands that need both.
pub fn calculate(
    args: &BondArgs,
) -> Result<(BondInputs, ComputationOutput<CalculationResult>), Box<dyn std::error::Error>> {
    let inputs = resolve_inputs(args)?;
    let output = bond::calculate_bond(&inputs)?;
    for warning in &output.warnings {
        tracing::warn!("{warning}");
    }
    Ok((inputs, output))
}

pub fn run_price(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (_, output) = calculate(&args)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_summary(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (_, output) = calculate(&args)?;
    let summary = bond::summarize(&output.result);
    Ok(json!({
        "result": summary,
        "methodology": output.methodology,
        "warnings": output.warnings,
    }))
}

pub fn run_cashflows(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (_, output) = calculate(&args)?;
    Ok(serde_json::to_value(output.result.cash_flows)?)
}

pub fn run_curve(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = resolve_inputs(&args)?;
    bond::validate_inputs(&inputs)?;
    let curve = bond::price_yield_curve(&inputs)?;
    Ok(serde_json::to_value(curve)?)
}

pub fn run_share(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = resolve_inputs(&args)?;
    let params = ShareParams::for_inputs(&inputs)?;
    Ok(json!({
        "query": params.to_query(),
        "params": params,
    }))
}
