use napi::Result as NapiResult;
use napi_derive::napi;

use fincalc_core::bond::{self, BondInputs, ShareParams};
use fincalc_core::scenarios::{JsonFileBackend, ScenarioStore};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_inputs(input_json: &str) -> NapiResult<BondInputs> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn to_json<T: serde::Serialize>(value: &T) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

fn open_store(store_dir: String) -> ScenarioStore<JsonFileBackend> {
    ScenarioStore::new(JsonFileBackend::new(store_dir))
}

// ---------------------------------------------------------------------------
// Bond
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_bond(input_json: String) -> NapiResult<String> {
    let inputs = parse_inputs(&input_json)?;
    let output = bond::calculate_bond(&inputs).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn bond_summary(input_json: String) -> NapiResult<String> {
    let inputs = parse_inputs(&input_json)?;
    let output = bond::calculate_bond(&inputs).map_err(to_napi_error)?;
    to_json(&bond::summarize(&output.result))
}

#[napi]
pub fn price_yield_curve(input_json: String) -> NapiResult<String> {
    let inputs = parse_inputs(&input_json)?;
    bond::validate_inputs(&inputs).map_err(to_napi_error)?;
    let curve = bond::price_yield_curve(&inputs).map_err(to_napi_error)?;
    to_json(&curve)
}

// ---------------------------------------------------------------------------
// Share links
// ---------------------------------------------------------------------------

#[napi]
pub fn encode_share_link(input_json: String) -> NapiResult<String> {
    let inputs = parse_inputs(&input_json)?;
    let params = ShareParams::for_inputs(&inputs).map_err(to_napi_error)?;
    Ok(params.to_query())
}

/// Decode a query string (or full URL) back into bond inputs JSON.
#[napi]
pub fn decode_share_link(query: String) -> NapiResult<String> {
    let params = ShareParams::from_query(&query).map_err(to_napi_error)?;
    to_json(&params.to_inputs())
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn save_scenario(store_dir: String, name: String, input_json: String) -> NapiResult<String> {
    let inputs = parse_inputs(&input_json)?;
    let output = bond::calculate_bond(&inputs).map_err(to_napi_error)?;
    let saved = open_store(store_dir)
        .save(&name, &inputs, &output.result)
        .map_err(to_napi_error)?;
    to_json(&saved)
}

#[napi]
pub fn list_scenarios(store_dir: String) -> NapiResult<String> {
    let scenarios = open_store(store_dir).list().map_err(to_napi_error)?;
    to_json(&scenarios)
}

#[napi]
pub fn load_scenario(store_dir: String, id: String) -> NapiResult<String> {
    let scenario = open_store(store_dir).load(&id).map_err(to_napi_error)?;
    to_json(&scenario)
}

#[napi]
pub fn delete_scenario(store_dir: String, id: String) -> NapiResult<bool> {
    open_store(store_dir).delete(&id).map_err(to_napi_error)
}

#[napi]
pub fn compare_scenarios(store_dir: String, ids: Vec<String>) -> NapiResult<String> {
    let view = open_store(store_dir).compare(&ids).map_err(to_napi_error)?;
    to_json(&view)
}
