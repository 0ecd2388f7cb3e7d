use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde_json::{json, Value};

use fincalc_core::scenarios::{JsonFileBackend, ScenarioStore};

use super::bond::{self, BondArgs};
use crate::input;

#[derive(Args)]
pub struct ScenarioArgs {
    #[command(subcommand)]
    pub command: ScenarioCommand,
}

#[derive(Subcommand)]
pub enum ScenarioCommand {
    /// Price a bond and save it under a name
    Save(SaveArgs),
    /// List saved scenarios, oldest first
    List,
    /// Show a saved scenario's inputs and result
    Load(IdArgs),
    /// Delete a saved scenario
    Delete(DeleteArgs),
    /// Compare up to four saved scenarios side by side
    Compare(CompareArgs),
}

#[derive(Args)]
pub struct SaveArgs {
    /// Scenario name
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub bond: BondArgs,
}

#[derive(Args)]
pub struct IdArgs {
    /// Scenario id
    pub id: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Scenario id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Scenario ids, in column order
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

pub fn run_scenario(
    args: ScenarioArgs,
    dir: PathBuf,
) -> Result<Value, Box<dyn std::error::Error>> {
    tracing::debug!(dir = %dir.display(), "opening scenario store");
    let store = ScenarioStore::new(JsonFileBackend::new(dir));

    match args.command {
        ScenarioCommand::Save(args) => {
            let (inputs, output) = bond::calculate(&args.bond)?;
            let saved = store.save(&args.name, &inputs, &output.result)?;
            Ok(json!({
                "id": saved.id,
                "name": saved.name,
                "savedAt": saved.saved_at,
                "price": saved.result.price,
            }))
        }
        ScenarioCommand::List => {
            let rows: Vec<Value> = store
                .list()?
                .into_iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "name": s.name,
                        "savedAt": s.saved_at,
                        "face_value": s.inputs.face_value,
                        "coupon_rate": s.inputs.coupon_rate,
                        "years_to_maturity": s.inputs.years_to_maturity,
                        "yield_to_maturity": s.inputs.yield_to_maturity,
                        "frequency": s.inputs.frequency,
                        "price": s.result.price,
                    })
                })
                .collect();
            Ok(Value::Array(rows))
        }
        ScenarioCommand::Load(args) => Ok(serde_json::to_value(store.load(&args.id)?)?),
        ScenarioCommand::Delete(args) => {
            if !args.yes && !input::stdin::confirm(&format!("Delete scenario {}?", args.id))? {
                return Ok(json!({ "id": args.id, "deleted": false }));
            }
            let deleted = store.delete(&args.id)?;
            Ok(json!({ "id": args.id, "deleted": deleted }))
        }
        ScenarioCommand::Compare(args) => Ok(serde_json::to_value(store.compare(&args.ids)?)?),
    }
}
