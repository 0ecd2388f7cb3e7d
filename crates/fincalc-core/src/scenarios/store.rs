//! Named, persisted bond calculations.
//!
//! The store is an explicit handle over an injected [`ScenarioBackend`]. The
//! whole list lives as one JSON array under a single key, so every mutation is
//! read-modify-write of that array.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::bond::{BondInputs, CalculationResult};
use crate::error::FinCalcError;
use crate::scenarios::backend::ScenarioBackend;
use crate::scenarios::compare::{build_comparison, ComparisonView, MAX_COMPARE};
use crate::FinCalcResult;

/// Storage key holding the scenario array.
pub const STORAGE_KEY: &str = "bond-calculator-scenarios";

/// One saved calculation. Serialized as
/// `{ id, name, inputs, result, savedAt }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedScenario {
    pub id: String,
    pub name: String,
    pub inputs: BondInputs,
    pub result: CalculationResult,
    pub saved_at: DateTime<Utc>,
}

pub struct ScenarioStore<B: ScenarioBackend> {
    backend: B,
    key: String,
}

impl<B: ScenarioBackend> ScenarioStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    /// Keep the scenario array under a custom key.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Save a copy of `inputs` and `result` under `name`, stamped now.
    pub fn save(
        &self,
        name: &str,
        inputs: &BondInputs,
        result: &CalculationResult,
    ) -> FinCalcResult<SavedScenario> {
        self.save_at(name, inputs, result, Utc::now())
    }

    /// Save with an explicit timestamp. The id is the timestamp in epoch
    /// milliseconds, bumped until it is unique within the store.
    pub fn save_at(
        &self,
        name: &str,
        inputs: &BondInputs,
        result: &CalculationResult,
        saved_at: DateTime<Utc>,
    ) -> FinCalcResult<SavedScenario> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinCalcError::InvalidInput {
                field: "name".into(),
                reason: "Scenario name must not be empty".into(),
            });
        }

        let mut scenarios = self.read_all()?;
        let mut stamp = saved_at.timestamp_millis();
        while scenarios.iter().any(|s| s.id == stamp.to_string()) {
            stamp += 1;
        }

        let scenario = SavedScenario {
            id: stamp.to_string(),
            name: name.to_string(),
            inputs: *inputs,
            result: result.clone(),
            saved_at,
        };
        scenarios.push(scenario.clone());
        self.write_all(&scenarios)?;

        tracing::info!(
            id = %scenario.id,
            name = %scenario.name,
            backend = self.backend.backend_name(),
            "saved scenario"
        );
        Ok(scenario)
    }

    /// Every saved scenario, oldest first.
    pub fn list(&self) -> FinCalcResult<Vec<SavedScenario>> {
        self.read_all()
    }

    pub fn get(&self, id: &str) -> FinCalcResult<Option<SavedScenario>> {
        Ok(self.read_all()?.into_iter().find(|s| s.id == id))
    }

    /// Fetch a scenario to restore its inputs and result into the active view.
    pub fn load(&self, id: &str) -> FinCalcResult<SavedScenario> {
        self.get(id)?
            .ok_or_else(|| FinCalcError::ScenarioNotFound(id.to_string()))
    }

    /// Remove a scenario. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> FinCalcResult<bool> {
        let mut scenarios = self.read_all()?;
        let before = scenarios.len();
        scenarios.retain(|s| s.id != id);
        if scenarios.len() == before {
            tracing::debug!(id, "delete requested for unknown scenario");
            return Ok(false);
        }
        self.write_all(&scenarios)?;
        tracing::info!(id, backend = self.backend.backend_name(), "deleted scenario");
        Ok(true)
    }

    /// Tabulate up to [`MAX_COMPARE`] scenarios side by side. Duplicate ids
    /// are collapsed; the first occurrence fixes the column order.
    pub fn compare(&self, ids: &[String]) -> FinCalcResult<ComparisonView> {
        let mut unique: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id.as_str()) {
                unique.push(id);
            }
        }
        if unique.is_empty() {
            return Err(FinCalcError::InvalidInput {
                field: "ids".into(),
                reason: "Select at least one scenario to compare".into(),
            });
        }
        if unique.len() > MAX_COMPARE {
            return Err(FinCalcError::ComparisonLimit {
                requested: unique.len(),
                max: MAX_COMPARE,
            });
        }

        let all = self.read_all()?;
        let selected = unique
            .iter()
            .map(|id| {
                all.iter()
                    .find(|s| s.id == *id)
                    .cloned()
                    .ok_or_else(|| FinCalcError::ScenarioNotFound(id.to_string()))
            })
            .collect::<FinCalcResult<Vec<_>>>()?;

        Ok(build_comparison(&selected))
    }

    fn read_all(&self) -> FinCalcResult<Vec<SavedScenario>> {
        match self.backend.read(&self.key)? {
            Some(payload) if !payload.trim().is_empty() => Ok(serde_json::from_str(&payload)?),
            _ => Ok(Vec::new()),
        }
    }

    fn write_all(&self, scenarios: &[SavedScenario]) -> FinCalcResult<()> {
        // serde_json writes NaN/inf as null, which would poison the whole array
        for scenario in scenarios {
            if let Some(field) = scenario.result.first_non_finite() {
                return Err(FinCalcError::NonFiniteResult {
                    field: format!("{field} (scenario {})", scenario.id),
                });
            }
        }
        let payload = serde_json::to_string(scenarios)?;
        self.backend.write(&self.key, &payload)
    }
}

/// Age of a scenario relative to `now`, for "saved 3 days ago" style labels.
pub fn scenario_age(scenario: &SavedScenario, now: DateTime<Utc>) -> Duration {
    now.signed_duration_since(scenario.saved_at)
}
