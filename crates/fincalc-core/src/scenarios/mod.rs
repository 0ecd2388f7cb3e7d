//! Scenario store: save, list, load, delete and compare named calculations.

pub mod backend;
pub mod compare;
#[cfg(feature = "redb")]
pub mod redb_backend;
pub mod store;

pub use backend::{InMemoryBackend, JsonFileBackend, ScenarioBackend};
pub use compare::{build_comparison, ComparisonRow, ComparisonSeries, ComparisonView, MAX_COMPARE};
#[cfg(feature = "redb")]
pub use redb_backend::RedbBackend;
pub use store::{scenario_age, SavedScenario, ScenarioStore, STORAGE_KEY};
