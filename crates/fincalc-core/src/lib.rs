pub mod error;
pub mod types;

#[cfg(feature = "bond")]
pub mod bond;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::FinCalcError;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
