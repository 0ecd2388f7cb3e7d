use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinCalcError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Result is not a finite number: {field}")]
    NonFiniteResult { field: String },

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Comparison limit exceeded: {requested} scenarios selected, at most {max} allowed")]
    ComparisonLimit { requested: usize, max: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinCalcError {
    fn from(e: serde_json::Error) -> Self {
        FinCalcError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for FinCalcError {
    fn from(e: std::io::Error) -> Self {
        FinCalcError::Storage(e.to_string())
    }
}

#[cfg(feature = "redb")]
mod redb_conversions {
    use super::FinCalcError;

    macro_rules! storage_from {
        ($($ty:ty),* $(,)?) => {
            $(
                impl From<$ty> for FinCalcError {
                    fn from(e: $ty) -> Self {
                        FinCalcError::Storage(e.to_string())
                    }
                }
            )*
        };
    }

    storage_from!(
        redb::DatabaseError,
        redb::TransactionError,
        redb::TableError,
        redb::StorageError,
        redb::CommitError,
    );
}
