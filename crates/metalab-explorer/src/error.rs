pub type ExplorerResult<T> = Result<T, ExplorerError>;

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("invalid explorer config: {0}")]
    Config(String),

    #[error("unknown level: {0}")]
    UnknownLevel(String),

    #[error("schema mismatch for {table}: expected {expected} values, got {actual}")]
    SchemaMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A filter submission that must be rejected before it reaches [`crate::propagate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("select at least one value for {field}")]
    EmptySelection { field: String },

    #[error("unknown field {table}[{field}]")]
    UnknownField { table: String, field: String },

    #[error("{field}: {input:?} is not a number")]
    InvalidNumber { field: String, input: String },

    #[error("{field}: minimum {min} is greater than maximum {max}")]
    InvertedRange { field: String, min: f64, max: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("invalid dataset json: {0}")]
    InvalidJson(String),

    #[error("dataset row {row} is not an object")]
    NotAnObject { row: usize },

    #[error("dataset row {row}: field {field} is not a scalar value")]
    InvalidValue { row: usize, field: String },

    #[error("dataset row {row}: field {field} is an integer too large to compare exactly")]
    InexactNumber { row: usize, field: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no effects survive the current filters")]
    NoEffects,

    #[error("effect field {field} is missing or not numeric")]
    MissingField { field: String },

    #[error("meta-analysis failed: {0}")]
    Failed(String),
}

impl ExplorerError {
    /// Whether this is a user-facing validation error (shown inline next to the filter form).
    pub fn is_validation(&self) -> bool {
        matches!(self, ExplorerError::Filter(_))
    }
}
