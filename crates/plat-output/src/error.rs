use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// A platform info payload could not be encoded as a JSON column.
    #[error("info column: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
