use thiserror::Error;

#[derive(Error, Debug)]
pub enum GstError {
    #[error("Invalid record at row {row}: {field} {reason}")]
    Validation {
        row: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Unknown discrepancy type: {0}")]
    UnknownDiscrepancyType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GstError>;
