use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("Result file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("No samples found in result file")]
    NoSamples,

    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;
