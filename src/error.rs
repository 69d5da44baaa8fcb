//! Error types shared by every stage of the pipeline.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The dataset file is missing or cannot be read.
    #[error("cannot read dataset '{}': {source}", path.display())]
    DataAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header is unusable or a row does not match it.
    #[error("schema error: {0}")]
    Schema(String),

    #[error("row {row}, column '{column}': '{value}' is not a valid number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    /// Raised by the strict encoder when a label names no known class.
    #[error("row {row}: label '{label}' does not match any known class")]
    LabelEncoding { row: usize, label: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("training failed: {0}")]
    Training(String),

    #[error("prediction failed: {0}")]
    Prediction(String),

    /// Writing process output failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
