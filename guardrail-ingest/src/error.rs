//! Error types for ingestion and config loading

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing config at {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No CSVs found in {}", .0.display())]
    NoCsvFiles(PathBuf),

    #[error("CSV {} missing required columns: {missing}", .path.display())]
    MissingColumns { path: PathBuf, missing: String },

    #[error("No valid rows found in CSVs after parsing")]
    NoValidRows,
}

pub type Result<T> = std::result::Result<T, IngestError>;
