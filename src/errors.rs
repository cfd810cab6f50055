// src/errors.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse JSON configuration in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum TrajectoryError {
    #[error("IO error reading trajectory file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No '1 PRESSURE' header marker found in trajectory file {path}")]
    MissingHeaderMarker { path: PathBuf },
}

/// Errors raised while loading a delimited table. Malformed rows are NOT
/// errors (they are dropped or coerced to missing at row scope); these cover
/// the cases where no sensible partial output exists.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error reading data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Missing expected column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },
}

// src/errors.rs
