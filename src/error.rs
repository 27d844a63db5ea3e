//! Error types for the liftplan application.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing workout logs and profile values.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("cannot read file: {0}")]
    CannotRead(String),

    #[error("invalid Excel format: {0}")]
    InvalidFormat(String),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("invalid date format in row {row}: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("invalid weight value in row {row}: {value}")]
    InvalidWeight { row: usize, value: String },

    #[error("invalid repetitions value in row {row}: {value}")]
    InvalidReps { row: usize, value: String },

    #[error("missing exercise name in row {row}")]
    MissingExercise { row: usize },

    #[error("unknown body part in row {row}: {value}")]
    UnknownPart { row: usize, value: String },

    #[error("unknown lift: {0}")]
    UnknownLift(String),

    #[error("unknown gender: {0}")]
    UnknownGender(String),

    #[error("unknown experience level: {0}")]
    UnknownLevel(String),

    #[error("unknown set scheme: {0}")]
    UnknownScheme(String),

    #[error("unknown 1RM formula: {0}")]
    UnknownFormula(String),
}

/// Errors that can occur loading or saving JSON documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
