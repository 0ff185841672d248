use serde::Serialize;
use thiserror::Error;

use std::fmt;
use std::path::PathBuf;

/// error handling for the whole run
#[derive(Debug, Error)]
pub enum QcError {
    #[error("File error: file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Validation error: missing columns in file: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Validation error: missing '{column}' for genome {genome_id:?} at line {line}")]
    MissingValue {
        genome_id: String,
        column: String,
        line: u64,
    },
    #[error("Validation error: {0}")]
    InvalidInput(String),
    #[error("Parse error: CSV parsing failed at line {line}: {message}")]
    Parse { line: u64, message: String },
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    #[error("Unexpected error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// coarse failure category a caller can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    Validation,
    Parse,
    InsufficientData,
    Unexpected,
}

impl QcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QcError::FileNotFound(_) => ErrorKind::FileNotFound,
            QcError::MissingColumns(_)
            | QcError::MissingValue { .. }
            | QcError::InvalidInput(_) => ErrorKind::Validation,
            QcError::Parse { .. } => ErrorKind::Parse,
            QcError::InsufficientData(_) => ErrorKind::InsufficientData,
            QcError::Io(_) | QcError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// outlier tag attached to every record that reaches the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Removal {
    Yes,
    No,
}

impl Removal {
    /// strict comparison: an error equal to the threshold is kept
    #[inline(always)]
    pub fn from_error(error: f64, threshold: f64) -> Self {
        if error > threshold {
            Removal::Yes
        } else {
            Removal::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Removal::Yes => "Yes",
            Removal::No => "No",
        }
    }
}

impl fmt::Display for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// thresholds a run was executed with
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub completeness: f64,
    pub contamination: f64,
    pub error: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            completeness: crate::COMPLETENESS_THRESHOLD,
            contamination: crate::CONTAMINATION_THRESHOLD,
            error: crate::ERROR_THRESHOLD,
        }
    }
}
