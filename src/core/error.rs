use thiserror::Error;

use crate::fits::StorageType;

/// Exit code for a selected HDU that is not a binary table.
pub const EXIT_NOT_BINARY_TABLE: i32 = -1;
/// Exit code for a required column missing from the catalog.
pub const EXIT_COLUMN_NOT_FOUND: i32 = -2;
/// Exit code for a required column stored with an unexpected type.
pub const EXIT_TYPE_MISMATCH: i32 = -3;
/// Exit code for failures outside the FITS reader (stdout, config).
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error, PartialEq)]
pub enum PalistError {
    #[error("Error: this HDU is not a binary table")]
    NotBinaryTable,
    #[error("Could not find key \"{0}\" in binary table.")]
    ColumnNotFound(String),
    #[error("Type code for key {column} is not of type {expected}")]
    TypeMismatch {
        column: String,
        position: usize,
        expected: StorageType,
        actual: StorageType,
    },
    /// A nonzero CFITSIO status, kept as the library reported it.
    #[error("FITSIO status = {status}: {message}")]
    Fits { status: i32, message: String },
    #[error("Column row counts differ: {0}")]
    RowCountMismatch(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),
}

impl PalistError {
    pub fn fits(status: i32, message: impl Into<String>) -> Self {
        PalistError::Fits {
            status,
            message: message.into(),
        }
    }

    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PalistError::NotBinaryTable => EXIT_NOT_BINARY_TABLE,
            PalistError::ColumnNotFound(_) => EXIT_COLUMN_NOT_FOUND,
            PalistError::TypeMismatch { .. } => EXIT_TYPE_MISMATCH,
            PalistError::Fits { status, .. } => *status,
            PalistError::RowCountMismatch(_)
            | PalistError::IoError(_)
            | PalistError::ConfigParsingError(_) => EXIT_FAILURE,
        }
    }
}

impl From<std::io::Error> for PalistError {
    fn from(err: std::io::Error) -> Self {
        PalistError::IoError(err.to_string())
    }
}
