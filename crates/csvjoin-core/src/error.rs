//! Error types for CSV joining.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`JoinError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input directory or file is missing.
    NotFound,
    /// The output or input list is unusable as given.
    InvalidPath,
    /// Reading or writing failed while merging.
    Io,
}

/// Errors that can occur while resolving inputs or merging CSV files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JoinError {
    // === Input Resolution Errors ===
    /// Input directory does not exist or is not a directory.
    #[error("input directory does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Input directory holds no `*.csv` files.
    #[error("no csv file found in input directory: {path}")]
    NoCsvFiles { path: PathBuf },

    /// Listed input file is missing or not a regular file.
    #[error("input file does not exist: {path}")]
    FileNotFound { path: PathBuf },

    /// Input file list is empty.
    #[error("input csv file list is empty")]
    EmptyInputList,

    // === Output Validation Errors ===
    /// Output file already exists and would be overwritten.
    #[error("output file already exists: {path}")]
    OutputExists { path: PathBuf },

    /// Parent directory of the output file does not exist.
    #[error("output directory does not exist: {path}")]
    OutputParentMissing { path: PathBuf },

    // === I/O Errors ===
    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output file.
    #[error("failed to create output file {path}: {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or parse an input CSV.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to write a row to the output.
    #[error("failed to write CSV output: {source}")]
    CsvWrite {
        #[source]
        source: csv::Error,
    },
}

impl JoinError {
    /// Returns the kind of failure this error represents.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DirectoryNotFound { .. } | Self::NoCsvFiles { .. } | Self::FileNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::EmptyInputList | Self::OutputExists { .. } | Self::OutputParentMissing { .. } => {
                ErrorKind::InvalidPath
            }
            Self::DirectoryRead { .. }
            | Self::OutputCreate { .. }
            | Self::CsvRead { .. }
            | Self::CsvWrite { .. } => ErrorKind::Io,
        }
    }
}

/// Result type for join operations.
pub type Result<T> = std::result::Result<T, JoinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JoinError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "input file does not exist: /path/to/file.csv");
    }

    #[test]
    fn test_error_kinds() {
        let missing_dir = JoinError::DirectoryNotFound {
            path: PathBuf::from("in"),
        };
        let exists = JoinError::OutputExists {
            path: PathBuf::from("out.csv"),
        };
        let io = JoinError::OutputCreate {
            path: PathBuf::from("out.csv"),
            source: std::io::Error::other("boom"),
        };

        assert_eq!(missing_dir.kind(), ErrorKind::NotFound);
        assert_eq!(JoinError::EmptyInputList.kind(), ErrorKind::InvalidPath);
        assert_eq!(exists.kind(), ErrorKind::InvalidPath);
        assert_eq!(io.kind(), ErrorKind::Io);
    }
}
