use moto_catalog::JsonError;
use thiserror::Error;

/// Errors that can occur while ingesting a directory of workbooks.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input path does not exist or is not a directory
    #[error("Input directory not found: {0}")]
    InputDirNotFound(String),

    /// The input directory (or a file in it) could not be read
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A workbook could not be opened or parsed
    #[error("Cannot read workbook {path}: {source}")]
    Workbook {
        path: String,
        source: calamine::Error,
    },

    /// Writing the catalog output failed
    #[error("Output error: {0}")]
    Output(#[from] JsonError),
}
