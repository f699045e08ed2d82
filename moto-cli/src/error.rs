use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Ingestion failed at the directory or output level
    #[error("{0}")]
    Import(#[from] moto_import::ImportError),

    /// Settings file missing, unreadable or malformed
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
