//! Pipeline error types.
//!
//! Every fatal failure mode has a named variant. Row-level problems are not
//! errors: they are counted in the load summary and logged, never propagated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("required column '{0}' not found in CSV header")]
    MissingColumn(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid classifier configuration: {0}")]
    Config(#[from] wilayah_metrics::ConfigError),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
