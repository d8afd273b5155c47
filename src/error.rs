use polars::prelude::PolarsError;
use thiserror::Error;

use crate::rows::RowError;

pub type FrameResult<T> = Result<T, FrameError>;

/// Errors raised at the adapter boundary.
///
/// Engine failures (`Polars`, `Rows`) are carried through unchanged; the other
/// variants are the adapter's own checks.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Unsupported backend: {name}. Use 'polars' or 'rows'.")]
    UnsupportedBackend { name: String },

    #[error("Schema mismatch in {mode} concat: {reason}")]
    SchemaMismatch { mode: String, reason: String },

    #[error("{operation} requires at least one frame")]
    EmptyInput { operation: &'static str },

    #[error("Cannot combine frames from different backends: expected {expected}, found {found}")]
    MixedBackends { expected: String, found: String },

    #[error("Concat mode '{mode}' is not available for the {backend} backend")]
    UnsupportedMode { mode: String, backend: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Rows(#[from] RowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FrameError {
    pub(crate) fn mismatch(mode: impl ToString, reason: impl Into<String>) -> Self {
        FrameError::SchemaMismatch {
            mode: mode.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the errors the adapter raises itself, false for errors that
    /// came out of an engine.
    pub fn is_adapter_error(&self) -> bool {
        !matches!(
            self,
            FrameError::Polars(_) | FrameError::Rows(_) | FrameError::Json(_)
        )
    }
}
