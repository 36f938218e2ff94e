// crates/tapaterra-core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the pipeline.
///
/// Remote failures (`Http`, `NotFound`) are usually absorbed by the callers and
/// only logged; file failures (`Io`, `Json`, `Image`) abort the operation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[cfg(feature = "icons")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Wrap an I/O error with the path it happened on.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::File {
            path: path.into(),
            source,
        }
    }

    /// `true` for errors that come from the remote service rather than the
    /// local filesystem.
    pub fn is_remote(&self) -> bool {
        matches!(self, PipelineError::Http(_) | PipelineError::NotFound(_))
    }
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        PipelineError::Http(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
