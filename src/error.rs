use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort reading a transcript. Undecodable lines are skipped
/// and never show up here.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("failed to read transcript {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TranscriptError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TranscriptError::Io {
            path: path.into(),
            source,
        }
    }
}
