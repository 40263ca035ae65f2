use thiserror::Error;

/// Top-level error type for the prestige tracker.
///
/// Business rejections (regression, duplicate, unrecognised screenshot) are
/// not errors; they are carried by the outcome enums of the tracker crate.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("image download failed: {0}")]
    Download(String),

    #[error("text extraction failed ({backend}): {message}")]
    Ocr { backend: String, message: String },

    #[error("no prestige history recorded")]
    EmptyHistory,

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackerError {
    pub fn ocr(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Ocr {
            backend: backend.into(),
            message: message.into(),
        }
    }
}
