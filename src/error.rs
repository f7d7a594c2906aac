use crate::image_decoder::DecodeError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to load model: {0}")]
    Model(Box<dyn std::error::Error + Send + Sync>),

    #[error("classification failed: {0}")]
    Classify(Box<dyn std::error::Error + Send + Sync>),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(std::io::Error),
}

impl Error {
    /// Whether the user can fix this by submitting a different image.
    pub fn is_bad_submission(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}
