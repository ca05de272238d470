use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to draw chart '{artifact}': {message}")]
    Draw { artifact: String, message: String },

    #[error("Failed to encode '{0}' as PNG")]
    Encode(String, #[source] image::ImageError),

    #[error("Failed to serialize data for '{0}'")]
    Serialize(String, #[source] serde_json::Error),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write artifact '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}
