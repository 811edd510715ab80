use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TypeModelError>;

#[derive(Debug, Error)]
pub enum TypeModelError {
    #[error("Failed to read type model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse type model {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported type model format: {0}")]
    UnsupportedFormat(PathBuf),
}
