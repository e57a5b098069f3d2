use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Error loading {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Unsupported image: {width}x{height} has no pixels")]
    EmptyImage { width: usize, height: usize },

    #[error("Pixel buffer holds {actual} samples, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

impl LoadError {
    pub fn decode(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        LoadError::Decode {
            path: path.into(),
            message: format!("{err:#}"),
        }
    }
}
