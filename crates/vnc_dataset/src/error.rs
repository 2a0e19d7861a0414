use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset file '{}' was not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read dataset file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed article record #{record} at line {line}")]
    Parse {
        record: usize,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Article record #{record} has an empty category")]
    MissingCategory { record: usize },

    #[error("Dataset contains no articles")]
    Empty,

    #[error("Test fraction must lie strictly between 0 and 1, got {0}")]
    InvalidTestFraction(f64),

    #[error("Failed to write articles")]
    Write(#[source] io::Error),
}

pub type Result<T, E = DatasetError> = std::result::Result<T, E>;
