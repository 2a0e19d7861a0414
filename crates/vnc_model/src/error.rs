use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Cannot {operation} on an empty dataset")]
    EmptyDataset { operation: &'static str },

    #[error("No trained model found at '{}', train and save one first", path.display())]
    Untrained { path: PathBuf },

    #[error("Invalid featurizer: {0}")]
    InvalidFeaturizer(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Failed to access model file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to (de)serialize the model")]
    Serialization(#[from] serde_json::Error),

    #[error("Model is inconsistent: {0}")]
    IncompatibleModel(String),
}

pub type Result<T, E = ModelError> = std::result::Result<T, E>;
