//! News category classification model: label encoding, text featurization,
//! linear multi-class training, evaluation and single article prediction.

mod error;
mod features;
mod featurize;
mod label;
mod metrics;
mod pipeline;
pub mod trainer;

pub use error::{ModelError, Result};
pub use features::{FeatureSchema, SparseVector, TextColumn};
pub use featurize::{Featurizer, TextFeaturizer};
pub use label::LabelEncoder;
pub use metrics::{evaluate, MetricsReport, MulticlassMetrics};
pub use pipeline::{Pipeline, Prediction, TrainedModel};
pub use trainer::{LinearModel, Trainer, TrainerKind, TrainingSet};
