use crate::{
    FeatureSchema, Featurizer, LabelEncoder, LinearModel, ModelError, Result, SparseVector,
    TextColumn, TextFeaturizer, Trainer, TrainingSet,
};
use itertools::Itertools;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};
use vnc_dataset::Article;

/// Supervised text classification pipeline.
///
/// Stages, in order: label encoding of the `category`, featurization of each
/// text column, concatenation of the column vectors into `Features`,
/// multi-class training and, at prediction time, decoding of the predicted
/// class code back into the category name.
pub struct Pipeline<F = TextFeaturizer> {
    columns: Vec<TextColumn>,
    featurizer: F,
    trainer: Box<dyn Trainer>,
}

impl Pipeline {
    /// Pipeline over the headline and the short description with the default featurizer
    pub fn new(trainer: impl Trainer + 'static) -> Self {
        Self::with_featurizer(TextFeaturizer::default(), trainer)
    }
}

impl<F: Featurizer + Clone> Pipeline<F> {
    pub fn with_featurizer(featurizer: F, trainer: impl Trainer + 'static) -> Self {
        Self {
            columns: vec![TextColumn::Headline, TextColumn::ShortDescription],
            featurizer,
            trainer: Box::new(trainer),
        }
    }

    /// Appends a text column to the feature vector, columns that are already present are ignored
    pub fn with_column(mut self, column: TextColumn) -> Self {
        if !self.columns.contains(&column) {
            self.columns.push(column);
        }
        self
    }

    pub fn without_column(mut self, column: TextColumn) -> Self {
        self.columns.retain(|&it| it != column);
        self
    }

    pub fn columns(&self) -> &[TextColumn] {
        &self.columns
    }

    pub fn fit(&self, train: &[Article]) -> Result<TrainedModel<F>> {
        if train.is_empty() {
            return Err(ModelError::EmptyDataset { operation: "fit" });
        }
        self.featurizer
            .validate()
            .map_err(ModelError::InvalidFeaturizer)?;
        let _t = stdx::time_it(log::Level::Info, "Fitting the pipeline");

        let labels = LabelEncoder::fit(train.iter().map(|it| it.category.as_str()));
        let codes = train
            .iter()
            .map(|it| {
                labels.encode(&it.category).ok_or_else(|| {
                    ModelError::Training(format!("category '{}' was not encoded", it.category))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let schema = FeatureSchema::new(self.columns.clone(), self.featurizer.clone());
        let features: Vec<SparseVector> = train.iter().map(|it| schema.features(it)).collect();

        log::info!(
            "Training on {} articles, {} categories, {} features ({})",
            train.len(),
            labels.len(),
            schema.n_features(),
            self.columns.iter().map(|it| it.output_name()).join(", ")
        );

        let model = if labels.len() == 1 {
            log::warn!(
                "Only one category '{}' in the train set, every prediction will be the same",
                labels.categories()[0]
            );
            LinearModel::zeros(schema.n_features(), 1)
        } else {
            log::debug!("Using {} trainer", self.trainer.name());
            self.trainer.train(&TrainingSet {
                features: &features,
                labels: &codes,
                n_features: schema.n_features(),
                n_classes: labels.len(),
            })?
        };

        TrainedModel::new(schema, labels, model)
    }
}

/// Result of applying a [`TrainedModel`] to one article
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// `None` only if the model abstains, which a fitted model never does
    pub category: Option<String>,
    /// Probability of each class in label code order
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Probability of the predicted category
    pub fn score(&self) -> f32 {
        self.probabilities.iter().copied().fold(0.0, f32::max)
    }
}

/// Fitted pipeline, obtainable only from [`Pipeline::fit`] or [`TrainedModel::load`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel<F = TextFeaturizer> {
    schema: FeatureSchema<F>,
    labels: LabelEncoder,
    model: LinearModel,
}

impl<F: Featurizer> TrainedModel<F> {
    fn new(schema: FeatureSchema<F>, labels: LabelEncoder, model: LinearModel) -> Result<Self> {
        let it = Self {
            schema,
            labels,
            model,
        };
        it.check_consistency()?;
        Ok(it)
    }

    fn check_consistency(&self) -> Result<()> {
        self.schema
            .featurizer()
            .validate()
            .map_err(ModelError::IncompatibleModel)?;
        if !self.model.is_consistent() {
            return Err(ModelError::IncompatibleModel(
                "weights do not match the declared dimensions".to_owned(),
            ));
        }
        if self.model.n_features() != self.schema.n_features() {
            return Err(ModelError::IncompatibleModel(format!(
                "model expects {} features, but the schema produces {}",
                self.model.n_features(),
                self.schema.n_features()
            )));
        }
        if self.model.n_classes() != self.labels.len() {
            return Err(ModelError::IncompatibleModel(format!(
                "model predicts {} classes, but {} categories are known",
                self.model.n_classes(),
                self.labels.len()
            )));
        }
        Ok(())
    }

    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    pub fn columns(&self) -> &[TextColumn] {
        self.schema.columns()
    }

    pub fn predict_one(&self, article: &Article) -> Prediction {
        let probabilities = self.model.probabilities(&self.schema.features(article));

        let mut best: Option<usize> = None;
        for (class, &p) in probabilities.iter().enumerate() {
            if best.map_or(true, |best| p > probabilities[best]) {
                best = Some(class);
            }
        }

        Prediction {
            category: best
                .and_then(|class| self.labels.decode(class))
                .map(str::to_owned),
            probabilities,
        }
    }

    pub fn transform(&self, articles: &[Article]) -> Vec<Prediction> {
        articles.iter().map(|it| self.predict_one(it)).collect()
    }
}

impl<F: Featurizer + Serialize> TrainedModel<F> {
    /// Persists the model as json, creating missing parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| ModelError::Io {
            path: path.to_owned(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let mut writer = BufWriter::new(fs::File::create(path).map_err(io_err)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush().map_err(io_err)?;

        log::info!("Saved model to {}", path.display());
        Ok(())
    }
}

impl<F: Featurizer + DeserializeOwned> TrainedModel<F> {
    pub fn load(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ModelError::Untrained {
                path: path.to_owned(),
            },
            _ => ModelError::Io {
                path: path.to_owned(),
                source,
            },
        })?;
        let it: Self = serde_json::from_reader(BufReader::new(file))?;
        it.check_consistency()?;

        log::info!("Loaded model from {}", path.display());
        Ok(it)
    }
}
