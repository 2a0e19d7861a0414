//! The batch experiment: load, describe, split, train, evaluate and try out the model

use crate::{demo, read_articles};
use anyhow::{Context, Result};
use std::path::Path;
use vnc_dataset::CategoryStatistics;
use vnc_model::{
    trainer::{LbfgsMaximumEntropy, SgdMaximumEntropy},
    MulticlassMetrics, Pipeline, TextColumn, TextFeaturizer, TrainerKind,
};

pub struct RunOpts<'a> {
    pub data_path: &'a Path,
    pub model_path: &'a Path,
    pub test_fraction: f64,
    pub seed: u64,
    pub trainer: TrainerKind,
    pub featurizer: TextFeaturizer,
    pub with_authors: bool,
    pub epochs: usize,
    pub max_iterations: u64,
    pub save_model: bool,
}

/// Returns the metrics of each evaluated subset in evaluation order
pub fn run(
    RunOpts {
        data_path,
        model_path,
        test_fraction,
        seed,
        trainer,
        featurizer,
        with_authors,
        epochs,
        max_iterations,
        save_model,
    }: RunOpts<'_>,
) -> Result<Vec<(&'static str, MulticlassMetrics)>> {
    let articles = read_articles(data_path)?;

    eprintln!("{}", CategoryStatistics::compute(&articles));

    let split = vnc_dataset::train_test_split(&articles, test_fraction, seed)?;

    let pipeline = match trainer {
        TrainerKind::Sgd => Pipeline::with_featurizer(
            featurizer,
            SgdMaximumEntropy {
                epochs,
                seed,
                ..SgdMaximumEntropy::default()
            },
        ),
        TrainerKind::Lbfgs => Pipeline::with_featurizer(
            featurizer,
            LbfgsMaximumEntropy {
                max_iterations,
                ..LbfgsMaximumEntropy::default()
            },
        ),
    };
    let pipeline = if with_authors {
        pipeline.with_column(TextColumn::Authors)
    } else {
        pipeline
    };

    eprintln!("=============== Training the model ===============");
    let time = std::time::Instant::now();
    let model = pipeline.fit(&split.train).context("Failed to train the model")?;
    eprintln!("Training has finished, took: {:?}", time.elapsed());

    let mut evaluations = Vec::new();
    for &(title, subset) in &[("Train Data", &split.train), ("Test Data", &split.test)] {
        if subset.is_empty() {
            log::warn!("{} is empty, skipping its evaluation", title);
            continue;
        }
        eprintln!(
            "=============== Evaluating Model accuracy with {} ===============",
            title
        );
        let metrics = vnc_model::evaluate(&model, subset)?;
        eprintln!("{}", metrics.report(title));

        log::info!("{}: top-3 accuracy {:.3}", title, metrics.top_k_accuracy);
        for (category, accuracy) in &metrics.per_class_accuracy {
            log::debug!("{}: {} accuracy {:.3}", title, category, accuracy);
        }
        evaluations.push((title, metrics));
    }

    if save_model {
        model
            .save(model_path)
            .with_context(|| format!("Failed to save the model to {}", model_path.display()))?;
    }

    demo::run(&model);

    Ok(evaluations)
}
