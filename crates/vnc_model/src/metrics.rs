use crate::{Featurizer, ModelError, Prediction, Result, TrainedModel};
use std::{collections::HashMap, fmt};
use vnc_dataset::Article;

const LOG_LOSS_EPSILON: f64 = 1e-15;
const TOP_K: usize = 3;

/// Quality of a multi-class classifier on a labeled dataset
#[derive(Debug, Clone, PartialEq)]
pub struct MulticlassMetrics {
    /// Fraction of all predictions that are correct
    pub micro_accuracy: f64,
    /// Unweighted mean of per-class accuracy
    pub macro_accuracy: f64,
    /// Mean negative log-probability assigned to the true class
    pub log_loss: f64,
    /// Relative improvement of `log_loss` over always predicting the uniform distribution
    pub log_loss_reduction: f64,
    /// Fraction of articles whose category is among the `TOP_K` most probable ones
    pub top_k_accuracy: f64,
    /// Accuracy per true category, in first-encountered order
    pub per_class_accuracy: Vec<(String, f64)>,
}

/// Applies the model to every article and compares predictions with the actual categories
pub fn evaluate<F: Featurizer>(
    model: &TrainedModel<F>,
    articles: &[Article],
) -> Result<MulticlassMetrics> {
    if articles.is_empty() {
        return Err(ModelError::EmptyDataset {
            operation: "evaluate",
        });
    }
    let _t = stdx::debug_time_it("Evaluating the model");

    let mut acc = MetricsAccumulator::default();
    for (article, prediction) in articles.iter().zip(model.transform(articles)) {
        let true_class = model.labels().encode(&article.category);
        acc.push(&article.category, true_class, &prediction);
    }
    Ok(acc.finalize(model.labels().len()))
}

#[derive(Debug, Default, Clone, Copy)]
struct ClassStats {
    correct: usize,
    support: usize,
}

#[derive(Debug, Default)]
struct MetricsAccumulator {
    per_class: Vec<(String, ClassStats)>,
    class_index: HashMap<String, usize>,
    total: usize,
    correct: usize,
    top_k_correct: usize,
    log_loss_sum: f64,
}

impl MetricsAccumulator {
    /// `true_class` is `None` when the category is unknown to the model
    fn push(&mut self, category: &str, true_class: Option<usize>, prediction: &Prediction) {
        let is_correct = prediction.category.as_deref() == Some(category);

        self.total += 1;
        if is_correct {
            self.correct += 1;
        }

        let p_true = true_class.and_then(|class| prediction.probabilities.get(class).copied());

        if let Some(p) = p_true {
            let rank = prediction.probabilities.iter().filter(|&&it| it > p).count();
            if rank < TOP_K {
                self.top_k_correct += 1;
            }
        }

        let p_true = p_true.map_or(0.0, f64::from);
        self.log_loss_sum -= p_true.max(LOG_LOSS_EPSILON).ln();

        let i = match self.class_index.get(category) {
            Some(&i) => i,
            None => {
                self.per_class
                    .push((category.to_owned(), ClassStats::default()));
                self.class_index
                    .insert(category.to_owned(), self.per_class.len() - 1);
                self.per_class.len() - 1
            }
        };
        let stats = &mut self.per_class[i].1;
        stats.support += 1;
        if is_correct {
            stats.correct += 1;
        }
    }

    fn finalize(self, n_classes: usize) -> MulticlassMetrics {
        let total = self.total as f64;

        let per_class_accuracy: Vec<_> = self
            .per_class
            .into_iter()
            .map(|(category, stats)| (category, stats.correct as f64 / stats.support as f64))
            .collect();
        let macro_accuracy = per_class_accuracy.iter().map(|(_, it)| it).sum::<f64>()
            / per_class_accuracy.len() as f64;

        let log_loss = self.log_loss_sum / total;
        let baseline = (n_classes as f64).ln();
        let log_loss_reduction = if baseline > 0.0 {
            (baseline - log_loss) / baseline
        } else {
            0.0
        };

        MulticlassMetrics {
            micro_accuracy: self.correct as f64 / total,
            macro_accuracy,
            log_loss,
            log_loss_reduction,
            top_k_accuracy: self.top_k_correct as f64 / total,
            per_class_accuracy,
        }
    }
}

impl MulticlassMetrics {
    /// Console report block titled after the evaluated dataset (e.g. "Test Data")
    pub fn report<'a>(&'a self, title: &'a str) -> MetricsReport<'a> {
        MetricsReport {
            title,
            metrics: self,
        }
    }
}

pub struct MetricsReport<'a> {
    title: &'a str,
    metrics: &'a MulticlassMetrics,
}

impl fmt::Display for MetricsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "*".repeat(109);
        let m = self.metrics;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "*       Metrics for Multi-class Classification model - {}",
            self.title
        )?;
        writeln!(f, "*{}", "-".repeat(108))?;
        writeln!(f, "*       MicroAccuracy:    {:.3}", m.micro_accuracy)?;
        writeln!(f, "*       MacroAccuracy:    {:.3}", m.macro_accuracy)?;
        writeln!(f, "*       LogLoss:          {:.3}", m.log_loss)?;
        writeln!(f, "*       LogLossReduction: {:.3}", m.log_loss_reduction)?;
        write!(f, "{}", rule)
    }
}
