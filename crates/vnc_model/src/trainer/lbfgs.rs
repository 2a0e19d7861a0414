use super::{LinearModel, Trainer, TrainingSet};
use crate::{ModelError, Result};
use linfa::{traits::Fit, Dataset};
use linfa_logistic::MultiLogisticRegression;
use ndarray::{Array1, Array2};

/// Quasi-Newton (L-BFGS) fit delegated to `linfa-logistic`.
/// The features are densified, so keep the hashing dimension small.
#[derive(Debug, Clone)]
pub struct LbfgsMaximumEntropy {
    pub max_iterations: u64,
    /// L2 regularization strength
    pub alpha: f64,
    pub gradient_tolerance: f64,
    /// Largest `records x features` matrix the trainer agrees to allocate
    pub max_dense_cells: usize,
}

impl Default for LbfgsMaximumEntropy {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            alpha: 1e-3,
            gradient_tolerance: 1e-4,
            max_dense_cells: 100_000_000,
        }
    }
}

impl Trainer for LbfgsMaximumEntropy {
    fn name(&self) -> &'static str {
        "LbfgsMaximumEntropy"
    }

    fn train(&self, data: &TrainingSet<'_>) -> Result<LinearModel> {
        let n_records = data.features.len();
        let cells = n_records.checked_mul(data.n_features);
        if cells.map_or(true, |it| it > self.max_dense_cells) {
            return Err(ModelError::Training(format!(
                "{}x{} dense feature matrix exceeds the limit of {} cells, use fewer hash bits",
                n_records, data.n_features, self.max_dense_cells
            )));
        }
        log::debug!("Densifying {}x{} feature matrix", n_records, data.n_features);

        let mut records = Array2::<f64>::zeros((n_records, data.n_features));
        for (mut row, x) in records.rows_mut().into_iter().zip(data.features) {
            for (j, value) in x.iter() {
                row[j] = f64::from(value);
            }
        }
        let targets = Array1::from(data.labels.to_vec());
        let dataset = Dataset::new(records, targets);

        let fitted = MultiLogisticRegression::default()
            .alpha(self.alpha)
            .max_iterations(self.max_iterations)
            .gradient_tolerance(self.gradient_tolerance)
            .fit(&dataset)
            .map_err(|err| ModelError::Training(err.to_string()))?;

        // Columns of `params` follow the sorted class codes, which are exactly `0..n_classes`
        let params = fitted.params();
        let intercept = fitted.intercept();
        if params.dim() != (data.n_features, data.n_classes) || intercept.len() != data.n_classes
        {
            return Err(ModelError::Training(format!(
                "expected {}x{} parameters, got {:?}",
                data.n_features,
                data.n_classes,
                params.dim()
            )));
        }

        let mut model = LinearModel::zeros(data.n_features, data.n_classes);
        for class in 0..data.n_classes {
            model.bias[class] = intercept[class] as f32;
            let row = &mut model.weights[class * data.n_features..(class + 1) * data.n_features];
            for (j, weight) in row.iter_mut().enumerate() {
                *weight = params[[j, class]] as f32;
            }
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::tests::{argmax, separable_set};

    #[test]
    fn fits_separable_classes() {
        let (features, labels) = separable_set();
        let model = LbfgsMaximumEntropy::default()
            .train(&TrainingSet {
                features: &features,
                labels: &labels,
                n_features: 4,
                n_classes: 2,
            })
            .unwrap();

        assert_eq!(model.n_classes(), 2);
        for (x, &y) in features.iter().zip(&labels) {
            assert_eq!(argmax(&model.probabilities(x)), y);
        }
    }

    #[test]
    fn refuses_to_densify_oversized_matrix() {
        let (features, labels) = separable_set();
        let trainer = LbfgsMaximumEntropy {
            max_dense_cells: 4,
            ..LbfgsMaximumEntropy::default()
        };
        let result = trainer.train(&TrainingSet {
            features: &features,
            labels: &labels,
            n_features: 4,
            n_classes: 2,
        });

        match result {
            Err(ModelError::Training(msg)) => assert!(msg.contains("exceeds"), "{}", msg),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
