use super::{softmax, LinearModel, Trainer, TrainingSet};
use crate::Result;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Stochastic gradient descent over the multinomial log-likelihood with L2 regularization.
/// Works directly on sparse features, so it scales to the full corpus.
#[derive(Debug, Clone)]
pub struct SgdMaximumEntropy {
    pub epochs: usize,
    /// Initial step size, decays as `learning_rate / (1 + epoch)`
    pub learning_rate: f32,
    pub l2: f32,
    /// Stop early once the mean log-loss improves less than this between epochs
    pub tolerance: f64,
    /// Seeds the order examples are visited in
    pub seed: u64,
}

impl Default for SgdMaximumEntropy {
    fn default() -> Self {
        Self {
            epochs: 10,
            learning_rate: 0.5,
            l2: 1e-6,
            tolerance: 1e-4,
            seed: 0,
        }
    }
}

impl Trainer for SgdMaximumEntropy {
    fn name(&self) -> &'static str {
        "SgdMaximumEntropy"
    }

    fn train(&self, data: &TrainingSet<'_>) -> Result<LinearModel> {
        let mut model = LinearModel::zeros(data.n_features, data.n_classes);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut order: Vec<usize> = (0..data.features.len()).collect();
        let mut prev_loss = f64::INFINITY;

        for epoch in 0..self.epochs {
            order.shuffle(&mut rng);
            let learning_rate = self.learning_rate / (1 + epoch) as f32;
            let mut loss = 0.0;

            for &i in &order {
                let x = &data.features[i];
                let y = data.labels[i];

                let mut p = model.logits(x);
                softmax(&mut p);
                loss -= f64::from(p[y].max(1e-15)).ln();

                for (class, p) in p.into_iter().enumerate() {
                    let gradient = if class == y { p - 1.0 } else { p };
                    let row = &mut model.weights
                        [class * model.n_features..(class + 1) * model.n_features];
                    for (j, value) in x.iter() {
                        row[j] -= learning_rate * (gradient * value + self.l2 * row[j]);
                    }
                    model.bias[class] -= learning_rate * gradient;
                }
            }

            loss /= order.len().max(1) as f64;
            log::debug!("{}: epoch {}, mean log-loss {:.5}", self.name(), epoch, loss);

            if prev_loss - loss < self.tolerance {
                break;
            }
            prev_loss = loss;
        }

        Ok(model)
    }
}
