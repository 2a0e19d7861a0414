//! Multi-class maximum entropy (multinomial logistic regression) trainers.
//!
//! Every trainer produces the same [`LinearModel`], so the solvers are
//! interchangeable behind the [`Trainer`] trait.

mod lbfgs;
mod sgd;

pub use lbfgs::LbfgsMaximumEntropy;
pub use sgd::SgdMaximumEntropy;

use crate::{Result, SparseVector};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Featurized and label-encoded training examples
pub struct TrainingSet<'a> {
    pub features: &'a [SparseVector],
    /// Class code of each example, every code in `0..n_classes` must occur
    pub labels: &'a [usize],
    pub n_features: usize,
    pub n_classes: usize,
}

pub trait Trainer {
    fn name(&self) -> &'static str;

    fn train(&self, data: &TrainingSet<'_>) -> Result<LinearModel>;
}

/// Softmax over `W·x + b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    n_features: usize,
    n_classes: usize,
    /// Class-major: row `c` holds the weights of class `c`
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl LinearModel {
    pub fn zeros(n_features: usize, n_classes: usize) -> Self {
        Self {
            n_features,
            n_classes,
            weights: vec![0.0; n_features * n_classes],
            bias: vec![0.0; n_classes],
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.weights.len() == self.n_features * self.n_classes && self.bias.len() == self.n_classes
    }

    fn class_weights(&self, class: usize) -> &[f32] {
        &self.weights[class * self.n_features..(class + 1) * self.n_features]
    }

    pub fn logits(&self, x: &SparseVector) -> Vec<f32> {
        (0..self.n_classes)
            .map(|class| self.bias[class] + x.dot(self.class_weights(class)))
            .collect()
    }

    /// Probability of each class, sums up to 1
    pub fn probabilities(&self, x: &SparseVector) -> Vec<f32> {
        let mut it = self.logits(x);
        softmax(&mut it);
        it
    }
}

pub(crate) fn softmax(logits: &mut [f32]) {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    for it in logits.iter_mut() {
        *it = (*it - max).exp();
        sum += *it;
    }
    if sum > 0.0 {
        logits.iter_mut().for_each(|it| *it /= sum);
    }
}

/// Solver selection for the cli
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerKind {
    /// [`SgdMaximumEntropy`]
    Sgd,
    /// [`LbfgsMaximumEntropy`]
    Lbfgs,
}

impl FromStr for TrainerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sgd" => Ok(TrainerKind::Sgd),
            "lbfgs" => Ok(TrainerKind::Lbfgs),
            _ => Err(format!("unknown trainer '{}', expected 'sgd' or 'lbfgs'", s)),
        }
    }
}

impl fmt::Display for TrainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrainerKind::Sgd => "sgd",
            TrainerKind::Lbfgs => "lbfgs",
        })
    }
}
