use crate::Featurizer;
use serde::{Deserialize, Serialize};
use std::fmt;
use vnc_dataset::Article;

/// Sparse numeric vector with strictly increasing indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Collects `(index, value)` pairs, summing up values of repeated indices.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, f32)>) -> Self {
        let mut pairs: Vec<_> = pairs.into_iter().collect();
        pairs.sort_by_key(|&(index, _)| index);

        let mut it = Self::default();
        for (index, value) in pairs {
            match it.indices.last() {
                Some(&last) if last == index => {
                    if let Some(slot) = it.values.last_mut() {
                        *slot += value;
                    }
                }
                _ => {
                    it.indices.push(index);
                    it.values.push(value);
                }
            }
        }
        it
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices
            .iter()
            .zip(&self.values)
            .map(|(&index, &value)| (index as usize, value))
    }

    pub fn norm(&self) -> f32 {
        self.values.iter().map(|it| it * it).sum::<f32>().sqrt()
    }

    /// Scales the vector to unit euclidean length, zero vectors stay zero
    pub fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            self.values.iter_mut().for_each(|it| *it /= norm);
        }
        self
    }

    /// Dot product with a dense vector, indices outside of `dense` are ignored
    pub fn dot(&self, dense: &[f32]) -> f32 {
        self.iter()
            .filter_map(|(index, value)| Some(dense.get(index)? * value))
            .sum()
    }

    /// Appends `other` shifting its indices by `offset`.
    /// `offset` must be greater than every index already stored.
    fn extend_shifted(&mut self, other: &SparseVector, offset: u32) {
        self.indices
            .extend(other.indices.iter().map(|index| index + offset));
        self.values.extend_from_slice(&other.values);
    }
}

/// Free text field of an [`Article`] that is fed to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextColumn {
    Headline,
    ShortDescription,
    Authors,
}

impl TextColumn {
    pub fn text(self, article: &Article) -> &str {
        match self {
            TextColumn::Headline => &article.headline,
            TextColumn::ShortDescription => &article.short_description,
            TextColumn::Authors => &article.authors,
        }
    }

    /// Name of the featurized column
    pub fn output_name(self) -> &'static str {
        match self {
            TextColumn::Headline => "FeaturizedHeadline",
            TextColumn::ShortDescription => "FeaturizedShortDescription",
            TextColumn::Authors => "EncodedAuthors",
        }
    }
}

impl fmt::Display for TextColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.output_name())
    }
}

/// Describes how an article is turned into the `Features` vector:
/// each column is featurized on its own and the results are concatenated
/// side by side in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema<F> {
    columns: Vec<TextColumn>,
    featurizer: F,
}

impl<F: Featurizer> FeatureSchema<F> {
    pub fn new(columns: Vec<TextColumn>, featurizer: F) -> Self {
        Self {
            columns,
            featurizer,
        }
    }

    pub fn columns(&self) -> &[TextColumn] {
        &self.columns
    }

    pub fn featurizer(&self) -> &F {
        &self.featurizer
    }

    pub fn n_features(&self) -> usize {
        self.columns.len() * self.featurizer.dim()
    }

    pub fn features(&self, article: &Article) -> SparseVector {
        let dim = self.featurizer.dim() as u32;
        let mut features = SparseVector::default();
        for (i, column) in self.columns.iter().enumerate() {
            let column_features = self.featurizer.featurize(column.text(article));
            features.extend_shifted(&column_features, i as u32 * dim);
        }
        features
    }
}
