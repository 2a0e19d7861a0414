use crate::{Article, DatasetError, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Disjoint and exhaustive partition of a dataset.
/// Both subsets preserve the original corpus order.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Vec<Article>,
    pub test: Vec<Article>,
}

/// Randomly partitions `articles` putting roughly `test_fraction` of them into the test set.
/// The same `seed` and input order always produce the same partition.
pub fn train_test_split(
    articles: &[Article],
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DatasetError::InvalidTestFraction(test_fraction));
    }
    if articles.is_empty() {
        return Err(DatasetError::Empty);
    }

    let test_indices = test_indices(articles.len(), test_fraction, seed);

    let mut split = TrainTestSplit {
        train: Vec::with_capacity(articles.len()),
        test: Vec::new(),
    };
    for (article, is_test) in articles.iter().zip(test_indices) {
        let subset = if is_test {
            &mut split.test
        } else {
            &mut split.train
        };
        subset.push(article.clone());
    }

    log::debug!(
        "Split {} articles into {} train and {} test ones (seed: {})",
        articles.len(),
        split.train.len(),
        split.test.len(),
        seed
    );

    Ok(split)
}

/// Returns a mask with `true` for the records selected into the test set.
/// The train set always keeps at least one of the `len >= 1` records.
fn test_indices(len: usize, test_fraction: f64, seed: u64) -> Vec<bool> {
    let mut test_len = ((len as f64 * test_fraction).round() as usize).min(len - 1);
    if len >= 2 {
        test_len = test_len.max(1);
    }

    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let mut mask = vec![false; len];
    for &i in &order[..test_len] {
        mask[i] = true;
    }
    mask
}
