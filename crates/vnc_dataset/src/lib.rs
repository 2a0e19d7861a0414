//! Kaggle news category dataset: reading, descriptive statistics and
//! reproducible train/test splitting.

mod article;
mod error;
mod read;
mod split;
mod stats;

pub use article::Article;
pub use error::{DatasetError, Result};
pub use read::{read_articles, read_articles_from_str, write_articles};
pub use split::{train_test_split, TrainTestSplit};
pub use stats::{CategoryCount, CategoryStatistics};
