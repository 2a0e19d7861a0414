use crate::Article;
use std::{collections::HashMap, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Distribution of articles over the categories.
/// Categories are kept in the order they were first encountered in the corpus.
#[derive(Debug, Clone)]
pub struct CategoryStatistics {
    pub categories: Vec<CategoryCount>,
    pub total_articles: usize,
}

impl CategoryStatistics {
    pub fn compute<'a>(articles: impl IntoIterator<Item = &'a Article>) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut categories: Vec<CategoryCount> = Vec::new();
        let mut total_articles = 0;

        for article in articles {
            total_articles += 1;
            let i = *index.entry(&article.category).or_insert_with(|| {
                categories.push(CategoryCount {
                    category: article.category.clone(),
                    count: 0,
                });
                categories.len() - 1
            });
            categories[i].count += 1;
        }

        Self {
            categories,
            total_articles,
        }
    }

    pub fn distinct_categories(&self) -> usize {
        self.categories.len()
    }

    /// The most populated category, ties go to the first encountered one
    pub fn max_category(&self) -> Option<&CategoryCount> {
        let mut max: Option<&CategoryCount> = None;
        for it in &self.categories {
            if max.map_or(true, |max| it.count > max.count) {
                max = Some(it);
            }
        }
        max
    }

    /// The least populated category, ties go to the first encountered one
    pub fn min_category(&self) -> Option<&CategoryCount> {
        let mut min: Option<&CategoryCount> = None;
        for it in &self.categories {
            if min.map_or(true, |min| it.count < min.count) {
                min = Some(it);
            }
        }
        min
    }

    /// Average number of articles per category
    pub fn mean_count(&self) -> f64 {
        if self.categories.is_empty() {
            return 0.0;
        }
        self.total_articles as f64 / self.categories.len() as f64
    }
}

impl fmt::Display for CategoryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of categories: {}", self.distinct_categories())?;
        for it in &self.categories {
            writeln!(f, "    {}: {}", it.category, it.count)?;
        }
        if let (Some(max), Some(min)) = (self.max_category(), self.min_category()) {
            writeln!(f, "Max category: {} ({})", max.category, max.count)?;
            writeln!(f, "Min category: {} ({})", min.category, min.count)?;
        }
        write!(f, "Mean articles per category: {:.3}", self.mean_count())
    }
}
