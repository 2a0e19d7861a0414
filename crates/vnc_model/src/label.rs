use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Invertible mapping between category names and the dense class codes
/// used by the trainers. Codes are assigned in first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelEncoder {
    categories: Vec<String>,
    codes: HashMap<String, usize>,
}

impl LabelEncoder {
    pub fn fit<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let mut it = Self::default();
        for category in categories {
            if !it.codes.contains_key(category) {
                it.codes.insert(category.to_owned(), it.categories.len());
                it.categories.push(category.to_owned());
            }
        }
        it
    }

    pub fn encode(&self, category: &str) -> Option<usize> {
        self.codes.get(category).copied()
    }

    pub fn decode(&self, code: usize) -> Option<&str> {
        self.categories.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

impl From<Vec<String>> for LabelEncoder {
    fn from(categories: Vec<String>) -> Self {
        Self::fit(categories.iter().map(String::as_str))
    }
}

impl From<LabelEncoder> for Vec<String> {
    fn from(encoder: LabelEncoder) -> Self {
        encoder.categories
    }
}
