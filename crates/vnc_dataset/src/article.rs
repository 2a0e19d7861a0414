use serde::{Deserialize, Deserializer, Serialize};

/// Article from Kaggle news dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Link to the post
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    /// Headline of the article
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headline: String,
    /// Category article belongs to, this is the ground truth label
    pub category: String,
    /// Short description of the article
    #[serde(default, deserialize_with = "null_as_empty")]
    pub short_description: String,
    /// Comma-separated people who authored the article
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authors: String,
    /// Date the article was published
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_fields_default_to_empty() {
        let article: Article = serde_json::from_value(serde_json::json!({
            "category": "POLITICS",
            "headline": null,
            "authors": "Jane Doe, AP",
        }))
        .unwrap();

        assert_eq!(article.category, "POLITICS");
        assert_eq!(article.headline, "");
        assert_eq!(article.short_description, "");
        assert_eq!(article.authors, "Jane Doe, AP");
    }

    #[test]
    fn category_is_required() {
        let res = serde_json::from_value::<Article>(serde_json::json!({
            "headline": "Headline without a label",
        }));
        assert!(res.is_err());
    }
}
