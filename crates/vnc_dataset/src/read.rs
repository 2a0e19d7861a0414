use crate::{Article, DatasetError, Result};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

/// Reads all the articles at the specified `dataset_path` in file order.
/// The file must be in `ndjson` format (i.e. it contains `\n`-delimited json objects),
/// though any whitespace between the objects is accepted.
/// Each object in the dataset file must conform to the given `Article`
pub fn read_articles(dataset_path: &Path) -> Result<Vec<Article>> {
    let _t = stdx::debug_time_it("Reading articles");

    let text = fs::read_to_string(dataset_path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DatasetError::FileNotFound {
            path: dataset_path.to_owned(),
        },
        _ => DatasetError::Io {
            path: dataset_path.to_owned(),
            source,
        },
    })?;

    let articles = read_articles_from_str(&text)?;

    log::info!(
        "Read {} articles from {}",
        articles.len(),
        dataset_path.display()
    );

    Ok(articles)
}

/// Parses back-to-back json article objects until the end of the input.
/// Fails on the first malformed or unlabeled record, partial corpora are never returned.
pub fn read_articles_from_str(text: &str) -> Result<Vec<Article>> {
    let stream = serde_json::Deserializer::from_str(text).into_iter::<Article>();

    let mut articles = Vec::new();
    for (i, article) in stream.enumerate() {
        let record = i + 1;
        let article = article.map_err(|source| DatasetError::Parse {
            record,
            line: source.line(),
            source,
        })?;
        if article.category.trim().is_empty() {
            return Err(DatasetError::MissingCategory { record });
        }
        articles.push(article);
    }

    if articles.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(articles)
}

/// Writes the articles one json object per line, the inverse of [`read_articles_from_str`]
pub fn write_articles<'a>(
    mut writer: impl Write,
    articles: impl IntoIterator<Item = &'a Article>,
) -> Result<()> {
    for article in articles {
        serde_json::to_writer(&mut writer, article)
            .map_err(|err| DatasetError::Write(err.into()))?;
        writer.write_all(b"\n").map_err(DatasetError::Write)?;
    }
    writer.flush().map_err(DatasetError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = r#"{"link": "https://www.huffpost.com/entry/a", "headline": "First", "category": "U.S. NEWS", "short_description": "one", "authors": "Carla K. Johnson, AP", "date": "2022-09-23"}
{"link": "https://www.huffpost.com/entry/b", "headline": "Second", "category": "COMEDY", "short_description": "two", "authors": "", "date": "2022-09-22"}
"#;

    #[test]
    fn reads_records_in_file_order() {
        let articles = read_articles_from_str(CORPUS).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].headline, "First");
        assert_eq!(articles[0].authors, "Carla K. Johnson, AP");
        assert_eq!(articles[1].category, "COMEDY");
        assert_eq!(articles[1].date, "2022-09-22");
    }

    #[test]
    fn accepts_values_without_newlines_between_them() {
        let text = r#"{"category":"A","headline":"x"}{"category":"B"}   {"category":"C"}"#;
        let categories: Vec<_> = read_articles_from_str(text)
            .unwrap()
            .into_iter()
            .map(|it| it.category)
            .collect();

        assert_eq!(categories, ["A", "B", "C"]);
    }

    #[test]
    fn malformed_record_aborts_the_whole_load() {
        let text = "{\"category\":\"A\"}\n{\"category\": \n";
        match read_articles_from_str(text) {
            Err(DatasetError::Parse { record, .. }) => assert_eq!(record, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unlabeled_record_is_rejected() {
        let text = "{\"category\":\"A\"}\n{\"category\":\" \",\"headline\":\"x\"}\n";
        match read_articles_from_str(text) {
            Err(DatasetError::MissingCategory { record }) => assert_eq!(record, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            read_articles_from_str(" \n\n"),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        match read_articles(&path) {
            Err(DatasetError::FileNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn written_articles_read_back_identically() {
        let articles = read_articles_from_str(CORPUS).unwrap();

        let mut buf = Vec::new();
        write_articles(&mut buf, &articles).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(read_articles_from_str(&text).unwrap(), articles);
    }
}
