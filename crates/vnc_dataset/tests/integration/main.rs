use std::{fs, io::Write};
use vnc_dataset::{
    read_articles, train_test_split, write_articles, Article, CategoryStatistics, DatasetError,
};

fn synthetic_corpus() -> Vec<Article> {
    (0..10)
        .map(|i| Article {
            link: format!("https://www.huffpost.com/entry/{}", i),
            headline: format!("Headline number {}", i),
            category: if i < 6 { "A" } else { "B" }.to_owned(),
            short_description: format!("Description \"{}\" with quotes", i),
            authors: "Jane Doe, AP".to_owned(),
            date: format!("2022-09-{:02}", i + 1),
        })
        .collect()
}

#[test]
fn corpus_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("news.json");
    let articles = synthetic_corpus();

    write_articles(fs::File::create(&path).unwrap(), &articles).unwrap();

    assert_eq!(read_articles(&path).unwrap(), articles);
}

#[test]
fn statistics_and_split_of_loaded_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("news.json");
    write_articles(fs::File::create(&path).unwrap(), &synthetic_corpus()).unwrap();

    let articles = read_articles(&path).unwrap();
    let stats = CategoryStatistics::compute(&articles);

    assert_eq!(stats.distinct_categories(), 2);
    assert_eq!(stats.max_category().unwrap().category, "A");
    assert_eq!(stats.max_category().unwrap().count, 6);
    assert_eq!(stats.min_category().unwrap().category, "B");
    assert_eq!(stats.min_category().unwrap().count, 4);
    assert_eq!(stats.mean_count(), 5.0);

    let split = train_test_split(&articles, 0.2, 0).unwrap();
    assert_eq!(split.test.len(), 2);
    assert_eq!(split.train.len(), 8);
}

#[test]
fn malformed_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("news.json");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "{{\"category\": \"A\", \"headline\": \"ok\"}}").unwrap();
    writeln!(file, "[not an article]").unwrap();
    drop(file);

    match read_articles(&path) {
        Err(DatasetError::Parse { record, line, .. }) => {
            assert_eq!(record, 2);
            assert_eq!(line, 2);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
