use vnc_dataset::{train_test_split, Article};
use vnc_model::{
    evaluate, trainer::LbfgsMaximumEntropy, trainer::SgdMaximumEntropy, ModelError, Pipeline,
    TextColumn, TextFeaturizer, TrainedModel,
};

const TOPICS: &[(&str, &[&str], &str)] = &[
    (
        "SPORTS",
        &["match", "goal", "coach", "league", "season", "striker", "playoff"],
        "Sam Runner",
    ),
    (
        "POLITICS",
        &["senate", "vote", "election", "governor", "bill", "campaign", "congress"],
        "Pat Ballot",
    ),
    (
        "FOOD & DRINK",
        &["recipe", "bake", "dinner", "flavor", "kitchen", "cheese", "dessert"],
        "Chef Basil",
    ),
];

/// Articles whose words are drawn from a per-category vocabulary
fn corpus(per_category: usize) -> Vec<Article> {
    let mut articles = Vec::new();
    for i in 0..per_category {
        for (category, words, author) in TOPICS {
            let word = |k: usize| words[(i * 3 + k) % words.len()];
            articles.push(Article {
                link: format!("https://www.huffpost.com/entry/{}-{}", category, i),
                headline: format!("The {} and the {} this week", word(0), word(1)),
                category: category.to_string(),
                short_description: format!("Everything about the {} {}", word(2), word(3)),
                authors: author.to_string(),
                date: "2022-09-23".to_owned(),
            });
        }
    }
    articles
}

fn headline(text: &str) -> Article {
    Article {
        headline: text.to_owned(),
        ..Article::default()
    }
}

#[test]
fn fitted_pipeline_classifies_held_out_articles() {
    let articles = corpus(30);
    let split = train_test_split(&articles, 0.2, 0).unwrap();

    let model = Pipeline::new(SgdMaximumEntropy::default())
        .fit(&split.train)
        .unwrap();

    let train_metrics = evaluate(&model, &split.train).unwrap();
    let test_metrics = evaluate(&model, &split.test).unwrap();

    assert!(test_metrics.micro_accuracy > 0.9, "{:?}", test_metrics);
    assert!(train_metrics.micro_accuracy >= test_metrics.micro_accuracy);
    assert!(test_metrics.log_loss_reduction > 0.0);
    assert_eq!(model.labels().len(), 3);

    let prediction = model.predict_one(&headline("The senate will vote on the bill"));
    assert_eq!(prediction.category.as_deref(), Some("POLITICS"));
    assert!(prediction.score() > 1.0 / 3.0);
}

#[test]
fn fitting_is_reproducible() {
    let articles = corpus(10);
    let pipeline = Pipeline::new(SgdMaximumEntropy::default());

    let first = pipeline.fit(&articles).unwrap();
    let second = pipeline.fit(&articles).unwrap();

    assert_eq!(first.transform(&articles), second.transform(&articles));
}

#[test]
fn single_category_corpus_always_predicts_it() {
    let articles: Vec<_> = corpus(5)
        .into_iter()
        .filter(|it| it.category == "SPORTS")
        .collect();

    let model = Pipeline::new(SgdMaximumEntropy::default())
        .fit(&articles)
        .unwrap();

    for article in corpus(3) {
        assert_eq!(model.predict_one(&article).category.as_deref(), Some("SPORTS"));
    }
    let metrics = evaluate(&model, &articles).unwrap();
    assert_eq!(metrics.micro_accuracy, 1.0);
}

#[test]
fn authors_column_is_an_extension_point() {
    let articles = corpus(10);
    let pipeline = Pipeline::new(SgdMaximumEntropy::default()).with_column(TextColumn::Authors);

    assert_eq!(
        pipeline.columns(),
        &[
            TextColumn::Headline,
            TextColumn::ShortDescription,
            TextColumn::Authors
        ]
    );

    let model = pipeline.fit(&articles).unwrap();
    let by_author_only = Article {
        authors: "Chef Basil".to_owned(),
        ..Article::default()
    };
    assert_eq!(
        model.predict_one(&by_author_only).category.as_deref(),
        Some("FOOD & DRINK")
    );
}

#[test]
fn lbfgs_trainer_is_interchangeable() {
    let articles = corpus(10);
    let model = Pipeline::with_featurizer(
        TextFeaturizer::with_hash_bits(8),
        LbfgsMaximumEntropy::default(),
    )
    .fit(&articles)
    .unwrap();

    let metrics = evaluate(&model, &articles).unwrap();
    assert!(metrics.micro_accuracy > 0.9, "{:?}", metrics);
}

#[test]
fn saved_model_predicts_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models").join("model.json");
    let articles = corpus(10);

    let model = Pipeline::with_featurizer(
        TextFeaturizer::with_hash_bits(10),
        SgdMaximumEntropy::default(),
    )
    .fit(&articles)
    .unwrap();
    model.save(&path).unwrap();

    let loaded = TrainedModel::<TextFeaturizer>::load(&path).unwrap();
    assert_eq!(loaded.columns(), model.columns());
    assert_eq!(loaded.transform(&articles), model.transform(&articles));
}

#[test]
fn predicting_without_a_trained_model_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    match TrainedModel::<TextFeaturizer>::load(&path) {
        Err(ModelError::Untrained { path: reported }) => assert_eq!(reported, path),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn model_file_with_unsupported_hash_bits_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    Pipeline::with_featurizer(
        TextFeaturizer::with_hash_bits(4),
        SgdMaximumEntropy::default(),
    )
    .fit(&corpus(2))
    .unwrap()
    .save(&path)
    .unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&saved).unwrap();

    for &hash_bits in &[0, 40, 64] {
        json["schema"]["featurizer"]["hash_bits"] = hash_bits.into();
        std::fs::write(&path, json.to_string()).unwrap();

        match TrainedModel::<TextFeaturizer>::load(&path) {
            Err(ModelError::IncompatibleModel(msg)) => {
                assert!(msg.contains("hash_bits"), "{}", msg)
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn fitting_with_unsupported_hash_bits_fails() {
    for &hash_bits in &[0, 25, 64] {
        let result = Pipeline::with_featurizer(
            TextFeaturizer::with_hash_bits(hash_bits),
            SgdMaximumEntropy::default(),
        )
        .fit(&corpus(2));

        assert!(matches!(result, Err(ModelError::InvalidFeaturizer(_))));
    }
}

#[test]
fn empty_datasets_are_rejected() {
    let pipeline = Pipeline::new(SgdMaximumEntropy::default());
    assert!(matches!(
        pipeline.fit(&[]),
        Err(ModelError::EmptyDataset { .. })
    ));

    let model = pipeline.fit(&corpus(2)).unwrap();
    assert!(matches!(
        evaluate(&model, &[]),
        Err(ModelError::EmptyDataset { .. })
    ));
}
