//! Hand-picked articles the freshly trained model is tried on

use vnc_dataset::Article;
use vnc_model::{Featurizer, TrainedModel};

pub(crate) fn articles() -> Vec<Article> {
    vec![
        Article {
            link: "https://www.huffpost.com/entry/covid-boosters-uptake-us_n_632d719ee4b087fae6feaac9".to_owned(),
            headline: "Over 4 Million Americans Roll Up Sleeves For Omicron-Targeted COVID Boosters".to_owned(),
            category: "U.S. NEWS".to_owned(),
            short_description: "Health experts said it is too early to predict whether demand would match up with the 171 million doses of the new boosters the U.S. ordered for the fall.".to_owned(),
            authors: "Carla K. Johnson, AP".to_owned(),
            date: "2022-09-23".to_owned(),
        },
        Article {
            link: "https://www.huffpost.com/entry/american-airlines-passenger-banned-flight-attendant-punch-video_n_632e25d3e4b0e247890329fe".to_owned(),
            headline: "American Airlines Flyer Charged, Banned For Life After Punching Flight Attendant On Video".to_owned(),
            category: "U.S. NEWS".to_owned(),
            short_description: "He was subdued by passengers and crew when he fled to the back of the aircraft after the confrontation, according to the U.S. attorney's office in Los Angeles.".to_owned(),
            authors: "Mary Papenfuss".to_owned(),
            date: "2022-09-23".to_owned(),
        },
        Article {
            link: "https://www.huffpost.com/entry/funniest-tweets-cats-dogs-september-17-23_n_632de332e4b0695c1d81dc02".to_owned(),
            headline: "23 Of The Funniest Tweets About Cats And Dogs This Week (Sept. 17-23)".to_owned(),
            category: "COMEDY".to_owned(),
            short_description: "\"Until you have a dog you don't understand what could be eaten.\"".to_owned(),
            authors: "Elyse Wanshel".to_owned(),
            date: "2022-09-23".to_owned(),
        },
    ]
}

/// Prints the predicted category of each demo article, the model is not modified
pub(crate) fn run<F: Featurizer>(model: &TrainedModel<F>) {
    for article in articles() {
        let prediction = model.predict_one(&article);
        eprintln!(
            "=============== Single Prediction just-trained-model - Result: {} (expected: {}, score: {:.3}) ===============",
            prediction.category.as_deref().unwrap_or("<none>"),
            article.category,
            prediction.score(),
        );
    }
}
