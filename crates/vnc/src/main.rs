//! vee-news-classifier cli entrypoint

mod demo;
mod experiment;

use anyhow::{anyhow, Context, Result};
use charts::{Chart, ScaleBand, ScaleLinear, VerticalBarView};
use itertools::Itertools;
use std::{
    fs,
    path::{Path, PathBuf},
};
use structopt::StructOpt;
use vnc_dataset::{Article, CategoryCount, CategoryStatistics};
use vnc_model::{TextFeaturizer, TrainedModel, TrainerKind};

#[derive(Debug, StructOpt)]
#[structopt(name = "vee-news-classifier")]
enum CliArgs {
    /// Run the whole experiment: print dataset statistics, split it, train
    /// the model, evaluate it on both subsets and try it on a few
    /// hand-picked articles
    Train {
        #[structopt(flatten)]
        data: DataArgs,

        #[structopt(flatten)]
        split: SplitArgs,

        #[structopt(flatten)]
        model: ModelArgs,

        /// Numerical solver to fit the model with (sgd or lbfgs).
        /// lbfgs works on dense features and refuses to train when they do
        /// not fit into memory, so use it with a small `--hash-bits`
        #[structopt(long, default_value = "sgd")]
        trainer: TrainerKind,

        /// Feed the authors of the article to the model in addition to
        /// its headline and short description
        #[structopt(long)]
        with_authors: bool,

        /// Each text column is hashed into 2^hash_bits features (1..=24)
        #[structopt(long, default_value = "16")]
        hash_bits: u8,

        /// Maximum number of passes over the train set for the sgd trainer
        #[structopt(long, default_value = "10")]
        epochs: usize,

        /// Maximum number of iterations for the lbfgs trainer
        #[structopt(long, default_value = "100")]
        max_iterations: u64,

        /// Persist the trained model at `--model-path`
        #[structopt(long)]
        save_model: bool,
    },

    /// View statistics about the distribution of articles over the categories
    Stats {
        #[structopt(flatten)]
        data: DataArgs,

        /// Render a bar chart of the categories into the given svg file
        #[structopt(long)]
        chart: Option<PathBuf>,
    },

    /// Split the dataset into train.json and test.json the same way `train` does
    Split {
        #[structopt(flatten)]
        data: DataArgs,

        #[structopt(flatten)]
        split: SplitArgs,

        /// Directory to write the subsets to
        #[structopt(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Predict the category of an article with a previously saved model
    Predict {
        /// Headline of the article
        headline: stdx::NonHollowString,

        #[structopt(long, default_value = "")]
        short_description: String,

        #[structopt(long, default_value = "")]
        authors: String,

        #[structopt(flatten)]
        model: ModelArgs,
    },
}

#[derive(Debug, StructOpt)]
struct DataArgs {
    /// Path to kaggle news category dataset
    #[structopt(
        long,
        env = "VNC_DATA_PATH",
        default_value = "data/News_Category_Dataset_v3.json"
    )]
    data_path: PathBuf,
}

#[derive(Debug, StructOpt)]
struct ModelArgs {
    /// Path the trained model is saved to and loaded from
    #[structopt(long, env = "VNC_MODEL_PATH", default_value = "models/model.json")]
    model_path: PathBuf,
}

#[derive(Debug, StructOpt)]
struct SplitArgs {
    /// Fraction of the articles that go into the test set
    #[structopt(long, default_value = "0.2")]
    test_fraction: f64,

    /// Seed for everything random: the split and the order of training examples
    #[structopt(long, default_value = "0")]
    seed: u64,
}

fn main() -> Result<()> {
    if let Err(err) = dotenv::dotenv() {
        log::debug!("Dotenv could not be loaded: {:?}", err);
    }

    env_logger::init();

    let cli_args = CliArgs::from_args();

    log::debug!("Using cli args: {:?}", cli_args);

    match cli_args {
        CliArgs::Train {
            data,
            split,
            model,
            trainer,
            with_authors,
            hash_bits,
            epochs,
            max_iterations,
            save_model,
        } => {
            experiment::run(experiment::RunOpts {
                data_path: &data.data_path,
                model_path: &model.model_path,
                test_fraction: split.test_fraction,
                seed: split.seed,
                trainer,
                featurizer: TextFeaturizer::with_hash_bits(hash_bits),
                with_authors,
                epochs,
                max_iterations,
                save_model,
            })?;
        }
        CliArgs::Stats { data, chart } => {
            let articles = read_articles(&data.data_path)?;
            let stats = CategoryStatistics::compute(&articles);

            eprintln!("{}", stats);

            if let Some(chart_path) = chart {
                create_categories_chart(&stats.categories, &chart_path)?;
                eprintln!("Chart is saved to {}", chart_path.display());
            }
        }
        CliArgs::Split {
            data,
            split,
            out_dir,
        } => {
            let articles = read_articles(&data.data_path)?;
            let split = vnc_dataset::train_test_split(&articles, split.test_fraction, split.seed)?;

            fs::create_dir_all(&out_dir)
                .with_context(|| format!("Failed to create dir {}", out_dir.display()))?;

            for &(name, subset) in &[("train.json", &split.train), ("test.json", &split.test)] {
                let path = out_dir.join(name);
                let file = fs::File::create(&path)
                    .with_context(|| format!("Failed to create file {}", path.display()))?;
                vnc_dataset::write_articles(std::io::BufWriter::new(file), subset)?;
                eprintln!("Wrote {} articles to {}", subset.len(), path.display());
            }
        }
        CliArgs::Predict {
            headline,
            short_description,
            authors,
            model,
        } => {
            let trained = TrainedModel::<TextFeaturizer>::load(&model.model_path)?;
            let article = Article {
                headline: headline.into_inner(),
                short_description,
                authors,
                ..Article::default()
            };

            let prediction = trained.predict_one(&article);

            eprintln!(
                "Predicted category: {}",
                prediction.category.as_deref().unwrap_or("<none>")
            );

            let top = prediction
                .probabilities
                .iter()
                .enumerate()
                .sorted_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal))
                .take(3);

            for (class, probability) in top {
                let category = trained.labels().decode(class).unwrap_or("<unknown>");
                eprintln!("    {}: {:.3}", category, probability);
            }
        }
    }

    Ok(())
}

fn read_articles(data_path: &Path) -> Result<Vec<Article>> {
    vnc_dataset::read_articles(data_path)
        .with_context(|| format!("Failed to load articles from {}", data_path.display()))
}

fn create_categories_chart(categories: &[CategoryCount], file_path: &Path) -> Result<()> {
    let width = 1500;
    let height = 900;
    let (top, right, bottom, left) = (90, 40, 200, 60);

    let x = ScaleBand::new()
        .set_domain(categories.iter().map(|it| it.category.clone()).collect())
        .set_range(vec![0, width - left - right])
        .set_inner_padding(0.1)
        .set_outer_padding(0.1);

    let max = categories.iter().map(|it| it.count).max().unwrap_or(0);

    let y = ScaleLinear::new()
        .set_domain(vec![0.0, max as f32])
        .set_range(vec![height - top - bottom, 0]);

    let data = categories
        .iter()
        .map(|it| (it.category.as_str(), it.count as f32))
        .collect();

    let view = VerticalBarView::new()
        .set_x_scale(&x)
        .set_y_scale(&y)
        .set_colors(charts::Color::color_scheme_dark())
        .load_data(&data)
        .map_err(|err| anyhow!("{}", err))?;

    Chart::new()
        .set_width(width)
        .set_height(height)
        .set_margins(top, right, bottom, left)
        .add_title("Articles per category".to_owned())
        .add_view(&view)
        .add_axis_bottom(&x)
        .add_axis_left(&y)
        .add_left_axis_label("Number of articles")
        .add_bottom_axis_label("Categories")
        .save(file_path)
        .map_err(|err| anyhow!("{}", err))?;

    Ok(())
}
