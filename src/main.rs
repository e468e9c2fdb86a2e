use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use matchx::prelude::*;

/// Batch matcher: dealer price listings against the product catalog
#[derive(Parser, Debug)]
#[command(name = "matchx")]
#[command(about = "Match dealer listings to catalog products", long_about = None)]
struct Args {
    /// Dealer listings JSON (array of records)
    #[arg(long)]
    listings: PathBuf,

    /// Catalog products JSON (array of records)
    #[arg(long)]
    products: PathBuf,

    /// Frozen TF-IDF vectorizer artifact
    #[arg(long, default_value = "models/tfidf.json")]
    vectorizer: PathBuf,

    /// Secondary-language (English) lemma dictionary
    #[arg(long, default_value = "models/lemmas_en.json")]
    lemmas_en: PathBuf,

    /// Primary-language (Russian) lemma dictionary
    #[arg(long, default_value = "models/lemmas_ru.json")]
    lemmas_ru: PathBuf,

    /// Where to write the key -> candidate ids mapping
    #[arg(short, long, default_value = "candidates.json")]
    output: PathBuf,

    /// Similarity candidates retrieved per listing
    #[arg(long, default_value_t = 10)]
    top_k: usize,

    /// Coarse cells in the nearest-neighbor index (1 = exhaustive scan)
    #[arg(long, default_value_t = 1)]
    cells: usize,

    /// Cells probed per query
    #[arg(long, default_value_t = 1)]
    probes: usize,

    /// Optional ground-truth mapping (key -> correct catalog id) for an
    /// offline accuracy report
    #[arg(long)]
    ground_truth: Option<PathBuf>,

    /// Cutoff N for the accuracy report
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting matchx v{}", env!("CARGO_PKG_VERSION"));

    let vectorizer = TfidfVectorizer::load(&args.vectorizer)?;
    let lemmas = LemmaPipeline::load(&args.lemmas_en, &args.lemmas_ru)?;
    info!("Frozen artifacts loaded");

    let listings: Vec<DealerListing> = read_json(&args.listings)?;
    let products: Vec<CatalogProduct> = read_json(&args.products)?;

    let config = MatcherConfig {
        top_k: args.top_k,
        n_cells: args.cells,
        n_probe: args.probes,
    };
    let matcher = Matcher::with_config(&vectorizer, &lemmas, config);
    let candidates = matcher.run(&listings, &products)?;

    let out = fs::File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    serde_json::to_writer_pretty(out, &candidates)?;
    info!("Wrote {} candidate lists to {}", candidates.len(), args.output.display());

    if let Some(path) = &args.ground_truth {
        let target: ahash::AHashMap<String, ProductId> = read_json(path)?;
        match matchx::top_n_accuracy(&target, &candidates, args.top_n) {
            Accuracy::Score {
                percent,
                comparisons,
            } => info!(
                "Correct answer within top {} predictions in {percent}% of {comparisons} comparisons",
                args.top_n
            ),
            Accuracy::NotComputable => info!("Accuracy not computable: no answerable keys"),
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
