//! # matchx
//!
//! Matches free-text dealer price listings against a canonical
//! manufacturer catalog and returns, per listing key, an ordered list of
//! candidate catalog ids for a human reviewer to confirm.
//!
//! Two retrieval signals are combined: an exact lookup by extracted
//! article code, and TF-IDF nearest-neighbor search over normalized,
//! lemmatized names. The exact match, when present, always ranks first.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use matchx::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Frozen artifacts, loaded once at process start.
//! let vectorizer = TfidfVectorizer::load(Path::new("models/tfidf.json"))?;
//! let lemmas = LemmaPipeline::load(
//!     Path::new("models/lemmas_en.json"),
//!     Path::new("models/lemmas_ru.json"),
//! )?;
//!
//! let listings: Vec<DealerListing> =
//!     serde_json::from_str(&std::fs::read_to_string("listings.json")?)?;
//! let products: Vec<CatalogProduct> =
//!     serde_json::from_str(&std::fs::read_to_string("products.json")?)?;
//!
//! let matcher = Matcher::new(&vectorizer, &lemmas);
//! let candidates = matcher.run(&listings, &products)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - [`matchx-core`](matchx_core) - normalization, feature extraction,
//!   lemmatization, TF-IDF vectorization, IVF-Flat retrieval, merge and
//!   evaluation

// Re-export core types
pub use matchx_core::{
    extract, find_by_article, merge_candidates, nearest_candidates, top_n_accuracy, Accuracy,
    CatalogProduct, CatalogRow, DealerListing, DealerRow, Dimension, Error, FeatureSet,
    IvfConfig, IvfFlatIndex, LemmaModel, LemmaPipeline, Matcher, MatcherConfig, ProductId,
    Result, SearchConfig, TfidfVectorizer, Vector,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Accuracy, CatalogProduct, DealerListing, Dimension, Error, IvfConfig, LemmaModel,
        LemmaPipeline, Matcher, MatcherConfig, ProductId, Result, TfidfVectorizer, Vector,
    };
}
