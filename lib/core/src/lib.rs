//! # matchx Core
//!
//! Core library for matching free-text dealer price listings against a
//! canonical manufacturer catalog.
//!
//! The pipeline, leaves first:
//!
//! - [`normalize`](normalize::normalize) - raw title cleanup
//! - [`extract`](features::extract) - article / quantity / unit extraction
//! - [`LemmaPipeline`] - cross-lingual lemmatization over frozen dictionaries
//! - [`prep`] - dealer-side and catalog-side dataset preprocessing
//! - [`find_by_article`] - exact-match resolution by article code
//! - [`TfidfVectorizer`] + [`IvfFlatIndex`] - vector-space candidate retrieval
//! - [`merge_candidates`] - exact-then-similarity merge per key
//! - [`top_n_accuracy`] - offline metric against labeled matches
//! - [`Matcher`] - the orchestration entry point
//!
//! ## Example
//!
//! ```rust
//! use matchx_core::{DealerListing, CatalogProduct, ProductId, LemmaPipeline,
//!                   Matcher, TfidfVectorizer};
//!
//! let vectorizer = TfidfVectorizer::from_parts(
//!     [("гель".to_string(), 0), ("мыло".to_string(), 1)],
//!     vec![1.0, 1.0],
//! ).unwrap();
//! let lemmas = LemmaPipeline::identity();
//!
//! let listings = vec![DealerListing {
//!     key: "d-77".to_string(),
//!     price: "129".to_string(),
//!     raw_name: "Гель чистящий 600 мл".to_string(),
//!     dealer_id: 3,
//! }];
//! let products = vec![CatalogProduct {
//!     id: ProductId::Integer(7),
//!     article: Some("024-5".to_string()),
//!     cost: None,
//!     name: Some("Гель универсальный".to_string()),
//!     name_1c: None,
//!     ozon_name: None,
//!     wb_name: None,
//! }];
//!
//! let matcher = Matcher::new(&vectorizer, &lemmas);
//! let candidates = matcher.run(&listings, &products).unwrap();
//! assert_eq!(candidates["d-77"], vec![ProductId::Integer(7)]);
//! ```

pub mod error;
pub mod eval;
pub mod features;
pub mod index;
pub mod lemma;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod prep;
pub mod record;
pub mod resolve;
pub mod search;
pub mod vector;
pub mod vectorizer;

pub use error::{Error, Result};
pub use eval::{top_n_accuracy, Accuracy};
pub use features::{extract, Dimension, FeatureSet};
pub use index::{IvfConfig, IvfFlatIndex};
pub use lemma::{LemmaModel, LemmaPipeline};
pub use merge::merge_candidates;
pub use pipeline::{Matcher, MatcherConfig};
pub use record::{CatalogProduct, CatalogRow, DealerListing, DealerRow, ProductId};
pub use resolve::find_by_article;
pub use search::{nearest_candidates, SearchConfig};
pub use vector::Vector;
pub use vectorizer::TfidfVectorizer;
