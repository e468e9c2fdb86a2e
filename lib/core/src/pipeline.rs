//! End-to-end orchestration: the single entry point the rest of the
//! system calls.

use ahash::AHashMap;
use tracing::{debug, info};

use crate::error::Result;
use crate::index::IvfConfig;
use crate::lemma::LemmaPipeline;
use crate::prep::{prepare_catalog, prepare_listings};
use crate::record::{CatalogProduct, DealerListing, ProductId};
use crate::resolve::find_by_article;
use crate::search::{nearest_candidates, SearchConfig};
use crate::merge::merge_candidates;
use crate::vectorizer::TfidfVectorizer;

/// Batch-matching tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Similarity candidates per listing.
    pub top_k: usize,
    /// Coarse cells in the nearest-neighbor index. One cell means an
    /// exhaustive scan, the right trade-off at current catalog sizes.
    pub n_cells: usize,
    /// Cells probed per query.
    pub n_probe: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            n_cells: 1,
            n_probe: 1,
        }
    }
}

/// The matching service. Holds the frozen, read-only models; one `run`
/// call processes one finite batch to completion. Safe to share across
/// threads for concurrent batches since nothing here is mutated.
pub struct Matcher<'a> {
    vectorizer: &'a TfidfVectorizer,
    lemmas: &'a LemmaPipeline,
    config: MatcherConfig,
}

impl<'a> Matcher<'a> {
    pub fn new(vectorizer: &'a TfidfVectorizer, lemmas: &'a LemmaPipeline) -> Self {
        Self::with_config(vectorizer, lemmas, MatcherConfig::default())
    }

    pub fn with_config(
        vectorizer: &'a TfidfVectorizer,
        lemmas: &'a LemmaPipeline,
        config: MatcherConfig,
    ) -> Self {
        Self {
            vectorizer,
            lemmas,
            config,
        }
    }

    /// Match one batch of dealer listings against the catalog.
    ///
    /// Returns an ordered candidate list per dealer key: at most one
    /// exact article match first, then up to `top_k` similarity matches
    /// not already present. Every dealer key appears in the result, with
    /// an empty list when nothing was found; callers can therefore tell
    /// "no candidates" apart from "key not processed". Deterministic and
    /// idempotent for identical inputs and a fixed vectorizer.
    pub fn run(
        &self,
        listings: &[DealerListing],
        products: &[CatalogProduct],
    ) -> Result<AHashMap<String, Vec<ProductId>>> {
        info!(
            listings = listings.len(),
            products = products.len(),
            "matching batch"
        );

        let dealer_rows = prepare_listings(listings, self.lemmas);
        let catalog_rows = prepare_catalog(products, self.lemmas);

        // Every dealer key starts with an empty candidate list.
        let mut candidates: AHashMap<String, Vec<ProductId>> = dealer_rows
            .iter()
            .map(|row| (row.key.clone(), Vec::new()))
            .collect();

        let mut exact = 0usize;
        for row in &dealer_rows {
            if let Some(id) = find_by_article(&row.article, &catalog_rows) {
                candidates.insert(row.key.clone(), vec![id]);
                exact += 1;
            }
        }
        debug!(exact, "article lookups resolved");

        let search_config = SearchConfig {
            top_k: self.config.top_k,
            index: IvfConfig {
                n_cells: self.config.n_cells,
                n_probe: self.config.n_probe,
            },
        };
        let neighbors =
            nearest_candidates(&catalog_rows, &dealer_rows, self.vectorizer, &search_config)?;
        merge_candidates(&mut candidates, neighbors);

        info!(keys = candidates.len(), "batch matched");
        Ok(candidates)
    }
}
