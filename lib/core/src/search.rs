//! Vector similarity search over the preprocessed batch.
//!
//! The catalog side indexes `full_name`, the dealer side queries with
//! `name`; both are transformed by the same frozen vectorizer so the two
//! sides share one coordinate space. The index is rebuilt fresh per batch;
//! callers with a stable catalog and many batches can hoist that out.

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::index::{IvfConfig, IvfFlatIndex};
use crate::record::{CatalogRow, DealerRow, ProductId};
use crate::vector::Vector;
use crate::vectorizer::TfidfVectorizer;

/// Tuning for one similarity pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Candidates retrieved per query, nearest first.
    pub top_k: usize,
    pub index: IvfConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            index: IvfConfig::default(),
        }
    }
}

/// Retrieve up to `top_k` nearest catalog ids per dealer key.
///
/// Dealer rows are deduplicated by key before querying (first occurrence
/// wins), so a listing appears once in the query set even if it had
/// repeated rows upstream.
pub fn nearest_candidates(
    catalog: &[CatalogRow],
    dealers: &[DealerRow],
    vectorizer: &TfidfVectorizer,
    config: &SearchConfig,
) -> Result<AHashMap<String, Vec<ProductId>>> {
    let mut seen = AHashSet::new();
    let queries: Vec<&DealerRow> = dealers
        .iter()
        .filter(|row| seen.insert(row.key.as_str()))
        .collect();

    let base: Vec<Vector> = catalog
        .par_iter()
        .map(|row| vectorizer.transform(&row.full_name))
        .collect();
    let query_vectors: Vec<Vector> = queries
        .par_iter()
        .map(|row| vectorizer.transform(&row.name))
        .collect();

    let mut index = IvfFlatIndex::new(vectorizer.dim(), config.index)?;
    index.train(&base)?;
    // Position i in the index corresponds to catalog[i].
    for vector in base {
        index.add(vector)?;
    }
    debug!(
        base = index.len(),
        queries = queries.len(),
        top_k = config.top_k,
        "similarity search"
    );

    let mut candidates = AHashMap::with_capacity(queries.len());
    for (row, query) in queries.iter().zip(&query_vectors) {
        let hits = index.search(query, config.top_k)?;
        let ids: Vec<ProductId> = hits
            .into_iter()
            .map(|(position, _)| catalog[position].id.clone())
            .collect();
        candidates.insert(row.key.clone(), ids);
    }
    Ok(candidates)
}
