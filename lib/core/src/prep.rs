//! Batch preprocessing of the two input datasets.
//!
//! Both pipelines run feature extraction and lemmatization per row; rows
//! are independent, so the per-row work is parallelized with rayon.

use ahash::AHashSet;
use rayon::prelude::*;
use tracing::debug;

use crate::features::extract;
use crate::lemma::LemmaPipeline;
use crate::record::{CatalogProduct, CatalogRow, DealerListing, DealerRow};

/// Preprocess dealer listings: collapse exact-duplicate rows (first
/// occurrence wins), extract features from each raw name and lemmatize
/// the residual.
pub fn prepare_listings(listings: &[DealerListing], lemmas: &LemmaPipeline) -> Vec<DealerRow> {
    let mut seen = AHashSet::new();
    let unique: Vec<&DealerListing> = listings.iter().filter(|l| seen.insert(*l)).collect();
    debug!(
        raw = listings.len(),
        unique = unique.len(),
        "prepared dealer listing batch"
    );

    unique
        .par_iter()
        .map(|listing| {
            let features = extract(&listing.raw_name);
            DealerRow {
                key: listing.key.clone(),
                price: listing.price.clone(),
                dealer_id: listing.dealer_id,
                name: lemmas.lemmatize(&features.name),
                article: features.article,
                dimension: features.dimension,
                quantity: features.quantity,
            }
        })
        .collect()
}

/// Preprocess catalog products.
///
/// Name fallback chain: `name_1c` falls back to `name` when blank,
/// `ozon_name` falls back to the resolved `name_1c`; the remaining
/// variants default to empty, never null. Every variant is feature-
/// extracted independently; `full_name` is the order-preserving,
/// duplicate-free union of the residual tokens (variant order:
/// name_1c, ozon_name, name, wb_name), lemmatized once. The quantity
/// and unit are taken from the `ozon_name` variant, the article from
/// the catalog's own `article` column, lowercased.
pub fn prepare_catalog(products: &[CatalogProduct], lemmas: &LemmaPipeline) -> Vec<CatalogRow> {
    let rows: Vec<CatalogRow> = products
        .par_iter()
        .map(|product| {
            let name = text_or_empty(&product.name);
            let name_1c = fallback(&product.name_1c, &name);
            let ozon_name = fallback(&product.ozon_name, &name_1c);
            let wb_name = text_or_empty(&product.wb_name);

            let f_1c = extract(&name_1c);
            let f_ozon = extract(&ozon_name);
            let f_name = extract(&name);
            let f_wb = extract(&wb_name);

            let mut seen = AHashSet::new();
            let mut tokens: Vec<&str> = Vec::new();
            for residual in [&f_1c.name, &f_ozon.name, &f_name.name, &f_wb.name] {
                for token in residual.split_whitespace() {
                    if seen.insert(token) {
                        tokens.push(token);
                    }
                }
            }
            let full_name = lemmas.lemmatize(&tokens.join(" "));

            CatalogRow {
                id: product.id.clone(),
                article: text_or_empty(&product.article).to_lowercase(),
                cost: product.cost.clone(),
                full_name,
                dimension: f_ozon.dimension,
                quantity: f_ozon.quantity,
            }
        })
        .collect();
    debug!(products = rows.len(), "prepared catalog batch");
    rows
}

fn text_or_empty(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

fn fallback(field: &Option<String>, default: &str) -> String {
    match field {
        Some(s) if !s.trim().is_empty() => s.clone(),
        _ => default.to_string(),
    }
}
