//! Exact-match resolution by article code.

use crate::record::{CatalogRow, ProductId};

/// Look up the catalog id whose article equals the input. Returns `None`
/// when the input is empty or nothing matches; when several catalog rows
/// share an article the first encountered wins. Never fails.
///
/// Articles are compared as lowercase strings: the catalog side is
/// lowercased during preprocessing and the dealer side comes out of the
/// normalizer already lowercased.
pub fn find_by_article(article: &str, catalog: &[CatalogRow]) -> Option<ProductId> {
    if article.is_empty() {
        return None;
    }
    catalog
        .iter()
        .find(|row| row.article == article)
        .map(|row| row.id.clone())
}
