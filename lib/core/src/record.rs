//! Input records and the preprocessed rows derived from them.
//!
//! Field aliases accept the upstream export names (`product_key`,
//! `product_name`, `id_product`) so collaborator-supplied JSON loads
//! without a translation step.

use serde::{Deserialize, Serialize};

use crate::features::Dimension;

/// Canonical catalog identifier. The source systems use integers but some
/// exports carry string ids, so both shapes deserialize transparently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Integer(i64),
    Text(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Integer(i) => write!(f, "{}", i),
            ProductId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(i: i64) -> Self {
        ProductId::Integer(i)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

/// One dealer-scraped listing row. `key` is the dealer's own article/SKU
/// string and uniquely identifies a listing within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DealerListing {
    #[serde(alias = "product_key")]
    pub key: String,
    #[serde(default)]
    pub price: String,
    #[serde(alias = "product_name")]
    pub raw_name: String,
    #[serde(default)]
    pub dealer_id: i64,
}

/// One canonical manufacturer product row, with up to four free-text
/// name variants from different sales channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    #[serde(alias = "id_product")]
    pub id: ProductId,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_1c: Option<String>,
    #[serde(default)]
    pub ozon_name: Option<String>,
    #[serde(default)]
    pub wb_name: Option<String>,
}

/// A dealer listing after preprocessing: extracted features plus the
/// lemmatized residual name that feeds vectorization.
#[derive(Debug, Clone, Serialize)]
pub struct DealerRow {
    pub key: String,
    pub price: String,
    pub dealer_id: i64,
    /// Lemmatized residual name.
    pub name: String,
    /// Extracted article code, empty when absent.
    pub article: String,
    pub dimension: Dimension,
    pub quantity: f32,
}

/// A catalog product after preprocessing. `full_name` is the lemmatized,
/// order-preserving, duplicate-free union of all name-variant tokens.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRow {
    pub id: ProductId,
    /// Lowercased article code for case-insensitive exact matching.
    pub article: String,
    pub cost: Option<String>,
    pub full_name: String,
    pub dimension: Dimension,
    pub quantity: f32,
}
