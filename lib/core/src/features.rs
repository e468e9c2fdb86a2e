//! Structured-feature extraction from a raw title.
//!
//! A normalized title is split into a residual name plus an optional
//! article code and an optional quantity/unit pair. Extraction failures
//! (no match, malformed number) degrade to the documented defaults and
//! never propagate: an absent article is the empty string, an absent
//! quantity is `0` with [`Dimension::None`]. Downstream code relies on
//! exactly these defaults, so they are part of the contract.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

lazy_static! {
    /// Numeric article embedded mid-string: ` digits-digits[/digit][letter]`.
    /// The narrow shape is deliberate; widening it would silently change
    /// which substrings are treated as articles.
    static ref ARTICLE: Regex = Regex::new(r" \d+-\d+/?\d?[а-я]?").expect("article pattern");

    /// Number (optional decimal, comma or dot) followed by a unit
    /// abbreviation. The last occurrence in the string wins.
    static ref QUANTITY: Regex =
        Regex::new(r"\d+(?:[\.,]\d+)? ?(?:мл|кг|г|л|шт)").expect("quantity pattern");

    static ref NON_WORD: Regex = Regex::new(r"\W+").expect("non-word pattern");
}

/// Canonical unit of measure. Milliliters and grams never appear here:
/// they are folded into liters and kilograms during extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "л")]
    Liters,
    #[serde(rename = "кг")]
    Kilograms,
    #[serde(rename = "шт")]
    Pieces,
    #[serde(rename = "")]
    #[default]
    None,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Dimension::Liters => "л",
            Dimension::Kilograms => "кг",
            Dimension::Pieces => "шт",
            Dimension::None => "",
        };
        write!(f, "{}", s)
    }
}

/// Features extracted from one title. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    /// Residual name with article and quantity tokens removed and
    /// non-word runs collapsed to single spaces.
    pub name: String,
    /// Article code, or empty when absent.
    pub article: String,
    pub dimension: Dimension,
    /// Always >= 0; `0` when no quantity token was found.
    pub quantity: f32,
}

/// Extract structured features from a raw title. Never fails.
pub fn extract(raw: &str) -> FeatureSet {
    let mut name = normalize(raw);

    let article = match ARTICLE.find(&name) {
        Some(m) => {
            let token = m.as_str().to_string();
            name = name.replace(&token, "");
            token.trim().to_string()
        }
        None => String::new(),
    };

    let mut dimension = Dimension::None;
    let mut quantity = 0.0f32;
    if let Some(m) = QUANTITY.find_iter(&name).last() {
        let token = m.as_str().to_string();
        if let Some((value, dim)) = parse_quantity(&token) {
            quantity = value;
            dimension = dim;
            name = name.replace(&token, "");
        }
    }

    let name = NON_WORD.replace_all(&name, " ").trim().to_string();

    FeatureSet {
        name,
        article,
        dimension,
        quantity,
    }
}

/// Parse a matched quantity token into a canonical (value, unit) pair.
/// Volume canonicalizes to liters, mass to kilograms; pieces pass through.
fn parse_quantity(token: &str) -> Option<(f32, Dimension)> {
    // Two-letter units first so `кг` is not read as `г`.
    let unit = ["мл", "кг", "шт", "г", "л"]
        .into_iter()
        .find(|u| token.ends_with(u))?;
    let number = token[..token.len() - unit.len()].trim().replace(',', ".");
    let value: f32 = number.parse().ok()?;

    match unit {
        "мл" => Some((value / 1000.0, Dimension::Liters)),
        "г" => Some((value / 1000.0, Dimension::Kilograms)),
        "л" => Some((value, Dimension::Liters)),
        "кг" => Some((value, Dimension::Kilograms)),
        "шт" => Some((value, Dimension::Pieces)),
        _ => None,
    }
}
