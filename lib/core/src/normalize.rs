//! Raw title cleanup applied before any feature extraction.
//!
//! Dealer feeds concatenate words across script and case boundaries
//! (`моющееProsept`, `PROSEPTbath`), so a separating space is inserted at
//! every transition that indicates two glued words. The fixed replacement
//! table then canonicalizes brand/SKU-family spellings and strips the
//! vendor qualifier.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Script/case transitions that mark two concatenated words:
    /// Cyrillic-lower -> Latin or Cyrillic-upper, Cyrillic-upper -> Latin,
    /// Latin-lower -> upper or Cyrillic.
    static ref TRANSITIONS: [Regex; 3] = [
        Regex::new(r"([а-я])([a-zA-ZА-Я])").expect("transition pattern"),
        Regex::new(r"([А-Я])([A-Za-z])").expect("transition pattern"),
        Regex::new(r"([a-z])([A-Zа-яА-Я])").expect("transition pattern"),
    ];
}

/// Ordered literal replacements, applied after lowercasing. Order matters:
/// the bare `prosept` strip runs after the SKU-family spellings have been
/// padded, so it also eats the `prosept` prefix those entries reinsert.
/// This mirrors the historical matching behavior and is kept as a contract.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("просепт", "prosept"),
    ("prosept50", " prosept50 "),
    ("prosept50,", " prosept50 "),
    ("prosepteco50", " prosepteco50 "),
    ("prosepteco50,", " prosepteco50 "),
    ("ultra", " ultra "),
    ("crystal", " crystal "),
    ("-ая", ""),
    ("prosept", ""),
    ("ф/п", "пакет"),
];

/// Normalize a raw title. Always returns a string; this is a best-effort
/// cleanup with no error condition.
pub fn normalize(raw: &str) -> String {
    let mut name = raw.to_string();
    for pattern in TRANSITIONS.iter() {
        name = pattern.replace_all(&name, "${1} ${2}").into_owned();
    }
    name = name.to_lowercase();
    for (from, to) in REPLACEMENTS {
        name = name.replace(from, to);
    }
    name
}
