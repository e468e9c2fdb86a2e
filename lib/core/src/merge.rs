//! Candidate merge preserving priority order and uniqueness.

use ahash::AHashMap;

use crate::record::ProductId;

/// Fold `extra` into `base` per key: candidates are appended after the
/// existing ones, skipping any id already present, so an exact match at
/// the front stays at rank 1 and a similarity duplicate of it is dropped
/// rather than re-ordered. Keys only present in `extra` gain a fresh list.
pub fn merge_candidates(
    base: &mut AHashMap<String, Vec<ProductId>>,
    extra: AHashMap<String, Vec<ProductId>>,
) {
    for (key, additions) in extra {
        let slot = base.entry(key).or_default();
        for id in additions {
            if !slot.contains(&id) {
                slot.push(id);
            }
        }
    }
}
