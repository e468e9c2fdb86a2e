//! Offline top-N accuracy over a labeled subset. Not on the production
//! path; only meaningful when ground-truth matches are available.

use ahash::AHashMap;

use crate::record::ProductId;

/// Outcome of an accuracy check.
#[derive(Debug, Clone, PartialEq)]
pub enum Accuracy {
    /// Percentage of answerable keys whose correct id appeared within the
    /// first N predictions, rounded to two decimals, plus the number of
    /// comparisons behind it.
    Score { percent: f64, comparisons: usize },
    /// Every ground-truth key was unanswerable; there is nothing to
    /// measure against.
    NotComputable,
}

/// Top-N hit rate. A key is excluded from the denominator when it is
/// absent from `predictions` or has an empty candidate list; a hit counts
/// only when the ground-truth id is within the first `n` candidates.
pub fn top_n_accuracy(
    target: &AHashMap<String, ProductId>,
    predictions: &AHashMap<String, Vec<ProductId>>,
    n: usize,
) -> Accuracy {
    let mut hits = 0usize;
    let mut unanswerable = 0usize;
    for (key, id) in target {
        match predictions.get(key) {
            None => unanswerable += 1,
            Some(candidates) if candidates.is_empty() => unanswerable += 1,
            Some(candidates) => {
                if candidates.iter().take(n).any(|candidate| candidate == id) {
                    hits += 1;
                }
            }
        }
    }

    let comparisons = target.len() - unanswerable;
    if comparisons == 0 {
        return Accuracy::NotComputable;
    }
    let percent = (10_000.0 * hits as f64 / comparisons as f64).round() / 100.0;
    Accuracy::Score {
        percent,
        comparisons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(entries: &[(&str, i64)]) -> AHashMap<String, ProductId> {
        entries
            .iter()
            .map(|&(k, id)| (k.to_string(), ProductId::Integer(id)))
            .collect()
    }

    fn predictions(entries: &[(&str, &[i64])]) -> AHashMap<String, Vec<ProductId>> {
        entries
            .iter()
            .map(|&(k, ids)| {
                (
                    k.to_string(),
                    ids.iter().map(|&id| ProductId::Integer(id)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn hit_within_cutoff_scores_full() {
        let result = top_n_accuracy(
            &target(&[("K", 7)]),
            &predictions(&[("K", &[7, 3, 9])]),
            1,
        );
        assert_eq!(
            result,
            Accuracy::Score {
                percent: 100.0,
                comparisons: 1
            }
        );
    }

    #[test]
    fn hit_outside_cutoff_does_not_count() {
        let result = top_n_accuracy(
            &target(&[("K", 9)]),
            &predictions(&[("K", &[7, 3, 9])]),
            2,
        );
        assert_eq!(
            result,
            Accuracy::Score {
                percent: 0.0,
                comparisons: 1
            }
        );
    }

    #[test]
    fn empty_candidate_lists_are_unanswerable() {
        let result = top_n_accuracy(&target(&[("K", 7)]), &predictions(&[("K", &[])]), 1);
        assert_eq!(result, Accuracy::NotComputable);
    }

    #[test]
    fn missing_keys_are_unanswerable() {
        let result = top_n_accuracy(&target(&[("K", 7)]), &predictions(&[]), 1);
        assert_eq!(result, Accuracy::NotComputable);
    }

    #[test]
    fn unanswerable_keys_shrink_the_denominator() {
        let result = top_n_accuracy(
            &target(&[("A", 1), ("B", 2)]),
            &predictions(&[("A", &[1]), ("B", &[])]),
            1,
        );
        assert_eq!(
            result,
            Accuracy::Score {
                percent: 100.0,
                comparisons: 1
            }
        );
    }

    #[test]
    fn rounds_to_two_decimals() {
        let result = top_n_accuracy(
            &target(&[("A", 1), ("B", 2), ("C", 3)]),
            &predictions(&[("A", &[1]), ("B", &[9]), ("C", &[9])]),
            1,
        );
        assert_eq!(
            result,
            Accuracy::Score {
                percent: 33.33,
                comparisons: 3
            }
        );
    }
}
