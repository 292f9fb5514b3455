//! # Ranking
//!
//! Descending sort plus optional top-N cut.
//!
//! Ranking is stable: entries with equal scores keep their input order.
//! Fed with grouped aggregates this means ties resolve by first
//! occurrence in the original trade list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An entry with its 1-based position in a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry<T, S = Decimal> {
    /// The rank (1 = highest score).
    pub rank: usize,
    /// The score the entry was ranked by.
    pub score: S,
    /// The ranked entry.
    pub item: T,
}

impl<T, S> RankedEntry<T, S> {
    /// Creates a new ranked entry.
    #[must_use]
    pub fn new(item: T, rank: usize, score: S) -> Self {
        Self { rank, score, item }
    }

    /// Returns true if this entry is ranked first.
    #[must_use]
    pub fn is_top(&self) -> bool {
        self.rank == 1
    }

    /// Drops the ranking information.
    #[must_use]
    pub fn into_item(self) -> T {
        self.item
    }
}

impl<T: fmt::Display, S: fmt::Display> fmt::Display for RankedEntry<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.rank, self.item, self.score)
    }
}

/// Ranks `entries` by descending score, keeping at most `limit`.
///
/// `limit = None` keeps every entry. Empty input yields an empty ranking.
///
/// # Examples
///
/// ```
/// use settlement_risk::domain::services::ranking::rank_descending;
///
/// let ranked = rank_descending(vec![("a", 1), ("b", 5), ("c", 5)], |e| e.1, Some(2));
/// let names: Vec<_> = ranked.iter().map(|r| r.item.0).collect();
/// assert_eq!(names, vec!["b", "c"]);
/// assert_eq!(ranked[0].rank, 1);
/// ```
pub fn rank_descending<T, S, I, F>(
    entries: I,
    mut score_fn: F,
    limit: Option<usize>,
) -> Vec<RankedEntry<T, S>>
where
    I: IntoIterator<Item = T>,
    S: Ord,
    F: FnMut(&T) -> S,
{
    let mut scored: Vec<(S, T)> = entries
        .into_iter()
        .map(|item| (score_fn(&item), item))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    if let Some(n) = limit {
        scored.truncate(n);
    }

    scored
        .into_iter()
        .enumerate()
        .map(|(pos, (score, item))| RankedEntry::new(item, pos + 1, score))
        .collect()
}

/// Returns the highest-scoring entry, the first one on ties.
pub fn top_entry<T, S, I, F>(entries: I, score_fn: F) -> Option<RankedEntry<T, S>>
where
    I: IntoIterator<Item = T>,
    S: Ord,
    F: FnMut(&T) -> S,
{
    rank_descending(entries, score_fn, Some(1)).into_iter().next()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_ranks_nothing() {
        let ranked = rank_descending(Vec::<u32>::new(), |x| *x, None);
        assert!(ranked.is_empty());
        assert!(top_entry(Vec::<u32>::new(), |x| *x).is_none());
    }

    #[test]
    fn ranks_descending_from_one() {
        let ranked = rank_descending(vec![3, 9, 1, 7], |x| *x, None);
        let order: Vec<(usize, u32)> = ranked.iter().map(|r| (r.rank, r.item)).collect();
        assert_eq!(order, vec![(1, 9), (2, 7), (3, 3), (4, 1)]);
        assert!(ranked[0].is_top());
        assert!(!ranked[1].is_top());
    }

    #[test]
    fn ties_keep_input_order() {
        let entries = vec![("first", 500), ("low", 100), ("second", 500), ("third", 500)];
        let ranked = rank_descending(entries, |e| e.1, None);
        let names: Vec<&str> = ranked.iter().map(|r| r.item.0).collect();
        assert_eq!(names, vec!["first", "second", "third", "low"]);
    }

    #[test]
    fn limit_truncates() {
        let ranked = rank_descending(1..=10u32, |x| *x, Some(3));
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[2].item, 8);

        let ranked = rank_descending(1..=2u32, |x| *x, Some(3));
        assert_eq!(ranked.len(), 2);

        let ranked = rank_descending(1..=2u32, |x| *x, Some(0));
        assert!(ranked.is_empty());
    }

    #[test]
    fn top_entry_prefers_first_on_tie() {
        let top = top_entry(vec![("a", 2), ("b", 2)], |e| e.1).unwrap();
        assert_eq!(top.item.0, "a");
        assert_eq!(top.score, 2);
    }

    #[test]
    fn display_format() {
        let entry = RankedEntry::new("UBS", 1, 800);
        assert_eq!(entry.to_string(), "#1 UBS (800)");
    }
}
