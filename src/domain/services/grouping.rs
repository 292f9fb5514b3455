//! # Grouping
//!
//! Single-pass fold of a record list into keyed running aggregates.
//!
//! Keys are kept in order of first occurrence, so a later stable sort on
//! the aggregates breaks ties by input order.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Keyed aggregates in first-occurrence order.
#[derive(Debug, Clone)]
pub struct Grouped<K, A> {
    index: HashMap<K, usize>,
    entries: Vec<(K, A)>,
}

impl<K, A> Default for Grouped<K, A> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, A> Grouped<K, A> {
    /// Creates an empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the aggregate for `key`, inserting `init()` on first sight.
    #[allow(clippy::indexing_slicing)]
    pub fn entry_or_insert_with(&mut self, key: K, init: impl FnOnce() -> A) -> &mut A {
        let pos = match self.index.entry(key) {
            Entry::Occupied(slot) => *slot.get(),
            Entry::Vacant(slot) => {
                let pos = self.entries.len();
                self.entries.push((slot.key().clone(), init()));
                slot.insert(pos);
                pos
            }
        };
        // pos always indexes a pushed entry
        &mut self.entries[pos].1
    }

    /// Returns the aggregate for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&A> {
        self.index
            .get(key)
            .and_then(|&pos| self.entries.get(pos))
            .map(|(_, agg)| agg)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates keys and aggregates in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &A)> {
        self.entries.iter().map(|(k, a)| (k, a))
    }

    /// Consumes the grouping, yielding `(key, aggregate)` pairs in
    /// first-occurrence order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(K, A)> {
        self.entries
    }
}

/// Folds `items` into per-key aggregates.
///
/// `key_fn` picks the bucket and `update_fn` folds the item into the
/// bucket's aggregate, which starts at `A::default()`. Every item lands in
/// exactly one bucket; callers map missing keys to a sentinel before
/// grouping.
///
/// # Examples
///
/// ```
/// use settlement_risk::domain::services::grouping::group_by;
///
/// let words = ["apple", "avocado", "banana"];
/// let grouped = group_by(words, |w| w.chars().next(), |n: &mut usize, _| *n += 1);
/// assert_eq!(grouped.into_entries(), vec![(Some('a'), 2), (Some('b'), 1)]);
/// ```
pub fn group_by<T, K, A, I, FK, FU>(items: I, mut key_fn: FK, mut update_fn: FU) -> Grouped<K, A>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash + Clone,
    A: Default,
    FK: FnMut(&T) -> K,
    FU: FnMut(&mut A, &T),
{
    let mut grouped = Grouped::new();
    for item in items {
        let agg = grouped.entry_or_insert_with(key_fn(&item), A::default);
        update_fn(agg, &item);
    }
    grouped
}
