//! Per-run reference registries.
//!
//! Three registries per document: measure id → position, part id → position,
//! layout id → position. Insertion keeps the first occurrence; a duplicate
//! key reports the earlier position and fails without overwriting, so later
//! duplicates are flagged but never shadow the original.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Identifier registry mapping a key to the array position of its first
/// occurrence.
#[derive(Debug, Default)]
pub struct Registry<K> {
    positions: HashMap<K, usize>,
}

impl<K: Eq + Hash> Registry<K> {
    /// Record `key` at `position`.
    ///
    /// On a duplicate key, returns the position of the first occurrence and
    /// leaves the registry unchanged.
    pub fn insert(&mut self, key: K, position: usize) -> Result<(), usize> {
        match self.positions.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(position);
                Ok(())
            }
            Entry::Occupied(slot) => Err(*slot.get()),
        }
    }

    /// Position of the first occurrence of `key`, or `None` when the key
    /// was never registered.
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.positions.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Registries and counters shared by the four passes.
///
/// Built fresh for every document; nothing here survives a run, so
/// validating the same document twice yields identical diagnostics.
#[derive(Debug, Default)]
pub struct ValidationState {
    /// Logical measure id → array position in `global.measures`.
    pub measures: Registry<i64>,
    /// Part id → array position in `parts`.
    pub parts: Registry<String>,
    /// Layout id → array position in `layouts`.
    pub layouts: Registry<String>,
    /// Total number of global measures, counted by the global pass.
    pub measure_count: usize,
}
