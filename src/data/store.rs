//! In-memory store of running entries, unique per day and sorted by day.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use super::models::Entry;

/// Reasons the store refuses an insertion
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("an entry for day {0} already exists")]
    DuplicateDay(i64),

    #[error("distance must be a non-negative number, got {0}")]
    InvalidDistance(f64),
}

/// Ordered collection of entries.
///
/// Invariants after every mutation: days are unique and entries are sorted
/// by day ascending.
#[derive(Debug, Default, Clone)]
pub struct DataStore {
    entries: Vec<Entry>,
}

impl DataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry at its sorted position.
    ///
    /// Fails without touching the store if the day is already present,
    /// whatever the distance.
    pub fn add(&mut self, day: i64, distance: f64) -> Result<(), StoreError> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(StoreError::InvalidDistance(distance));
        }
        match self.entries.binary_search_by_key(&day, |e| e.day) {
            Ok(_) => Err(StoreError::DuplicateDay(day)),
            Err(pos) => {
                self.entries.insert(pos, Entry::new(day, distance));
                debug!(day, distance, len = self.entries.len(), "entry added");
                Ok(())
            }
        }
    }

    /// Remove the entries at the given positions (0-based, current order).
    ///
    /// Out-of-range indices are ignored. The survivors keep their order.
    pub fn delete_indices<I>(&mut self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let doomed: HashSet<usize> = indices.into_iter().collect();
        if doomed.is_empty() {
            return;
        }
        let before = self.entries.len();
        let mut position = 0;
        self.entries.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });
        debug!(removed = before - self.entries.len(), "entries deleted");
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the whole contents with `entries`.
    ///
    /// Goes through `add`, so later duplicates and invalid distances are
    /// dropped. Returns how many entries were kept.
    pub fn replace_with<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = Entry>,
    {
        self.clear();
        for entry in entries {
            if let Err(e) = self.add(entry.day, entry.distance) {
                debug!("skipping entry on replace: {e}");
            }
        }
        self.entries.len()
    }

    /// Day values in sorted order
    pub fn days(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.day).collect()
    }

    /// Distances in sorted-by-day order, index-aligned with `days()`
    pub fn distances(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.distance).collect()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
