// 🗂️ City Grouper - Stage 2 of the rename pipeline
// Buckets entries per city, each bucket kept sorted by (captured_at, sequence)

use crate::parser::PhotoEntry;
use std::collections::HashMap;
use tracing::debug;

/// CityGroups - City name → entries in chronological order
///
/// Map order is irrelevant: the emitter re-sorts everything by arrival.
#[derive(Debug, Clone, Default)]
pub struct CityGroups {
    groups: HashMap<String, Vec<PhotoEntry>>,
}

impl CityGroups {
    pub fn new() -> Self {
        CityGroups {
            groups: HashMap::new(),
        }
    }

    /// Insert keeping the city's bucket sorted
    ///
    /// Returns false (and drops the entry) only when an identical entry is
    /// already in the bucket. Distinct entries sharing a `(captured_at,
    /// sequence)` key are kept, placed after the ones already there.
    pub fn insert(&mut self, entry: PhotoEntry) -> bool {
        let bucket = self.groups.entry(entry.city.clone()).or_default();
        let key = entry.order_key();

        let start = bucket.partition_point(|existing| existing.order_key() < key);
        let end = bucket.partition_point(|existing| existing.order_key() <= key);
        if bucket[start..end].contains(&entry) {
            return false;
        }

        bucket.insert(end, entry);
        true
    }

    /// Entries of one city, earliest first
    pub fn get(&self, city: &str) -> Option<&[PhotoEntry]> {
        self.groups.get(city).map(|v| v.as_slice())
    }

    /// Number of distinct cities
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_entries(&self) -> usize {
        self.groups.values().map(|v| v.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PhotoEntry])> {
        self.groups
            .iter()
            .map(|(city, entries)| (city.as_str(), entries.as_slice()))
    }

    /// Wrap buckets that are already sorted by order_key
    pub(crate) fn from_sorted(groups: HashMap<String, Vec<PhotoEntry>>) -> Self {
        CityGroups { groups }
    }

    pub(crate) fn into_inner(self) -> HashMap<String, Vec<PhotoEntry>> {
        self.groups
    }
}

/// Group parsed entries by city
pub fn group_by_city(entries: Vec<PhotoEntry>) -> CityGroups {
    let mut groups = CityGroups::new();
    for entry in entries {
        groups.insert(entry);
    }

    debug!(
        cities = groups.len(),
        entries = groups.total_entries(),
        "grouped photos by city"
    );
    groups
}
