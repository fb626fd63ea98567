use ahash::AHashMap;

use crate::join::{EnrichedParcel, JoinMiss};
use crate::traverse::{Beacon, RoadSegment};

/// Per-parcel sequences, iterated in the order parcels were closed.
#[derive(Debug, Clone)]
pub struct ParcelMap<T> {
    order: Vec<String>,
    entries: AHashMap<String, Vec<T>>,
}

impl<T> Default for ParcelMap<T> {
    fn default() -> Self { Self { order: Vec::new(), entries: AHashMap::new() } }
}

impl<T> ParcelMap<T> {
    pub fn new() -> Self { Self::default() }

    /// Record the finished sequence for a parcel. Each parcel is finalized once.
    pub(crate) fn insert(&mut self, parcel_id: &str, items: Vec<T>) {
        debug_assert!(!self.entries.contains_key(parcel_id), "parcel {parcel_id} finalized twice");
        self.order.push(parcel_id.to_string());
        self.entries.insert(parcel_id.to_string(), items);
    }

    pub fn get(&self, parcel_id: &str) -> Option<&[T]> {
        self.entries.get(parcel_id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.order.iter().map(|id| (id.as_str(), self.entries[id].as_slice()))
    }

    /// Number of parcels with an entry.
    #[inline] pub fn len(&self) -> usize { self.order.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Number of items across all parcels.
    pub fn total(&self) -> usize { self.entries.values().map(Vec::len).sum() }
}

/// Counts describing a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub rows: usize,
    pub parcels: usize,
    pub beacons: usize,
    pub roads: usize,
    pub join_misses: usize,
}

/// Everything a successful run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub parcels: Vec<EnrichedParcel>,
    pub beacons: ParcelMap<Beacon>,
    pub roads: ParcelMap<RoadSegment>,
    pub join_misses: Vec<JoinMiss>,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut map = ParcelMap::new();
        map.insert("P9", vec![1, 2]);
        map.insert("P1", vec![]);
        map.insert("P5", vec![3]);

        assert_eq!(map.iter().map(|(id, _)| id).collect::<Vec<_>>(), ["P9", "P1", "P5"]);
        assert_eq!(map.get("P9"), Some(&[1, 2][..]));
        assert_eq!(map.get("P1"), Some(&[][..]));
        assert_eq!(map.get("P2"), None);
        assert_eq!(map.len(), 3);
        assert_eq!(map.total(), 3);
    }
}
