use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::provider::Link;

/// Per-source bookkeeping: how many links go to each downstream consumer,
/// which consumer receives the most, and where the source currently sits
/// in the grid.
pub(crate) struct FanInRecord<N> {
    counts: HashMap<N, usize>,
    max_count: usize,
    max_node: Option<N>,
    /// (column, row) slot once the source has been placed
    pub(crate) slot: Option<(usize, usize)>,
}

impl<N: Copy + Eq + Hash> FanInRecord<N> {
    fn new() -> Self {
        Self {
            counts: HashMap::new(),
            max_count: 0,
            max_node: None,
            slot: None,
        }
    }

    /// Count one more link into `dest`
    ///
    /// The dominant destination only changes on a strictly higher count,
    /// so ties keep the destination seen first.
    fn add_link(&mut self, dest: N) {
        let count = self.counts.entry(dest).or_insert(0);
        *count += 1;
        if *count > self.max_count {
            self.max_count = *count;
            self.max_node = Some(dest);
        }
    }

    /// Evict `dest` from the count map, returning its previous count
    pub(crate) fn remove_destination(&mut self, dest: N) -> Option<usize> {
        self.counts.remove(&dest)
    }

    /// Number of distinct destinations still tracked
    pub(crate) fn destination_count(&self) -> usize {
        self.counts.len()
    }

    /// The destination receiving the most links from this source
    pub(crate) fn dominant(&self) -> Option<N> {
        self.max_node
    }
}

impl<N: fmt::Debug> fmt::Debug for FanInRecord<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[[{}->{:?}--{:?}]]",
            self.max_count, self.max_node, self.counts
        )
    }
}

/// Fan-in index over every node with at least one outgoing link
pub(crate) struct FanInIndex<N> {
    records: HashMap<N, FanInRecord<N>>,
}

impl<N: Copy + Eq + Hash> FanInIndex<N> {
    /// Build the index from a graph's link list, multiplicities included
    pub(crate) fn from_links(links: &[Link<N>]) -> Self {
        let mut records: HashMap<N, FanInRecord<N>> = HashMap::new();
        for link in links {
            records
                .entry(link.from)
                .or_insert_with(FanInRecord::new)
                .add_link(link.to);
        }
        Self { records }
    }

    pub(crate) fn record_mut(&mut self, node: N) -> Option<&mut FanInRecord<N>> {
        self.records.get_mut(&node)
    }

    /// Drop a source whose placement is final (MAX policy); later visits
    /// see no record and skip it
    pub(crate) fn finalize(&mut self, node: N) -> Option<FanInRecord<N>> {
        self.records.remove(&node)
    }

    /// Sources that never received a slot, i.e. nodes unreachable from any
    /// terminal node
    pub(crate) fn unplaced(&self) -> usize {
        self.records.values().filter(|r| r.slot.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Link;

    fn links(pairs: &[(u32, u32)]) -> Vec<Link<u32>> {
        pairs.iter().map(|&(from, to)| Link { from, to }).collect()
    }

    #[test]
    fn counts_links_per_destination() {
        let mut index = FanInIndex::from_links(&links(&[(1, 2), (1, 2), (1, 3)]));
        let record = index.record_mut(1).unwrap();
        assert_eq!(record.destination_count(), 2);
        assert_eq!(record.remove_destination(2), Some(2));
        assert_eq!(record.remove_destination(2), None);
        assert_eq!(record.destination_count(), 1);
    }

    #[test]
    fn dominant_is_heaviest_destination() {
        let mut index = FanInIndex::from_links(&links(&[(1, 9), (1, 2), (1, 2), (1, 2)]));
        assert_eq!(index.record_mut(1).unwrap().dominant(), Some(2));
    }

    #[test]
    fn dominant_tie_keeps_first_seen() {
        // The cache only moves on a strictly higher count, so an equal
        // count later never steals the dominant spot.
        let mut index = FanInIndex::from_links(&links(&[(1, 9), (1, 2)]));
        assert_eq!(index.record_mut(1).unwrap().dominant(), Some(9));

        let mut index = FanInIndex::from_links(&links(&[(1, 9), (1, 2), (1, 2), (1, 9)]));
        assert_eq!(index.record_mut(1).unwrap().dominant(), Some(2));
    }

    #[test]
    fn sources_without_links_have_no_record() {
        let mut index = FanInIndex::from_links(&links(&[(1, 2)]));
        assert!(index.record_mut(2).is_none());
        assert!(index.finalize(1).is_some());
        assert!(index.record_mut(1).is_none());
    }
}
