use crate::{Changeset, DiffRegionId};
use serde::Serialize;

/// A non-empty set of diff regions forming one connected component of the
/// relation graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Partition {
    regions: Vec<DiffRegionId>,
}

impl Partition {
    /// Panics if `regions` is empty. Membership order is not meaningful;
    /// the ids are kept sorted so partitions compare structurally.
    pub fn new(mut regions: Vec<DiffRegionId>) -> Self {
        assert!(!regions.is_empty(), "a partition cannot be empty");
        regions.sort_unstable();
        regions.dedup();
        Self { regions }
    }

    pub fn regions(&self) -> &[DiffRegionId] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        false // guarded at construction
    }

    pub fn contains(&self, region: DiffRegionId) -> bool {
        self.regions.binary_search(&region).is_ok()
    }

    /// A partition is trivial when it has at most one region or when all of
    /// its regions share the same enclosing method, so it does not point at
    /// a change cutting across method boundaries.
    pub fn is_trivial(&self, changeset: &Changeset) -> bool {
        if self.regions.len() <= 1 {
            return true;
        }
        let first = changeset.region(self.regions[0]);
        self.regions[1..]
            .iter()
            .all(|&id| changeset.region(id).same_enclosing_method(first))
    }
}
