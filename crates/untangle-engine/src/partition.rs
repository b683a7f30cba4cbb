//! Union-find reduction of the relation graph to connected components.

use petgraph::unionfind::UnionFind;
use std::collections::BTreeMap;
use std::collections::HashSet;
use untangle_model::{Changeset, DiffRegionId, Partition, RelatedDiffPair};

/// Groups the changeset's regions into partitions: each related pair is
/// unioned, then regions are grouped by their final representative.
///
/// Every region lands in exactly one partition; unrelated regions come out
/// as singletons.
pub fn partition_regions(
    changeset: &Changeset,
    relations: &HashSet<RelatedDiffPair>,
) -> Vec<Partition> {
    if changeset.region_count() == 0 {
        return Vec::new();
    }

    let mut uf = UnionFind::<usize>::new(changeset.region_count());
    for pair in relations {
        let (a, b) = pair.endpoints();
        uf.union(a.idx(), b.idx());
    }

    let mut groups: BTreeMap<usize, Vec<DiffRegionId>> = BTreeMap::new();
    for (id, _) in changeset.regions() {
        groups.entry(uf.find_mut(id.idx())).or_default().push(id);
    }

    groups.into_values().map(Partition::new).collect()
}
