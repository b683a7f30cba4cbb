//! Pairwise relation discovery over the full region set.

use std::collections::HashSet;
use tracing::debug;
use untangle_model::{Changeset, DiffRegion, RelatedDiffPair, RelationKind};

/// Computes all relations among the changeset's regions.
///
/// Every ordered pair of distinct regions is tested with the predicates in
/// priority order (def-use, then use-use, then same-enclosing-method); the
/// first match classifies the pair, and set insertion keeps one relation per
/// unordered pair. O(n²) in the region count, which stays small per
/// changeset.
pub fn extract_relations(changeset: &Changeset) -> HashSet<RelatedDiffPair> {
    let mut relations = HashSet::new();

    for (id1, dr1) in changeset.regions() {
        for (id2, dr2) in changeset.regions() {
            if id1 == id2 {
                continue;
            }
            let kind = if def_use_related(changeset, dr1, dr2) {
                RelationKind::DefUse
            } else if use_use_related(changeset, dr1, dr2) {
                RelationKind::UseUse
            } else if dr1.same_enclosing_method(dr2) {
                RelationKind::SameEnclosingMethod
            } else {
                continue;
            };

            if relations.insert(RelatedDiffPair::new(id1, id2, kind)) {
                debug!(?kind, ?id1, ?id2, "related diff regions");
            }
        }
    }

    relations
}

/// A use in one region resolves to a definition contained in the other.
fn def_use_related(changeset: &Changeset, dr1: &DiffRegion, dr2: &DiffRegion) -> bool {
    let resolves_into = |from: &DiffRegion, into: &DiffRegion| {
        from.uses().iter().any(|&u| {
            changeset
                .usage(u)
                .associated_definition()
                .is_some_and(|def| into.contains_definition(def))
        })
    };
    resolves_into(dr1, dr2) || resolves_into(dr2, dr1)
}

/// Both regions reference the same definition that no diff region touched —
/// a shared dependency on an untouched external symbol.
fn use_use_related(changeset: &Changeset, dr1: &DiffRegion, dr2: &DiffRegion) -> bool {
    dr1.uses().iter().any(|&u1| {
        match changeset.usage(u1).associated_definition() {
            Some(def) if !changeset.definition_inside_any_region(def) => dr2
                .uses()
                .iter()
                .any(|&u2| changeset.usage(u2).associated_definition() == Some(def)),
            _ => false,
        }
    })
}
