use crate::DiffRegionId;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Why two diff regions are considered related.
///
/// The kind set is closed; consumers match it exhaustively during export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    /// One region uses something the other defines.
    DefUse,
    /// Both regions use the same definition that no diff region touches.
    UseUse,
    /// Both regions sit inside the same method.
    SameEnclosingMethod,
}

impl RelationKind {
    /// Stable label used in exported artifacts.
    pub fn label(self) -> &'static str {
        match self {
            RelationKind::DefUse => "DEF_USE",
            RelationKind::UseUse => "USE_USE",
            RelationKind::SameEnclosingMethod => "SAME_ENCLOSING_METHOD",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An unordered relation between two distinct diff regions.
///
/// Equality and hashing are symmetric in the two regions and ignore the
/// relation kind, so inserting into a set keeps the first kind discovered
/// for a pair and drops later reclassifications.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RelatedDiffPair {
    first: DiffRegionId,
    second: DiffRegionId,
    kind: RelationKind,
}

impl RelatedDiffPair {
    /// Panics if both sides are the same region.
    pub fn new(first: DiffRegionId, second: DiffRegionId, kind: RelationKind) -> Self {
        assert!(first != second, "a region cannot relate to itself");
        Self { first, second, kind }
    }

    pub fn first(&self) -> DiffRegionId {
        self.first
    }

    pub fn second(&self) -> DiffRegionId {
        self.second
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// The pair's endpoints in a canonical (sorted) order.
    pub fn endpoints(&self) -> (DiffRegionId, DiffRegionId) {
        if self.first <= self.second {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        }
    }
}

impl PartialEq for RelatedDiffPair {
    fn eq(&self, other: &Self) -> bool {
        self.endpoints() == other.endpoints()
    }
}

impl Eq for RelatedDiffPair {}

impl Hash for RelatedDiffPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.endpoints().hash(state);
    }
}
