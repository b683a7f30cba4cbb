//! The clustering engine: derives diff regions from raw changed-line
//! ranges, discovers pairwise relations between regions, and partitions the
//! relation graph into connected components.
//!
//! Control flow for one changeset: [`derive_regions`] once per raw range per
//! file, then [`cluster_changes`] once over the populated
//! [`Changeset`](untangle_model::Changeset); [`analyze`] runs both steps.

mod derive;
mod partition;
mod relate;

pub use derive::derive_regions;
pub use partition::partition_regions;
pub use relate::extract_relations;

use serde::Serialize;
use std::collections::HashSet;
use untangle_core::{LineInterval, LineToCharConverter};
use untangle_model::{Changeset, ModelResult, Partition, RelatedDiffPair, SourceFileId};

/// Relations and partitions computed for one changeset.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    relations: HashSet<RelatedDiffPair>,
    partitions: Vec<Partition>,
}

impl AnalysisResult {
    pub fn relations(&self) -> &HashSet<RelatedDiffPair> {
        &self.relations
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn non_trivial_partitions<'a>(
        &'a self,
        changeset: &'a Changeset,
    ) -> impl Iterator<Item = &'a Partition> {
        self.partitions
            .iter()
            .filter(move |p| !p.is_trivial(changeset))
    }
}

/// Full analysis of one revision: derives regions for every raw changed-line
/// range, then clusters.
///
/// `converter_for` supplies the line-to-character converter for each file,
/// typically a [`LineIndex`](untangle_core::LineIndex) over that file's text.
/// Ranges whose regions are all filtered out simply contribute nothing.
pub fn analyze<'c, F>(
    changeset: &mut Changeset,
    ranges: &[(SourceFileId, LineInterval)],
    mut converter_for: F,
) -> ModelResult<AnalysisResult>
where
    F: FnMut(SourceFileId) -> &'c dyn LineToCharConverter,
{
    for &(file, raw) in ranges {
        derive_regions(changeset, file, raw, converter_for(file))?;
    }
    Ok(cluster_changes(changeset))
}

/// Extracts all region relations and reduces them to partitions.
///
/// Pure and deterministic over an already-derived changeset; cannot fail on
/// valid input.
pub fn cluster_changes(changeset: &Changeset) -> AnalysisResult {
    let relations = extract_relations(changeset);
    let partitions = partition_regions(changeset, &relations);
    let trivial = partitions
        .iter()
        .filter(|p| p.is_trivial(changeset))
        .count();
    tracing::info!(
        regions = changeset.region_count(),
        relations = relations.len(),
        partitions = partitions.len(),
        trivial,
        "clustered changeset"
    );
    AnalysisResult {
        relations,
        partitions,
    }
}
