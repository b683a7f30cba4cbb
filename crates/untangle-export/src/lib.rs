//! Export of analysis results: a directory of CSV artifacts (one file per
//! entity kind plus a summary) and a single-document JSON report.
//!
//! All exported ids are the arena indexes of the corresponding entities, so
//! rows in different files cross-reference each other directly.

mod csv;
mod json;

pub use csv::CsvExporter;
pub use json::{build_report, export_json, AnalysisReport};

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use untangle_engine::AnalysisResult;
use untangle_model::{Changeset, RelatedDiffPair};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode report")]
    Encode(#[from] serde_json::Error),
}

/// Entity and partition counts for one analyzed changeset.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Summary {
    pub source_files: usize,
    pub defs: usize,
    pub uses: usize,
    pub diffs: usize,
    pub total_partitions: usize,
    pub non_trivial_partitions: usize,
    pub trivial_partitions: usize,
}

pub fn summarize(changeset: &Changeset, result: &AnalysisResult) -> Summary {
    let trivial = result
        .partitions()
        .iter()
        .filter(|p| p.is_trivial(changeset))
        .count();
    Summary {
        source_files: changeset.file_count(),
        defs: changeset.definition_count(),
        uses: changeset.use_count(),
        diffs: changeset.region_count(),
        total_partitions: result.partitions().len(),
        non_trivial_partitions: result.partitions().len() - trivial,
        trivial_partitions: trivial,
    }
}

// Relation sets iterate in hash order; exports sort by canonical endpoints
// so output is stable across runs.
pub(crate) fn sorted_relations(result: &AnalysisResult) -> Vec<&RelatedDiffPair> {
    let mut relations: Vec<_> = result.relations().iter().collect();
    relations.sort_by_key(|pair| pair.endpoints());
    relations
}
