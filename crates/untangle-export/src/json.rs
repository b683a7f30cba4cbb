//! Single-document JSON report.

use crate::{sorted_relations, summarize, ExportError, Summary};
use serde::Serialize;
use std::fs;
use std::path::Path;
use untangle_engine::AnalysisResult;
use untangle_model::Changeset;

/// Everything the CSV artifacts carry, as one serializable document.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    summary: Summary,
    files: Vec<String>,
    definitions: Vec<DefinitionRecord>,
    uses: Vec<UseRecord>,
    diff_regions: Vec<RegionRecord>,
    relations: Vec<RelationRecord>,
    partitions: Vec<PartitionRecord>,
}

#[derive(Debug, Serialize)]
struct DefinitionRecord {
    id: usize,
    file: String,
    char_span: (u32, u32),
    name: String,
    is_type: bool,
    is_method: bool,
    in_diff: bool,
}

#[derive(Debug, Serialize)]
struct UseRecord {
    id: usize,
    file: String,
    char_span: (u32, u32),
    name: String,
    associated_definition: Option<usize>,
    in_diff: bool,
}

#[derive(Debug, Serialize)]
struct RegionRecord {
    id: usize,
    file: String,
    line_span: (u32, u32),
    char_span: (u32, u32),
    enclosing_method: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RelationRecord {
    kind: &'static str,
    first: usize,
    second: usize,
}

#[derive(Debug, Serialize)]
struct PartitionRecord {
    id: usize,
    trivial: bool,
    regions: Vec<usize>,
}

pub fn build_report(changeset: &Changeset, result: &AnalysisResult) -> AnalysisReport {
    let path_of = |file| changeset.file(file).path().to_string();

    let definitions = changeset
        .definitions()
        .map(|(id, d)| DefinitionRecord {
            id: id.idx(),
            file: path_of(d.file()),
            char_span: (d.position().first(), d.position().last()),
            name: d.name().to_string(),
            is_type: d.is_type_definition(),
            is_method: d.is_method_definition(),
            in_diff: d.is_inside_a_diff_region(),
        })
        .collect();

    let uses = changeset
        .uses()
        .map(|(id, u)| UseRecord {
            id: id.idx(),
            file: path_of(u.file()),
            char_span: (u.position().first(), u.position().last()),
            name: u.name().to_string(),
            associated_definition: u.associated_definition().map(|d| d.idx()),
            in_diff: u.is_inside_a_diff_region(),
        })
        .collect();

    let diff_regions = changeset
        .regions()
        .map(|(id, r)| RegionRecord {
            id: id.idx(),
            file: path_of(r.file()),
            line_span: (r.line_span().first(), r.line_span().last()),
            char_span: (r.char_span().first(), r.char_span().last()),
            enclosing_method: r.enclosing_method().map(|d| d.idx()),
        })
        .collect();

    let relations = sorted_relations(result)
        .iter()
        .map(|pair| {
            let (a, b) = pair.endpoints();
            RelationRecord {
                kind: pair.kind().label(),
                first: a.idx(),
                second: b.idx(),
            }
        })
        .collect();

    let partitions = result
        .partitions()
        .iter()
        .enumerate()
        .map(|(i, p)| PartitionRecord {
            id: i,
            trivial: p.is_trivial(changeset),
            regions: p.regions().iter().map(|r| r.idx()).collect(),
        })
        .collect();

    AnalysisReport {
        summary: summarize(changeset, result),
        files: changeset.files().map(|(_, f)| f.path().to_string()).collect(),
        definitions,
        uses,
        diff_regions,
        relations,
        partitions,
    }
}

/// Serializes the full report to `path` as pretty-printed JSON.
pub fn export_json(
    changeset: &Changeset,
    result: &AnalysisResult,
    path: &Path,
) -> Result<(), ExportError> {
    let report = build_report(changeset, result);
    let encoded = serde_json::to_vec_pretty(&report)?;
    fs::write(path, encoded).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
