//! CSV artifacts written to an output directory.

use crate::{sorted_relations, summarize, ExportError};
use std::fs;
use std::path::Path;
use untangle_engine::AnalysisResult;
use untangle_model::Changeset;

const DEFS_FILE: &str = "defs.csv";
const USES_FILE: &str = "uses.csv";
const DIFFS_FILE: &str = "diffs.csv";
const DIFF_RELATIONS_FILE: &str = "diffRelations.csv";
const PARTITIONS_FILE: &str = "partitions.csv";
const SUMMARY_FILE: &str = "summary.csv";

/// Writes one analyzed changeset as six CSV files.
pub struct CsvExporter<'a> {
    changeset: &'a Changeset,
    result: &'a AnalysisResult,
}

impl<'a> CsvExporter<'a> {
    pub fn new(changeset: &'a Changeset, result: &'a AnalysisResult) -> Self {
        Self { changeset, result }
    }

    pub fn export(&self, out_dir: &Path) -> Result<(), ExportError> {
        fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;

        self.export_defs(out_dir)?;
        self.export_uses(out_dir)?;
        self.export_diffs(out_dir)?;
        self.export_diff_relations(out_dir)?;
        self.export_partitions(out_dir)?;
        self.export_summary(out_dir)
    }

    fn path_of(&self, file: untangle_model::SourceFileId) -> String {
        field(self.changeset.file(file).path())
    }

    fn export_defs(&self, out_dir: &Path) -> Result<(), ExportError> {
        let header = "defId,sourceFile,characterSpanStart,characterSpanEnd,name,isTypeDef,isMethodDef,isInsideADiff";
        let rows = self
            .changeset
            .definitions()
            .map(|(id, d)| {
                format!(
                    "{},{},{},{},{},{},{},{}",
                    id.idx(),
                    self.path_of(d.file()),
                    d.position().first(),
                    d.position().last(),
                    field(d.name()),
                    d.is_type_definition(),
                    d.is_method_definition(),
                    d.is_inside_a_diff_region(),
                )
            })
            .collect();
        write_csv(out_dir, DEFS_FILE, header, rows)
    }

    fn export_uses(&self, out_dir: &Path) -> Result<(), ExportError> {
        let header = "useId,sourceFile,characterSpanStart,characterSpanEnd,name,associatedDefId,associatedDefSourceFile,associatedDefCharacterSpanStart,associatedDefCharacterSpanEnd,isInsideADiff";
        let rows = self
            .changeset
            .uses()
            .map(|(id, u)| {
                let associated = match u.associated_definition() {
                    Some(def_id) => {
                        let def = self.changeset.definition(def_id);
                        format!(
                            "{},{},{},{}",
                            def_id.idx(),
                            self.path_of(def.file()),
                            def.position().first(),
                            def.position().last(),
                        )
                    }
                    None => "null,null,null,null".to_string(),
                };
                format!(
                    "{},{},{},{},{},{},{}",
                    id.idx(),
                    self.path_of(u.file()),
                    u.position().first(),
                    u.position().last(),
                    field(u.name()),
                    associated,
                    u.is_inside_a_diff_region(),
                )
            })
            .collect();
        write_csv(out_dir, USES_FILE, header, rows)
    }

    fn export_diffs(&self, out_dir: &Path) -> Result<(), ExportError> {
        let header =
            "diffId,sourceFile,lineSpanStart,lineSpanEnd,characterSpanStart,characterSpanEnd";
        let rows = self
            .changeset
            .regions()
            .map(|(id, r)| {
                format!(
                    "{},{},{},{},{},{}",
                    id.idx(),
                    self.path_of(r.file()),
                    r.line_span().first(),
                    r.line_span().last(),
                    r.char_span().first(),
                    r.char_span().last(),
                )
            })
            .collect();
        write_csv(out_dir, DIFFS_FILE, header, rows)
    }

    fn export_diff_relations(&self, out_dir: &Path) -> Result<(), ExportError> {
        let header = "relationId,relationType,diffId1,sourceFile1,lineSpanStart1,lineSpanEnd1,diffId2,sourceFile2,lineSpanStart2,lineSpanEnd2";
        let rows = sorted_relations(self.result)
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                let (a, b) = pair.endpoints();
                let first = self.changeset.region(a);
                let second = self.changeset.region(b);
                format!(
                    "{},{},{},{},{},{},{},{},{},{}",
                    i,
                    pair.kind().label(),
                    a.idx(),
                    self.path_of(first.file()),
                    first.line_span().first(),
                    first.line_span().last(),
                    b.idx(),
                    self.path_of(second.file()),
                    second.line_span().first(),
                    second.line_span().last(),
                )
            })
            .collect();
        write_csv(out_dir, DIFF_RELATIONS_FILE, header, rows)
    }

    fn export_partitions(&self, out_dir: &Path) -> Result<(), ExportError> {
        let header = "partitionId,isTrivial,diffId,diffSourceFile,diffLineSpanStart,diffLineSpanEnd,diffCharacterSpanStart,diffCharacterSpanEnd,enclosingMethodDefId";
        let mut rows = Vec::new();
        for (i, partition) in self.result.partitions().iter().enumerate() {
            let trivial = partition.is_trivial(self.changeset);
            for &region_id in partition.regions() {
                let region = self.changeset.region(region_id);
                let enclosing = match region.enclosing_method() {
                    Some(def) => def.idx().to_string(),
                    None => "null".to_string(),
                };
                rows.push(format!(
                    "{},{},{},{},{},{},{},{},{}",
                    i,
                    trivial,
                    region_id.idx(),
                    self.path_of(region.file()),
                    region.line_span().first(),
                    region.line_span().last(),
                    region.char_span().first(),
                    region.char_span().last(),
                    enclosing,
                ));
            }
        }
        write_csv(out_dir, PARTITIONS_FILE, header, rows)
    }

    fn export_summary(&self, out_dir: &Path) -> Result<(), ExportError> {
        let header =
            "sourceFiles,defs,uses,diffs,totalPartitions,nonTrivialPartitions,trivialPartitions";
        let s = summarize(self.changeset, self.result);
        let rows = vec![format!(
            "{},{},{},{},{},{},{}",
            s.source_files,
            s.defs,
            s.uses,
            s.diffs,
            s.total_partitions,
            s.non_trivial_partitions,
            s.trivial_partitions,
        )];
        write_csv(out_dir, SUMMARY_FILE, header, rows)
    }
}

// Quote a field only when it would break the row.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_csv(
    out_dir: &Path,
    name: &str,
    header: &str,
    rows: Vec<String>,
) -> Result<(), ExportError> {
    let path = out_dir.join(name);
    let mut out = String::with_capacity(header.len() + 1 + rows.iter().map(|r| r.len() + 1).sum::<usize>());
    out.push_str(header);
    out.push('\n');
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    fs::write(&path, out).map_err(|source| ExportError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(field("src/A.java"), "src/A.java");
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(field("a,b"), "\"a,b\"");
        assert_eq!(field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
