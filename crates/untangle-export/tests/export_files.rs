//! End-to-end export: analyze a small changeset, write both formats, and
//! read the artifacts back.

use std::fs;
use untangle_core::{LineIndex, LineInterval, LineToCharConverter};
use untangle_engine::{cluster_changes, derive_regions};
use untangle_export::{export_json, summarize, CsvExporter};
use untangle_model::{Changeset, FileContents, NewDefinition, NewUse};

const TEXT: &str = "\
class C {
  int x() {
    return 1;
  }
  void caller() {
    int v = x();
  }
}
";

fn analyzed_changeset() -> (Changeset, untangle_engine::AnalysisResult) {
    let mut cs = Changeset::new();
    let file = cs.add_file("src/C.java", FileContents::Inline(TEXT.to_string()));
    let index = LineIndex::new(TEXT);

    let def = |name: &str, lines: LineInterval, is_method: bool, is_type: bool| NewDefinition {
        name: name.into(),
        position: index.char_span(lines),
        semantic_key: format!("key:{name}"),
        is_method,
        is_type,
    };
    cs.add_definition(file, def("C", LineInterval::new(1, 8), false, true));
    let def_x = cs.add_definition(file, def("x", LineInterval::new(2, 4), true, false));
    cs.add_definition(file, def("caller", LineInterval::new(5, 7), true, false));
    cs.add_use(
        file,
        NewUse {
            name: "x".into(),
            position: index.char_span(LineInterval::new(6, 6)),
            semantic_key: "key:x".into(),
            associated_definition: Some(def_x),
        },
    );

    derive_regions(&mut cs, file, LineInterval::new(3, 3), &index).unwrap();
    derive_regions(&mut cs, file, LineInterval::new(6, 6), &index).unwrap();

    let result = cluster_changes(&cs);
    (cs, result)
}

#[test]
fn csv_export_writes_all_six_files() {
    let (cs, result) = analyzed_changeset();
    let dir = tempfile::tempdir().unwrap();
    CsvExporter::new(&cs, &result).export(dir.path()).unwrap();

    for name in [
        "defs.csv",
        "uses.csv",
        "diffs.csv",
        "diffRelations.csv",
        "partitions.csv",
        "summary.csv",
    ] {
        assert!(dir.path().join(name).is_file(), "{name} missing");
    }
}

#[test]
fn csv_rows_match_changeset_contents() {
    let (cs, result) = analyzed_changeset();
    let dir = tempfile::tempdir().unwrap();
    CsvExporter::new(&cs, &result).export(dir.path()).unwrap();

    let defs = fs::read_to_string(dir.path().join("defs.csv")).unwrap();
    let mut lines = defs.lines();
    assert_eq!(
        lines.next().unwrap(),
        "defId,sourceFile,characterSpanStart,characterSpanEnd,name,isTypeDef,isMethodDef,isInsideADiff"
    );
    assert_eq!(lines.count(), 3);

    let uses = fs::read_to_string(dir.path().join("uses.csv")).unwrap();
    let row = uses.lines().nth(1).unwrap();
    // The single use resolves to `x`, definition id 1.
    assert!(row.contains(",x,1,src/C.java,"), "unexpected row: {row}");
    assert!(row.ends_with("true"), "use sits inside a diff region: {row}");

    let relations = fs::read_to_string(dir.path().join("diffRelations.csv")).unwrap();
    let row = relations.lines().nth(1).unwrap();
    assert!(row.starts_with("0,DEF_USE,"), "unexpected row: {row}");

    let summary = fs::read_to_string(dir.path().join("summary.csv")).unwrap();
    assert_eq!(summary.lines().nth(1).unwrap(), "1,3,1,2,1,1,0");
}

#[test]
fn partitions_csv_has_one_row_per_region() {
    let (cs, result) = analyzed_changeset();
    let dir = tempfile::tempdir().unwrap();
    CsvExporter::new(&cs, &result).export(dir.path()).unwrap();

    let partitions = fs::read_to_string(dir.path().join("partitions.csv")).unwrap();
    let rows: Vec<_> = partitions.lines().skip(1).collect();
    assert_eq!(rows.len(), cs.region_count());
    // Both regions fall in the one (non-trivial) partition.
    for row in rows {
        assert!(row.starts_with("0,false,"), "unexpected row: {row}");
    }
}

#[test]
fn json_report_round_trips_through_serde() {
    let (cs, result) = analyzed_changeset();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    export_json(&cs, &result, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["files"], serde_json::json!(["src/C.java"]));
    assert_eq!(value["definitions"].as_array().unwrap().len(), 3);
    assert_eq!(value["relations"][0]["kind"], "DEF_USE");
    assert_eq!(value["partitions"][0]["trivial"], false);

    let summary = summarize(&cs, &result);
    assert_eq!(
        value["summary"]["non_trivial_partitions"],
        serde_json::json!(summary.non_trivial_partitions)
    );
}
