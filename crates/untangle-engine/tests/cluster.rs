//! End-to-end clustering scenarios: derive, relate, partition.

use untangle_core::{LineIndex, LineInterval, LineToCharConverter};
use untangle_engine::{cluster_changes, derive_regions};
use untangle_model::{
    Changeset, DefinitionId, DiffRegionId, FileContents, NewDefinition, NewUse, Partition,
    RelationKind, SourceFileId,
};

fn add_file(changeset: &mut Changeset, path: &str, text: &str) -> (SourceFileId, LineIndex) {
    let file = changeset.add_file(path, FileContents::Inline(text.to_string()));
    (file, LineIndex::new(text))
}

fn add_type(
    changeset: &mut Changeset,
    file: SourceFileId,
    index: &LineIndex,
    name: &str,
    lines: LineInterval,
) -> DefinitionId {
    add_def(changeset, file, index, name, lines, false, true)
}

fn add_method(
    changeset: &mut Changeset,
    file: SourceFileId,
    index: &LineIndex,
    name: &str,
    lines: LineInterval,
) -> DefinitionId {
    add_def(changeset, file, index, name, lines, true, false)
}

fn add_def(
    changeset: &mut Changeset,
    file: SourceFileId,
    index: &LineIndex,
    name: &str,
    lines: LineInterval,
    is_method: bool,
    is_type: bool,
) -> DefinitionId {
    changeset.add_definition(
        file,
        NewDefinition {
            name: name.into(),
            position: index.char_span(lines),
            semantic_key: format!("key:{name}"),
            is_method,
            is_type,
        },
    )
}

fn add_use(
    changeset: &mut Changeset,
    file: SourceFileId,
    index: &LineIndex,
    name: &str,
    line: u32,
    definition: Option<DefinitionId>,
) {
    changeset.add_use(
        file,
        NewUse {
            name: name.into(),
            position: index.char_span(LineInterval::new(line, line)),
            semantic_key: format!("key:{name}"),
            associated_definition: definition,
        },
    );
}

fn partition_of<'a>(partitions: &'a [Partition], region: DiffRegionId) -> &'a Partition {
    partitions
        .iter()
        .find(|p| p.contains(region))
        .expect("region must land in a partition")
}

fn relation_kind(
    result: &untangle_engine::AnalysisResult,
    a: DiffRegionId,
    b: DiffRegionId,
) -> Option<RelationKind> {
    result
        .relations()
        .iter()
        .find(|pair| {
            let (x, y) = pair.endpoints();
            (x, y) == if a <= b { (a, b) } else { (b, a) }
        })
        .map(|pair| pair.kind())
}

#[test]
fn adjacent_regions_in_same_method_form_one_trivial_partition() {
    let text = "\
class C {
  void foo() {
    int a = 1;
    int b = 2;
    int c = 3;
  }
}
";
    let mut cs = Changeset::new();
    let (file, index) = add_file(&mut cs, "src/C.java", text);
    add_type(&mut cs, file, &index, "C", LineInterval::new(1, 7));
    add_method(&mut cs, file, &index, "foo", LineInterval::new(2, 6));

    let r1 = derive_regions(&mut cs, file, LineInterval::new(3, 3), &index).unwrap()[0];
    let r2 = derive_regions(&mut cs, file, LineInterval::new(5, 5), &index).unwrap()[0];

    let result = cluster_changes(&cs);
    assert_eq!(
        relation_kind(&result, r1, r2),
        Some(RelationKind::SameEnclosingMethod)
    );
    assert_eq!(result.partitions().len(), 1);
    let p = partition_of(result.partitions(), r1);
    assert!(p.contains(r2));
    assert!(p.is_trivial(&cs));
    assert_eq!(result.non_trivial_partitions(&cs).count(), 0);
}

#[test]
fn def_use_across_methods_is_non_trivial() {
    let text = "\
class C {
  int x() {
    return 1;
  }
  void caller() {
    int v = x();
  }
}
";
    let mut cs = Changeset::new();
    let (file, index) = add_file(&mut cs, "src/C.java", text);
    add_type(&mut cs, file, &index, "C", LineInterval::new(1, 8));
    let def_x = add_method(&mut cs, file, &index, "x", LineInterval::new(2, 4));
    add_method(&mut cs, file, &index, "caller", LineInterval::new(5, 7));
    add_use(&mut cs, file, &index, "x", 6, Some(def_x));

    let r1 = derive_regions(&mut cs, file, LineInterval::new(2, 3), &index).unwrap()[0];
    let r2 = derive_regions(&mut cs, file, LineInterval::new(6, 6), &index).unwrap()[0];

    let result = cluster_changes(&cs);
    assert_eq!(relation_kind(&result, r1, r2), Some(RelationKind::DefUse));

    let p = partition_of(result.partitions(), r1);
    assert!(p.contains(r2));
    assert!(!p.is_trivial(&cs));
}

#[test]
fn shared_untouched_symbol_relates_regions_as_use_use() {
    let text = "\
class C {
  static int shared() { return 0; }
  void m1() {
    int a = shared();
  }
  void m2() {
    int b = shared();
  }
}
";
    let mut cs = Changeset::new();
    let (file, index) = add_file(&mut cs, "src/C.java", text);
    add_type(&mut cs, file, &index, "C", LineInterval::new(1, 9));
    let shared = add_method(&mut cs, file, &index, "shared", LineInterval::new(2, 2));
    add_method(&mut cs, file, &index, "m1", LineInterval::new(3, 5));
    add_method(&mut cs, file, &index, "m2", LineInterval::new(6, 8));
    add_use(&mut cs, file, &index, "shared", 4, Some(shared));
    add_use(&mut cs, file, &index, "shared", 7, Some(shared));

    let r1 = derive_regions(&mut cs, file, LineInterval::new(4, 4), &index).unwrap()[0];
    let r2 = derive_regions(&mut cs, file, LineInterval::new(7, 7), &index).unwrap()[0];

    // `shared`'s definition itself sits in no diff region.
    assert!(!cs.definition_inside_any_region(shared));

    let result = cluster_changes(&cs);
    assert_eq!(relation_kind(&result, r1, r2), Some(RelationKind::UseUse));
    assert!(!partition_of(result.partitions(), r1).is_trivial(&cs));
}

#[test]
fn def_use_connects_regions_across_files() {
    let lib = "\
class A {
  static int helper() { return 1; }
}
";
    let app = "\
class B {
  void go() {
    int v = A.helper();
  }
}
";
    let mut cs = Changeset::new();
    let (file_a, index_a) = add_file(&mut cs, "src/A.java", lib);
    let (file_b, index_b) = add_file(&mut cs, "src/B.java", app);

    add_type(&mut cs, file_a, &index_a, "A", LineInterval::new(1, 3));
    let helper = add_method(&mut cs, file_a, &index_a, "helper", LineInterval::new(2, 2));
    add_type(&mut cs, file_b, &index_b, "B", LineInterval::new(1, 5));
    add_method(&mut cs, file_b, &index_b, "go", LineInterval::new(2, 4));
    add_use(&mut cs, file_b, &index_b, "helper", 3, Some(helper));

    let r1 = derive_regions(&mut cs, file_a, LineInterval::new(2, 2), &index_a).unwrap()[0];
    let r2 = derive_regions(&mut cs, file_b, LineInterval::new(3, 3), &index_b).unwrap()[0];

    let result = cluster_changes(&cs);
    assert_eq!(relation_kind(&result, r1, r2), Some(RelationKind::DefUse));

    let p = partition_of(result.partitions(), r1);
    assert!(p.contains(r2));
    assert!(!p.is_trivial(&cs));
    assert_eq!(result.non_trivial_partitions(&cs).count(), 1);
}

#[test]
fn def_use_takes_precedence_over_same_enclosing_method() {
    // Both predicates hold for this pair: the definition and the use sit in
    // the same method, in two regions.
    let text = "\
class C {
  void m() {
    int x = 1;
    int unrelated = 0;
    int y = x;
  }
}
";
    let mut cs = Changeset::new();
    let (file, index) = add_file(&mut cs, "src/C.java", text);
    add_type(&mut cs, file, &index, "C", LineInterval::new(1, 7));
    add_method(&mut cs, file, &index, "m", LineInterval::new(2, 6));
    let def_x = add_def(&mut cs, file, &index, "x", LineInterval::new(3, 3), false, false);
    add_use(&mut cs, file, &index, "x", 5, Some(def_x));

    let r1 = derive_regions(&mut cs, file, LineInterval::new(3, 3), &index).unwrap()[0];
    let r2 = derive_regions(&mut cs, file, LineInterval::new(5, 5), &index).unwrap()[0];

    let result = cluster_changes(&cs);
    assert_eq!(relation_kind(&result, r1, r2), Some(RelationKind::DefUse));
}
