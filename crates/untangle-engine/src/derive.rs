//! Raw changed-line ranges → fine-grained, semantically bounded regions.

use tracing::debug;
use untangle_core::{CharInterval, LineInterval, LineToCharConverter};
use untangle_model::{
    Changeset, Comment, DefinitionId, DiffRegionId, ModelResult, SourceFileId, UseId,
};

/// Derives the diff regions for one raw added-line range of one file and
/// registers them on the changeset.
///
/// The range is split so that no region internally crosses an
/// organizational-unit (type/method) boundary, then regions that are blank,
/// import/package-only, or comment-only are dropped. Returns the ids of the
/// surviving regions.
pub fn derive_regions(
    changeset: &mut Changeset,
    file: SourceFileId,
    raw: LineInterval,
    converter: &dyn LineToCharConverter,
) -> ModelResult<Vec<DiffRegionId>> {
    let segments = {
        let raw_char_span = converter.char_span(raw);
        let candidates = collect_candidates(changeset, file, raw_char_span);
        let spans = split_on_organizational_units(raw, converter, &candidates);
        build_segments(changeset, file, raw, spans, converter, &candidates)?
    };

    let mut regions = Vec::with_capacity(segments.len());
    for seg in segments {
        regions.push(changeset.add_region(
            file,
            seg.line_span,
            seg.char_span,
            seg.definitions,
            seg.uses,
        ));
    }
    Ok(regions)
}

/// Definitions and uses of the file that intersect the raw range.
struct Candidates {
    definitions: Vec<(DefinitionId, CharInterval)>,
    org_units: Vec<CharInterval>,
    uses: Vec<(UseId, CharInterval)>,
}

fn collect_candidates(changeset: &Changeset, file: SourceFileId, span: CharInterval) -> Candidates {
    let mut definitions = Vec::new();
    let mut org_units = Vec::new();
    for &id in changeset.file(file).definitions() {
        let def = changeset.definition(id);
        if def.position().intersects(span) {
            definitions.push((id, def.position()));
            if def.is_organizational_unit() {
                org_units.push(def.position());
            }
        }
    }
    let uses = changeset
        .file(file)
        .uses()
        .iter()
        .map(|&id| (id, changeset.usage(id).position()))
        .filter(|(_, pos)| pos.intersects(span))
        .collect();
    Candidates {
        definitions,
        org_units,
        uses,
    }
}

/// Splits a raw range wherever growing a candidate sub-span by one line
/// would raise the number of intersecting organizational units.
///
/// Checking the count of units rather than their identity keeps a change to
/// a method body in one piece (the method and its enclosing types intersect
/// every line of it) while still cutting between the tail of one unit and
/// the head of the next.
fn split_on_organizational_units(
    raw: LineInterval,
    converter: &dyn LineToCharConverter,
    candidates: &Candidates,
) -> Vec<LineInterval> {
    let count_units = |span: LineInterval| {
        let chars = converter.char_span(span);
        candidates
            .org_units
            .iter()
            .filter(|pos| pos.intersects(chars))
            .count()
    };

    let mut spans = Vec::new();
    let mut current = LineInterval::from_length(raw.first(), 1);
    while raw.contains(current) {
        let grown = LineInterval::from_length(current.first(), current.len() + 1);
        if !raw.contains(grown) || count_units(grown) > count_units(current) {
            spans.push(current);
            current = LineInterval::from_length(current.last() + 1, 1);
        } else {
            current = grown;
        }
    }
    spans
}

struct Segment {
    line_span: LineInterval,
    char_span: CharInterval,
    definitions: Vec<DefinitionId>,
    uses: Vec<UseId>,
}

fn build_segments(
    changeset: &Changeset,
    file: SourceFileId,
    raw: LineInterval,
    spans: Vec<LineInterval>,
    converter: &dyn LineToCharConverter,
    candidates: &Candidates,
) -> ModelResult<Vec<Segment>> {
    let source = changeset.file(file);
    let mut segments = Vec::with_capacity(spans.len());

    for line_span in spans {
        let char_span = converter.char_span(line_span);
        let definitions: Vec<DefinitionId> = candidates
            .definitions
            .iter()
            .filter(|(_, pos)| pos.intersects(char_span))
            .map(|&(id, _)| id)
            .collect();
        let uses: Vec<UseId> = candidates
            .uses
            .iter()
            .filter(|(_, pos)| pos.intersects(char_span))
            .map(|&(id, _)| id)
            .collect();

        let lines = source.lines()?;
        if is_blank(lines, line_span) {
            debug!(path = source.path(), %line_span, "ignored blank diff region");
            continue;
        }
        if !has_organizational_unit(candidates, char_span) {
            debug!(
                path = source.path(),
                %line_span,
                "ignored imports/package-decl diff region"
            );
            continue;
        }
        if contains_only_comments(lines, line_span, source.comments(), converter) {
            debug!(path = source.path(), %line_span, "ignored comments diff region");
            continue;
        }
        debug_assert!(raw.contains(line_span));

        segments.push(Segment {
            line_span,
            char_span,
            definitions,
            uses,
        });
    }
    Ok(segments)
}

fn region_lines(lines: &[String], span: LineInterval) -> impl Iterator<Item = (u32, &str)> {
    span.lines()
        .filter_map(move |n| lines.get(n as usize - 1).map(|l| (n, l.as_str())))
}

fn is_blank(lines: &[String], span: LineInterval) -> bool {
    region_lines(lines, span).all(|(_, line)| line.trim().is_empty())
}

/// A region with no organizational unit inside holds only material like
/// import or package declarations.
fn has_organizational_unit(candidates: &Candidates, span: CharInterval) -> bool {
    candidates.org_units.iter().any(|pos| pos.intersects(span))
}

/// True when every non-blank line of the region is fully covered by a
/// comment span recorded on the file.
fn contains_only_comments(
    lines: &[String],
    span: LineInterval,
    comments: &[Comment],
    converter: &dyn LineToCharConverter,
) -> bool {
    region_lines(lines, span)
        .filter(|(_, line)| !line.trim().is_empty())
        .all(|(n, line)| line_is_covered_by_comment(line, n, comments, converter))
}

fn line_is_covered_by_comment(
    line: &str,
    line_number: u32,
    comments: &[Comment],
    converter: &dyn LineToCharConverter,
) -> bool {
    let line_chars = converter.char_span(LineInterval::from_length(line_number, 1));
    let trimmed = line.trim();
    let leading = (line.len() - line.trim_start().len()) as u32;
    let first = line_chars.first() + leading;
    let trimmed_span = CharInterval::from_length(first, trimmed.len() as u32);
    comments.iter().any(|c| c.position().contains(trimmed_span))
}
