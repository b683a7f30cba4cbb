//! Unified-diff text parsing.
//!
//! Reduces patch text to the raw added-line ranges per file that region
//! derivation consumes. Only additions matter downstream: deleted lines have
//! no position in the new revision, so they are skipped.

use std::fmt;
use thiserror::Error;
use untangle_core::LineInterval;

#[derive(Error, Debug)]
pub enum DiffParseError {
    #[error("malformed hunk header at line {line_number}: {line:?}")]
    MalformedHunkHeader { line_number: usize, line: String },
    #[error("hunk at line {line_number} appears before any file header")]
    HunkBeforeFileHeader { line_number: usize },
}

/// One contiguous run of added lines in one file, positioned against the
/// new revision.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawDiffRegion {
    pub path: String,
    pub lines: LineInterval,
}

impl fmt::Display for RawDiffRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.lines, self.path)
    }
}

/// A parsed `@@ -l[,s] +l[,s] @@` hunk header.
///
/// A `0` start (or length) on either side marks file creation or deletion;
/// that side's span is absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HunkHeader {
    original_span: Option<LineInterval>,
    new_span: Option<LineInterval>,
    heading: String,
}

impl HunkHeader {
    pub fn parse(line: &str, line_number: usize) -> Result<Self, DiffParseError> {
        let malformed = || DiffParseError::MalformedHunkHeader {
            line_number,
            line: line.to_string(),
        };

        let mut fields = line.trim().split(' ');
        match fields.next() {
            Some("@@") => {}
            _ => return Err(malformed()),
        }
        let original = fields.next().ok_or_else(malformed)?;
        let new = fields.next().ok_or_else(malformed)?;
        match fields.next() {
            Some("@@") => {}
            _ => return Err(malformed()),
        }
        let heading = fields.collect::<Vec<_>>().join(" ");

        let original_span = Self::parse_span(original.strip_prefix('-').ok_or_else(malformed)?)
            .ok_or_else(malformed)?;
        let new_span =
            Self::parse_span(new.strip_prefix('+').ok_or_else(malformed)?).ok_or_else(malformed)?;

        Ok(Self {
            original_span,
            new_span,
            heading,
        })
    }

    // `l,s` or bare `l` (length 1). Returns Some(None) for the absent-side
    // cases and None on unparseable input.
    #[allow(clippy::option_option)]
    fn parse_span(field: &str) -> Option<Option<LineInterval>> {
        let (first, len) = match field.split_once(',') {
            Some((first, len)) => (first.parse::<u32>().ok()?, len.parse::<u32>().ok()?),
            None => (field.parse::<u32>().ok()?, 1),
        };
        if first == 0 || len == 0 {
            return Some(None);
        }
        Some(Some(LineInterval::from_length(first, len)))
    }

    /// `None` when the file was created (`-0,0`).
    pub fn original_span(&self) -> Option<LineInterval> {
        self.original_span
    }

    /// `None` when the file was deleted (`+0,0`).
    pub fn new_span(&self) -> Option<LineInterval> {
        self.new_span
    }

    pub fn is_created_file(&self) -> bool {
        self.original_span.is_none()
    }

    pub fn is_deleted_file(&self) -> bool {
        self.new_span.is_none()
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }
}

/// Parses unified-diff text (possibly spanning many files) into the added
/// regions of every touched file.
pub fn parse_unified_diff(text: &str) -> Result<Vec<RawDiffRegion>, DiffParseError> {
    let mut regions = Vec::new();
    let mut lines = text.lines().enumerate().peekable();
    // Path of the file whose hunks we are in; None before any header and for
    // deleted files (`+++ /dev/null`).
    let mut current_path: Option<String> = None;
    let mut seen_file_header = false;

    while let Some((idx, line)) = lines.next() {
        if let Some(target) = line.strip_prefix("+++ ") {
            seen_file_header = true;
            current_path = parse_target_path(target);
        } else if line.starts_with("@@") {
            if !seen_file_header {
                return Err(DiffParseError::HunkBeforeFileHeader {
                    line_number: idx + 1,
                });
            }
            let header = HunkHeader::parse(line, idx + 1)?;
            parse_hunk_body(&header, current_path.as_deref(), &mut lines, &mut regions);
        }
        // Everything else (diff/index/--- lines, mode changes) carries no
        // added-line information.
    }

    Ok(regions)
}

fn parse_target_path(target: &str) -> Option<String> {
    let target = target.split('\t').next().unwrap_or(target).trim();
    if target == "/dev/null" {
        return None;
    }
    let path = target.strip_prefix("b/").unwrap_or(target);
    Some(path.to_string())
}

/// Walks one hunk body, collecting runs of `+` lines.
///
/// A run is closed by a context line but not by deletions: replacing lines
/// in place keeps the replacement as a single region. The no-newline marker
/// counts toward neither side.
fn parse_hunk_body<'a>(
    header: &HunkHeader,
    path: Option<&str>,
    lines: &mut std::iter::Peekable<impl Iterator<Item = (usize, &'a str)>>,
    regions: &mut Vec<RawDiffRegion>,
) {
    let mut remaining_old = header.original_span().map_or(0, LineInterval::len);
    let mut remaining_new = header.new_span().map_or(0, LineInterval::len);
    let mut current_line = header.new_span().map_or(1, LineInterval::first);

    let mut run_start = None;
    let mut run_len = 0u32;
    let mut flush = |start: Option<u32>, len: u32| {
        if let (Some(start), Some(path)) = (start, path) {
            regions.push(RawDiffRegion {
                path: path.to_string(),
                lines: LineInterval::from_length(start, len),
            });
        }
    };

    while remaining_old > 0 || remaining_new > 0 {
        let Some(&(_, line)) = lines.peek() else {
            break; // truncated hunk; keep what we have
        };
        match line.as_bytes().first() {
            Some(b'\\') => {} // "\ No newline at end of file"
            Some(b'+') => {
                if run_start.is_none() {
                    run_start = Some(current_line);
                    run_len = 0;
                }
                run_len += 1;
                current_line += 1;
                remaining_new = remaining_new.saturating_sub(1);
            }
            Some(b'-') => {
                remaining_old = remaining_old.saturating_sub(1);
            }
            _ => {
                flush(run_start.take(), run_len);
                current_line += 1;
                remaining_old = remaining_old.saturating_sub(1);
                remaining_new = remaining_new.saturating_sub(1);
            }
        }
        lines.next();
    }
    flush(run_start.take(), run_len);
}
