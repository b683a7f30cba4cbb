use crate::{Comment, DefinitionId, DiffRegionId, ModelError, ModelResult, UseId};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Where a file's text comes from when the irrelevant-region filter needs
/// to inspect line contents.
#[derive(Clone, Debug)]
pub enum FileContents {
    /// Text supplied up front by the host.
    Inline(String),
    /// Text read from disk on first access.
    OnDisk(PathBuf),
}

/// One changed file in a changeset, identified by its project-relative path.
///
/// Owns insertion-ordered id lists of its definitions, uses, and derived
/// diff regions, plus its comment spans. Line contents are loaded lazily and
/// cached; the cache is written at most once even under concurrent access.
#[derive(Debug)]
pub struct SourceFile {
    path: String,
    contents: FileContents,
    lines: OnceLock<Vec<String>>,
    pub(crate) definitions: Vec<DefinitionId>,
    pub(crate) uses: Vec<UseId>,
    pub(crate) regions: Vec<DiffRegionId>,
    pub(crate) comments: Vec<Comment>,
}

impl SourceFile {
    pub(crate) fn new(path: String, contents: FileContents) -> Self {
        assert!(!path.is_empty(), "source file path must not be blank");
        Self {
            path,
            contents,
            lines: OnceLock::new(),
            definitions: Vec::new(),
            uses: Vec::new(),
            regions: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Project-relative path; the file's unique key within a changeset.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn definitions(&self) -> &[DefinitionId] {
        &self.definitions
    }

    pub fn uses(&self) -> &[UseId] {
        &self.uses
    }

    pub fn regions(&self) -> &[DiffRegionId] {
        &self.regions
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// The file's text, split into lines. Loaded on first access.
    pub fn lines(&self) -> ModelResult<&[String]> {
        if let Some(lines) = self.lines.get() {
            return Ok(lines);
        }
        let loaded = self.load_lines()?;
        // If another thread won the race the earlier value is kept.
        Ok(self.lines.get_or_init(|| loaded))
    }

    fn load_lines(&self) -> ModelResult<Vec<String>> {
        let text = match &self.contents {
            FileContents::Inline(text) => text.clone(),
            FileContents::OnDisk(path) => {
                std::fs::read_to_string(path).map_err(|source| ModelError::Io {
                    path: path.clone(),
                    source,
                })?
            }
        };
        Ok(text.lines().map(str::to_owned).collect())
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for SourceFile {}

impl Serialize for SourceFile {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path)
    }
}
