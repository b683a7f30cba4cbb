use crate::{DefinitionId, SourceFileId, UseId};
use serde::Serialize;
use untangle_core::{CharInterval, LineInterval};

/// A maximal contiguous span of added/changed lines after splitting,
/// expressed both as lines and as the corresponding character span.
///
/// Identity within a changeset is `(file, char_span)`. A region is immutable
/// after construction; the changeset registers it on the definitions and
/// uses it contains.
#[derive(Clone, Debug, Serialize)]
pub struct DiffRegion {
    file: SourceFileId,
    line_span: LineInterval,
    char_span: CharInterval,
    definitions: Vec<DefinitionId>,
    uses: Vec<UseId>,
    enclosing_method: Option<DefinitionId>,
}

impl DiffRegion {
    pub(crate) fn new(
        file: SourceFileId,
        line_span: LineInterval,
        char_span: CharInterval,
        definitions: Vec<DefinitionId>,
        uses: Vec<UseId>,
        enclosing_method: Option<DefinitionId>,
    ) -> Self {
        Self {
            file,
            line_span,
            char_span,
            definitions,
            uses,
            enclosing_method,
        }
    }

    pub fn file(&self) -> SourceFileId {
        self.file
    }

    pub fn line_span(&self) -> LineInterval {
        self.line_span
    }

    pub fn char_span(&self) -> CharInterval {
        self.char_span
    }

    pub fn definitions(&self) -> &[DefinitionId] {
        &self.definitions
    }

    pub fn uses(&self) -> &[UseId] {
        &self.uses
    }

    pub fn contains_definition(&self, def: DefinitionId) -> bool {
        self.definitions.contains(&def)
    }

    pub fn contains_use(&self, use_: UseId) -> bool {
        self.uses.contains(&use_)
    }

    /// The method definition inside this region with the smallest start
    /// position, or `None` when the region overlaps no method.
    pub fn enclosing_method(&self) -> Option<DefinitionId> {
        self.enclosing_method
    }

    /// True when both regions have the same non-null enclosing method.
    pub fn same_enclosing_method(&self, other: &DiffRegion) -> bool {
        match (self.enclosing_method, other.enclosing_method) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
