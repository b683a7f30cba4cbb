//! Definitions, uses, and comments as reported by the source-analysis
//! front end.

use crate::{DefinitionId, DiffRegionId, SourceFileId};
use serde::Serialize;
use untangle_core::CharInterval;

/// Front-end description of a definition, before interning.
#[derive(Clone, Debug)]
pub struct NewDefinition {
    pub name: String,
    pub position: CharInterval,
    /// Opaque key identifying the underlying symbol across the program.
    pub semantic_key: String,
    pub is_method: bool,
    pub is_type: bool,
}

/// Front-end description of a use, before interning.
#[derive(Clone, Debug)]
pub struct NewUse {
    pub name: String,
    pub position: CharInterval,
    pub semantic_key: String,
    /// The definition this use resolves to, when the front end found one.
    pub associated_definition: Option<DefinitionId>,
}

/// A named semantic entity (type, method, field, parameter, local, ...)
/// belonging to exactly one source file.
///
/// Identity within a changeset is `(file, position)`; the name and semantic
/// key are display/bookkeeping data, so two definitions reported at the same
/// spot collapse into one.
#[derive(Clone, Debug, Serialize)]
pub struct Definition {
    name: String,
    file: SourceFileId,
    position: CharInterval,
    semantic_key: String,
    is_method: bool,
    is_type: bool,
    enclosing_regions: Vec<DiffRegionId>,
}

impl Definition {
    pub(crate) fn new(file: SourceFileId, init: NewDefinition) -> Self {
        assert!(!init.name.is_empty(), "definition name must not be blank");
        assert!(
            !init.semantic_key.is_empty(),
            "semantic key must not be blank"
        );
        Self {
            name: init.name,
            file,
            position: init.position,
            semantic_key: init.semantic_key,
            is_method: init.is_method,
            is_type: init.is_type,
            enclosing_regions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> SourceFileId {
        self.file
    }

    pub fn position(&self) -> CharInterval {
        self.position
    }

    pub fn semantic_key(&self) -> &str {
        &self.semantic_key
    }

    pub fn is_method_definition(&self) -> bool {
        self.is_method
    }

    pub fn is_type_definition(&self) -> bool {
        self.is_type
    }

    /// Types and methods are the granularity at which region splitting
    /// avoids straddling a boundary.
    pub fn is_organizational_unit(&self) -> bool {
        self.is_method || self.is_type
    }

    pub fn enclosing_regions(&self) -> &[DiffRegionId] {
        &self.enclosing_regions
    }

    pub fn is_inside_a_diff_region(&self) -> bool {
        !self.enclosing_regions.is_empty()
    }

    pub(crate) fn add_enclosing_region(&mut self, region: DiffRegionId) {
        if !self.enclosing_regions.contains(&region) {
            self.enclosing_regions.push(region);
        }
    }
}

/// A named reference to a definition, belonging to one source file.
///
/// Same identity rule as [`Definition`]: `(file, position)`.
#[derive(Clone, Debug, Serialize)]
pub struct Use {
    name: String,
    file: SourceFileId,
    position: CharInterval,
    semantic_key: String,
    associated_definition: Option<DefinitionId>,
    enclosing_regions: Vec<DiffRegionId>,
}

impl Use {
    pub(crate) fn new(file: SourceFileId, init: NewUse) -> Self {
        assert!(!init.name.is_empty(), "use name must not be blank");
        assert!(
            !init.semantic_key.is_empty(),
            "semantic key must not be blank"
        );
        Self {
            name: init.name,
            file,
            position: init.position,
            semantic_key: init.semantic_key,
            associated_definition: init.associated_definition,
            enclosing_regions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> SourceFileId {
        self.file
    }

    pub fn position(&self) -> CharInterval {
        self.position
    }

    pub fn semantic_key(&self) -> &str {
        &self.semantic_key
    }

    pub fn associated_definition(&self) -> Option<DefinitionId> {
        self.associated_definition
    }

    pub fn enclosing_regions(&self) -> &[DiffRegionId] {
        &self.enclosing_regions
    }

    pub fn is_inside_a_diff_region(&self) -> bool {
        !self.enclosing_regions.is_empty()
    }

    pub(crate) fn add_enclosing_region(&mut self, region: DiffRegionId) {
        if !self.enclosing_regions.contains(&region) {
            self.enclosing_regions.push(region);
        }
    }
}

/// A comment span within a source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Comment {
    file: SourceFileId,
    position: CharInterval,
}

impl Comment {
    pub(crate) fn new(file: SourceFileId, position: CharInterval) -> Self {
        Self { file, position }
    }

    pub fn file(&self) -> SourceFileId {
        self.file
    }

    pub fn position(&self) -> CharInterval {
        self.position
    }
}
