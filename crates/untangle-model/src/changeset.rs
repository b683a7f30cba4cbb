use crate::{
    Comment, Definition, DefinitionId, DiffRegion, DiffRegionId, FileContents, NewDefinition,
    NewUse, SourceFile, SourceFileId, Use, UseId,
};
use std::collections::HashMap;
use untangle_core::{CharInterval, LineInterval};

/// Arena-backed store for every entity in one changeset.
///
/// All cross-entity references are dense ids into these arenas. Definitions,
/// uses, and regions are deduplicated on their identity key
/// (`(file, position)` resp. `(file, char_span)`): re-adding an existing
/// entity returns the id of the first one, matching insert-once set
/// semantics.
#[derive(Debug, Default)]
pub struct Changeset {
    files: Vec<SourceFile>,
    file_index: HashMap<String, SourceFileId>,
    definitions: Vec<Definition>,
    definition_index: HashMap<(SourceFileId, CharInterval), DefinitionId>,
    uses: Vec<Use>,
    use_index: HashMap<(SourceFileId, CharInterval), UseId>,
    regions: Vec<DiffRegion>,
    region_index: HashMap<(SourceFileId, CharInterval), DiffRegionId>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Registers a file, or returns the id of the file already registered
    /// under the same path.
    pub fn add_file(&mut self, path: impl Into<String>, contents: FileContents) -> SourceFileId {
        let path = path.into();
        if let Some(&id) = self.file_index.get(&path) {
            return id;
        }
        let id = SourceFileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(path.clone(), contents));
        self.file_index.insert(path, id);
        id
    }

    pub fn file_id(&self, path: &str) -> Option<SourceFileId> {
        self.file_index.get(path).copied()
    }

    pub fn file(&self, id: SourceFileId) -> &SourceFile {
        &self.files[id.idx()]
    }

    pub fn files(&self) -> impl Iterator<Item = (SourceFileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| (SourceFileId::from_raw(i as u32), f))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn add_definition(&mut self, file: SourceFileId, init: NewDefinition) -> DefinitionId {
        let key = (file, init.position);
        if let Some(&id) = self.definition_index.get(&key) {
            return id;
        }
        let id = DefinitionId::from_raw(self.definitions.len() as u32);
        self.definitions.push(Definition::new(file, init));
        self.definition_index.insert(key, id);
        self.files[file.idx()].definitions.push(id);
        id
    }

    pub fn definition(&self, id: DefinitionId) -> &Definition {
        &self.definitions[id.idx()]
    }

    pub fn definitions(&self) -> impl Iterator<Item = (DefinitionId, &Definition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (DefinitionId::from_raw(i as u32), d))
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn add_use(&mut self, file: SourceFileId, init: NewUse) -> UseId {
        if let Some(def) = init.associated_definition {
            assert!(def.idx() < self.definitions.len(), "unknown definition id");
        }
        let key = (file, init.position);
        if let Some(&id) = self.use_index.get(&key) {
            return id;
        }
        let id = UseId::from_raw(self.uses.len() as u32);
        self.uses.push(Use::new(file, init));
        self.use_index.insert(key, id);
        self.files[file.idx()].uses.push(id);
        id
    }

    pub fn usage(&self, id: UseId) -> &Use {
        &self.uses[id.idx()]
    }

    pub fn uses(&self) -> impl Iterator<Item = (UseId, &Use)> {
        self.uses
            .iter()
            .enumerate()
            .map(|(i, u)| (UseId::from_raw(i as u32), u))
    }

    pub fn use_count(&self) -> usize {
        self.uses.len()
    }

    pub fn add_comment(&mut self, file: SourceFileId, position: CharInterval) {
        let comment = Comment::new(file, position);
        let comments = &mut self.files[file.idx()].comments;
        if !comments.contains(&comment) {
            comments.push(comment);
        }
    }

    /// Creates a diff region and registers it on the definitions and uses it
    /// contains. Re-adding a region with the same `(file, char_span)` key
    /// returns the existing id, which makes derivation idempotent.
    pub fn add_region(
        &mut self,
        file: SourceFileId,
        line_span: LineInterval,
        char_span: CharInterval,
        definitions: Vec<DefinitionId>,
        uses: Vec<UseId>,
    ) -> DiffRegionId {
        let key = (file, char_span);
        if let Some(&id) = self.region_index.get(&key) {
            return id;
        }

        let enclosing_method = definitions
            .iter()
            .copied()
            .filter(|&d| self.definitions[d.idx()].is_method_definition())
            .min_by_key(|&d| self.definitions[d.idx()].position().first());

        let id = DiffRegionId::from_raw(self.regions.len() as u32);
        for &d in &definitions {
            self.definitions[d.idx()].add_enclosing_region(id);
        }
        for &u in &uses {
            self.uses[u.idx()].add_enclosing_region(id);
        }
        self.regions.push(DiffRegion::new(
            file,
            line_span,
            char_span,
            definitions,
            uses,
            enclosing_method,
        ));
        self.region_index.insert(key, id);
        self.files[file.idx()].regions.push(id);
        id
    }

    pub fn region(&self, id: DiffRegionId) -> &DiffRegion {
        &self.regions[id.idx()]
    }

    pub fn regions(&self) -> impl Iterator<Item = (DiffRegionId, &DiffRegion)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| (DiffRegionId::from_raw(i as u32), r))
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Whether any diff region in the changeset encloses this definition.
    pub fn definition_inside_any_region(&self, id: DefinitionId) -> bool {
        self.definitions[id.idx()].is_inside_a_diff_region()
    }
}
