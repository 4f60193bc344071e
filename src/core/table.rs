//! The project-wide source table.
//!
//! An arena of every discovered [`SourceFile`] plus a lookup from
//! root-relative path to arena index. The table is built once during the
//! scan and then passed explicitly into resolution and Makefile synthesis,
//! which keeps both independently testable with synthetic tables.

use std::collections::HashMap;

use crate::core::source_file::{FileId, SourceFile};

/// Arena and lookup table for all discovered files.
#[derive(Debug, Default)]
pub struct SourceTable {
    files: Vec<SourceFile>,
    by_path: HashMap<String, FileId>,
}

impl SourceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        SourceTable::default()
    }

    /// Insert a file, indexing it by its root-relative path.
    pub fn insert(&mut self, file: SourceFile) -> FileId {
        let id = FileId(self.files.len());
        self.by_path.insert(file.rel_path(), id);
        self.files.push(file);
        id
    }

    /// Look up a file by its root-relative path, e.g. `sub/api.h`.
    pub fn lookup(&self, rel_path: &str) -> Option<FileId> {
        self.by_path.get(rel_path).copied()
    }

    /// Get a file by id.
    pub fn get(&self, id: FileId) -> &SourceFile {
        &self.files[id.0]
    }

    /// Get a file mutably by id.
    pub(crate) fn get_mut(&mut self, id: FileId) -> &mut SourceFile {
        &mut self.files[id.0]
    }

    /// All file ids, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = FileId> {
        (0..self.files.len()).map(FileId)
    }

    /// All files, in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    /// Number of files in the table.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
