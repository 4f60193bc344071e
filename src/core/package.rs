//! Package - one directory's worth of compilable units.
//!
//! Every directory that contains at least one discovered file becomes a
//! Package and receives its own Makefile. The directory without a path
//! prefix is the root package; it additionally owns the cross-directory
//! aggregation and the final link step (see [`crate::emit`]).

use crate::core::source_file::FileId;
use crate::core::table::SourceTable;

/// Role of a package in the emitted build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageRole {
    /// A subdirectory: compiles its own units only.
    Regular,
    /// The project root: also aggregates objects and links the executable.
    Root,
}

/// One directory's collection of compilable units.
#[derive(Debug, Clone)]
pub struct Package {
    /// Directory relative to the project root; empty for the root,
    /// otherwise ends with `/`.
    pub rel_dir: String,

    /// Role, derived from the directory path at construction.
    pub role: PackageRole,

    /// The compilable units in this directory.
    units: Vec<FileId>,
}

impl Package {
    /// Create a package for a directory. The directory without a path
    /// prefix becomes the root package.
    pub fn new(rel_dir: impl Into<String>) -> Self {
        let rel_dir = rel_dir.into();
        let role = if rel_dir.is_empty() {
            PackageRole::Root
        } else {
            PackageRole::Regular
        };
        Package {
            rel_dir,
            role,
            units: Vec::new(),
        }
    }

    /// Whether this is the root package.
    pub fn is_root(&self) -> bool {
        self.role == PackageRole::Root
    }

    /// Register a compilable unit belonging to this directory.
    pub fn add_unit(&mut self, id: FileId) {
        self.units.push(id);
    }

    /// The units of this package, in registration order.
    pub fn units(&self) -> &[FileId] {
        &self.units
    }

    /// The units of this package, sorted by sort key for deterministic
    /// emission.
    pub fn sorted_units(&self, table: &SourceTable) -> Vec<FileId> {
        let mut units = self.units.clone();
        units.sort_by_key(|&id| table.get(id).sort_key());
        units
    }

    /// Relative path from this directory back to the project root, e.g.
    /// `./../../` for a directory two levels down. Used to rewrite
    /// root-relative header paths into paths relative to this directory.
    pub fn path_to_root(&self) -> String {
        let mut path = String::from("./");
        for _ in 0..self.rel_dir.matches('/').count() {
            path.push_str("../");
        }
        path
    }
}
