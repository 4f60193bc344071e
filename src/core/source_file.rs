//! Source file model - one discovered compilable unit or header.
//!
//! A SourceFile is created once per discovered file at scan time and lives
//! in the [`SourceTable`](crate::core::table::SourceTable) arena for the
//! rest of the run. Its transitive include set is computed lazily by the
//! resolver and is immutable once marked resolved.

use std::collections::HashSet;

/// Stable index of a source file in the source table arena.
///
/// The include graph can contain cycles, so files reference each other by
/// index rather than by pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) usize);

impl FileId {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a discovered file contributes to the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A translation unit that produces an object file.
    Unit,
    /// A header that only contributes to dependency sets.
    Header,
}

impl FileKind {
    const UNIT_EXTENSIONS: &'static [&'static str] = &["cpp", "cc", "cxx"];
    const HEADER_EXTENSIONS: &'static [&'static str] = &["h", "hpp", "hh"];

    /// Classify a filename by its final extension.
    ///
    /// Returns `None` for files that are neither compilable units nor
    /// headers; those never enter the source table.
    pub fn classify(filename: &str) -> Option<FileKind> {
        let (_, ext) = filename.rsplit_once('.')?;
        if Self::UNIT_EXTENSIONS.contains(&ext) {
            Some(FileKind::Unit)
        } else if Self::HEADER_EXTENSIONS.contains(&ext) {
            Some(FileKind::Header)
        } else {
            None
        }
    }
}

/// Resolution progress for one file's transitive include set.
///
/// `InProgress` is the cycle guard: a file revisited while its own
/// resolution is still on the stack contributes an empty set instead of
/// recursing forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveState {
    #[default]
    Unvisited,
    InProgress,
    Resolved,
}

/// One discovered source or header file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Directory relative to the project root. Empty for the root
    /// directory, otherwise ends with `/`.
    pub rel_dir: String,

    /// The filename, with extension.
    pub filename: String,

    /// Unit or header.
    pub kind: FileKind,

    /// Raw text, loaded once at scan time.
    pub text: String,

    pub(crate) state: ResolveState,

    /// Files named by quoted include directives in this file's text,
    /// first-seen order, duplicates removed.
    pub(crate) direct_includes: Vec<FileId>,

    /// Union of the direct includes and their transitive sets. Only
    /// meaningful once `state` is `Resolved`.
    pub(crate) transitive_includes: HashSet<FileId>,
}

impl SourceFile {
    /// Create an unresolved source file.
    pub fn new(
        rel_dir: impl Into<String>,
        filename: impl Into<String>,
        kind: FileKind,
        text: impl Into<String>,
    ) -> Self {
        SourceFile {
            rel_dir: rel_dir.into(),
            filename: filename.into(),
            kind,
            text: text.into(),
            state: ResolveState::default(),
            direct_includes: Vec::new(),
            transitive_includes: HashSet::new(),
        }
    }

    /// The filename without its final extension.
    pub fn base_name(&self) -> &str {
        match self.filename.rsplit_once('.') {
            Some((base, _)) => base,
            None => &self.filename,
        }
    }

    /// Root-relative path of this file, e.g. `sub/api.h`.
    pub fn rel_path(&self) -> String {
        format!("{}{}", self.rel_dir, self.filename)
    }

    /// Key used everywhere a set of files must be linearized
    /// deterministically.
    pub fn sort_key(&self) -> String {
        self.rel_path()
    }

    /// Whether the transitive include set has been fully computed.
    pub fn is_resolved(&self) -> bool {
        self.state == ResolveState::Resolved
    }

    /// The resolved direct includes, in first-seen order.
    pub fn direct_includes(&self) -> &[FileId] {
        &self.direct_includes
    }

    /// The resolved transitive include set.
    pub fn transitive_includes(&self) -> &HashSet<FileId> {
        &self.transitive_includes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_units() {
        assert_eq!(FileKind::classify("main.cpp"), Some(FileKind::Unit));
        assert_eq!(FileKind::classify("main.cc"), Some(FileKind::Unit));
        assert_eq!(FileKind::classify("main.cxx"), Some(FileKind::Unit));
    }

    #[test]
    fn test_classify_headers() {
        assert_eq!(FileKind::classify("util.h"), Some(FileKind::Header));
        assert_eq!(FileKind::classify("util.hpp"), Some(FileKind::Header));
        assert_eq!(FileKind::classify("util.hh"), Some(FileKind::Header));
    }

    #[test]
    fn test_classify_other_files() {
        assert_eq!(FileKind::classify("Makefile"), None);
        assert_eq!(FileKind::classify("readme.txt"), None);
        assert_eq!(FileKind::classify("noext"), None);
    }

    #[test]
    fn test_base_name_strips_final_extension_only() {
        let f = SourceFile::new("", "parser.tab.cpp", FileKind::Unit, "");
        assert_eq!(f.base_name(), "parser.tab");
    }

    #[test]
    fn test_sort_key_joins_dir_and_filename() {
        let f = SourceFile::new("sub/", "api.h", FileKind::Header, "");
        assert_eq!(f.sort_key(), "sub/api.h");

        let root = SourceFile::new("", "main.cpp", FileKind::Unit, "");
        assert_eq!(root.sort_key(), "main.cpp");
    }
}
