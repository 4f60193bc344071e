//! Transitive include resolution.
//!
//! Walks the quoted-include graph and computes, for every file in the
//! source table, the full set of local headers it depends on. Resolution
//! is memoized per file, so resolving the table in any order yields the
//! same final sets, and each file's text is scanned at most once.
//!
//! Only quoted includes participate: a line must begin with `#include`
//! and contain a double-quoted path. The quoted path is looked up
//! verbatim as a root-relative path in the table; paths not present are
//! assumed to be system or external headers and are silently skipped.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::source_file::{FileId, ResolveState};
use crate::core::table::SourceTable;

const INCLUDE_MARKER: &str = "#include";

fn quoted_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)""#).unwrap())
}

/// Scan file text for quoted include paths, in order of appearance.
///
/// Malformed directives (no complete double-quoted path after the
/// marker) contribute nothing; angle-bracket includes never match.
fn scan_quoted_includes(text: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for line in text.lines() {
        let Some(rest) = line.strip_prefix(INCLUDE_MARKER) else {
            continue;
        };
        if let Some(caps) = quoted_path_regex().captures(rest) {
            paths.push(caps[1].to_string());
        }
    }
    paths
}

/// Drives memoized transitive-closure computation over the include graph.
pub struct DependencyResolver;

impl DependencyResolver {
    /// Resolve every file in the table.
    ///
    /// Iteration order does not affect the final per-file sets: a file
    /// already resolved through another file's recursion is a no-op here.
    pub fn resolve_all(table: &mut SourceTable) {
        let ids: Vec<FileId> = table.ids().collect();
        for id in ids {
            Self::resolve(table, id);
        }
        tracing::debug!("resolved include sets for {} files", table.len());
    }

    /// Resolve one file's direct and transitive include sets.
    ///
    /// Idempotent: repeat calls on a resolved file return immediately.
    /// A re-entrant call on a file still being resolved (an include
    /// cycle) also returns immediately, so the cycle contributes an
    /// empty set instead of recursing forever; the affected sets are
    /// incomplete but resolution terminates.
    pub fn resolve(table: &mut SourceTable, id: FileId) {
        match table.get(id).state {
            ResolveState::Resolved | ResolveState::InProgress => return,
            ResolveState::Unvisited => {}
        }
        table.get_mut(id).state = ResolveState::InProgress;

        let candidates = scan_quoted_includes(&table.get(id).text);

        let mut direct = Vec::new();
        let mut seen = HashSet::new();
        for candidate in &candidates {
            match table.lookup(candidate) {
                Some(dep) => {
                    if seen.insert(dep) {
                        direct.push(dep);
                    }
                }
                // Not in the project: a system or external header.
                None => {
                    tracing::debug!(
                        "{}: skipping external include \"{}\"",
                        table.get(id).rel_path(),
                        candidate
                    );
                }
            }
        }

        let mut transitive: HashSet<FileId> = HashSet::new();
        for &dep in &direct {
            Self::resolve(table, dep);
            transitive.insert(dep);
            transitive.extend(table.get(dep).transitive_includes.iter().copied());
        }

        let file = table.get_mut(id);
        file.direct_includes = direct;
        file.transitive_includes = transitive;
        file.state = ResolveState::Resolved;
    }
}
