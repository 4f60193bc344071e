//! Build-script synthesis.
//!
//! Turns resolved per-unit dependency sets and the directory hierarchy
//! into deterministic Makefile text, one Makefile per package.

pub mod makefile;

use thiserror::Error;

pub use makefile::{LinkConfig, MakefileRenderer, RootContext};

/// Error during Makefile synthesis.
#[derive(Debug, Error)]
pub enum MakefileError {
    /// Two units in one directory would share a header-list variable.
    #[error(
        "duplicate unit base name in `{dir}`: `{first}` and `{second}` \
         both produce the variable {var}"
    )]
    DuplicateBaseName {
        dir: String,
        first: String,
        second: String,
        var: String,
    },

    /// A unit's transitive include set was never resolved. Resolution
    /// must complete for every file before any script is rendered.
    #[error("unit `{path}` has an unresolved include set")]
    UnresolvedUnit { path: String },
}
