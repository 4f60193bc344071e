//! Slipway.toml - optional project manifest.
//!
//! A project root may carry a `Slipway.toml` supplying the output
//! executable name, link libraries, and language standard, so repeated
//! invocations do not need to restate them on the command line. Values
//! given on the command line win over manifest values.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Manifest filename looked up at the project root.
pub const MANIFEST_NAME: &str = "Slipway.toml";

/// Parsed `Slipway.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub project: ProjectSection,
}

/// The `[project]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    /// Name of the linked executable.
    pub output: Option<String>,

    /// Libraries passed to the linker as `-l` flags, in order.
    #[serde(default)]
    pub libs: Vec<String>,

    /// C++ language standard for the root CXXFLAGS, e.g. `c++17`.
    pub std: Option<String>,
}

impl Manifest {
    /// Parse a manifest from a string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse Slipway.toml")
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Load the manifest from a project root, if one exists there.
    pub fn load_if_present(root: &Path) -> Result<Option<Self>> {
        let path = root.join(MANIFEST_NAME);
        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }
}
