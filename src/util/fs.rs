//! Filesystem utilities.

use std::fs;
use std::path::{Component, Path};

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Render a root-relative directory path in the project's canonical
/// form: forward slashes and a trailing `/`, or the empty string for
/// the root itself.
pub fn rel_dir_string(rel_dir: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in rel_dir.components() {
        if let Component::Normal(part) = component {
            parts.push(part.to_string_lossy().into_owned());
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{}/", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_rel_dir_string() {
        assert_eq!(rel_dir_string(Path::new("")), "");
        assert_eq!(rel_dir_string(Path::new("sub")), "sub/");
        assert_eq!(rel_dir_string(&PathBuf::from("sub").join("nested")), "sub/nested/");
    }

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("file.txt");

        write_string(&path, "content").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let err = read_to_string(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read file"));
    }
}
