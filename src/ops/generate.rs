//! Implementation of `slipway generate`.
//!
//! The full pipeline: walk the project tree, load every source and
//! header file into the source table, resolve all transitive include
//! sets, group compilable units into per-directory packages, then render
//! and write one Makefile per package. Every Makefile is rendered before
//! any is written, so a synthesis error never leaves partial output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use crate::core::package::Package;
use crate::core::source_file::{FileKind, SourceFile};
use crate::core::table::SourceTable;
use crate::emit::{LinkConfig, MakefileRenderer, RootContext};
use crate::resolver::DependencyResolver;
use crate::util::fs::{read_to_string, rel_dir_string, write_string};

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Project root: the directory holding the program entry point.
    pub root: PathBuf,

    /// Name of the linked executable.
    pub output: String,

    /// Library names passed to the linker as `-l` flags, in order.
    pub libs: Vec<String>,

    /// C++ language standard for the root CXXFLAGS.
    pub std: String,

    /// Print rendered Makefiles to stdout instead of writing them.
    pub dry_run: bool,
}

/// Summary of a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Number of discovered source and header files.
    pub files: usize,

    /// Number of Makefiles rendered.
    pub makefiles: usize,
}

/// Run the full generation pipeline.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateReport> {
    if !opts.root.is_dir() {
        bail!("project root `{}` is not a directory", opts.root.display());
    }

    let mut table = scan_tree(&opts.root)?;
    if table.is_empty() {
        bail!(
            "no source or header files found under `{}`",
            opts.root.display()
        );
    }

    DependencyResolver::resolve_all(&mut table);

    let packages = group_packages(&table);
    let rendered = render_all(&table, &packages, opts)?;

    for (path, content) in &rendered {
        if opts.dry_run {
            println!("# --- {} ---", path.display());
            print!("{}", content);
        } else {
            write_string(path, content)?;
            tracing::debug!("wrote {}", path.display());
        }
    }

    Ok(GenerateReport {
        files: table.len(),
        makefiles: rendered.len(),
    })
}

/// Walk the project tree and load every compilable unit and header.
///
/// Traversal is sorted for reproducible logs, though resolution and
/// emission do not depend on discovery order. An unreadable file aborts
/// the run.
fn scan_tree(root: &Path) -> Result<SourceTable> {
    let mut table = SourceTable::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().into_owned();
        let Some(kind) = FileKind::classify(&filename) else {
            continue;
        };

        let rel = entry
            .path()
            .strip_prefix(root)
            .expect("walked path is always under the root");
        let rel_dir = rel_dir_string(rel.parent().unwrap_or(Path::new("")));

        let text = read_to_string(entry.path())?;
        tracing::debug!("discovered {}{}", rel_dir, filename);
        table.insert(SourceFile::new(rel_dir, filename, kind, text));
    }

    Ok(table)
}

/// Group compilable units into one package per directory.
///
/// Every directory containing a discovered file gets a package, even if
/// it holds only headers. The root package always exists because it owns
/// the link and orchestration rules.
fn group_packages(table: &SourceTable) -> Vec<Package> {
    let mut by_dir: BTreeMap<String, Package> = BTreeMap::new();
    by_dir.insert(String::new(), Package::new(""));

    for id in table.ids() {
        let file = table.get(id);
        let package = by_dir
            .entry(file.rel_dir.clone())
            .or_insert_with(|| Package::new(file.rel_dir.clone()));
        if file.kind == FileKind::Unit {
            package.add_unit(id);
        }
    }

    by_dir.into_values().collect()
}

/// Render every package's Makefile. Nothing is written here.
fn render_all(
    table: &SourceTable,
    packages: &[Package],
    opts: &GenerateOptions,
) -> Result<Vec<(PathBuf, String)>> {
    let link = LinkConfig {
        executable: opts.output.clone(),
        libs: opts.libs.clone(),
        std: opts.std.clone(),
    };
    let all_dirs: Vec<String> = packages.iter().map(|p| p.rel_dir.clone()).collect();

    let mut rendered = Vec::new();
    for package in packages {
        let renderer = if package.is_root() {
            MakefileRenderer::new_root(
                table,
                package,
                RootContext {
                    link: &link,
                    all_dirs: &all_dirs,
                },
            )
        } else {
            MakefileRenderer::new(table, package)
        };

        let dir = if package.rel_dir.is_empty() {
            "."
        } else {
            &package.rel_dir
        };
        let content = renderer
            .render()
            .with_context(|| format!("failed to render Makefile for `{}`", dir))?;
        let path = opts.root.join(&package.rel_dir).join("Makefile");
        rendered.push((path, content));
    }

    tracing::info!("rendered {} Makefiles", rendered.len());
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn opts(root: &Path) -> GenerateOptions {
        GenerateOptions {
            root: root.to_path_buf(),
            output: "demo".to_string(),
            libs: Vec::new(),
            std: "c++11".to_string(),
            dry_run: false,
        }
    }

    fn write_tree(root: &Path, files: &[(&str, &str)]) {
        for (rel_path, text) in files {
            let path = root.join(rel_path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
    }

    #[test]
    fn test_generate_single_package() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[
                ("main.cpp", "#include \"util.h\"\nint main() {}\n"),
                ("util.h", "void util();\n"),
            ],
        );

        let report = generate(&opts(tmp.path())).unwrap();
        assert_eq!(report.files, 2);
        assert_eq!(report.makefiles, 1);

        let makefile = fs::read_to_string(tmp.path().join("Makefile")).unwrap();
        assert!(makefile.contains("HEADERS_MAIN = \\\n\t./util.h\n"));
        assert!(makefile.contains("demo: $(OBJECTS)\n"));
    }

    #[test]
    fn test_generate_two_packages() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[
                ("main.cpp", "#include \"lib/helper.h\"\n"),
                ("lib/helper.cpp", "#include \"lib/helper.h\"\n"),
                ("lib/helper.h", ""),
            ],
        );

        let report = generate(&opts(tmp.path())).unwrap();
        assert_eq!(report.makefiles, 2);

        let root_makefile = fs::read_to_string(tmp.path().join("Makefile")).unwrap();
        assert!(root_makefile.contains("cd lib/; make all\n"));
        assert!(root_makefile.contains("cd lib/; make clean\n"));

        let lib_makefile = fs::read_to_string(tmp.path().join("lib/Makefile")).unwrap();
        assert!(lib_makefile.contains("INC = -I ./../\n"));
        assert!(lib_makefile.contains("HEADERS_HELPER = \\\n\t./../lib/helper.h\n"));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[
                ("main.cpp", "#include \"sub/api.h\"\n"),
                ("sub/api.h", "#include \"sub/impl.h\"\n"),
                ("sub/impl.h", ""),
                ("sub/worker.cpp", "#include \"sub/api.h\"\n"),
            ],
        );

        generate(&opts(tmp.path())).unwrap();
        let first_root = fs::read_to_string(tmp.path().join("Makefile")).unwrap();
        let first_sub = fs::read_to_string(tmp.path().join("sub/Makefile")).unwrap();

        generate(&opts(tmp.path())).unwrap();
        let second_root = fs::read_to_string(tmp.path().join("Makefile")).unwrap();
        let second_sub = fs::read_to_string(tmp.path().join("sub/Makefile")).unwrap();

        assert_eq!(first_root, second_root);
        assert_eq!(first_sub, second_sub);
    }

    #[test]
    fn test_header_only_directory_still_gets_makefile() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[("main.cpp", ""), ("include/api.h", "")],
        );

        let report = generate(&opts(tmp.path())).unwrap();
        assert_eq!(report.makefiles, 2);
        assert!(tmp.path().join("include/Makefile").exists());
    }

    #[test]
    fn test_duplicate_base_name_aborts_without_writing() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("app.cpp", ""), ("app.cc", "")]);

        let err = generate(&opts(tmp.path())).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate unit base name"));
        assert!(!tmp.path().join("Makefile").exists());
    }

    #[test]
    fn test_empty_tree_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(generate(&opts(tmp.path())).is_err());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("main.cpp", "")]);

        let mut o = opts(tmp.path());
        o.dry_run = true;
        generate(&o).unwrap();

        assert!(!tmp.path().join("Makefile").exists());
    }

    #[test]
    fn test_non_source_files_ignored() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[("main.cpp", ""), ("notes.txt", ""), ("data.json", "{}")],
        );

        let report = generate(&opts(tmp.path())).unwrap();
        assert_eq!(report.files, 1);
    }
}
