//! Makefile rendering for one package.
//!
//! Section order matches the emitted file: variables, the `all` target,
//! the executable link target (root only), one object rule per unit, and
//! `clean`. Units, dependency listings, and package directories are all
//! sorted by their path keys, so two runs over an unchanged tree produce
//! byte-identical output.

use std::collections::HashMap;

use crate::core::package::Package;
use crate::core::source_file::FileId;
use crate::core::table::SourceTable;
use crate::emit::MakefileError;

/// Link configuration owned by the root package.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Name of the linked executable.
    pub executable: String,

    /// Library names passed to the linker, each emitted as `-l<name>`.
    pub libs: Vec<String>,

    /// Language standard for the root CXXFLAGS, e.g. `c++11`.
    pub std: String,
}

/// Cross-directory state the root package needs beyond its own units.
#[derive(Debug)]
pub struct RootContext<'a> {
    /// Link configuration.
    pub link: &'a LinkConfig,

    /// Relative directories of every package in the project, including
    /// the root itself, in ascending path order.
    pub all_dirs: &'a [String],
}

/// Renders the Makefile for one package.
pub struct MakefileRenderer<'a> {
    table: &'a SourceTable,
    package: &'a Package,
    root: Option<RootContext<'a>>,
}

impl<'a> MakefileRenderer<'a> {
    /// Renderer for a non-root package.
    pub fn new(table: &'a SourceTable, package: &'a Package) -> Self {
        MakefileRenderer {
            table,
            package,
            root: None,
        }
    }

    /// Renderer for the root package, which additionally emits the
    /// object aggregate, the link target, and the cross-directory
    /// `all`/`clean` orchestration.
    pub fn new_root(table: &'a SourceTable, package: &'a Package, root: RootContext<'a>) -> Self {
        MakefileRenderer {
            table,
            package,
            root: Some(root),
        }
    }

    /// Render the full Makefile text.
    pub fn render(&self) -> Result<String, MakefileError> {
        let units = self.package.sorted_units(self.table);
        self.check_units(&units)?;

        let mut out = String::new();
        self.emit_variables(&mut out, &units);
        self.emit_target_all(&mut out, &units);
        self.emit_target_executable(&mut out);
        self.emit_object_rules(&mut out, &units);
        self.emit_target_clean(&mut out);
        Ok(out)
    }

    /// Reject unresolved units and base-name collisions before emitting
    /// anything.
    fn check_units(&self, units: &[FileId]) -> Result<(), MakefileError> {
        let mut seen: HashMap<String, String> = HashMap::new();
        for &id in units {
            let unit = self.table.get(id);
            if !unit.is_resolved() {
                return Err(MakefileError::UnresolvedUnit {
                    path: unit.rel_path(),
                });
            }

            let var = header_var(unit.base_name());
            if let Some(first) = seen.insert(var.clone(), unit.filename.clone()) {
                return Err(MakefileError::DuplicateBaseName {
                    dir: self.display_dir(),
                    first,
                    second: unit.filename.clone(),
                    var,
                });
            }
        }
        Ok(())
    }

    fn display_dir(&self) -> String {
        if self.package.rel_dir.is_empty() {
            ".".to_string()
        } else {
            self.package.rel_dir.clone()
        }
    }

    /// Directories of every other package, ascending. Empty for a
    /// non-root package. The root's own directory never recurses into
    /// itself; its units are built by the subsequent steps.
    fn other_dirs(&self) -> Vec<&str> {
        match &self.root {
            Some(root) => root
                .all_dirs
                .iter()
                .map(String::as_str)
                .filter(|dir| *dir != self.package.rel_dir)
                .collect(),
            None => Vec::new(),
        }
    }

    fn emit_variables(&self, out: &mut String, units: &[FileId]) {
        let to_root = self.package.path_to_root();

        if let Some(root) = &self.root {
            out.push_str(&format!("CXXFLAGS = -std={}\n", root.link.std));
        }
        out.push_str(&format!("INC = -I {}\n", to_root));

        // One header-list variable per unit. A unit with no local
        // includes still gets an (empty) variable so its object rule
        // stays well-formed.
        for &id in units {
            let unit = self.table.get(id);
            out.push_str(&format!("{} = ", header_var(unit.base_name())));

            let mut deps: Vec<&FileId> = unit.transitive_includes().iter().collect();
            deps.sort_by_key(|&&dep| self.table.get(dep).sort_key());
            for &dep in deps {
                out.push_str(&format!("\\\n\t{}{}", to_root, self.table.get(dep).rel_path()));
            }
            out.push_str("\n\n");
        }

        if let Some(root) = &self.root {
            // Aggregate object list: one wildcard entry per package.
            out.push_str("OBJECTS = ");
            for dir in root.all_dirs {
                out.push_str(&format!("\\\n\t./{}*.o", dir));
            }
            out.push_str("\n\n");

            out.push_str("LDLIBS =");
            for lib in &root.link.libs {
                out.push_str(&format!(" -l{}", lib));
            }
            out.push_str("\n\n");
        }
    }

    fn emit_target_all(&self, out: &mut String, units: &[FileId]) {
        out.push_str("all:\n");
        for dir in self.other_dirs() {
            out.push_str(&format!("\tcd {}; make all\n", dir));
        }
        for &id in units {
            out.push_str(&format!("\tmake {}.o\n", self.table.get(id).base_name()));
        }
        if let Some(root) = &self.root {
            out.push_str(&format!("\tmake {}\n", root.link.executable));
        }
    }

    fn emit_target_executable(&self, out: &mut String) {
        if let Some(root) = &self.root {
            let exe = &root.link.executable;
            out.push_str(&format!("{}: $(OBJECTS)\n", exe));
            out.push_str(&format!(
                "\t$(CXX) $(LDFLAGS) $(OBJECTS) $(LDLIBS) -o {}\n",
                exe
            ));
        }
    }

    fn emit_object_rules(&self, out: &mut String, units: &[FileId]) {
        for &id in units {
            let unit = self.table.get(id);
            let base = unit.base_name();
            out.push_str(&format!(
                "{}.o: {} $({})\n",
                base,
                unit.filename,
                header_var(base)
            ));
            out.push_str(&format!(
                "\t$(CXX) $(CPPFLAGS) $(CXXFLAGS) -c {} $(INC)\n",
                unit.filename
            ));
        }
    }

    fn emit_target_clean(&self, out: &mut String) {
        out.push_str("clean:\n");
        for dir in self.other_dirs() {
            out.push_str(&format!("\tcd {}; make clean\n", dir));
        }
        match &self.root {
            Some(root) => out.push_str(&format!("\trm -f *.o {}\n", root.link.executable)),
            None => out.push_str("\trm -f *.o\n"),
        }
    }
}

/// Make-variable identifier for a unit's header list: the base name
/// uppercased, with anything outside `[A-Za-z0-9]` mapped to `_`.
fn header_var(base_name: &str) -> String {
    let sanitized: String = base_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("HEADERS_{}", sanitized)
}
