//! Core data structures for Slipway.
//!
//! This module contains the foundational types used throughout Slipway:
//! - Source files and their include sets
//! - The project-wide source table
//! - Packages (one per directory)
//! - The optional Slipway.toml manifest

pub mod manifest;
pub mod package;
pub mod source_file;
pub mod table;

pub use manifest::Manifest;
pub use package::{Package, PackageRole};
pub use source_file::{FileId, FileKind, SourceFile};
pub use table::SourceTable;
