//! Slipway - a Makefile generator for C++ source trees
//!
//! This crate provides the core library functionality for Slipway,
//! including include-dependency resolution and Makefile synthesis.

pub mod core;
pub mod emit;
pub mod ops;
pub mod resolver;
pub mod util;

pub use crate::core::{
    manifest::Manifest,
    package::{Package, PackageRole},
    source_file::{FileId, FileKind, SourceFile},
    table::SourceTable,
};

pub use resolver::DependencyResolver;
