//! High-level operations.
//!
//! This module contains the implementation of Slipway commands.

pub mod generate;

pub use generate::{generate, GenerateOptions, GenerateReport};
