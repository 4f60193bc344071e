//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Slipway - a Makefile generator for C++ source trees
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate per-directory Makefiles for a source tree
    Generate(GenerateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Path to the project root (the directory holding main.cpp)
    pub root: PathBuf,

    /// Name of the linked executable (overrides Slipway.toml)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Comma-separated libraries linked as -l flags, e.g. `m,pthread`
    #[arg(short = 'l', long = "libs", value_delimiter = ',')]
    pub libs: Vec<String>,

    /// C++ language standard for the root CXXFLAGS
    #[arg(long)]
    pub std: Option<String>,

    /// Print the rendered Makefiles to stdout instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
