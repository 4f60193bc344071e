//! `slipway generate` command

use anyhow::{bail, Result};

use crate::cli::GenerateArgs;
use slipway::core::manifest::Manifest;
use slipway::ops::{generate, GenerateOptions};

const DEFAULT_STD: &str = "c++11";

pub fn execute(args: GenerateArgs) -> Result<()> {
    let manifest = Manifest::load_if_present(&args.root)?.unwrap_or_default();

    // CLI flags win over manifest values.
    let output = match args.output.or(manifest.project.output) {
        Some(output) => output,
        None => bail!(
            "no executable name given\n\
             \n\
             Pass `--output <name>` or set `output` in Slipway.toml."
        ),
    };
    let libs = if args.libs.is_empty() {
        manifest.project.libs
    } else {
        args.libs
    };
    let std = args
        .std
        .or(manifest.project.std)
        .unwrap_or_else(|| DEFAULT_STD.to_string());

    let opts = GenerateOptions {
        root: args.root,
        output,
        libs,
        std,
        dry_run: args.dry_run,
    };

    let report = generate(&opts)?;

    if !opts.dry_run {
        eprintln!(
            "   Generated {} Makefile(s) from {} source files",
            report.makefiles, report.files
        );
    }

    Ok(())
}
