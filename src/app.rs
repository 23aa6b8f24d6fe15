pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{bail, Result};
use clap::Parser;
use std::fs;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(args: Cli) -> Result<()> {
    // 1. Validate the root before anything touches it
    if !args.src.is_dir() {
        bail!("Directory '{}' does not exist", args.src.display());
    }

    // 2. Project name drives preset auto-detection
    let canonical = fs::canonicalize(&args.src).ok();
    let project_name = canonical
        .as_ref()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str());

    // 3. Resolve Configuration
    let config = resolve_config(&args, project_name)?;
    log::debug!("Resolved configuration: {:?}", config);

    // 4. Build the tree
    let scanner = Scanner::new(args.src.clone(), &config)?;
    let tree = scanner.scan();

    if tree.subdirs.is_empty() {
        log::warn!(
            "⚠️ None of the allowed top-level directories were found: {:?}",
            config.allowed_top_dirs
        );
    }
    log::info!(
        "Collected {} directories and {} files",
        tree.dir_count(),
        tree.file_count()
    );

    // 5. Write output
    if args.writes_to_stdout() {
        OutputGenerator::print_json(&tree)?;
    } else {
        OutputGenerator::write_json(&tree, &args.output)?;
        println!(
            "Directory structure saved to '{}'",
            args.output.display()
        );
    }

    Ok(())
}
