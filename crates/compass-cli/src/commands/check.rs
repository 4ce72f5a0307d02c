/*
 * check.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Check command implementation
 */

//! Check command implementation.
//!
//! Loads a configuration file and reports either the problem that stops
//! it from loading or the keys that were skipped.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use super::{config_path, line_of, load_config};

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub file: Option<PathBuf>,
    pub strict: bool,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let path = config_path(args.file);
    let (loaded, source) = load_config(&path, args.strict)?;

    for unknown in &loaded.unknown_keys {
        println!(
            "warning: {}:{}: unrecognized key `{}` ignored",
            path.display(),
            line_of(&source, unknown.span.start),
            unknown.key
        );
    }

    let settings = loaded.descriptor.explicit_keys();
    debug!(?settings, "configuration loaded");
    println!("{}: ok ({} settings)", path.display(), settings.len());
    Ok(())
}
