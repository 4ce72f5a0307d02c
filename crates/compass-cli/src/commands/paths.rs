/*
 * paths.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Paths command implementation
 */

//! Paths command implementation.
//!
//! Prints every directory role with the path it resolves to, marking which
//! ones come from the layout convention rather than the file itself.
//! `--verify` only checks directories the file declares.

use std::path::{Path, PathBuf};

use anyhow::Result;
use compass_config::PathRole;
use tracing::info;

use super::{config_path, load_config};

/// Arguments for the paths command
#[derive(Debug)]
pub struct PathsArgs {
    pub file: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub verify: bool,
}

/// Execute the paths command
pub fn execute(args: PathsArgs) -> Result<()> {
    let path = config_path(args.file);
    let (loaded, _) = load_config(&path, false)?;
    let descriptor = loaded.descriptor;

    let root = match args.root {
        Some(root) => root,
        None => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    };
    let layout = descriptor.resolve(&root);

    println!(
        "{}\t{}",
        PathRole::Http.key(),
        descriptor.effective_path(PathRole::Http)
    );
    for (role, dir) in layout.directories() {
        let origin = if layout.is_declared(role) {
            ""
        } else {
            "\t(default)"
        };
        println!("{}\t{}{}", role.key(), dir.display(), origin);
    }
    for import in layout.import_paths() {
        println!("add_import_path\t{}", import.display());
    }

    if args.verify {
        layout.verify()?;
        info!(root = %layout.root().display(), "all declared directories exist");
    }
    Ok(())
}
