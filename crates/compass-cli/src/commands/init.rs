/*
 * init.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Init command implementation
 */

//! Writes a starter configuration for a new project.

use std::path::PathBuf;

use anyhow::{Context, Result};
use compass_config::{Descriptor, ProjectType};
use tracing::info;

use super::config_path;

/// Arguments for the init command
#[derive(Debug)]
pub struct InitArgs {
    pub file: Option<PathBuf>,
    pub project_type: String,
    pub force: bool,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    let path = config_path(args.file);
    let project_type: ProjectType = args.project_type.parse()?;

    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let descriptor = Descriptor::starter(project_type);
    let contents = format!(
        "# Stylesheet project configuration ({project_type} layout)\n\n{}",
        descriptor.to_source()
    );
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), "wrote starter configuration");
    Ok(())
}
