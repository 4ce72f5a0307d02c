/*
 * show.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Show command implementation
 */

//! Prints the descriptor as JSON. Unset settings are omitted; the
//! effective output style is always included.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{config_path, load_config};

/// Arguments for the show command
#[derive(Debug)]
pub struct ShowArgs {
    pub file: Option<PathBuf>,
    pub strict: bool,
}

/// Execute the show command
pub fn execute(args: ShowArgs) -> Result<()> {
    let path = config_path(args.file);
    let (loaded, _) = load_config(&path, args.strict)?;
    let descriptor = &loaded.descriptor;

    let mut value = serde_json::to_value(descriptor).context("Failed to serialize configuration")?;
    if let Some(object) = value.as_object_mut() {
        object
            .entry("output_style")
            .or_insert_with(|| serde_json::json!(descriptor.output_style()));
    }

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
