//! Command implementations for the compass CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! compass-config library for the actual work.

pub mod check;
pub mod init;
pub mod paths;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compass_config::{DEFAULT_CONFIG_FILE, LoadOptions, Loaded, load_with};

/// The file a command operates on, defaulting to `config.rb`.
pub(crate) fn config_path(file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load a configuration file, printing a source-context diagnostic to
/// stderr when it is malformed.
pub(crate) fn load_config(path: &Path, strict: bool) -> Result<(Loaded, String)> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    let options = if strict {
        LoadOptions::strict()
    } else {
        LoadOptions::default()
    };

    match load_with(&source, &options) {
        Ok(loaded) => Ok((loaded, source)),
        Err(err) => {
            eprint!("{}", err.render(&path.display().to_string(), &source));
            anyhow::bail!("{} is not a valid configuration", path.display())
        }
    }
}

/// 1-based line of a byte offset.
pub(crate) fn line_of(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    source.as_bytes()[..offset]
        .iter()
        .filter(|b| **b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of() {
        let source = "a = 1\nb = 2\nc = 3";
        assert_eq!(line_of(source, 0), 1);
        assert_eq!(line_of(source, 6), 2);
        assert_eq!(line_of(source, 100), 3);
    }

    #[test]
    fn test_config_path_default() {
        assert_eq!(config_path(None), PathBuf::from("config.rb"));
        assert_eq!(
            config_path(Some(PathBuf::from("site/config.rb"))),
            PathBuf::from("site/config.rb")
        );
    }
}
