//! Resolving descriptor paths against a project root.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Resolution is pure path arithmetic. Only [`ResolvedLayout::verify`]
//! touches the filesystem, and it is what the compile step calls before
//! reading inputs.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::descriptor::Descriptor;
use crate::error::ConfigError;
use crate::types::PathRole;

/// Directories of a descriptor made concrete under one project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    root: PathBuf,
    http_path: String,
    /// Effective relative (or absolute) setting per directory role
    relative: BTreeMap<PathRole, String>,
    directories: BTreeMap<PathRole, PathBuf>,
    /// Roles the source bound explicitly; only these are checked on disk
    declared: BTreeSet<PathRole>,
    import_paths: Vec<PathBuf>,
}

impl Descriptor {
    /// Join every directory role and import path onto `project_root`.
    ///
    /// Roles the source left unset use the layout mode's convention.
    /// Absolute settings are kept as written.
    pub fn resolve(&self, project_root: impl AsRef<Path>) -> ResolvedLayout {
        let root = project_root.as_ref().to_path_buf();
        let relative: BTreeMap<PathRole, String> = PathRole::directories()
            .map(|role| (role, self.effective_path(role).to_string()))
            .collect();
        let directories = relative
            .iter()
            .map(|(role, path)| (*role, root.join(path)))
            .collect();
        let declared = PathRole::directories()
            .filter(|role| self.path(*role).is_some())
            .collect();
        let import_paths = self
            .import_paths()
            .iter()
            .map(|path| root.join(path))
            .collect();

        ResolvedLayout {
            http_path: self.effective_path(PathRole::Http).to_string(),
            root,
            relative,
            directories,
            declared,
            import_paths,
        }
    }
}

impl ResolvedLayout {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolved directory for `role`; `None` for `http_path`, which is a URL
    /// prefix rather than a directory.
    pub fn directory(&self, role: PathRole) -> Option<&Path> {
        self.directories.get(&role).map(PathBuf::as_path)
    }

    pub fn directories(&self) -> impl Iterator<Item = (PathRole, &Path)> {
        self.directories
            .iter()
            .map(|(role, path)| (*role, path.as_path()))
    }

    pub fn import_paths(&self) -> &[PathBuf] {
        &self.import_paths
    }

    /// URL of `file` inside the asset directory for `role`.
    ///
    /// ```
    /// use compass_config::{PathRole, load};
    ///
    /// let descriptor = load("http_path = \"..\"\nimages_dir = \"i\"").unwrap();
    /// let layout = descriptor.resolve("/project");
    /// assert_eq!(layout.asset_url(PathRole::Images, "logo.png"), "../i/logo.png");
    /// ```
    pub fn asset_url(&self, role: PathRole, file: &str) -> String {
        let mut url = self.http_path.trim_end_matches('/').to_string();
        if let Some(dir) = self.relative.get(&role) {
            let dir = dir.trim_matches('/');
            if !dir.is_empty() {
                url.push('/');
                url.push_str(dir);
            }
        }
        url.push('/');
        url.push_str(file.trim_start_matches('/'));
        url
    }

    /// Whether the source bound `role` itself rather than relying on the
    /// layout convention.
    pub fn is_declared(&self, role: PathRole) -> bool {
        self.declared.contains(&role)
    }

    /// Check that every declared directory and import path exists.
    ///
    /// Roles filled in from the layout convention are not checked.
    ///
    /// # Errors
    ///
    /// `ConfigError::UnresolvablePath` for the first missing directory, in
    /// canonical role order, then import paths in declaration order.
    pub fn verify(&self) -> Result<(), ConfigError> {
        for (role, path) in &self.directories {
            if self.is_declared(*role) && !path.is_dir() {
                return Err(ConfigError::UnresolvablePath {
                    key: role.key().to_string(),
                    path: path.clone(),
                });
            }
        }
        for path in &self.import_paths {
            if !path.is_dir() {
                return Err(ConfigError::UnresolvablePath {
                    key: "add_import_path".to_string(),
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }
}
