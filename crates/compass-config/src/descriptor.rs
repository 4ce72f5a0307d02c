//! The configuration descriptor.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A [`Descriptor`] is the immutable result of loading a configuration
//! source. It records only what the source actually wrote: layout defaults
//! are applied on query through [`Descriptor::effective_path`], never stored.

use std::collections::BTreeMap;

use indexmap::IndexSet;
use serde::Serialize;

use crate::error::ConfigError;
use crate::types::{Environment, OutputStyle, PathRole, PreferredSyntax, ProjectType};

/// Build settings read once at tool startup.
///
/// Construct one with [`crate::load`] or [`Descriptor::builder`]. There is no
/// mutating API; a descriptor is applied and then dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    import_paths: Vec<String>,

    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    plugins: IndexSet<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    project_type: Option<ProjectType>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    paths: BTreeMap<PathRole, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    output_style: Option<OutputStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    line_comments: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    relative_assets: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_syntax: Option<PreferredSyntax>,

    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<Environment>,
}

impl Descriptor {
    pub fn builder() -> DescriptorBuilder {
        DescriptorBuilder::default()
    }

    /// The descriptor a fresh project starts from: every path role bound to
    /// the layout's convention and the default output style spelled out.
    pub fn starter(project_type: ProjectType) -> Descriptor {
        Descriptor {
            project_type: Some(project_type),
            paths: PathRole::all()
                .iter()
                .map(|role| (*role, project_type.default_path(*role).to_string()))
                .collect(),
            output_style: Some(OutputStyle::default()),
            ..Descriptor::default()
        }
    }

    /// Directories searched when resolving `@import`, in declaration order.
    pub fn import_paths(&self) -> &[String] {
        &self.import_paths
    }

    /// Plugins to load before compilation, in first-mention order.
    pub fn plugins(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(String::as_str)
    }

    /// The layout mode written in the source, if any.
    pub fn project_type(&self) -> Option<ProjectType> {
        self.project_type
    }

    /// The explicitly bound path for `role`.
    pub fn path(&self, role: PathRole) -> Option<&str> {
        self.paths.get(&role).map(String::as_str)
    }

    /// All explicit path bindings in canonical role order.
    pub fn path_bindings(&self) -> impl Iterator<Item = (PathRole, &str)> {
        self.paths.iter().map(|(role, path)| (*role, path.as_str()))
    }

    /// Path for `role`, falling back to the layout's convention.
    pub fn effective_path(&self, role: PathRole) -> &str {
        match self.paths.get(&role) {
            Some(path) => path.as_str(),
            None => self.project_type.unwrap_or_default().default_path(role),
        }
    }

    /// Output style, `nested` when the source leaves it out.
    pub fn output_style(&self) -> OutputStyle {
        self.output_style.unwrap_or_default()
    }

    pub fn line_comments(&self) -> Option<bool> {
        self.line_comments
    }

    pub fn relative_assets(&self) -> Option<bool> {
        self.relative_assets
    }

    pub fn preferred_syntax(&self) -> Option<PreferredSyntax> {
        self.preferred_syntax
    }

    pub fn environment(&self) -> Option<Environment> {
        self.environment
    }

    /// Keys the source set explicitly, in canonical order.
    ///
    /// Repeatable directives appear once regardless of how often they were
    /// written.
    pub fn explicit_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if !self.import_paths.is_empty() {
            keys.push("add_import_path");
        }
        if !self.plugins.is_empty() {
            keys.push("require");
        }
        if self.project_type.is_some() {
            keys.push(ProjectType::KEY);
        }
        keys.extend(self.paths.keys().map(PathRole::key));
        if self.line_comments.is_some() {
            keys.push("line_comments");
        }
        if self.relative_assets.is_some() {
            keys.push("relative_assets");
        }
        if self.preferred_syntax.is_some() {
            keys.push(PreferredSyntax::KEY);
        }
        if self.environment.is_some() {
            keys.push(Environment::KEY);
        }
        if self.output_style.is_some() {
            keys.push(OutputStyle::KEY);
        }
        keys
    }

    pub(crate) fn explicit_output_style(&self) -> Option<OutputStyle> {
        self.output_style
    }
}

/// Programmatic construction with the same validation the loader applies.
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
    inner: Descriptor,
}

impl DescriptorBuilder {
    pub fn import_path(mut self, path: impl Into<String>) -> Self {
        self.inner.import_paths.push(path.into());
        self
    }

    pub fn plugin(mut self, name: impl Into<String>) -> Self {
        self.inner.plugins.insert(name.into());
        self
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.inner.project_type = Some(project_type);
        self
    }

    pub fn path(mut self, role: PathRole, path: impl Into<String>) -> Self {
        self.inner.paths.insert(role, path.into());
        self
    }

    pub fn output_style(mut self, style: OutputStyle) -> Self {
        self.inner.output_style = Some(style);
        self
    }

    pub fn line_comments(mut self, enabled: bool) -> Self {
        self.inner.line_comments = Some(enabled);
        self
    }

    pub fn relative_assets(mut self, enabled: bool) -> Self {
        self.inner.relative_assets = Some(enabled);
        self
    }

    pub fn preferred_syntax(mut self, syntax: PreferredSyntax) -> Self {
        self.inner.preferred_syntax = Some(syntax);
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.inner.environment = Some(environment);
        self
    }

    /// Finish construction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MalformedConfiguration` if any path, import
    /// path or plugin name is empty.
    pub fn build(self) -> Result<Descriptor, ConfigError> {
        let descriptor = self.inner;
        if descriptor.import_paths.iter().any(String::is_empty) {
            return Err(ConfigError::malformed(
                "add_import_path",
                "must not be empty",
                None,
            ));
        }
        if descriptor.plugins.iter().any(String::is_empty) {
            return Err(ConfigError::malformed("require", "must not be empty", None));
        }
        if let Some((role, _)) = descriptor.paths.iter().find(|(_, path)| path.is_empty()) {
            return Err(ConfigError::malformed(
                role.key(),
                "must not be empty",
                None,
            ));
        }
        Ok(descriptor)
    }
}
