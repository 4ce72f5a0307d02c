//! Rendering a descriptor back to configuration source.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Output is canonical: import paths, plugins, layout mode, path bindings,
//! supplementary settings, output style. Groups are separated by a blank
//! line and only explicit settings are written, so loading the rendered
//! text gives back an equal descriptor.

use std::fmt::{self, Write};

use crate::descriptor::Descriptor;
use crate::types::{OutputStyle, ProjectType};

impl Descriptor {
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut groups: Vec<String> = Vec::new();

        let imports: String = self
            .import_paths()
            .iter()
            .map(|path| format!("add_import_path {}\n", quote(path)))
            .collect();
        groups.push(imports);

        let plugins: String = self
            .plugins()
            .map(|name| format!("require {}\n", quote(name)))
            .collect();
        groups.push(plugins);

        if let Some(project_type) = self.project_type() {
            groups.push(format!("{} = :{}\n", ProjectType::KEY, project_type.name()));
        }

        let paths: String = self
            .path_bindings()
            .map(|(role, path)| format!("{} = {}\n", role.key(), quote(path)))
            .collect();
        groups.push(paths);

        let mut extra = String::new();
        if let Some(enabled) = self.line_comments() {
            writeln!(extra, "line_comments = {enabled}")?;
        }
        if let Some(enabled) = self.relative_assets() {
            writeln!(extra, "relative_assets = {enabled}")?;
        }
        if let Some(syntax) = self.preferred_syntax() {
            writeln!(extra, "preferred_syntax = :{}", syntax.name())?;
        }
        if let Some(environment) = self.environment() {
            writeln!(extra, "environment = :{}", environment.name())?;
        }
        groups.push(extra);

        if let Some(style) = self.explicit_output_style() {
            groups.push(format!("{} = :{}\n", OutputStyle::KEY, style.name()));
        }

        let body: Vec<String> = groups.into_iter().filter(|g| !g.is_empty()).collect();
        write!(f, "{}", body.join("\n"))
    }
}

/// Double-quoted literal the lexer reads back unchanged.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '#' => out.push_str("\\#"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
