//! Closed value sets used by the configuration descriptor.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Every enumerated setting accepts only the members listed here. Parsing
//! a name outside the set yields `ConfigError::MalformedConfiguration`
//! naming the setting's key.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// Formatting verbosity of generated stylesheet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    /// Indentation follows the nesting of the source rules
    #[default]
    Nested,
    /// One declaration per line, rules fully expanded
    Expanded,
    /// One rule per line
    Compact,
    /// All whitespace removed
    Compressed,
}

impl OutputStyle {
    pub const KEY: &'static str = "output_style";

    pub fn name(&self) -> &'static str {
        match self {
            OutputStyle::Nested => "nested",
            OutputStyle::Expanded => "expanded",
            OutputStyle::Compact => "compact",
            OutputStyle::Compressed => "compressed",
        }
    }

    pub fn all() -> &'static [OutputStyle] {
        &[
            OutputStyle::Nested,
            OutputStyle::Expanded,
            OutputStyle::Compact,
            OutputStyle::Compressed,
        ]
    }
}

impl FromStr for OutputStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nested" => Ok(OutputStyle::Nested),
            "expanded" => Ok(OutputStyle::Expanded),
            "compact" => Ok(OutputStyle::Compact),
            "compressed" => Ok(OutputStyle::Compressed),
            _ => Err(not_a_member(
                Self::KEY,
                s,
                Self::all().iter().map(|v| v.name()),
            )),
        }
    }
}

/// Directory convention bundle selected by `project_type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// A plain stylesheet project that is not part of a web framework
    #[default]
    StandAlone,
    /// A project living inside a Rails application tree
    Rails,
}

impl ProjectType {
    pub const KEY: &'static str = "project_type";

    pub fn name(&self) -> &'static str {
        match self {
            ProjectType::StandAlone => "stand_alone",
            ProjectType::Rails => "rails",
        }
    }

    pub fn all() -> &'static [ProjectType] {
        &[ProjectType::StandAlone, ProjectType::Rails]
    }

    /// Conventional location of `role` under this layout.
    pub fn default_path(&self, role: PathRole) -> &'static str {
        match (self, role) {
            (_, PathRole::Http) => "/",
            (ProjectType::StandAlone, PathRole::Sass) => "sass",
            (ProjectType::StandAlone, PathRole::Css) => "stylesheets",
            (ProjectType::StandAlone, PathRole::Images) => "images",
            (ProjectType::StandAlone, PathRole::Javascripts) => "javascripts",
            (ProjectType::StandAlone, PathRole::Fonts) => "fonts",
            (ProjectType::Rails, PathRole::Sass) => "app/assets/stylesheets",
            (ProjectType::Rails, PathRole::Css) => "public/stylesheets",
            (ProjectType::Rails, PathRole::Images) => "app/assets/images",
            (ProjectType::Rails, PathRole::Javascripts) => "app/assets/javascripts",
            (ProjectType::Rails, PathRole::Fonts) => "app/assets/fonts",
        }
    }
}

impl FromStr for ProjectType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stand_alone" | "stand-alone" => Ok(ProjectType::StandAlone),
            "rails" => Ok(ProjectType::Rails),
            _ => Err(not_a_member(
                Self::KEY,
                s,
                Self::all().iter().map(|v| v.name()),
            )),
        }
    }
}

/// The directories a configuration can bind.
///
/// Declaration order is the canonical order used when listing or
/// rendering bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PathRole {
    #[serde(rename = "http_path")]
    Http,
    #[serde(rename = "sass_dir")]
    Sass,
    #[serde(rename = "css_dir")]
    Css,
    #[serde(rename = "images_dir")]
    Images,
    #[serde(rename = "javascripts_dir")]
    Javascripts,
    #[serde(rename = "fonts_dir")]
    Fonts,
}

impl PathRole {
    /// The configuration key that binds this role.
    pub fn key(&self) -> &'static str {
        match self {
            PathRole::Http => "http_path",
            PathRole::Sass => "sass_dir",
            PathRole::Css => "css_dir",
            PathRole::Images => "images_dir",
            PathRole::Javascripts => "javascripts_dir",
            PathRole::Fonts => "fonts_dir",
        }
    }

    pub fn all() -> &'static [PathRole] {
        &[
            PathRole::Http,
            PathRole::Sass,
            PathRole::Css,
            PathRole::Images,
            PathRole::Javascripts,
            PathRole::Fonts,
        ]
    }

    /// Roles naming on-disk directories (everything except `http_path`,
    /// which is a URL prefix).
    pub fn directories() -> impl Iterator<Item = PathRole> {
        Self::all()
            .iter()
            .copied()
            .filter(|role| *role != PathRole::Http)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|role| role.key() == key)
    }
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Syntax assumed for new stylesheet files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredSyntax {
    Scss,
    Sass,
}

impl PreferredSyntax {
    pub const KEY: &'static str = "preferred_syntax";

    pub fn name(&self) -> &'static str {
        match self {
            PreferredSyntax::Scss => "scss",
            PreferredSyntax::Sass => "sass",
        }
    }

    pub fn all() -> &'static [PreferredSyntax] {
        &[PreferredSyntax::Scss, PreferredSyntax::Sass]
    }
}

impl FromStr for PreferredSyntax {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scss" => Ok(PreferredSyntax::Scss),
            "sass" => Ok(PreferredSyntax::Sass),
            _ => Err(not_a_member(
                Self::KEY,
                s,
                Self::all().iter().map(|v| v.name()),
            )),
        }
    }
}

/// Build environment the configuration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub const KEY: &'static str = "environment";

    pub fn name(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn all() -> &'static [Environment] {
        &[Environment::Development, Environment::Production]
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            _ => Err(not_a_member(
                Self::KEY,
                s,
                Self::all().iter().map(|v| v.name()),
            )),
        }
    }
}

macro_rules! display_by_name {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.name())
                }
            }
        )*
    };
}

display_by_name!(OutputStyle, ProjectType, PreferredSyntax, Environment);

fn not_a_member<'a>(
    key: &str,
    found: &str,
    allowed: impl Iterator<Item = &'a str>,
) -> ConfigError {
    let allowed: Vec<&str> = allowed.collect();
    ConfigError::malformed(
        key,
        format!("must be one of {} (found {:?})", allowed.join(", "), found),
        None,
    )
}
