//! Loading a descriptor from configuration source.
//!
//! Copyright (c) 2025 Posit, PBC

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::descriptor::{Descriptor, DescriptorBuilder};
use crate::error::{ConfigError, Span};
use crate::parser::{Spanned, Statement, Value, parse};
use crate::types::{Environment, OutputStyle, PathRole, PreferredSyntax, ProjectType};

const ADD_IMPORT_PATH: &str = "add_import_path";
const REQUIRE: &str = "require";

/// What to do with keys and directives the loader does not recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeyPolicy {
    /// Log and report as a warning, then continue
    #[default]
    Warn,
    /// Fail with `MalformedConfiguration`
    Reject,
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub unknown_keys: UnknownKeyPolicy,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            unknown_keys: UnknownKeyPolicy::Reject,
        }
    }
}

/// A key the loader skipped under [`UnknownKeyPolicy::Warn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey {
    pub key: String,
    pub span: Span,
}

/// Result of [`load_with`]: the descriptor plus anything skipped.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub descriptor: Descriptor,
    pub unknown_keys: Vec<UnknownKey>,
}

/// Parse a settings source into a descriptor using default options.
///
/// Unrecognized keys are logged and skipped.
///
/// # Errors
///
/// `ConfigError::Syntax` if the text is not a sequence of assignments and
/// directive calls; `ConfigError::MalformedConfiguration` for values outside
/// a key's closed set, empty paths, wrong value types, or keys defined twice.
///
/// # Example
///
/// ```
/// use compass_config::{OutputStyle, PathRole, load};
///
/// let descriptor = load("css_dir = \"css\"\noutput_style = :compressed\n").unwrap();
/// assert_eq!(descriptor.path(PathRole::Css), Some("css"));
/// assert_eq!(descriptor.output_style(), OutputStyle::Compressed);
/// ```
pub fn load(source: &str) -> Result<Descriptor, ConfigError> {
    load_with(source, &LoadOptions::default()).map(|loaded| loaded.descriptor)
}

/// Parse a settings source with explicit options.
pub fn load_with(source: &str, options: &LoadOptions) -> Result<Loaded, ConfigError> {
    let statements = parse(source)?;
    debug!(statements = statements.len(), "parsed configuration source");

    let mut loader = Loader {
        options,
        builder: Descriptor::builder(),
        seen: HashMap::new(),
        unknown_keys: Vec::new(),
    };
    for statement in statements {
        loader.apply(statement)?;
    }

    Ok(Loaded {
        descriptor: loader.builder.build()?,
        unknown_keys: loader.unknown_keys,
    })
}

/// Read and load a configuration file.
///
/// # Errors
///
/// `ConfigError::Io` if the file cannot be read, otherwise as [`load_with`].
pub fn load_file(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Loaded, ConfigError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loading configuration file");
    load_with(&source, options)
}

/// Recognized assignment keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setting {
    ProjectType,
    Path(PathRole),
    OutputStyle,
    LineComments,
    RelativeAssets,
    PreferredSyntax,
    Environment,
}

impl Setting {
    fn from_key(key: &str) -> Option<Self> {
        if let Some(role) = PathRole::from_key(key) {
            return Some(Setting::Path(role));
        }
        match key {
            ProjectType::KEY => Some(Setting::ProjectType),
            OutputStyle::KEY => Some(Setting::OutputStyle),
            "line_comments" => Some(Setting::LineComments),
            "relative_assets" => Some(Setting::RelativeAssets),
            PreferredSyntax::KEY => Some(Setting::PreferredSyntax),
            Environment::KEY => Some(Setting::Environment),
            _ => None,
        }
    }
}

struct Loader<'o> {
    options: &'o LoadOptions,
    builder: DescriptorBuilder,
    /// First definition of each assignment key
    seen: HashMap<String, Span>,
    unknown_keys: Vec<UnknownKey>,
}

impl Loader<'_> {
    fn apply(&mut self, statement: Statement) -> Result<(), ConfigError> {
        match statement {
            Statement::Assign { key, value } => self.assign(key, value),
            Statement::Call { name, args } => self.call(name, args),
        }
    }

    fn assign(&mut self, key: Spanned<String>, value: Spanned<Value>) -> Result<(), ConfigError> {
        let Some(setting) = Setting::from_key(&key.node) else {
            return self.unknown(key);
        };

        if let Some(first) = self.seen.get(&key.node) {
            return Err(ConfigError::malformed(
                &key.node,
                format!("is defined more than once (first defined at byte {})", first.start),
                Some(key.span),
            ));
        }
        self.seen.insert(key.node.clone(), key.span.clone());

        // nil leaves the setting at its default
        if value.node == Value::Nil {
            return Ok(());
        }

        let builder = std::mem::take(&mut self.builder);
        self.builder = match setting {
            Setting::ProjectType => builder.project_type(enumerated(&key.node, value)?),
            Setting::OutputStyle => builder.output_style(enumerated(&key.node, value)?),
            Setting::PreferredSyntax => builder.preferred_syntax(enumerated(&key.node, value)?),
            Setting::Environment => builder.environment(enumerated(&key.node, value)?),
            Setting::Path(role) => builder.path(role, path_string(&key.node, value)?),
            Setting::LineComments => builder.line_comments(boolean(&key.node, value)?),
            Setting::RelativeAssets => builder.relative_assets(boolean(&key.node, value)?),
        };
        Ok(())
    }

    fn call(&mut self, name: Spanned<String>, args: Vec<Spanned<Value>>) -> Result<(), ConfigError> {
        if name.node != ADD_IMPORT_PATH && name.node != REQUIRE {
            return self.unknown(name);
        }

        let mut args = args.into_iter();
        let (Some(arg), None) = (args.next(), args.next()) else {
            return Err(ConfigError::malformed(
                &name.node,
                "expects exactly one string argument",
                Some(name.span),
            ));
        };
        let arg = path_string(&name.node, arg)?;

        let builder = std::mem::take(&mut self.builder);
        self.builder = if name.node == ADD_IMPORT_PATH {
            builder.import_path(arg)
        } else {
            builder.plugin(arg)
        };
        Ok(())
    }

    fn unknown(&mut self, key: Spanned<String>) -> Result<(), ConfigError> {
        match self.options.unknown_keys {
            UnknownKeyPolicy::Reject => Err(ConfigError::malformed(
                key.node,
                "is not a recognized key",
                Some(key.span),
            )),
            UnknownKeyPolicy::Warn => {
                warn!(key = %key.node, "ignoring unrecognized configuration key");
                self.unknown_keys.push(UnknownKey {
                    key: key.node,
                    span: key.span,
                });
                Ok(())
            }
        }
    }
}

/// Enumerated values may be written as a symbol or a string.
fn enumerated<T>(key: &str, value: Spanned<Value>) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ConfigError>,
{
    match value.node {
        Value::Symbol(name) | Value::Str(name) => name.parse().map_err(|e: ConfigError| e.at(value.span)),
        other => Err(wrong_type(key, "a symbol or string", &other, value.span)),
    }
}

fn path_string(key: &str, value: Spanned<Value>) -> Result<String, ConfigError> {
    match value.node {
        Value::Str(s) if s.is_empty() => Err(ConfigError::malformed(
            key,
            "must not be empty",
            Some(value.span),
        )),
        Value::Str(s) => Ok(s),
        other => Err(wrong_type(key, "a string", &other, value.span)),
    }
}

fn boolean(key: &str, value: Spanned<Value>) -> Result<bool, ConfigError> {
    match value.node {
        Value::Bool(b) => Ok(b),
        other => Err(wrong_type(key, "true or false", &other, value.span)),
    }
}

fn wrong_type(key: &str, expected: &str, found: &Value, span: Span) -> ConfigError {
    ConfigError::malformed(
        key,
        format!("expects {expected}, found {}", found.type_name()),
        Some(span),
    )
}
