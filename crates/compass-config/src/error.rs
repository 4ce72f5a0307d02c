//! Error types for configuration loading.
//!
//! Copyright (c) 2025 Posit, PBC

use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

/// Byte range into the configuration source.
pub type Span = Range<usize>;

/// Errors that can occur while loading or applying a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A recognized key holds a value it cannot take (bad enum member,
    /// empty path, wrong type, repeated definition, or an unknown key
    /// under the strict policy)
    #[error("malformed configuration: `{key}` {message}")]
    MalformedConfiguration {
        key: String,
        message: String,
        span: Option<Span>,
    },

    /// The source does not follow the settings grammar
    #[error("syntax error: {message}")]
    Syntax { message: String, span: Span },

    /// A declared directory does not exist under the project root
    #[error("unresolvable path for `{key}`: {} does not exist", .path.display())]
    UnresolvablePath { key: String, path: PathBuf },

    /// Reading the configuration file failed
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn malformed(
        key: impl Into<String>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        ConfigError::MalformedConfiguration {
            key: key.into(),
            message: message.into(),
            span,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>, span: Span) -> Self {
        ConfigError::Syntax {
            message: message.into(),
            span,
        }
    }

    /// Attach a source location to a malformed-value error raised without one.
    pub(crate) fn at(self, location: Span) -> Self {
        match self {
            ConfigError::MalformedConfiguration {
                key,
                message,
                span: None,
            } => ConfigError::MalformedConfiguration {
                key,
                message,
                span: Some(location),
            },
            other => other,
        }
    }

    /// The key this error is about, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::MalformedConfiguration { key, .. }
            | ConfigError::UnresolvablePath { key, .. } => Some(key),
            ConfigError::Syntax { .. } | ConfigError::Io { .. } => None,
        }
    }

    /// Location of the offending text in the source, if known.
    pub fn span(&self) -> Option<&Span> {
        match self {
            ConfigError::MalformedConfiguration { span, .. } => span.as_ref(),
            ConfigError::Syntax { span, .. } => Some(span),
            ConfigError::UnresolvablePath { .. } | ConfigError::Io { .. } => None,
        }
    }
}
