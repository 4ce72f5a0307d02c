//! Compass-style stylesheet project configuration.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - [`load`]: parse a `config.rb` settings source into an immutable [`Descriptor`]
//! - Closed value sets for the enumerated settings ([`OutputStyle`], [`ProjectType`], ...)
//! - Layout conventions and path resolution against a project root
//! - Rendering a descriptor back to settings source
//! - ariadne-rendered diagnostics for malformed sources
//!
//! The compiler that consumes a descriptor and the plugins it names live
//! elsewhere.

mod descriptor;
mod diagnostic;
mod error;
mod lexer;
mod load;
mod parser;
mod render;
mod resolve;
mod types;

pub use descriptor::{Descriptor, DescriptorBuilder};
pub use error::{ConfigError, Span};
pub use load::{LoadOptions, Loaded, UnknownKey, UnknownKeyPolicy, load, load_file, load_with};
pub use resolve::ResolvedLayout;
pub use types::{Environment, OutputStyle, PathRole, PreferredSyntax, ProjectType};

/// Conventional name of the configuration file in a project root.
pub const DEFAULT_CONFIG_FILE: &str = "config.rb";
