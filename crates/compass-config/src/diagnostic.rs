//! Source-context rendering for configuration errors.
//!
//! Copyright (c) 2025 Posit, PBC

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};

use crate::error::ConfigError;

impl ConfigError {
    /// Render this error for a terminal.
    ///
    /// Errors that carry a span get an ariadne snippet of `source` with the
    /// offending text underlined; the rest fall back to a single line.
    /// Colour is always off so the text can go to logs unchanged.
    pub fn render(&self, name: &str, source: &str) -> String {
        let Some(span) = self.span() else {
            return format!("Error: {self}\n");
        };

        // Clamp to the source and widen empty spans to one character so a
        // span at end of input still has something to underline
        let mut start = floor_char_boundary(source, span.start.min(source.len()));
        let mut end = floor_char_boundary(source, span.end.clamp(start, source.len()));
        if start == end {
            if let Some(next) = source[end..].chars().next() {
                end += next.len_utf8();
            } else if let Some(prev) = source[..start].chars().next_back() {
                start -= prev.len_utf8();
            }
        }

        let label = match self {
            ConfigError::MalformedConfiguration { key, .. } => format!("in `{key}`"),
            _ => "here".to_string(),
        };

        let mut out = Vec::new();
        let written = Report::build(ReportKind::Error, name.to_string(), start)
            .with_config(
                Config::default()
                    .with_color(false)
                    .with_index_type(IndexType::Byte),
            )
            .with_message(self.to_string())
            .with_label(Label::new((name.to_string(), start..end)).with_message(label))
            .finish()
            .write((name.to_string(), Source::from(source)), &mut out);

        match written {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => format!("Error: {self}\n"),
        }
    }
}

fn floor_char_boundary(source: &str, mut index: usize) -> usize {
    while !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}
