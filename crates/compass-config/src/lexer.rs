//! Tokenizer for configuration source text.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The accepted language is the small Ruby subset Compass project files
//! are written in:
//!
//! ```text
//! # comment
//! add_import_path "/shared/styles"
//! require 'susy'
//! project_type = :stand_alone
//! output_style = :nested; line_comments = false
//! ```
//!
//! String interpolation (`#{...}`) is not evaluated; a literal `#` inside a
//! double-quoted string is kept as-is.
//!
//! Numbers, brackets, `=>` and the `key:` colon are tokenized too, so that
//! settings this crate does not model (`sprite_padding = 2`,
//! `sass_options = {:style => :compact}`) still lex and can be skipped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConfigError, Span};

/// One token, anchored at the start of the remaining input.
///
/// Alternation order matters: symbols are tried before identifiers and the
/// bare colon so that `:nested` is not split, and `=>` before `=`.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?s:(?P<ws>[ \t\r]+|\\\r?\n)|(?P<comment>#[^\n]*)|(?P<newline>\n)|(?P<semi>;)|(?P<arrow>=>)|(?P<eq>=)|(?P<lparen>\()|(?P<rparen>\))|(?P<open>[\[{])|(?P<close>[\]}])|(?P<comma>,)|(?P<symbol>:[A-Za-z_][A-Za-z0-9_]*[?!]?)|(?P<colon>:)|(?P<number>-?[0-9][0-9_]*(?:\.[0-9]+)?)|(?P<ident>[A-Za-z_][A-Za-z0-9_]*[?!]?)|(?P<dq>"(?:[^"\\]|\\.)*")|(?P<sq>'(?:[^'\\]|\\.)*'))"#,
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    Symbol(String),
    Str(String),
    Number,
    Eq,
    /// `=>` between hash keys and values
    Arrow,
    /// `:` after a hash key written as `key: value`
    Colon,
    LParen,
    RParen,
    /// `[` or `{`
    Open(char),
    /// `]` or `}`
    Close(char),
    Comma,
    /// Newline or `;`
    Terminator,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Symbol(name) => format!("symbol `:{name}`"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Number => "number".to_string(),
            TokenKind::Eq => "`=`".to_string(),
            TokenKind::Arrow => "`=>`".to_string(),
            TokenKind::Colon => "`:`".to_string(),
            TokenKind::Open(ch) | TokenKind::Close(ch) => format!("`{ch}`"),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Terminator => "end of statement".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Split `source` into tokens, dropping whitespace and comments.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, ConfigError> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < source.len() {
        let rest = &source[offset..];
        let Some(captures) = TOKEN.captures(rest) else {
            return Err(unexpected(rest, offset));
        };
        let text = captures.get(0).map_or("", |m| m.as_str());
        let span = offset..offset + text.len();

        let kind = if captures.name("ws").is_some() || captures.name("comment").is_some() {
            None
        } else if captures.name("newline").is_some() || captures.name("semi").is_some() {
            Some(TokenKind::Terminator)
        } else if captures.name("arrow").is_some() {
            Some(TokenKind::Arrow)
        } else if captures.name("eq").is_some() {
            Some(TokenKind::Eq)
        } else if captures.name("lparen").is_some() {
            Some(TokenKind::LParen)
        } else if captures.name("rparen").is_some() {
            Some(TokenKind::RParen)
        } else if let Some(open) = captures.name("open") {
            open.as_str().chars().next().map(TokenKind::Open)
        } else if let Some(close) = captures.name("close") {
            close.as_str().chars().next().map(TokenKind::Close)
        } else if captures.name("comma").is_some() {
            Some(TokenKind::Comma)
        } else if let Some(symbol) = captures.name("symbol") {
            Some(TokenKind::Symbol(symbol.as_str()[1..].to_string()))
        } else if captures.name("colon").is_some() {
            Some(TokenKind::Colon)
        } else if captures.name("number").is_some() {
            Some(TokenKind::Number)
        } else if let Some(ident) = captures.name("ident") {
            Some(TokenKind::Ident(ident.as_str().to_string()))
        } else if let Some(dq) = captures.name("dq") {
            Some(TokenKind::Str(unescape_double(strip_quotes(dq.as_str()))))
        } else if let Some(sq) = captures.name("sq") {
            Some(TokenKind::Str(unescape_single(strip_quotes(sq.as_str()))))
        } else {
            return Err(unexpected(rest, offset));
        };

        if let Some(kind) = kind {
            tokens.push(Token { kind, span });
        }
        offset += text.len();
    }

    Ok(tokens)
}

fn unexpected(rest: &str, offset: usize) -> ConfigError {
    let ch = rest.chars().next().unwrap_or('\0');
    if ch == '"' || ch == '\'' {
        ConfigError::syntax("unterminated string literal", offset..offset + rest.len())
    } else {
        ConfigError::syntax(
            format!("unexpected character {ch:?}"),
            offset..offset + ch.len_utf8(),
        )
    }
}

fn strip_quotes(literal: &str) -> &str {
    &literal[1..literal.len() - 1]
}

fn unescape_double(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('s') => out.push(' '),
            // Any other escaped character stands for itself (`\"`, `\\`, `\#`)
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn unescape_single(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' && matches!(chars.peek(), Some('\\') | Some('\'')) {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_assignment_tokens() {
        assert_eq!(
            kinds("output_style = :nested\n"),
            vec![
                TokenKind::Ident("output_style".to_string()),
                TokenKind::Eq,
                TokenKind::Symbol("nested".to_string()),
                TokenKind::Terminator,
            ]
        );
    }

    #[test]
    fn test_comments_are_dropped() {
        assert_eq!(
            kinds("# Path to common SASS files\nhttp_path = \"..\" # trailing"),
            vec![
                TokenKind::Terminator,
                TokenKind::Ident("http_path".to_string()),
                TokenKind::Eq,
                TokenKind::Str("..".to_string()),
            ]
        );
    }

    #[test]
    fn test_call_with_parens_and_single_quotes() {
        assert_eq!(
            kinds("require('susy');"),
            vec![
                TokenKind::Ident("require".to_string()),
                TokenKind::LParen,
                TokenKind::Str("susy".to_string()),
                TokenKind::RParen,
                TokenKind::Terminator,
            ]
        );
    }

    #[test]
    fn test_double_quoted_escapes() {
        assert_eq!(
            kinds(r#""a\"b\\c\nd\#{e}""#),
            vec![TokenKind::Str("a\"b\\c\nd#{e}".to_string())]
        );
    }

    #[test]
    fn test_single_quoted_escapes() {
        assert_eq!(
            kinds(r"'it\'s \n'"),
            vec![TokenKind::Str("it's \\n".to_string())]
        );
    }

    #[test]
    fn test_line_continuation_is_whitespace() {
        assert_eq!(
            kinds("css_dir = \\\n  \"css\""),
            vec![
                TokenKind::Ident("css_dir".to_string()),
                TokenKind::Eq,
                TokenKind::Str("css".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans_point_into_source() {
        let source = "sass_dir = \"sass\"";
        let tokens = tokenize(source).unwrap();
        assert_eq!(&source[tokens[0].span.clone()], "sass_dir");
        assert_eq!(&source[tokens[2].span.clone()], "\"sass\"");
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("css_dir = \"css").unwrap_err();
        match err {
            ConfigError::Syntax { message, span } => {
                assert_eq!(message, "unterminated string literal");
                assert_eq!(span, 10..14);
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_numbers_and_collections() {
        assert_eq!(
            kinds("sass_options = {:style => :compact, cache: false}"),
            vec![
                TokenKind::Ident("sass_options".to_string()),
                TokenKind::Eq,
                TokenKind::Open('{'),
                TokenKind::Symbol("style".to_string()),
                TokenKind::Arrow,
                TokenKind::Symbol("compact".to_string()),
                TokenKind::Comma,
                TokenKind::Ident("cache".to_string()),
                TokenKind::Colon,
                TokenKind::Ident("false".to_string()),
                TokenKind::Close('}'),
            ]
        );
        assert_eq!(
            kinds("[2, -1.5, 1_000]"),
            vec![
                TokenKind::Open('['),
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::Close(']'),
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("css_dir = @css").unwrap_err();
        match err {
            ConfigError::Syntax { message, span } => {
                assert_eq!(message, "unexpected character '@'");
                assert_eq!(span, 10..11);
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }
}
