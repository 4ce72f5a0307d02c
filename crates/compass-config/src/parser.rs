//! Statement parser.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Turns the token stream into a flat list of statements. Two statement
//! forms exist:
//!
//! - assignment: `key = value`
//! - call: `name arg, ...` or `name(arg, ...)`
//!
//! Values are string literals, symbols, `true`, `false` and `nil`. Numbers,
//! arrays and hashes are accepted as opaque values that only record what
//! they were. The parser knows nothing about which keys are meaningful;
//! that is the loader's job.

use crate::error::{ConfigError, Span};
use crate::lexer::{Token, TokenKind, tokenize};

/// A literal value on the right-hand side of an assignment or in a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Value {
    Str(String),
    Symbol(String),
    Bool(bool),
    Nil,
    /// A number, array or hash, kept only by type name
    Other(&'static str),
}

impl Value {
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "a string",
            Value::Symbol(_) => "a symbol",
            Value::Bool(_) => "a boolean",
            Value::Nil => "nil",
            Value::Other(type_name) => type_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement {
    Assign {
        key: Spanned<String>,
        value: Spanned<Value>,
    },
    Call {
        name: Spanned<String>,
        args: Vec<Spanned<Value>>,
    },
}

/// Parse configuration source into statements.
pub(crate) fn parse(source: &str) -> Result<Vec<Statement>, ConfigError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: source.len(),
    };
    parser.statements()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    fn statements(&mut self) -> Result<Vec<Statement>, ConfigError> {
        let mut statements = Vec::new();
        loop {
            self.skip_terminators();
            if self.at_end() {
                return Ok(statements);
            }
            statements.push(self.statement()?);
            self.expect_terminator()?;
        }
    }

    fn statement(&mut self) -> Result<Statement, ConfigError> {
        let token = self.bump_required("a setting name")?;
        let name = match &token.kind {
            TokenKind::Ident(name) => Spanned {
                node: name.clone(),
                span: token.span.clone(),
            },
            other => {
                return Err(ConfigError::syntax(
                    format!("expected a setting name, found {}", other.describe()),
                    token.span.clone(),
                ));
            }
        };

        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Eq) => {
                self.pos += 1;
                let value = self.value()?;
                Ok(Statement::Assign { key: name, value })
            }
            Some(TokenKind::LParen) => {
                self.pos += 1;
                let args = if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::RParen)) {
                    Vec::new()
                } else {
                    self.arguments()?
                };
                let close = self.bump_required("`)`")?;
                if close.kind != TokenKind::RParen {
                    return Err(ConfigError::syntax(
                        format!("expected `)`, found {}", close.kind.describe()),
                        close.span.clone(),
                    ));
                }
                Ok(Statement::Call { name, args })
            }
            None | Some(TokenKind::Terminator) => Ok(Statement::Call {
                name,
                args: Vec::new(),
            }),
            Some(_) => {
                let args = self.arguments()?;
                Ok(Statement::Call { name, args })
            }
        }
    }

    fn arguments(&mut self) -> Result<Vec<Spanned<Value>>, ConfigError> {
        let mut args = vec![self.value()?];
        while matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Comma)) {
            self.pos += 1;
            args.push(self.value()?);
        }
        Ok(args)
    }

    fn value(&mut self) -> Result<Spanned<Value>, ConfigError> {
        let token = self.bump_required("a value")?;
        let node = match &token.kind {
            TokenKind::Str(s) => Value::Str(s.clone()),
            TokenKind::Symbol(s) => Value::Symbol(s.clone()),
            TokenKind::Ident(word) if word == "true" => Value::Bool(true),
            TokenKind::Ident(word) if word == "false" => Value::Bool(false),
            TokenKind::Ident(word) if word == "nil" => Value::Nil,
            TokenKind::Number => Value::Other("a number"),
            TokenKind::Open(opener) => return self.collection(token, *opener),
            other => {
                return Err(ConfigError::syntax(
                    format!("expected a value, found {}", other.describe()),
                    token.span.clone(),
                ));
            }
        };
        Ok(Spanned {
            node,
            span: token.span.clone(),
        })
    }

    /// Skip an array or hash literal whose opening bracket was just consumed.
    ///
    /// Nested brackets must balance. Newlines inside are part of the literal.
    fn collection(&mut self, open: &Token, opener: char) -> Result<Spanned<Value>, ConfigError> {
        let mut pending = vec![closing(opener)];
        loop {
            let Some(token) = self.peek() else {
                return Err(ConfigError::syntax(
                    format!("unclosed `{opener}`"),
                    open.span.clone(),
                ));
            };
            self.pos += 1;
            match &token.kind {
                TokenKind::Open(ch) => pending.push(closing(*ch)),
                TokenKind::Close(ch) => {
                    if pending.pop() != Some(*ch) {
                        return Err(ConfigError::syntax(
                            format!("mismatched `{ch}`"),
                            token.span.clone(),
                        ));
                    }
                    if pending.is_empty() {
                        let node = if opener == '[' {
                            Value::Other("an array")
                        } else {
                            Value::Other("a hash")
                        };
                        return Ok(Spanned {
                            node,
                            span: open.span.start..token.span.end,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn expect_terminator(&mut self) -> Result<(), ConfigError> {
        match self.peek() {
            None => Ok(()),
            Some(token) if token.kind == TokenKind::Terminator => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(ConfigError::syntax(
                format!(
                    "expected end of statement, found {}",
                    token.kind.describe()
                ),
                token.span.clone(),
            )),
        }
    }

    fn skip_terminators(&mut self) {
        while matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Terminator)) {
            self.pos += 1;
        }
    }

    fn bump_required(&mut self, expected: &str) -> Result<&'a Token, ConfigError> {
        let tokens = self.tokens;
        match tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token)
            }
            None => Err(ConfigError::syntax(
                format!("expected {expected}, found end of input"),
                self.end..self.end,
            )),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

fn closing(opener: char) -> char {
    if opener == '[' { ']' } else { '}' }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanless(statements: Vec<Statement>) -> Vec<(String, Vec<Value>)> {
        statements
            .into_iter()
            .map(|s| match s {
                Statement::Assign { key, value } => (format!("{}=", key.node), vec![value.node]),
                Statement::Call { name, args } => {
                    (name.node, args.into_iter().map(|a| a.node).collect())
                }
            })
            .collect()
    }

    #[test]
    fn test_parse_assignments_and_calls() {
        let source = "add_import_path \"/shared/styles\"\nrequire 'susy'\n\nproject_type = :stand_alone\nline_comments = false\n";
        assert_eq!(
            spanless(parse(source).unwrap()),
            vec![
                (
                    "add_import_path".to_string(),
                    vec![Value::Str("/shared/styles".to_string())]
                ),
                ("require".to_string(), vec![Value::Str("susy".to_string())]),
                (
                    "project_type=".to_string(),
                    vec![Value::Symbol("stand_alone".to_string())]
                ),
                ("line_comments=".to_string(), vec![Value::Bool(false)]),
            ]
        );
    }

    #[test]
    fn test_parse_semicolon_separated() {
        let statements = parse("css_dir = 'css'; sass_dir = nil").unwrap();
        assert_eq!(
            spanless(statements),
            vec![
                ("css_dir=".to_string(), vec![Value::Str("css".to_string())]),
                ("sass_dir=".to_string(), vec![Value::Nil]),
            ]
        );
    }

    #[test]
    fn test_parse_parenthesized_call_with_several_args() {
        let statements = parse("require(\"a\", \"b\")").unwrap();
        assert_eq!(
            spanless(statements),
            vec![(
                "require".to_string(),
                vec![Value::Str("a".to_string()), Value::Str("b".to_string())]
            )]
        );
    }

    #[test]
    fn test_parse_empty_source() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# only a comment\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_assignment_missing_value() {
        let err = parse("css_dir =").unwrap_err();
        match err {
            ConfigError::Syntax { message, span } => {
                assert_eq!(message, "expected a value, found end of input");
                assert_eq!(span, 9..9);
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_assignment_bare_identifier_value() {
        let err = parse("output_style = nested").unwrap_err();
        match err {
            ConfigError::Syntax { message, span } => {
                assert!(message.contains("found identifier `nested`"));
                assert_eq!(span, 15..21);
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_collection_values_are_opaque() {
        let source = "sprite_padding = 2\nsass_options = {\n  :style => :compact,\n  cache: [1, [2]]\n}\ncss_dir = 'css'\n";
        let statements = parse(source).unwrap();
        assert_eq!(
            spanless(statements.clone()),
            vec![
                ("sprite_padding=".to_string(), vec![Value::Other("a number")]),
                ("sass_options=".to_string(), vec![Value::Other("a hash")]),
                ("css_dir=".to_string(), vec![Value::Str("css".to_string())]),
            ]
        );
        let Statement::Assign { value, .. } = &statements[1] else {
            panic!("Expected an assignment");
        };
        assert!(source[value.span.clone()].starts_with('{'));
        assert!(source[value.span.clone()].ends_with('}'));
    }

    #[test]
    fn test_mismatched_bracket() {
        let err = parse("paths = [1, 2}").unwrap_err();
        match err {
            ConfigError::Syntax { message, span } => {
                assert_eq!(message, "mismatched `}`");
                assert_eq!(span, 13..14);
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_collection() {
        let err = parse("options = {:a => 1\n").unwrap_err();
        match err {
            ConfigError::Syntax { message, span } => {
                assert_eq!(message, "unclosed `{`");
                assert_eq!(span, 10..11);
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_two_statements_on_one_line() {
        let err = parse("css_dir = \"css\" sass_dir = \"sass\"").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { .. }));
    }

    #[test]
    fn test_statement_must_start_with_name() {
        let err = parse(":nested").unwrap_err();
        match err {
            ConfigError::Syntax { message, .. } => {
                assert_eq!(message, "expected a setting name, found symbol `:nested`");
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_paren() {
        let err = parse("require(\"susy\"\n").unwrap_err();
        match err {
            ConfigError::Syntax { message, .. } => {
                assert_eq!(message, "expected `)`, found end of statement");
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }
}
