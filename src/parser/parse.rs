//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a predictive recursive descent parser (one token of
//! lookahead, no backtracking) with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: variable and function declarations, shared by global and
//!   local scope
//! - `statements`: blocks and control flow
//! - `expressions`: one method per precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! There is no error recovery: the first mismatch is returned as a
//! [`ParseError`] and no partial tree is produced.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Deepest nesting of expressions, statements and function bodies accepted
/// before parsing gives up with a [`ParseError`]
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parser error type
///
/// Carries the token kinds that would have been accepted and the kind that
/// was actually found. `expected` is empty when the input is well formed but
/// nested deeper than [`MAX_NESTING_DEPTH`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at {location}: {}", describe(.expected, .context, .found, .lexeme))]
pub struct ParseError {
    pub expected: Vec<TokenKind>,
    pub found: TokenKind,
    /// Text of the offending token (empty at end of input)
    pub lexeme: String,
    pub location: SourceLocation,
    /// What was being parsed, e.g. "after 'if'"
    pub context: String,
}

fn describe(
    expected: &[TokenKind],
    context: &str,
    found: &TokenKind,
    lexeme: &str,
) -> String {
    let mut text = match expected {
        [] => String::new(),
        [single] => format!("expected {}", single),
        kinds => {
            let names: Vec<&str> = kinds.iter().map(|k| k.name()).collect();
            format!("expected one of {}", names.join(", "))
        }
    };

    if !context.is_empty() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(context);
    }

    if *found == TokenKind::Eof {
        text.push_str(", found EOF");
    } else {
        text.push_str(&format!(", found {} \"{}\"", found, lexeme));
    }
    text
}

/// Recursive descent parser for miniC
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) position: usize,
    next_id: NodeId,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            next_id: 0,
            depth: 0,
        }
    }

    /// Parse the entire program (global declarations, then end of input)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while self.is_type_keyword() {
            let decls = self.parse_declaration()?;
            program.nodes.extend(decls);
        }

        if !self.is_at_end() {
            return Err(self.error(
                &[
                    TokenKind::Int,
                    TokenKind::Float,
                    TokenKind::Void,
                    TokenKind::Eof,
                ],
                "at top level",
            ));
        }

        debug!(declarations = program.nodes.len(), "parsed program");
        Ok(program)
    }

    // ===== Helper methods =====

    /// Run `parse` one nesting level deeper, failing once the limit is hit
    pub(crate) fn nested<T>(
        &mut self,
        what: &str,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(&[], &format!("{} nested too deeply", what)));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Allocate the id for a new expression node
    pub(crate) fn fresh_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn is_type_keyword(&self) -> bool {
        self.peek_kind().is_type_keyword()
    }

    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Kind of the current token, `Eof` once the stream is exhausted
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        match self.peek() {
            Some(token) => token.location,
            // Just past the last token
            None => self.tokens.last().map_or(
                SourceLocation::new(1, 1),
                |last| {
                    SourceLocation::new(
                        last.location.line,
                        last.location.column + last.lexeme.chars().count(),
                    )
                },
            ),
        }
    }

    /// Build an error describing the current token
    pub(crate) fn error(
        &self,
        expected: &[TokenKind],
        context: &str,
    ) -> ParseError {
        ParseError {
            expected: expected.to_vec(),
            found: self.peek_kind(),
            lexeme: self.peek().map(|t| t.lexeme.clone()).unwrap_or_default(),
            location: self.current_location(),
            context: context.to_string(),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        context: &str,
    ) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.position += 1;
                Ok(token)
            }
            _ => Err(self.error(&[kind], context)),
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LParen, ctx).map(|_| ())
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RParen, ctx).map(|_| ())
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LBrace, ctx).map(|_| ())
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RBrace, ctx).map(|_| ())
    }

    pub(crate) fn expect_semicolon(
        &mut self,
        ctx: &str,
    ) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Semicolon, ctx).map(|_| ())
    }

    pub(crate) fn expect_identifier(
        &mut self,
        ctx: &str,
    ) -> Result<(String, SourceLocation), ParseError> {
        let token = self.expect_token(TokenKind::Id, ctx)?;
        Ok((token.lexeme.clone(), token.location))
    }
}

/// Parse a complete token stream into a [`Program`].
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}
