//! Lexer (tokenizer) for miniC source code
//!
//! Tokenization happens in two passes:
//!
//! 1. Comments (`#`, `//`, `/* */`) and all whitespace are stripped. Each kept
//!    character remembers where it came from so errors still point at the
//!    original line and column.
//! 2. The stripped text is scanned left to right. Numbers and identifiers are
//!    recognised by small deterministic automata (the `Automaton` trait);
//!    operators use maximal munch.
//!
//! Because whitespace is gone before scanning starts, `int x` reaches the
//! scanner as `intx`. Keywords are therefore matched as *prefixes* of an
//! identifier run: the first keyword in [`KEYWORDS`] that starts the run is
//! emitted on its own and scanning resumes right after it, so `integer`
//! becomes `int` + `eger`.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Token categories produced by the lexer.
///
/// `Eof` is never emitted by [`Lexer::tokenize`]; the parser reports it when
/// the token stream runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    Num,
    Id,

    // Keywords
    If,
    Else,
    While,
    For,
    Int,
    Float,
    Return,
    Print,
    Void,

    // Two-character operators
    EqEq,   // ==
    NotEq,  // !=
    Le,     // <=
    Ge,     // >=
    AndAnd, // &&
    OrOr,   // ||

    // Single-character operators
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Assign,  // =
    Bang,    // !
    Lt,      // <
    Gt,      // >

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
    Comma,     // ,

    Eof,
}

impl TokenKind {
    /// The tag used in token listings and syntax errors.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Num => "NUM",
            TokenKind::Id => "ID",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Return => "RETURN",
            TokenKind::Print => "PRINT",
            TokenKind::Void => "VOID",
            TokenKind::EqEq => "OP_EQ",
            TokenKind::NotEq => "OP_NEQ",
            TokenKind::Le => "OP_LE",
            TokenKind::Ge => "OP_GE",
            TokenKind::AndAnd => "OP_AND",
            TokenKind::OrOr => "OP_OR",
            TokenKind::Plus => "OP_ADD",
            TokenKind::Minus => "OP_SUB",
            TokenKind::Star => "OP_MUL",
            TokenKind::Slash => "OP_DIV",
            TokenKind::Percent => "OP_MOD",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Bang => "OP_NOT",
            TokenKind::Lt => "OP_LT",
            TokenKind::Gt => "OP_GT",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Eof => "EOF",
        }
    }

    pub fn is_type_keyword(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::Void)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reserved words, in matching priority order.
pub const KEYWORDS: [(&str, TokenKind); 9] = [
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("int", TokenKind::Int),
    ("float", TokenKind::Float),
    ("return", TokenKind::Return),
    ("print", TokenKind::Print),
    ("void", TokenKind::Void),
];

/// A recognised token: its kind, the exact text it was read from, and where
/// that text started in the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, \"{}\">", self.kind, self.lexeme)
    }
}

/// Render a token stream one `<KIND, "lexeme">` per line.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Lexer error at {location}: unexpected character '{ch}'")]
    UnexpectedChar { ch: char, location: SourceLocation },

    /// Digits immediately followed by a letter or underscore. `text` includes
    /// the offending character.
    #[error("Lexer error at {location}: invalid numeric literal '{text}'")]
    InvalidLiteral {
        text: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnexpectedChar { location, .. }
            | LexError::InvalidLiteral { location, .. } => *location,
        }
    }
}

/// A deterministic finite automaton over characters.
trait Automaton: Copy {
    fn start() -> Self;
    fn step(self, ch: char) -> Option<Self>;
    fn is_accepting(self) -> bool;
}

/// `digit+` or `digit+ '.' digit+`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Start,
    Integer,
    Dot,
    Fraction,
}

impl Automaton for NumberState {
    fn start() -> Self {
        NumberState::Start
    }

    fn step(self, ch: char) -> Option<Self> {
        match (self, ch) {
            (NumberState::Start, '0'..='9') => Some(NumberState::Integer),
            (NumberState::Integer, '0'..='9') => Some(NumberState::Integer),
            (NumberState::Integer, '.') => Some(NumberState::Dot),
            (NumberState::Dot, '0'..='9') => Some(NumberState::Fraction),
            (NumberState::Fraction, '0'..='9') => Some(NumberState::Fraction),
            _ => None,
        }
    }

    fn is_accepting(self) -> bool {
        matches!(self, NumberState::Integer | NumberState::Fraction)
    }
}

/// `(letter|_)(letter|digit|_)*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentState {
    Start,
    Body,
}

impl Automaton for IdentState {
    fn start() -> Self {
        IdentState::Start
    }

    fn step(self, ch: char) -> Option<Self> {
        match self {
            IdentState::Start if ch.is_ascii_alphabetic() || ch == '_' => {
                Some(IdentState::Body)
            }
            IdentState::Body if ch.is_ascii_alphanumeric() || ch == '_' => {
                Some(IdentState::Body)
            }
            _ => None,
        }
    }

    fn is_accepting(self) -> bool {
        self == IdentState::Body
    }
}

/// Lexer for miniC source code
pub struct Lexer {
    // Stripped source, one entry per kept character
    input: Vec<char>,
    locations: Vec<SourceLocation>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(source: &str) -> Self {
        let (input, locations) = strip_comments_and_whitespace(source);
        Self {
            input,
            locations,
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            tokens.push(self.next_token()?);
        }

        debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let loc = self.locations[start];

        if let Some(end) = self.longest_match::<NumberState>(start) {
            return self.number_literal(start, end);
        }

        if let Some(kind) = self.two_char_operator() {
            let lexeme = self.slice(start, start + 2);
            self.position += 2;
            return Ok(Token::new(kind, lexeme, loc));
        }

        let ch = self.input[start];
        if let Some(kind) = single_char_operator(ch) {
            self.position += 1;
            return Ok(Token::new(kind, ch.to_string(), loc));
        }

        if let Some(end) = self.longest_match::<IdentState>(start) {
            return Ok(self.identifier_or_keyword(start, end));
        }

        Err(LexError::UnexpectedChar { ch, location: loc })
    }

    /// Emit a NUM token for `start..end`, rejecting literals like `123abc`
    fn number_literal(
        &mut self,
        start: usize,
        end: usize,
    ) -> Result<Token, LexError> {
        let loc = self.locations[start];

        if let Some(&next) = self.input.get(end) {
            if next.is_alphabetic() || next == '_' {
                return Err(LexError::InvalidLiteral {
                    text: self.slice(start, end + 1),
                    location: loc,
                });
            }
        }

        self.position = end;
        Ok(Token::new(TokenKind::Num, self.slice(start, end), loc))
    }

    /// Classify an identifier run, splitting off a leading keyword if any
    fn identifier_or_keyword(&mut self, start: usize, end: usize) -> Token {
        let loc = self.locations[start];
        let lexeme = self.slice(start, end);

        match KEYWORDS.iter().find(|(kw, _)| lexeme.starts_with(kw)) {
            Some(&(kw, kind)) => {
                // Keywords are ASCII, so byte length == char count
                self.position = start + kw.len();
                Token::new(kind, kw, loc)
            }
            None => {
                self.position = end;
                Token::new(TokenKind::Id, lexeme, loc)
            }
        }
    }

    fn two_char_operator(&self) -> Option<TokenKind> {
        let first = self.peek()?;
        let second = self.peek_ahead(1)?;

        match (first, second) {
            ('=', '=') => Some(TokenKind::EqEq),
            ('!', '=') => Some(TokenKind::NotEq),
            ('<', '=') => Some(TokenKind::Le),
            ('>', '=') => Some(TokenKind::Ge),
            ('&', '&') => Some(TokenKind::AndAnd),
            ('|', '|') => Some(TokenKind::OrOr),
            _ => None,
        }
    }

    /// Run `A` from `start` and return the end of the longest accepted prefix
    fn longest_match<A: Automaton>(&self, start: usize) -> Option<usize> {
        let mut state = A::start();
        let mut accepted = None;

        for (offset, &ch) in self.input[start..].iter().enumerate() {
            match state.step(ch) {
                Some(next) => state = next,
                None => break,
            }
            if state.is_accepting() {
                accepted = Some(start + offset + 1);
            }
        }

        accepted
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

fn single_char_operator(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        '=' => TokenKind::Assign,
        '!' => TokenKind::Bang,
        '<' => TokenKind::Lt,
        '>' => TokenKind::Gt,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        _ => return None,
    };
    Some(kind)
}

/// Character cursor over the raw source used while stripping.
struct RawCursor {
    chars: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl RawCursor {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.chars.get(self.position + n).copied()
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while let Some(ch) = self.advance() {
            if ch == '*' && self.peek() == Some('/') {
                self.advance();
                return;
            }
        }
    }
}

/// Drop comments and whitespace, keeping the origin of every other character.
///
/// An unterminated block comment swallows the rest of the input.
fn strip_comments_and_whitespace(
    source: &str,
) -> (Vec<char>, Vec<SourceLocation>) {
    let mut cursor = RawCursor {
        chars: source.chars().collect(),
        position: 0,
        line: 1,
        column: 1,
    };
    let mut kept = Vec::new();
    let mut locations = Vec::new();

    while let Some(ch) = cursor.peek() {
        match (ch, cursor.peek_ahead(1)) {
            ('#', _) | ('/', Some('/')) => cursor.skip_line_comment(),
            ('/', Some('*')) => cursor.skip_block_comment(),
            (' ' | '\t' | '\r' | '\n', _) => {
                cursor.advance();
            }
            _ => {
                kept.push(ch);
                locations.push(cursor.location());
                cursor.advance();
            }
        }
    }

    (kept, locations)
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
