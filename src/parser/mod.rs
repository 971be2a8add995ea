//! miniC source code front end: lexing and parsing
//!
//! This module transforms miniC source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), extended by the `declarations`,
//!   `statements` and `expressions` modules
//! - [`ast`]: AST node definitions
//!
//! # The miniC language
//!
//! - Types: `int`, `float`, `void`
//! - Declarations: global and local variables (comma lists with optional
//!   initializers) and functions with typed parameters
//! - Statements: blocks, `if`/`else`, `while`, `for`, `return`, `print`,
//!   expression statements
//! - Expressions: arithmetic, comparison, logical `&&`/`||`/`!`, unary `-`,
//!   assignment to a name, function calls
//! - Comments: `#` and `//` to end of line, `/* ... */`
//!
//! # Parser Implementation
//!
//! Hand-written LL(1) recursive descent parser. Both stages stop at the first
//! error.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use lexer::{format_tokens, tokenize, LexError, Token, TokenKind};
pub use parse::{parse, ParseError, Parser};
