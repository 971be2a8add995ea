//! # Introduction
//!
//! minic is a single-pass front end for miniC, a small C-like language with
//! `int`, `float` and `void`, functions, block scopes, and the usual
//! arithmetic, comparison and logical operators. It validates programs and
//! reports what it found; it does not generate code.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Tokenizer → Tokens → Parser → AST → Semantic Analyzer → Analysis
//! ```
//!
//! 1. [`parser`]: strips comments and whitespace, tokenizes, and builds an
//!    AST by LL(1) recursive descent. Both steps stop at the first error.
//! 2. [`semantic`]: resolves names through nested scopes and type checks
//!    every expression, collecting all diagnostics in one walk.
//! 3. [`report`]: plain-text token listings, AST outlines, symbol table and
//!    diagnostic reports.
//! 4. [`driver`]: runs the stages for the `minic` binary and prints banners
//!    and reports to any writer.
//!
//! ## Example
//!
//! ```
//! let analysis = minic::compile("float half(int n) { return n / 2.0; }").unwrap();
//! assert!(analysis.is_ok());
//! ```

pub mod driver;
pub mod parser;
pub mod report;
pub mod semantic;

pub use driver::{compile, ColorChoice, CompileError, Driver, DriverConfig, Stage};
pub use parser::{format_tokens, parse, tokenize};
pub use report::{ast_outline, diagnostics_report, symbol_table_report, token_preview};
pub use semantic::{analyze, Analysis};
