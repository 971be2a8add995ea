//! Semantic analysis: scope resolution and type checking
//!
//! - [`symbols`]: scoped variable table and flat function table
//! - [`types`]: the `Type` universe, compatibility and the inferred-type table
//! - [`errors`]: diagnostics
//! - [`analyzer`]: the single-pass walk, extended by the `statements` and
//!   `expressions` modules
//!
//! Analysis never stops early. Every problem becomes a [`SemanticError`] in
//! [`Analysis::diagnostics`] and the walk carries on, so one run reports all
//! of them.

pub mod analyzer;
pub mod errors;
mod expressions;
mod statements;
pub mod symbols;
pub mod types;

pub use analyzer::{analyze, Analysis, Analyzer};
pub use errors::SemanticError;
pub use symbols::{FunctionSig, SymbolTable};
pub use types::{compatible, Type, TypeTable};
