//! Semantic error types for the analyzer
//!
//! This module defines [`SemanticError`], the diagnostics produced while
//! checking a parsed program.
//!
//! Unlike lexer and parser errors, none of these stop the analysis. Duplicate
//! declarations are *structural*: the symbol table refuses the declaration
//! and hands the error back, and the analyzer records it and moves on. All
//! other variants are type or usage diagnostics collected during the walk.

use crate::parser::ast::SourceLocation;
use crate::semantic::types::Type;
use thiserror::Error;

/// A semantic diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Name declared twice in the same scope frame
    #[error("Semantic error at {location}: variable '{name}' is already declared in this scope")]
    DuplicateVariable {
        name: String,
        location: SourceLocation,
    },

    /// Function name already registered
    #[error("Semantic error at {location}: function '{name}' is already declared")]
    DuplicateFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("Semantic error at {location}: variable '{name}' is not declared")]
    UndeclaredVariable {
        name: String,
        location: SourceLocation,
    },

    /// Also reported for calls that precede the function's declaration
    #[error("Semantic error at {location}: function '{name}' is not declared")]
    UndeclaredFunction {
        name: String,
        location: SourceLocation,
    },

    #[error(
        "Semantic error at {location}: incompatible type in initialization of '{name}': \
         expected '{expected}', found '{found}'"
    )]
    IncompatibleInitializer {
        name: String,
        expected: Type,
        found: Type,
        location: SourceLocation,
    },

    #[error(
        "Semantic error at {location}: incompatible assignment to '{name}': \
         expected '{expected}', found '{found}'"
    )]
    IncompatibleAssignment {
        name: String,
        expected: Type,
        found: Type,
        location: SourceLocation,
    },

    #[error(
        "Semantic error at {location}: incompatible return type: \
         expected '{expected}', found '{found}'"
    )]
    IncompatibleReturn {
        expected: Type,
        found: Type,
        location: SourceLocation,
    },

    /// `position` is 1-based
    #[error(
        "Semantic error at {location}: argument {position} of function '{function}' \
         has incompatible type: expected '{expected}', found '{found}'"
    )]
    IncompatibleArgument {
        function: String,
        position: usize,
        expected: Type,
        found: Type,
        location: SourceLocation,
    },

    #[error(
        "Semantic error at {location}: function '{function}' called with wrong number \
         of arguments: expected {expected}, found {found}"
    )]
    ArgumentCount {
        function: String,
        expected: usize,
        found: usize,
        location: SourceLocation,
    },

    #[error(
        "Semantic error at {location}: operator '{op}' requires numeric operands, \
         found '{left}' and '{right}'"
    )]
    NonNumericOperands {
        op: &'static str,
        left: Type,
        right: Type,
        location: SourceLocation,
    },

    #[error(
        "Semantic error at {location}: unary operator '-' requires a numeric operand, \
         found '{found}'"
    )]
    NonNumericNegation {
        found: Type,
        location: SourceLocation,
    },

    /// `construct` is `if`, `while` or `for`
    #[error(
        "Semantic error at {location}: condition of '{construct}' must be a boolean \
         or numeric expression, found '{found}'"
    )]
    InvalidCondition {
        construct: &'static str,
        found: Type,
        location: SourceLocation,
    },
}

impl SemanticError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SemanticError::DuplicateVariable { location, .. }
            | SemanticError::DuplicateFunction { location, .. }
            | SemanticError::UndeclaredVariable { location, .. }
            | SemanticError::UndeclaredFunction { location, .. }
            | SemanticError::IncompatibleInitializer { location, .. }
            | SemanticError::IncompatibleAssignment { location, .. }
            | SemanticError::IncompatibleReturn { location, .. }
            | SemanticError::IncompatibleArgument { location, .. }
            | SemanticError::ArgumentCount { location, .. }
            | SemanticError::NonNumericOperands { location, .. }
            | SemanticError::NonNumericNegation { location, .. }
            | SemanticError::InvalidCondition { location, .. } => *location,
        }
    }

    /// Duplicate declarations, raised by the symbol table itself
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SemanticError::DuplicateVariable { .. }
                | SemanticError::DuplicateFunction { .. }
        )
    }
}
