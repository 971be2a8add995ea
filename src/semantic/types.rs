//! The type universe of the analyzer and the inferred-type side table
//!
//! Source programs can only write `int`, `float` and `void`. Comparisons and
//! logical operators produce `bool`, and `unknown` marks an expression whose
//! own check already failed so that enclosing checks stay quiet.
//!
//! # Compatibility
//!
//! `compatible(target, actual)` holds when the types are equal, when an `int`
//! widens to a `float`, or when `actual` is `unknown`. There is no narrowing:
//! a `float` never fits an `int` slot.

use crate::parser::ast::{BaseType, NodeId};
use rustc_hash::FxHashMap;
use std::fmt;

/// Static type of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Void,
    Bool,
    Unknown,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Void => "void",
            Type::Bool => "bool",
            Type::Unknown => "unknown",
        }
    }

    /// Accepted by arithmetic, comparison and unary minus
    pub fn is_numeric_or_unknown(self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::Unknown)
    }

    /// Accepted as the condition of `if`, `while` and `for`
    pub fn is_condition(self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::Bool | Type::Unknown)
    }
}

impl From<BaseType> for Type {
    fn from(base: BaseType) -> Self {
        match base {
            BaseType::Int => Type::Int,
            BaseType::Float => Type::Float,
            BaseType::Void => Type::Void,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a value of type `actual` may be stored where `target` is expected
pub fn compatible(target: Type, actual: Type) -> bool {
    target == actual
        || (target == Type::Float && actual == Type::Int)
        || actual == Type::Unknown
}

/// Result type of an arithmetic operator over two numeric operands
pub fn arithmetic_result(left: Type, right: Type) -> Type {
    if left == Type::Float || right == Type::Float {
        Type::Float
    } else {
        Type::Int
    }
}

/// Inferred type of every visited expression, keyed by [`NodeId`]
///
/// Each node is recorded at most once; nodes the analyzer never reached
/// (for example arguments of a call to an undeclared function) are absent.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: FxHashMap<NodeId, Type>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, id: NodeId, ty: Type) {
        let previous = self.types.insert(id, ty);
        debug_assert!(previous.is_none(), "node {id} typed twice");
    }

    pub fn get(&self, id: NodeId) -> Option<Type> {
        self.types.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
