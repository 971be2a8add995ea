//! Scoped symbol table
//!
//! Variables live in a stack of scope frames with the global frame at the
//! bottom; lookups walk from the innermost frame outwards, so an inner
//! declaration shadows an outer one. Functions share one flat table.
//!
//! Both tables remember declaration order for reporting.

use crate::parser::ast::{BaseType, SourceLocation};
use crate::semantic::errors::SemanticError;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Signature of a registered function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSig {
    pub return_type: BaseType,
    pub params: Vec<BaseType>,
}

/// One scope frame: name → declared type, plus declaration order
#[derive(Debug, Clone, Default)]
struct Scope {
    symbols: FxHashMap<String, BaseType>,
    order: Vec<String>,
}

impl Scope {
    fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    fn insert(&mut self, name: &str, ty: BaseType) {
        self.symbols.insert(name.to_string(), ty);
        self.order.push(name.to_string());
    }
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    /// Innermost frame last; index 0 is the global scope
    scopes: Vec<Scope>,
    functions: Vec<(String, FunctionSig)>,
    function_index: FxHashMap<String, usize>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::default()],
            functions: Vec::new(),
            function_index: FxHashMap::default(),
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
        trace!(depth = self.scopes.len(), "enter scope");
    }

    /// Discard the innermost frame. The global frame is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            trace!(depth = self.scopes.len(), "exit scope");
        }
    }

    /// Number of frames currently on the stack (1 = global only)
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declare a variable in the innermost frame
    ///
    /// On a duplicate the existing entry is left untouched.
    pub fn declare_variable(
        &mut self,
        name: &str,
        ty: BaseType,
        location: SourceLocation,
    ) -> Result<(), SemanticError> {
        let depth = self.scopes.len();
        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };

        if scope.contains(name) {
            return Err(SemanticError::DuplicateVariable {
                name: name.to_string(),
                location,
            });
        }

        scope.insert(name, ty);
        trace!(name, %ty, depth, "declare variable");
        Ok(())
    }

    /// Register a function; a second declaration of the same name is refused
    pub fn declare_function(
        &mut self,
        name: &str,
        sig: FunctionSig,
        location: SourceLocation,
    ) -> Result<(), SemanticError> {
        if self.function_index.contains_key(name) {
            return Err(SemanticError::DuplicateFunction {
                name: name.to_string(),
                location,
            });
        }

        trace!(name, return_type = %sig.return_type, params = sig.params.len(), "declare function");
        self.function_index
            .insert(name.to_string(), self.functions.len());
        self.functions.push((name.to_string(), sig));
        Ok(())
    }

    /// Resolve a variable, innermost frame first
    pub fn lookup(&self, name: &str) -> Option<BaseType> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.symbols.get(name).copied())
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionSig> {
        self.function_index
            .get(name)
            .and_then(|&index| self.functions.get(index))
            .map(|(_, sig)| sig)
    }

    /// Global variables in declaration order
    pub fn globals(&self) -> impl Iterator<Item = (&str, BaseType)> {
        self.scopes.first().into_iter().flat_map(|scope| {
            scope.order.iter().filter_map(move |name| {
                scope.symbols.get(name).map(|&ty| (name.as_str(), ty))
            })
        })
    }

    /// Functions in declaration order
    pub fn functions(&self) -> impl Iterator<Item = (&str, &FunctionSig)> {
        self.functions.iter().map(|(name, sig)| (name.as_str(), sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_shadowing_and_lookup_order() {
        let mut table = SymbolTable::new();
        table.declare_variable("x", BaseType::Int, loc()).unwrap();

        table.push_scope();
        table.declare_variable("x", BaseType::Float, loc()).unwrap();
        assert_eq!(table.lookup("x"), Some(BaseType::Float));

        table.pop_scope();
        assert_eq!(table.lookup("x"), Some(BaseType::Int));
        assert_eq!(table.lookup("y"), None);
    }

    #[test]
    fn test_duplicate_variable_keeps_first_entry() {
        let mut table = SymbolTable::new();
        table.declare_variable("x", BaseType::Int, loc()).unwrap();

        let err = table
            .declare_variable("x", BaseType::Float, SourceLocation::new(2, 7))
            .unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.location(), SourceLocation::new(2, 7));
        assert_eq!(table.lookup("x"), Some(BaseType::Int));
        assert_eq!(table.globals().count(), 1);
    }

    #[test]
    fn test_global_scope_is_never_popped() {
        let mut table = SymbolTable::new();
        table.declare_variable("g", BaseType::Float, loc()).unwrap();
        table.pop_scope();
        table.pop_scope();
        assert_eq!(table.depth(), 1);
        assert_eq!(table.lookup("g"), Some(BaseType::Float));
    }

    #[test]
    fn test_functions_in_declaration_order() {
        let mut table = SymbolTable::new();
        let sig = |ret, params: Vec<BaseType>| FunctionSig {
            return_type: ret,
            params,
        };

        table
            .declare_function("zeta", sig(BaseType::Void, vec![]), loc())
            .unwrap();
        table
            .declare_function(
                "alpha",
                sig(BaseType::Int, vec![BaseType::Int, BaseType::Float]),
                loc(),
            )
            .unwrap();
        assert!(table
            .declare_function("zeta", sig(BaseType::Int, vec![]), loc())
            .is_err());

        let names: Vec<&str> = table.functions().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(
            table.lookup_function("zeta").map(|s| s.return_type),
            Some(BaseType::Void)
        );
    }

    #[test]
    fn test_globals_in_declaration_order() {
        let mut table = SymbolTable::new();
        for name in ["c", "a", "b"] {
            table.declare_variable(name, BaseType::Int, loc()).unwrap();
        }
        table.push_scope();
        table.declare_variable("local", BaseType::Int, loc()).unwrap();

        let names: Vec<&str> = table.globals().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
