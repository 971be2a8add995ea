//! Analyzer state and declaration handling
//!
//! The [`Analyzer`] walks the program once, top to bottom. A function becomes
//! callable when its declaration is reached, so calls that precede the
//! declaration resolve to nothing.
//!
//! Statement and expression visitors live in the sibling `statements` and
//! `expressions` modules as further `impl Analyzer` blocks.

use crate::parser::ast::*;
use crate::semantic::errors::SemanticError;
use crate::semantic::symbols::{FunctionSig, SymbolTable};
use crate::semantic::types::{compatible, Type, TypeTable};
use tracing::debug;

/// Outcome of semantic analysis
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Global scope and function table as they stand after the walk
    pub symbols: SymbolTable,
    /// Every diagnostic, in the order it was found
    pub diagnostics: Vec<SemanticError>,
    /// Inferred type of each visited expression
    pub types: TypeTable,
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub struct Analyzer {
    pub(crate) symbols: SymbolTable,
    pub(crate) diagnostics: Vec<SemanticError>,
    pub(crate) types: TypeTable,
    /// Return type of the function whose body is being visited
    pub(crate) current_return: Option<BaseType>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            symbols: SymbolTable::new(),
            diagnostics: Vec::new(),
            types: TypeTable::new(),
            current_return: None,
        }
    }

    /// Check a whole program and hand back everything collected
    pub fn analyze(mut self, program: &Program) -> Analysis {
        for node in &program.nodes {
            self.visit_stmt(node);
        }

        debug!(
            diagnostics = self.diagnostics.len(),
            functions = self.symbols.functions().count(),
            globals = self.symbols.globals().count(),
            "semantic analysis finished"
        );

        Analysis {
            symbols: self.symbols,
            diagnostics: self.diagnostics,
            types: self.types,
        }
    }

    pub(crate) fn report(&mut self, error: SemanticError) {
        debug!(%error, "diagnostic");
        self.diagnostics.push(error);
    }

    /// Declare the variable, then check its initializer against it
    pub(crate) fn visit_var_decl(
        &mut self,
        name: &str,
        var_type: BaseType,
        init: Option<&Expr>,
        location: SourceLocation,
    ) {
        if let Err(error) = self.symbols.declare_variable(name, var_type, location) {
            self.report(error);
            return;
        }

        let Some(init) = init else {
            return;
        };

        let found = self.visit_expr(init);
        if !compatible(var_type.into(), found) {
            self.report(SemanticError::IncompatibleInitializer {
                name: name.to_string(),
                expected: var_type.into(),
                found,
                location: init.location(),
            });
        }
    }

    /// Register the function, then check its body
    ///
    /// Parameters get their own frame and the body block another, so a local
    /// may shadow a parameter.
    pub(crate) fn visit_func_decl(
        &mut self,
        name: &str,
        return_type: BaseType,
        params: &[Param],
        body: &[Stmt],
        location: SourceLocation,
    ) {
        let sig = FunctionSig {
            return_type,
            params: params.iter().map(|p| p.param_type).collect(),
        };
        if let Err(error) = self.symbols.declare_function(name, sig, location) {
            self.report(error);
            return;
        }

        let enclosing = self.current_return.replace(return_type);
        self.symbols.push_scope();

        for param in params {
            if let Err(error) =
                self.symbols
                    .declare_variable(&param.name, param.param_type, param.location)
            {
                self.report(error);
            }
        }

        self.visit_block(body);

        self.symbols.pop_scope();
        self.current_return = enclosing;
    }

    /// Check that a `return` value fits the enclosing function
    pub(crate) fn check_return(&mut self, found: Type, location: SourceLocation) {
        let Some(expected) = self.current_return else {
            return;
        };

        let expected = Type::from(expected);
        if !compatible(expected, found) {
            self.report(SemanticError::IncompatibleReturn {
                expected,
                found,
                location,
            });
        }
    }
}

/// Run semantic analysis over a parsed program
pub fn analyze(program: &Program) -> Analysis {
    Analyzer::new().analyze(program)
}
