//! Statement visitors

use crate::parser::ast::*;
use crate::semantic::analyzer::Analyzer;
use crate::semantic::errors::SemanticError;

impl Analyzer {
    pub(crate) fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl {
                name,
                var_type,
                init,
                location,
            } => self.visit_var_decl(name, *var_type, init.as_deref(), *location),
            Stmt::FuncDecl {
                name,
                return_type,
                params,
                body,
                location,
            } => self.visit_func_decl(name, *return_type, params, body, *location),
            Stmt::Block { statements, .. } => self.visit_block(statements),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.check_condition("if", condition);
                self.visit_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit_stmt(else_branch);
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.check_condition("while", condition);
                self.visit_stmt(body);
            }
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                // Omitted clauses are not visited
                if !init.is_empty() {
                    self.visit_expr(init);
                }
                if !condition.is_empty() {
                    self.check_condition("for", condition);
                }
                if !update.is_empty() {
                    self.visit_expr(update);
                }
                self.visit_stmt(body);
            }
            Stmt::Return { expr, location } => {
                let found = self.visit_expr(expr);
                self.check_return(found, *location);
            }
            Stmt::Print { expr, .. } => {
                self.visit_expr(expr);
            }
            Stmt::ExprStmt { expr, .. } => {
                self.visit_expr(expr);
            }
        }
    }

    /// Visit statements inside a fresh scope frame
    pub(crate) fn visit_block(&mut self, statements: &[Stmt]) {
        self.symbols.push_scope();
        for stmt in statements {
            self.visit_stmt(stmt);
        }
        self.symbols.pop_scope();
    }

    fn check_condition(&mut self, construct: &'static str, condition: &Expr) {
        let found = self.visit_expr(condition);
        if !found.is_condition() {
            self.report(SemanticError::InvalidCondition {
                construct,
                found,
                location: condition.location(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, tokenize};
    use crate::semantic::{analyze, Analysis, SemanticError, Type};

    fn check(source: &str) -> Analysis {
        let tokens = tokenize(source).unwrap();
        analyze(&parse(&tokens).unwrap())
    }

    #[test]
    fn test_void_condition_rejected() {
        let source = "void f() {} void main() { if (f()) print(1); while (f()) ; }";
        let analysis = check(source);
        let constructs: Vec<&str> = analysis
            .diagnostics
            .iter()
            .map(|d| match d {
                SemanticError::InvalidCondition {
                    construct,
                    found: Type::Void,
                    ..
                } => *construct,
                other => panic!("Unexpected diagnostic: {}", other),
            })
            .collect();
        assert_eq!(constructs, vec!["if", "while"]);
    }

    #[test]
    fn test_numeric_and_boolean_conditions_accepted() {
        let source = "int main() { int i; float f; \
                      if (i) ; if (f) ; while (i < 3) i = i + 1; \
                      for (i = 0; !i; i = i + 1) ; return 0; }";
        let analysis = check(source);
        assert!(analysis.is_ok(), "{:?}", analysis.diagnostics);
    }

    #[test]
    fn test_empty_for_clauses_unchecked() {
        assert!(check("void main() { for (;;) ; }").is_ok());

        let analysis = check("void f() {} void main() { for (; f(); ) ; }");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            analysis.diagnostics[0],
            SemanticError::InvalidCondition { construct: "for", .. }
        ));
    }

    #[test]
    fn test_block_scopes_end_at_closing_brace() {
        let analysis = check("void main() { { int t = 1; } print(t); }");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            &analysis.diagnostics[0],
            SemanticError::UndeclaredVariable { name, .. } if name == "t"
        ));
    }

    #[test]
    fn test_same_name_in_sibling_blocks() {
        let analysis = check("void main() { { int t; } { float t; } }");
        assert!(analysis.is_ok(), "{:?}", analysis.diagnostics);
    }

    #[test]
    fn test_print_accepts_any_type() {
        let analysis = check("void f() {} void main() { print(f()); print(1 < 2); }");
        assert!(analysis.is_ok(), "{:?}", analysis.diagnostics);
    }

    #[test]
    fn test_return_float_from_int_function() {
        let analysis = check("int main() { return 1.5; }");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            analysis.diagnostics[0],
            SemanticError::IncompatibleReturn {
                expected: Type::Int,
                found: Type::Float,
                ..
            }
        ));

        assert!(check("float main() { return 1; }").is_ok());
    }

    #[test]
    fn test_multi_declaration_as_branch_body() {
        let analysis = check("void main() { if (1) int a, b = a; }");
        assert!(analysis.is_ok(), "{:?}", analysis.diagnostics);
    }
}
