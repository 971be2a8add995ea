//! Expression visitors
//!
//! Each visit returns the expression's type and records it in the type
//! table. A failed check yields `unknown` where a sensible result type does
//! not exist, which silences follow-up diagnostics in enclosing expressions.

use crate::parser::ast::*;
use crate::semantic::analyzer::Analyzer;
use crate::semantic::errors::SemanticError;
use crate::semantic::types::{arithmetic_result, compatible, Type};

impl Analyzer {
    pub(crate) fn visit_expr(&mut self, expr: &Expr) -> Type {
        let ty = match expr {
            Expr::BinaryOp {
                op,
                left,
                right,
                location,
                ..
            } => self.visit_binary(*op, left, right, *location),
            Expr::UnaryOp {
                op,
                operand,
                location,
                ..
            } => self.visit_unary(*op, operand, *location),
            Expr::Assign {
                name,
                value,
                location,
                ..
            } => self.visit_assign(name, value, *location),
            Expr::Var { name, location, .. } => match self.symbols.lookup(name) {
                Some(ty) => Type::from(ty),
                None => {
                    self.report(SemanticError::UndeclaredVariable {
                        name: name.clone(),
                        location: *location,
                    });
                    Type::Unknown
                }
            },
            Expr::NumberLiteral { lexeme, .. } => {
                if lexeme.contains('.') {
                    Type::Float
                } else {
                    Type::Int
                }
            }
            Expr::EmptyExpr { .. } => Type::Void,
            Expr::FuncCall {
                name,
                args,
                location,
                ..
            } => self.visit_call(name, args, *location),
        };

        self.types.record(expr.id(), ty);
        ty
    }

    fn visit_binary(
        &mut self,
        op: BinOp,
        left: &Expr,
        right: &Expr,
        location: SourceLocation,
    ) -> Type {
        let left_ty = self.visit_expr(left);
        let right_ty = self.visit_expr(right);
        let numeric = left_ty.is_numeric_or_unknown() && right_ty.is_numeric_or_unknown();

        let non_numeric = |op: BinOp| SemanticError::NonNumericOperands {
            op: op.symbol(),
            left: left_ty,
            right: right_ty,
            location,
        };

        match op {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => {
                if !numeric {
                    self.report(non_numeric(op));
                    return Type::Unknown;
                }
                arithmetic_result(left_ty, right_ty)
            }
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                if !numeric {
                    self.report(non_numeric(op));
                }
                Type::Bool
            }
            BinOp::And | BinOp::Or => Type::Bool,
        }
    }

    fn visit_unary(&mut self, op: UnOp, operand: &Expr, location: SourceLocation) -> Type {
        let found = self.visit_expr(operand);

        match op {
            UnOp::Not => Type::Bool,
            UnOp::Neg => {
                if found.is_numeric_or_unknown() {
                    found
                } else {
                    self.report(SemanticError::NonNumericNegation { found, location });
                    Type::Unknown
                }
            }
        }
    }

    /// The target must resolve before the value is looked at
    fn visit_assign(&mut self, name: &str, value: &Expr, location: SourceLocation) -> Type {
        let Some(target) = self.symbols.lookup(name) else {
            self.report(SemanticError::UndeclaredVariable {
                name: name.to_string(),
                location,
            });
            return Type::Unknown;
        };

        let expected = Type::from(target);
        let found = self.visit_expr(value);
        if !compatible(expected, found) {
            self.report(SemanticError::IncompatibleAssignment {
                name: name.to_string(),
                expected,
                found,
                location,
            });
        }

        expected
    }

    fn visit_call(&mut self, name: &str, args: &[Expr], location: SourceLocation) -> Type {
        let Some(sig) = self.symbols.lookup_function(name).cloned() else {
            self.report(SemanticError::UndeclaredFunction {
                name: name.to_string(),
                location,
            });
            return Type::Unknown;
        };

        let return_type = Type::from(sig.return_type);

        if args.len() != sig.params.len() {
            self.report(SemanticError::ArgumentCount {
                function: name.to_string(),
                expected: sig.params.len(),
                found: args.len(),
                location,
            });
            return return_type;
        }

        for (index, (arg, param)) in args.iter().zip(&sig.params).enumerate() {
            let expected = Type::from(*param);
            let found = self.visit_expr(arg);
            if !compatible(expected, found) {
                self.report(SemanticError::IncompatibleArgument {
                    function: name.to_string(),
                    position: index + 1,
                    expected,
                    found,
                    location: arg.location(),
                });
            }
        }

        return_type
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::{parse, tokenize};
    use crate::semantic::{analyze, Analysis, SemanticError, Type};

    fn check(source: &str) -> (Program, Analysis) {
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();
        let analysis = analyze(&program);
        (program, analysis)
    }

    /// Type recorded for the initializer of the first global
    fn init_type(source: &str) -> Option<Type> {
        let (program, analysis) = check(source);
        match &program.nodes[0] {
            Stmt::VarDecl {
                init: Some(init), ..
            } => analysis.types.get(init.id()),
            other => panic!("Expected initialized declaration, got {}", other),
        }
    }

    #[test]
    fn test_assignment_widening_only() {
        let (_, analysis) = check("int x; void main() { x = 3.5; }");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            &analysis.diagnostics[0],
            SemanticError::IncompatibleAssignment {
                name,
                expected: Type::Int,
                found: Type::Float,
                ..
            } if name == "x"
        ));

        let (_, analysis) = check("float y; void main() { y = 3; }");
        assert!(analysis.is_ok());
    }

    #[test]
    fn test_arithmetic_promotion_is_recorded() {
        assert_eq!(init_type("float v = 1 + 2.5;"), Some(Type::Float));
        assert_eq!(init_type("int v = 7 % 3;"), Some(Type::Int));
        assert_eq!(init_type("int v = 1 < 2;"), Some(Type::Bool));
        assert_eq!(init_type("int v = !0;"), Some(Type::Bool));
        assert_eq!(init_type("float v = -2.5;"), Some(Type::Float));
    }

    #[test]
    fn test_bool_is_not_numeric() {
        let (_, analysis) = check("int v = (1 < 2) + 1;");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            analysis.diagnostics[0],
            SemanticError::NonNumericOperands {
                op: "+",
                left: Type::Bool,
                right: Type::Int,
                ..
            }
        ));
    }

    #[test]
    fn test_relational_error_still_yields_bool() {
        let (program, analysis) = check("void f() {} void main() { print(f() < 1); }");
        assert_eq!(analysis.diagnostics.len(), 1);
        match &program.nodes[1] {
            Stmt::FuncDecl { body, .. } => match &body[0] {
                Stmt::Print { expr, .. } => {
                    assert_eq!(analysis.types.get(expr.id()), Some(Type::Bool))
                }
                other => panic!("Expected print, got {}", other),
            },
            other => panic!("Expected function, got {}", other),
        }
    }

    #[test]
    fn test_negating_a_comparison() {
        let (_, analysis) = check("int v = -(1 == 1);");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            analysis.diagnostics[0],
            SemanticError::NonNumericNegation {
                found: Type::Bool,
                ..
            }
        ));
    }

    #[test]
    fn test_logical_operators_accept_anything() {
        let (program, analysis) = check(
            "void f() {} void main() { if (f() && 1 || !f()) ; print(f() || f()); }",
        );
        assert!(analysis.is_ok(), "{:?}", analysis.diagnostics);

        let Stmt::FuncDecl { body, .. } = &program.nodes[1] else {
            panic!("Expected main");
        };
        let Stmt::If { condition, .. } = &body[0] else {
            panic!("Expected if statement, got {}", body[0]);
        };
        let Stmt::Print { expr, .. } = &body[1] else {
            panic!("Expected print statement, got {}", body[1]);
        };
        assert_eq!(analysis.types.get(condition.id()), Some(Type::Bool));
        assert_eq!(analysis.types.get(expr.id()), Some(Type::Bool));
    }

    #[test]
    fn test_logical_result_is_not_an_int() {
        let (_, analysis) = check("void f() {} int v = f() && 1;");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            analysis.diagnostics[0],
            SemanticError::IncompatibleInitializer {
                expected: Type::Int,
                found: Type::Bool,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_suppresses_cascades() {
        let (_, analysis) = check("int v = missing + 1;");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            &analysis.diagnostics[0],
            SemanticError::UndeclaredVariable { name, .. } if name == "missing"
        ));
    }

    #[test]
    fn test_undeclared_assignment_target_skips_value() {
        let (_, analysis) = check("void main() { nope = other; }");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            &analysis.diagnostics[0],
            SemanticError::UndeclaredVariable { name, .. } if name == "nope"
        ));
    }

    #[test]
    fn test_call_before_declaration() {
        let (_, analysis) = check("int main() { return later(); } int later() { return 1; }");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            &analysis.diagnostics[0],
            SemanticError::UndeclaredFunction { name, .. } if name == "later"
        ));
    }

    #[test]
    fn test_argument_count_mismatch() {
        let (_, analysis) = check("int add(int a, int b) { return a + b; } int v = add(1, ghost, 3);");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert_eq!(
            analysis.diagnostics[0],
            SemanticError::ArgumentCount {
                function: "add".to_string(),
                expected: 2,
                found: 3,
                location: SourceLocation::new(1, 49),
            }
        );
    }

    #[test]
    fn test_argument_types() {
        let source = "void take(int a, float b) {} \
                      void main() { take(1, 2); take(2.5, 1.5); }";
        let (_, analysis) = check(source);
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            &analysis.diagnostics[0],
            SemanticError::IncompatibleArgument {
                function,
                position: 1,
                expected: Type::Int,
                found: Type::Float,
                ..
            } if function == "take"
        ));
    }

    #[test]
    fn test_every_visited_expression_is_typed() {
        let (_, analysis) = check("int v = 1 + 2 * 3;");
        assert_eq!(analysis.types.len(), 5);
    }
}
