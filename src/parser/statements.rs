//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement ::= declaration | block | if_stmt | while_stmt | for_stmt
//!             | return_stmt | print_stmt | expr ";" | ";"
//! block     ::= "{" statement* "}"
//! if_stmt   ::= "if" "(" expr ")" statement ("else" statement)?
//! while_stmt ::= "while" "(" expr ")" statement
//! for_stmt  ::= "for" "(" expr? ";" expr? ";" expr? ")" statement
//! return_stmt ::= "return" expr? ";"
//! print_stmt ::= "print" "(" expr ")" ";"
//! ```
//!
//! `else` always attaches to the nearest unmatched `if`: the inner
//! `parse_if_statement` call sees the `else` first and claims it.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl<'a> Parser<'a> {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(
        &mut self,
    ) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.is_type_keyword() {
                statements.extend(self.parse_declaration()?);
            } else if self.match_token(TokenKind::Semicolon) {
                // Empty statement contributes nothing
            } else {
                statements.push(self.parse_statement()?);
            }
        }

        Ok(statements)
    }

    /// Parse a single statement (the body of a branch or loop)
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.nested("statement", Self::parse_statement_kind)
    }

    fn parse_statement_kind(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        match self.peek_kind() {
            TokenKind::Int | TokenKind::Float | TokenKind::Void => {
                let mut decls = self.parse_declaration()?;
                if decls.len() == 1 {
                    Ok(decls.remove(0))
                } else {
                    Ok(Stmt::Block {
                        statements: decls,
                        location: loc,
                    })
                }
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(Stmt::ExprStmt {
                    expr: Box::new(self.empty_expr(loc)),
                    location: loc,
                })
            }
            TokenKind::LBrace => {
                self.advance();
                let statements = self.parse_block_statements()?;
                self.expect_rbrace("after block")?;
                Ok(Stmt::Block {
                    statements,
                    location: loc,
                })
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Print => self.parse_print_statement(),
            _ => {
                let expr = self.parse_expression()?;
                self.expect_semicolon("after expression")?;
                Ok(Stmt::ExprStmt {
                    expr: Box::new(expr),
                    location: loc,
                })
            }
        }
    }

    pub(crate) fn empty_expr(&mut self, location: SourceLocation) -> Expr {
        Expr::EmptyExpr {
            id: self.fresh_id(),
            location,
        }
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'if'

        self.expect_lparen("after 'if'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_rparen("after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'while'

        self.expect_lparen("after 'while'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_rparen("after while condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse for statement; every clause may be omitted
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'for'

        self.expect_lparen("after 'for'")?;

        let init = self.parse_optional_expression(TokenKind::Semicolon)?;
        self.expect_semicolon("after for initializer")?;

        let condition = self.parse_optional_expression(TokenKind::Semicolon)?;
        self.expect_semicolon("after for condition")?;

        let update = self.parse_optional_expression(TokenKind::RParen)?;
        self.expect_rparen("after for clauses")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::For {
            init: Box::new(init),
            condition: Box::new(condition),
            update: Box::new(update),
            body,
            location: loc,
        })
    }

    /// Parse an expression, or produce `EmptyExpr` if `terminator` is next
    fn parse_optional_expression(
        &mut self,
        terminator: TokenKind,
    ) -> Result<Expr, ParseError> {
        if self.check(terminator) {
            let loc = self.current_location();
            Ok(self.empty_expr(loc))
        } else {
            self.parse_expression()
        }
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'return'

        let expr = self.parse_optional_expression(TokenKind::Semicolon)?;
        self.expect_semicolon("after return")?;

        Ok(Stmt::Return {
            expr: Box::new(expr),
            location: loc,
        })
    }

    /// Parse print statement: print(expr);
    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'print'

        self.expect_lparen("after 'print'")?;
        let expr = Box::new(self.parse_expression()?);
        self.expect_rparen("after print argument")?;
        self.expect_semicolon("after print")?;

        Ok(Stmt::Print {
            expr,
            location: loc,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::{tokenize, TokenKind};
    use crate::parser::parse::{parse, ParseError};

    /// Parse `body` inside `void main() { ... }` and return its statements
    fn parse_body(body: &str) -> Result<Vec<Stmt>, ParseError> {
        let source = format!("void main() {{ {} }}", body);
        let tokens = tokenize(&source).unwrap();
        let mut program = parse(&tokens)?;
        match program.nodes.remove(0) {
            Stmt::FuncDecl { body, .. } => Ok(body),
            other => panic!("Expected function declaration, got {}", other),
        }
    }

    #[test]
    fn test_dangling_else_binds_to_inner_if() {
        let body = parse_body("if (a) if (b) print(1); else print(2);").unwrap();
        assert_eq!(body.len(), 1);

        match &body[0] {
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert!(else_branch.is_none(), "outer if must not own the else");
                match then_branch.as_ref() {
                    Stmt::If { else_branch, .. } => {
                        assert!(matches!(
                            else_branch.as_deref(),
                            Some(Stmt::Print { .. })
                        ));
                    }
                    other => panic!("Expected inner if, got {}", other),
                }
            }
            other => panic!("Expected if statement, got {}", other),
        }
    }

    #[test]
    fn test_for_with_omitted_clauses() {
        let body = parse_body("for (;;) ;").unwrap();

        match &body[0] {
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                assert!(init.is_empty());
                assert!(condition.is_empty());
                assert!(update.is_empty());
                assert!(matches!(
                    body.as_ref(),
                    Stmt::ExprStmt { expr, .. } if expr.is_empty()
                ));
            }
            other => panic!("Expected for statement, got {}", other),
        }
    }

    #[test]
    fn test_for_with_all_clauses() {
        let body = parse_body("for (i = 0; i < 10; i = i + 1) print(i);").unwrap();

        match &body[0] {
            Stmt::For {
                init,
                condition,
                update,
                ..
            } => {
                assert!(matches!(init.as_ref(), Expr::Assign { .. }));
                assert!(matches!(
                    condition.as_ref(),
                    Expr::BinaryOp { op: BinOp::Lt, .. }
                ));
                assert!(matches!(update.as_ref(), Expr::Assign { .. }));
            }
            other => panic!("Expected for statement, got {}", other),
        }
    }

    #[test]
    fn test_return_without_value() {
        let body = parse_body("return;").unwrap();
        assert!(matches!(
            &body[0],
            Stmt::Return { expr, .. } if expr.is_empty()
        ));
    }

    #[test]
    fn test_empty_statements_are_dropped_in_blocks() {
        let body = parse_body(";; print(1); ;").unwrap();
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_local_declaration_list() {
        let body = parse_body("int a = 1, b; { float c; }").unwrap();
        assert_eq!(body.len(), 3);
        assert!(matches!(&body[0], Stmt::VarDecl { name, .. } if name == "a"));
        assert!(matches!(&body[1], Stmt::VarDecl { name, .. } if name == "b"));
        assert!(matches!(
            &body[2],
            Stmt::Block { statements, .. } if statements.len() == 1
        ));
    }

    #[test]
    fn test_while_loop() {
        let body = parse_body("while (n > 0) { n = n - 1; }").unwrap();
        match &body[0] {
            Stmt::While { body, .. } => {
                assert!(matches!(body.as_ref(), Stmt::Block { .. }));
            }
            other => panic!("Expected while statement, got {}", other),
        }
    }

    #[test]
    fn test_print_requires_parentheses() {
        let err = parse_body("print 1;").unwrap_err();
        assert_eq!(err.expected, vec![TokenKind::LParen]);
        assert_eq!(err.found, TokenKind::Num);
    }

    #[test]
    fn test_unclosed_block() {
        let tokens = tokenize("int main() { print(1);").unwrap();
        let err = parse(&tokens).unwrap_err();
        assert_eq!(err.expected, vec![TokenKind::RBrace]);
        assert_eq!(err.found, TokenKind::Eof);
    }
}
