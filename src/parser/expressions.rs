//! Expression parsing implementation
//!
//! One method per precedence level, lowest first:
//!
//! ```text
//! logical_or     ::= logical_and ("||" logical_and)*
//! logical_and    ::= equality ("&&" equality)*
//! equality       ::= relational (("==" | "!=") relational)*
//! relational     ::= additive (("<" | ">" | "<=" | ">=") additive)*
//! additive       ::= multiplicative (("+" | "-") multiplicative)*
//! multiplicative ::= unary (("*" | "/" | "%") unary)*
//! unary          ::= ("!" | "-") unary | primary
//! primary        ::= "(" expr ")" | NUM
//!                  | ID "=" expr | ID "(" args? ")" | ID
//! ```
//!
//! Every binary level is left-associative: `a - b - c` is `(a - b) - c`.
//! Assignment only appears after an identifier, and its right side is a full
//! expression, so `a = b = c` nests to the right.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

/// Tokens that can start an expression
const EXPRESSION_START: [TokenKind; 5] = [
    TokenKind::LParen,
    TokenKind::Num,
    TokenKind::Bang,
    TokenKind::Minus,
    TokenKind::Id,
];

type LevelParser<'a> = fn(&mut Parser<'a>) -> Result<Expr, ParseError>;

impl<'a> Parser<'a> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or()
    }

    /// Fold `next (op next)*` to the left for the operators in `ops`
    fn parse_binary_level(
        &mut self,
        ops: &[(TokenKind, BinOp)],
        next: LevelParser<'a>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;

        loop {
            let kind = self.peek_kind();
            let Some(&(_, op)) = ops.iter().find(|(k, _)| *k == kind) else {
                break;
            };
            let loc = self.current_location();
            self.advance();

            let right = next(self)?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                id: self.fresh_id(),
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[(TokenKind::OrOr, BinOp::Or)],
            Self::parse_logical_and,
        )
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[(TokenKind::AndAnd, BinOp::And)],
            Self::parse_equality,
        )
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[(TokenKind::EqEq, BinOp::Eq), (TokenKind::NotEq, BinOp::Ne)],
            Self::parse_relational,
        )
    }

    /// Parse relational (< > <= >=)
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[
                (TokenKind::Lt, BinOp::Lt),
                (TokenKind::Gt, BinOp::Gt),
                (TokenKind::Le, BinOp::Le),
                (TokenKind::Ge, BinOp::Ge),
            ],
            Self::parse_additive,
        )
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)],
            Self::parse_multiplicative,
        )
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[
                (TokenKind::Star, BinOp::Mul),
                (TokenKind::Slash, BinOp::Div),
                (TokenKind::Percent, BinOp::Mod),
            ],
            Self::parse_unary,
        )
    }

    /// Parse unary (! -)
    ///
    /// Every nested expression passes through here, so this is where the
    /// nesting depth is counted.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.nested("expression", Self::parse_prefixed)
    }

    fn parse_prefixed(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let op = match self.peek_kind() {
            TokenKind::Bang => UnOp::Not,
            TokenKind::Minus => UnOp::Neg,
            _ => return self.parse_primary(),
        };
        self.advance();

        let operand = Box::new(self.parse_unary()?);
        Ok(Expr::UnaryOp {
            op,
            operand,
            id: self.fresh_id(),
            location: loc,
        })
    }

    /// Parse primary (literals, names, calls, assignments, parentheses)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        match self.peek_kind() {
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                Ok(expr)
            }
            TokenKind::Num => {
                let lexeme = self.advance().map(|t| t.lexeme.clone());
                Ok(Expr::NumberLiteral {
                    lexeme: lexeme.unwrap_or_default(),
                    id: self.fresh_id(),
                    location: loc,
                })
            }
            TokenKind::Id => {
                let (name, loc) = self.expect_identifier("in expression")?;

                if self.match_token(TokenKind::Assign) {
                    let value = Box::new(self.parse_expression()?);
                    return Ok(Expr::Assign {
                        name,
                        value,
                        id: self.fresh_id(),
                        location: loc,
                    });
                }

                if self.match_token(TokenKind::LParen) {
                    let args = self.parse_argument_list()?;
                    self.expect_rparen("after function arguments")?;
                    return Ok(Expr::FuncCall {
                        name,
                        args,
                        id: self.fresh_id(),
                        location: loc,
                    });
                }

                Ok(Expr::Var {
                    name,
                    id: self.fresh_id(),
                    location: loc,
                })
            }
            _ => Err(self.error(&EXPRESSION_START, "to start an expression")),
        }
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::{tokenize, TokenKind};
    use crate::parser::parse::{parse, ParseError};

    /// Parse `source` as the initializer of a global and return it
    fn parse_init(source: &str) -> Result<Expr, ParseError> {
        let tokens = tokenize(&format!("int v = {};", source)).unwrap();
        let mut program = parse(&tokens)?;
        match program.nodes.remove(0) {
            Stmt::VarDecl {
                init: Some(init), ..
            } => Ok(*init),
            other => panic!("Expected initialized declaration, got {}", other),
        }
    }

    #[test]
    fn test_precedence() {
        let expr = parse_init("1 + 2 * 3").unwrap();
        assert_eq!(expr.to_string(), "BinaryOp(Num(1) + BinaryOp(Num(2) * Num(3)))");

        let expr = parse_init("a || b && c == d < e + f * g").unwrap();
        assert_eq!(
            expr.to_string(),
            "BinaryOp(Var(a) || BinaryOp(Var(b) && BinaryOp(Var(c) == \
             BinaryOp(Var(d) < BinaryOp(Var(e) + BinaryOp(Var(f) * Var(g)))))))"
        );
    }

    #[test]
    fn test_left_associativity() {
        let expr = parse_init("a - b - c").unwrap();
        assert_eq!(expr.to_string(), "BinaryOp(BinaryOp(Var(a) - Var(b)) - Var(c))");

        let expr = parse_init("8 / 4 % 3").unwrap();
        assert_eq!(expr.to_string(), "BinaryOp(BinaryOp(Num(8) / Num(4)) % Num(3))");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = parse_init("(1 + 2) * 3").unwrap();
        assert_eq!(expr.to_string(), "BinaryOp(BinaryOp(Num(1) + Num(2)) * Num(3))");
    }

    #[test]
    fn test_unary_operators() {
        let expr = parse_init("-x * !y").unwrap();
        assert_eq!(expr.to_string(), "BinaryOp(UnaryOp(-Var(x)) * UnaryOp(!Var(y)))");

        let expr = parse_init("!-1").unwrap();
        assert_eq!(expr.to_string(), "UnaryOp(!UnaryOp(-Num(1)))");
    }

    #[test]
    fn test_assignment_and_calls() {
        let expr = parse_init("a = b = f(1, g(), 2.5)").unwrap();
        match &expr {
            Expr::Assign { name, value, .. } => {
                assert_eq!(name, "a");
                match value.as_ref() {
                    Expr::Assign { name, value, .. } => {
                        assert_eq!(name, "b");
                        assert_eq!(value.to_string(), "FuncCall(f, 3 args)");
                    }
                    other => panic!("Expected nested assignment, got {}", other),
                }
            }
            other => panic!("Expected assignment, got {}", other),
        }
    }

    #[test]
    fn test_missing_operand() {
        let err = parse_init("1 + ;").unwrap_err();
        assert_eq!(err.found, TokenKind::Semicolon);
        assert!(err.expected.contains(&TokenKind::Num));
        assert!(err.expected.contains(&TokenKind::Id));
    }
}
