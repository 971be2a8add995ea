//! Declaration parsing implementation
//!
//! Global and local declarations share one grammar:
//!
//! ```text
//! declaration ::= type identifier ( function_rest | variable_rest )
//! function_rest ::= "(" params? ")" "{" statement* "}"
//! variable_rest ::= ("=" expr)? ("," identifier ("=" expr)?)* ";"
//! params      ::= type identifier ("," type identifier)*
//! type        ::= "int" | "float" | "void"
//! ```
//!
//! A variable declaration with several names yields one [`Stmt::VarDecl`]
//! per name, all with the same declared type.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl<'a> Parser<'a> {
    /// Parse a declaration: one function, or one or more variables
    pub(crate) fn parse_declaration(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let decl_type = self.parse_type()?;
        let (name, loc) = self.expect_identifier("after type name")?;

        if self.match_token(TokenKind::LParen) {
            let function = self.parse_function_rest(decl_type, name, loc)?;
            return Ok(vec![function]);
        }

        self.parse_variable_rest(decl_type, name, loc)
    }

    /// Parse type: int | float | void
    pub(crate) fn parse_type(&mut self) -> Result<BaseType, ParseError> {
        let base = match self.peek_kind() {
            TokenKind::Int => BaseType::Int,
            TokenKind::Float => BaseType::Float,
            TokenKind::Void => BaseType::Void,
            _ => {
                return Err(self.error(
                    &[TokenKind::Int, TokenKind::Float, TokenKind::Void],
                    "as type name",
                ));
            }
        };
        self.advance();
        Ok(base)
    }

    /// Parse the rest of a function after `type name (`
    fn parse_function_rest(
        &mut self,
        return_type: BaseType,
        name: String,
        location: SourceLocation,
    ) -> Result<Stmt, ParseError> {
        let params = self.parse_parameter_list()?;

        self.expect_rparen("after parameters")?;
        self.expect_lbrace("before function body")?;

        let body = self.nested("function", Self::parse_block_statements)?;

        self.expect_rbrace("after function body")?;

        Ok(Stmt::FuncDecl {
            name,
            return_type,
            params,
            body,
            location,
        })
    }

    /// Parse parameter list: type name, type name, ...
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if !self.is_type_keyword() {
            return Ok(params);
        }

        loop {
            let param_type = self.parse_type()?;
            let (name, location) = self.expect_identifier("as parameter name")?;
            params.push(Param {
                name,
                param_type,
                location,
            });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse the rest of a variable declaration after `type name`
    fn parse_variable_rest(
        &mut self,
        var_type: BaseType,
        first_name: String,
        first_location: SourceLocation,
    ) -> Result<Vec<Stmt>, ParseError> {
        let mut decls = Vec::new();
        let mut name = first_name;
        let mut location = first_location;

        loop {
            let init = if self.match_token(TokenKind::Assign) {
                Some(Box::new(self.parse_expression()?))
            } else {
                None
            };

            decls.push(Stmt::VarDecl {
                name,
                var_type,
                init,
                location,
            });

            if !self.match_token(TokenKind::Comma) {
                break;
            }

            (name, location) = self.expect_identifier("after ','")?;
        }

        self.expect_semicolon("after variable declaration")?;

        Ok(decls)
    }
}
