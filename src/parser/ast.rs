// AST (Abstract Syntax Tree) definitions for miniC

use std::fmt;

/// Unique identifier for expression nodes, used to key the inferred-type table
pub type NodeId = usize;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Types that can be written in a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Int,
    Float,
    Void,
}

impl BaseType {
    pub fn name(self) -> &'static str {
        match self {
            BaseType::Int => "int",
            BaseType::Float => "float",
            BaseType::Void => "void",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: BaseType,
    pub location: SourceLocation,
}

/// Declarations and statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        name: String,
        var_type: BaseType,
        init: Option<Box<Expr>>,
        location: SourceLocation,
    },
    FuncDecl {
        name: String,
        return_type: BaseType,
        params: Vec<Param>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    Block {
        statements: Vec<Stmt>,
        location: SourceLocation,
    },
    If {
        condition: Box<Expr>,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        location: SourceLocation,
    },
    While {
        condition: Box<Expr>,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    /// Omitted clauses are [`Expr::EmptyExpr`], never absent.
    For {
        init: Box<Expr>,
        condition: Box<Expr>,
        update: Box<Expr>,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    /// `return;` carries [`Expr::EmptyExpr`].
    Return {
        expr: Box<Expr>,
        location: SourceLocation,
    },
    Print {
        expr: Box<Expr>,
        location: SourceLocation,
    },
    ExprStmt {
        expr: Box<Expr>,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::VarDecl { location, .. }
            | Stmt::FuncDecl { location, .. }
            | Stmt::Block { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::For { location, .. }
            | Stmt::Return { location, .. }
            | Stmt::Print { location, .. }
            | Stmt::ExprStmt { location, .. } => *location,
        }
    }
}

/// Expressions
///
/// Every variant carries a [`NodeId`] so the analyzer can record its inferred
/// type without mutating the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        id: NodeId,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
        id: NodeId,
        location: SourceLocation,
    },
    Assign {
        name: String,
        value: Box<Expr>,
        id: NodeId,
        location: SourceLocation,
    },
    Var {
        name: String,
        id: NodeId,
        location: SourceLocation,
    },
    NumberLiteral {
        lexeme: String,
        id: NodeId,
        location: SourceLocation,
    },
    EmptyExpr {
        id: NodeId,
        location: SourceLocation,
    },
    FuncCall {
        name: String,
        args: Vec<Expr>,
        id: NodeId,
        location: SourceLocation,
    },
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::BinaryOp { id, .. }
            | Expr::UnaryOp { id, .. }
            | Expr::Assign { id, .. }
            | Expr::Var { id, .. }
            | Expr::NumberLiteral { id, .. }
            | Expr::EmptyExpr { id, .. }
            | Expr::FuncCall { id, .. } => *id,
        }
    }

    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::BinaryOp { location, .. }
            | Expr::UnaryOp { location, .. }
            | Expr::Assign { location, .. }
            | Expr::Var { location, .. }
            | Expr::NumberLiteral { location, .. }
            | Expr::EmptyExpr { location, .. }
            | Expr::FuncCall { location, .. } => *location,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Expr::EmptyExpr { .. })
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub nodes: Vec<Stmt>, // Global VarDecl and FuncDecl nodes, in source order
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

// Short one-line summaries used by verbose output.

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({} declarations)", self.nodes.len())
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Param({} {})", self.param_type, self.name)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::VarDecl {
                name,
                var_type,
                init,
                ..
            } => match init {
                Some(init) => {
                    write!(f, "VarDecl({} {}, init={})", var_type, name, init)
                }
                None => write!(f, "VarDecl({} {})", var_type, name),
            },
            Stmt::FuncDecl {
                name,
                return_type,
                params,
                ..
            } => write!(
                f,
                "FuncDecl({} {}, {} params)",
                return_type,
                name,
                params.len()
            ),
            Stmt::Block { statements, .. } => {
                write!(f, "Block({} statements)", statements.len())
            }
            Stmt::If { condition, .. } => write!(f, "If(cond={})", condition),
            Stmt::While { condition, .. } => {
                write!(f, "While(cond={})", condition)
            }
            Stmt::For {
                init, condition, ..
            } => write!(f, "For(init={}, cond={})", init, condition),
            Stmt::Return { expr, .. } => write!(f, "Return({})", expr),
            Stmt::Print { expr, .. } => write!(f, "Print({})", expr),
            Stmt::ExprStmt { expr, .. } => write!(f, "ExprStmt({})", expr),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::BinaryOp {
                op, left, right, ..
            } => write!(f, "BinaryOp({} {} {})", left, op.symbol(), right),
            Expr::UnaryOp { op, operand, .. } => {
                write!(f, "UnaryOp({}{})", op.symbol(), operand)
            }
            Expr::Assign { name, value, .. } => {
                write!(f, "Assign({} = {})", name, value)
            }
            Expr::Var { name, .. } => write!(f, "Var({})", name),
            Expr::NumberLiteral { lexeme, .. } => write!(f, "Num({})", lexeme),
            Expr::EmptyExpr { .. } => write!(f, "EmptyExpr()"),
            Expr::FuncCall { name, args, .. } => {
                write!(f, "FuncCall({}, {} args)", name, args.len())
            }
        }
    }
}
