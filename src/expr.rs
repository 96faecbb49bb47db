use crate::token::Token;
use crate::value::object::Object;

/// Expr is one of the two node types in the Abstract Syntax Tree (AST).
///
/// Variable, Assign, This and Super carry an `id` handed out by the parser.
/// The resolver records the lexical depth of each such node in a side table
/// keyed by that id, and the interpreter reads the table back when it walks
/// the tree. Ids stay valid when the evaluator shares sub-trees between
/// function values, which raw node addresses would not.
#[derive(Clone, Debug)]
pub enum Expr {
    /// A literal already carries its runtime value, produced by the parser
    /// straight from the token.
    Literal { value: Object },

    Grouping { expression: Box<Expr> },

    Unary { operator: Token, right: Box<Expr> },

    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// `and` / `or`. Kept apart from Binary because the operands are
    /// evaluated lazily.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Variable { id: usize, name: Token },

    Assign {
        id: usize,
        name: Token,
        value: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        /// The closing parenthesis, kept for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// A property access, `object.name`.
    Get { object: Box<Expr>, name: Token },

    /// A property write, `object.name = value`.
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    This { id: usize, keyword: Token },

    /// `super.method`.
    Super {
        id: usize,
        keyword: Token,
        method: Token,
    },
}
