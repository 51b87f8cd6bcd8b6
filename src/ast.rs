// program ::= (comment | function | '\n')*
// comment ::= '#' ... '\n'
// function ::= ID '(' ')' ' ' '{' '\n' block '\n'
// block ::= (INDENT* '\t' stmt '\n')* INDENT* '}'
// stmt ::= if ' ' '(' expr ')' ' ' '{' '\n' block
//        | print ' ' expr
//        | return ' ' expr
//        | expr
// expr ::= true | false
//        | ID
//        | ID '(' ')'
//        | ID ' ' SYMBOL ' ' expr
//        | NUMBER
//        | '"' ... '"'
//
// INDENT is one tab per enclosing `if`.

use crate::token::Position;

#[derive(Debug, PartialEq, Default)]
pub struct Program {
    /// In declaration order.
    pub functions: Vec<Function>,
}

impl Program {
    pub fn has_main(&self) -> bool {
        self.functions.iter().any(Function::is_main)
    }
}

#[derive(Debug, PartialEq)]
pub struct Function {
    pub name: Ident,
    pub statements: Vec<Stmt>,
}

impl Function {
    pub fn is_main(&self) -> bool {
        &*self.name.name == "main"
    }
}

#[derive(Debug, PartialEq)]
pub enum Stmt {
    If { condition: Expr, body: Vec<Stmt> },
    Print(Expr),
    Return(Expr),
    /// A bare expression, usually an assignment.
    Expr(Expr),
}

#[derive(Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

#[derive(Debug, PartialEq)]
pub enum ExprKind {
    Bool(bool),
    /// The literal text, unvalidated.
    Number(Box<str>),
    String(Box<str>),
    Variable(Ident),
    /// A call without arguments.
    Call(Ident),
    Assignment {
        target: Ident,
        value: Box<Expr>,
    },
    /// `lhs <symbol> rhs` for any symbol other than `=`. The grammar accepts
    /// it, but no target knows how to emit it yet.
    Operation {
        operator: Box<str>,
        lhs: Ident,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, PartialEq)]
pub struct Ident {
    pub name: Box<str>,
    pub pos: Position,
}
