use std::io::Write;

use crate::ast::*;

const INDENT_WIDTH: usize = 2;

pub fn print_program_string(program: &Program) -> String {
    let mut buf = Vec::with_capacity(1024);
    print_program(&mut buf, program).unwrap();
    String::from_utf8(buf).unwrap()
}

pub fn print_expr_string(expr: &Expr) -> String {
    let mut buf = Vec::with_capacity(512);
    print_expr(&mut buf, 0, expr).unwrap();
    String::from_utf8(buf).unwrap()
}

pub fn print_program(w: &mut impl Write, program: &Program) -> std::io::Result<()> {
    for function in &program.functions {
        print_function(w, 0, function)?;
    }
    Ok(())
}

fn print_function(w: &mut impl Write, i: usize, function: &Function) -> std::io::Result<()> {
    sp(w, i)?;
    let Ident { name, pos } = &function.name;
    writeln!(w, "function {name} ({pos})")?;
    for stmt in &function.statements {
        print_stmt(w, i + 1, stmt)?;
    }
    Ok(())
}

fn print_stmt(w: &mut impl Write, i: usize, stmt: &Stmt) -> std::io::Result<()> {
    sp(w, i)?;
    match stmt {
        Stmt::If { condition, body } => {
            writeln!(w, "if")?;
            print_expr(w, i + 1, condition)?;
            if !body.is_empty() {
                sp(w, i + 1)?;
                writeln!(w, "body")?;
                for stmt in body {
                    print_stmt(w, i + 2, stmt)?;
                }
            }
        }
        Stmt::Print(expr) => {
            writeln!(w, "print")?;
            print_expr(w, i + 1, expr)?;
        }
        Stmt::Return(expr) => {
            writeln!(w, "return")?;
            print_expr(w, i + 1, expr)?;
        }
        Stmt::Expr(expr) => {
            writeln!(w, "expr")?;
            print_expr(w, i + 1, expr)?;
        }
    }
    Ok(())
}

pub fn print_expr(w: &mut impl Write, i: usize, expr: &Expr) -> std::io::Result<()> {
    sp(w, i)?;
    let pos = expr.pos;
    match &expr.kind {
        ExprKind::Bool(bool) => writeln!(w, "bool {bool} ({pos})")?,
        ExprKind::Number(number) => writeln!(w, "number {number} ({pos})")?,
        ExprKind::String(string) => writeln!(w, "string {string:?} ({pos})")?,
        ExprKind::Variable(ident) => writeln!(w, "variable {} ({pos})", ident.name)?,
        ExprKind::Call(ident) => writeln!(w, "call {} ({pos})", ident.name)?,
        ExprKind::Assignment { target, value } => {
            writeln!(w, "assignment {} ({pos})", target.name)?;
            print_expr(w, i + 1, value)?;
        }
        ExprKind::Operation { operator, lhs, rhs } => {
            writeln!(w, "operation {} {operator} ({pos})", lhs.name)?;
            print_expr(w, i + 1, rhs)?;
        }
    }
    Ok(())
}

fn sp(w: &mut impl Write, i: usize) -> std::io::Result<()> {
    write!(w, "{:width$}", "", width = i * INDENT_WIDTH)
}
