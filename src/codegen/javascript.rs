use std::{
    fmt::{self, Write},
    format_args as f,
};

use crate::{
    ast::{Expr, ExprKind, Function, Program, Stmt},
    codegen::{Error, Result, Target},
};

const DEFAULT_CODE_CAPACITY: usize = 4 * 1024; // 4 KiB

/// Emits the program as a single immediately invoked function, so nothing
/// declared in it leaks into the global scope. When a `main` function exists,
/// a truthy return value from it becomes the process exit status.
pub struct Generator {
    code: String,
    depth: usize,
}

impl Generator {
    pub fn new() -> Generator {
        Generator {
            code: String::with_capacity(DEFAULT_CODE_CAPACITY),
            depth: 0,
        }
    }

    pub fn generate(mut self, program: &Program) -> Result<String> {
        self.out("(function () {");
        self.indented(|this| -> Result<()> {
            for function in &program.functions {
                this.g_function(function)?;
            }
            if program.has_main() {
                this.g_entry_point();
            }
            Ok(())
        })?;
        self.out("})();");
        Ok(self.code)
    }

    fn g_function(&mut self, function: &Function) -> Result<()> {
        self.out(f!("function {}() {{", function.name.name));
        self.indented(|this| this.g_stmts(&function.statements))?;
        self.out("}");
        self.out_line();
        Ok(())
    }

    fn g_entry_point(&mut self) {
        self.out("const mainReturn = main();");
        self.out_line();
        self.out("if (mainReturn) {");
        self.indented(|this| this.out("process.exit(mainReturn);"));
        self.out("}");
    }

    fn g_stmts(&mut self, stmts: &[Stmt]) -> Result<()> {
        stmts.iter().try_for_each(|stmt| self.g_stmt(stmt))
    }

    fn g_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::If { condition, body } => {
                let condition = render(condition)?;
                self.out(f!("if ({condition}) {{"));
                self.indented(|this| this.g_stmts(body))?;
                self.out("}");
            }
            Stmt::Print(value) => {
                let value = render(value)?;
                self.out(f!("console.log({value});"));
            }
            Stmt::Return(value) => {
                let value = render(value)?;
                self.out(f!("return {value};"));
            }
            Stmt::Expr(expr) => {
                let expr = render(expr)?;
                self.out(f!("{expr};"));
            }
        }
        Ok(())
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new()
    }
}

/// Renders an expression into a fresh string.
fn render(expr: &Expr) -> Result<String> {
    let mut buf = String::with_capacity(32);
    g_expr(&mut buf, expr)?;
    Ok(buf)
}

fn g_expr(w: &mut String, expr: &Expr) -> Result<()> {
    match &expr.kind {
        ExprKind::Bool(bool) => emit(w, f!("{bool}")),
        ExprKind::Number(number) => w.push_str(number),
        ExprKind::String(string) => g_string(w, string),
        ExprKind::Variable(ident) => w.push_str(&ident.name),
        ExprKind::Call(ident) => emit(w, f!("{}()", ident.name)),
        ExprKind::Assignment { target, value } => {
            emit(w, f!("{} = ", target.name));
            g_expr(w, value)?;
        }
        ExprKind::Operation { operator, .. } => {
            return Err(Error::Unsupported {
                target: Target::JavaScript,
                construct: format!("operator `{operator}`"),
                pos: expr.pos,
            });
        }
    }
    Ok(())
}

/// Writes a double quoted string literal. Backslashes pass through, so escape
/// sequences written in the source keep their meaning in the output.
fn g_string(w: &mut String, s: &str) {
    w.push('"');
    for c in s.chars() {
        match c {
            '"' => w.push_str(r#"\""#),
            '\n' => w.push_str(r"\n"),
            '\r' => w.push_str(r"\r"),
            '\t' => w.push_str(r"\t"),
            c => w.push(c),
        }
    }
    w.push('"');
}

fn emit(w: &mut String, f: fmt::Arguments<'_>) {
    w.write_fmt(f).expect("code emit should be infallible");
}

// Utility functions.
impl Generator {
    /// Prints a line at the current depth. Lines are separated, not
    /// terminated, so the output has no trailing line break.
    fn out(&mut self, f: impl fmt::Display) {
        if !self.code.is_empty() {
            self.code.push('\n');
        }
        for _ in 0..self.depth {
            self.code.push('\t');
        }
        emit(&mut self.code, f!("{f}"));
    }

    /// Prints an empty line.
    fn out_line(&mut self) {
        self.code.push('\n');
    }

    /// Runs `f` one level deeper.
    fn indented<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::lex_in_new, parser::parse_program, token::Position};
    use pretty_assertions::assert_eq;

    fn generate(src: &str) -> Result<String> {
        let program = parse_program(lex_in_new(src)).expect("failed to parse");
        Generator::new().generate(&program)
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(generate("").unwrap(), "(function () {\n})();");
    }

    #[test]
    fn test_functions_without_main() {
        let code = generate("a() {\n}\nb() {\n\treturn 1\n}\n").unwrap();
        let expected = concat!(
            "(function () {\n",
            "\tfunction a() {\n",
            "\t}\n",
            "\n",
            "\tfunction b() {\n",
            "\t\treturn 1;\n",
            "\t}\n",
            "\n",
            "})();",
        );
        assert_eq!(code, expected);
    }

    #[test]
    fn test_nested_if_indentation() {
        let src = "main() {\n\tif (ok()) {\n\t\tif (true) {\n\t\t\tprint \"deep\"\n\t\t}\n\t\tx = 2\n\t}\n\treturn x\n}\n";
        let expected = concat!(
            "(function () {\n",
            "\tfunction main() {\n",
            "\t\tif (ok()) {\n",
            "\t\t\tif (true) {\n",
            "\t\t\t\tconsole.log(\"deep\");\n",
            "\t\t\t}\n",
            "\t\t\tx = 2;\n",
            "\t\t}\n",
            "\t\treturn x;\n",
            "\t}\n",
            "\n",
            "\tconst mainReturn = main();\n",
            "\n",
            "\tif (mainReturn) {\n",
            "\t\tprocess.exit(mainReturn);\n",
            "\t}\n",
            "})();",
        );
        assert_eq!(generate(src).unwrap(), expected);
    }

    #[test]
    fn test_string_escapes() {
        let mut buf = String::new();
        g_string(&mut buf, "a\tb\r\nc");
        assert_eq!(buf, r#""a\tb\r\nc""#);
    }

    #[test]
    fn test_source_escapes_pass_through() {
        let mut buf = String::new();
        g_string(&mut buf, r"a\tb\\c");
        assert_eq!(buf, r#""a\tb\\c""#);
    }

    #[test]
    fn test_chained_assignment() {
        let code = generate("f() {\n\ta = b = false\n}\n").unwrap();
        assert!(code.contains("\t\ta = b = false;\n"), "{code}");
    }

    #[test]
    fn test_operation_is_unsupported() {
        let error = generate("main() {\n\tprint a + 1\n}\n").unwrap_err();
        assert_eq!(
            error,
            Error::Unsupported {
                target: Target::JavaScript,
                construct: "operator `+`".to_string(),
                pos: Position::new(2, 8),
            }
        );
        assert_eq!(
            error.to_string(),
            "Not implemented for JavaScript: operator `+` at 2:8"
        );
    }
}
