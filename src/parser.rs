use std::collections::VecDeque;

use crate::{
    ast::{Expr, ExprKind, Function, Ident, Program, Stmt},
    token::{Keyword, Position, Token, TokenKind, KEYWORDS},
};

type Result<T, E = Error> = std::result::Result<T, E>;

/// Parses a whole program. The first syntax error aborts parsing.
pub fn parse_program(tokens: impl Into<VecDeque<Token>>) -> Result<Program> {
    Parser::new(tokens.into()).parse_program()
}

/// Parses a single expression, optionally followed by one line break.
pub fn parse_expr(tokens: impl Into<VecDeque<Token>>) -> Result<Expr> {
    let mut p = Parser::new(tokens.into());
    let expr = p.parse_expr()?;
    p.take(TokenKind::Line);
    match p.tokens.pop_front() {
        None => Ok(expr),
        Some(token) => Err(Error::unexpected(token, &[])),
    }
}

struct Parser {
    tokens: VecDeque<Token>,
}

impl Parser {
    fn parse_program(&mut self) -> Result<Program> {
        let mut functions = Vec::with_capacity(4);
        while !self.tokens.is_empty() {
            use TokenKind::*;
            let token = self.expect(&[Comment, Identifier, Line])?;
            match token.kind {
                Comment => self.skip_comment()?,
                Identifier => functions.push(self.parse_function(token)?),
                Line => (),
                _ => unreachable!(),
            }
        }
        Ok(Program { functions })
    }

    /// Discards everything up to and including the next line break.
    fn skip_comment(&mut self) -> Result<()> {
        while !self.shift(&[TokenKind::Line])?.is(TokenKind::Line) {}
        Ok(())
    }

    fn parse_function(&mut self, name: Token) -> Result<Function> {
        self.consume(TokenKind::ParenOpen)?;
        self.consume(TokenKind::ParenClose)?;
        self.consume(TokenKind::Space)?;
        self.consume(TokenKind::BraceOpen)?;
        self.consume(TokenKind::Line)?;
        let statements = self.parse_block(0)?;
        // The block stops right after its `}`; the line break is ours.
        self.consume(TokenKind::Line)?;
        Ok(Function {
            name: ident(name),
            statements,
        })
    }

    /// Parses statements indented by `depth + 1` tabs up to a closing brace
    /// indented by `depth` tabs. Does **NOT** consume the line break after the
    /// brace.
    fn parse_block(&mut self, depth: usize) -> Result<Vec<Stmt>> {
        let mut statements = Vec::new();
        loop {
            while self.take(TokenKind::Line) {}
            for _ in 0..depth {
                self.consume(TokenKind::Indent)?;
            }
            let token = self.expect(&[TokenKind::BraceClose, TokenKind::Indent])?;
            if token.is(TokenKind::BraceClose) {
                return Ok(statements);
            }
            statements.push(self.parse_stmt(depth)?);
            self.consume(TokenKind::Line)?;
        }
    }

    fn parse_stmt(&mut self, depth: usize) -> Result<Stmt> {
        let token = self.expect(&[TokenKind::Identifier])?;
        match KEYWORDS.get(&*token.value) {
            Some(Keyword::If) => {
                self.consume(TokenKind::Space)?;
                self.consume(TokenKind::ParenOpen)?;
                let condition = self.parse_expr()?;
                self.consume(TokenKind::ParenClose)?;
                self.consume(TokenKind::Space)?;
                self.consume(TokenKind::BraceOpen)?;
                self.consume(TokenKind::Line)?;
                let body = self.parse_block(depth + 1)?;
                Ok(Stmt::If { condition, body })
            }
            Some(Keyword::Print) => {
                self.consume(TokenKind::Space)?;
                Ok(Stmt::Print(self.parse_expr()?))
            }
            Some(Keyword::Return) => {
                self.consume(TokenKind::Space)?;
                Ok(Stmt::Return(self.parse_expr()?))
            }
            _ => {
                self.unshift(token);
                Ok(Stmt::Expr(self.parse_expr()?))
            }
        }
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        use TokenKind::*;
        let token = self.expect(&[Identifier, Number, String])?;
        let pos = token.pos;
        let kind = match token.kind {
            Identifier => return self.parse_ident_expr(token),
            Number => ExprKind::Number(token.value),
            String => ExprKind::String(self.parse_string()?),
            _ => unreachable!(),
        };
        Ok(Expr { kind, pos })
    }

    /// An expression starting with an identifier needs one token of lookahead
    /// to tell variables, calls and binary forms apart.
    fn parse_ident_expr(&mut self, token: Token) -> Result<Expr> {
        use TokenKind::*;
        let pos = token.pos;
        match KEYWORDS.get(&*token.value) {
            Some(Keyword::True) => return Ok(Expr::new(ExprKind::Bool(true), pos)),
            Some(Keyword::False) => return Ok(Expr::new(ExprKind::Bool(false), pos)),
            _ => (),
        }

        let name = ident(token);
        let next = self.expect(&[Line, ParenClose, ParenOpen, Space])?;
        let kind = match next.kind {
            // The terminator belongs to the caller.
            Line | ParenClose => {
                self.unshift(next);
                ExprKind::Variable(name)
            }
            ParenOpen => {
                self.consume(ParenClose)?;
                ExprKind::Call(name)
            }
            Space => {
                let symbol = self.consume(Symbol)?;
                self.consume(Space)?;
                let rhs = Box::new(self.parse_expr()?);
                if &*symbol.value == "=" {
                    ExprKind::Assignment {
                        target: name,
                        value: rhs,
                    }
                } else {
                    ExprKind::Operation {
                        operator: symbol.value,
                        lhs: name,
                        rhs,
                    }
                }
            }
            _ => unreachable!(),
        };
        Ok(Expr::new(kind, pos))
    }

    /// Concatenates every token up to the closing delimiter. The opening one
    /// was already consumed.
    fn parse_string(&mut self) -> Result<Box<str>> {
        let mut buf = String::new();
        loop {
            let token = self.shift(&[TokenKind::String])?;
            if token.is(TokenKind::String) {
                return Ok(buf.into_boxed_str());
            }
            buf.push_str(&token.value);
        }
    }
}

impl Parser {
    fn new(tokens: VecDeque<Token>) -> Parser {
        Parser { tokens }
    }

    /// Removes the current token, failing if the input is exhausted.
    fn shift(&mut self, expected: &[TokenKind]) -> Result<Token> {
        self.tokens
            .pop_front()
            .ok_or_else(|| Error::UnexpectedEof {
                expected: Box::from(expected),
            })
    }

    /// Puts back a token that was read ahead.
    fn unshift(&mut self, token: Token) {
        self.tokens.push_front(token);
    }

    /// Removes the current token if it is one of the provided kinds. If not,
    /// returns an error.
    fn expect(&mut self, expected: &[TokenKind]) -> Result<Token> {
        let token = self.shift(expected)?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            Err(Error::unexpected(token, expected))
        }
    }

    fn consume(&mut self, expected: TokenKind) -> Result<Token> {
        self.expect(&[expected])
    }

    /// Advances if the current token matches the provided one, returning true.
    /// If not, returns false and doesn't advance.
    fn take(&mut self, expected: TokenKind) -> bool {
        let matches = self.tokens.front().is_some_and(|t| t.is(expected));
        if matches {
            self.tokens.pop_front();
        }
        matches
    }
}

fn ident(token: Token) -> Ident {
    Ident {
        name: token.value,
        pos: token.pos,
    }
}

impl Expr {
    fn new(kind: ExprKind, pos: Position) -> Expr {
        Expr { kind, pos }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unexpected {actual} \"{}\" at {pos}", .value.escape_debug())]
    Unexpected {
        actual: TokenKind,
        value: Box<str>,
        pos: Position,
        expected: Box<[TokenKind]>,
    },
    #[error("Unexpected end of input")]
    UnexpectedEof { expected: Box<[TokenKind]> },
}

impl Error {
    fn unexpected(token: Token, expected: &[TokenKind]) -> Error {
        Error::Unexpected {
            actual: token.kind,
            value: token.value,
            pos: token.pos,
            expected: Box::from(expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::util::test_utils::tree_tests;

    tree_tests!(
        use parser;

        fn test_empty_program() {
            let program = "";
            let tree_ok = "";
        }

        fn test_comments_and_blank_lines_only() {
            let program = "# one\n\n# two (with symbols!)\n\n";
            let tree_ok = "";
        }

        fn test_function_without_statements() {
            let program = "quiet() {\n}\n";
            let tree_ok = "function quiet (1:1)";
        }

        fn test_hello_world() {
            let program = "main() {\n\tprint \"Hello, World!\"\n}\n";
            let tree_ok = r#"
                function main (1:1)
                  print
                    string "Hello, World!" (2:8)
            "#;
        }

        fn test_assignments_in_order() {
            let program = "main() {\n\ta = 1\n\tb = a\n\tprint b\n}\n";
            let tree_ok = "
                function main (1:1)
                  expr
                    assignment a (2:2)
                      number 1 (2:6)
                  expr
                    assignment b (3:2)
                      variable a (3:6)
                  print
                    variable b (4:8)
            ";
        }

        fn test_functions_keep_declaration_order() {
            let program = "b() {\n}\n\na() {\n\treturn b()\n}\n";
            let tree_ok = "
                function b (1:1)
                function a (4:1)
                  return
                    call b (5:9)
            ";
        }

        fn test_nested_if() {
            let program = "\
main() {
\tif (true) {
\t\tif (ready) {
\t\t\tprint 1
\t\t}
\t\treturn false
\t}
}
";
            let tree_ok = "
                function main (1:1)
                  if
                    bool true (2:6)
                    body
                      if
                        variable ready (3:7)
                        body
                          print
                            number 1 (4:10)
                      return
                        bool false (6:10)
            ";
        }

        fn test_blank_lines_in_body() {
            let program = "main() {\n\n\tprint x\n\n}\n";
            let tree_ok = "
                function main (1:1)
                  print
                    variable x (3:8)
            ";
        }

        fn test_chained_assignment() {
            let program = "main() {\n\ta = b = \"x y\"\n}\n";
            let tree_ok = r#"
                function main (1:1)
                  expr
                    assignment a (2:2)
                      assignment b (2:6)
                        string "x y" (2:10)
            "#;
        }

        fn test_other_symbols_parse_as_operations() {
            let program = "main() {\n\treturn a + 1\n}\n";
            let tree_ok = "
                function main (1:1)
                  return
                    operation a + (2:9)
                      number 1 (2:13)
            ";
        }

        fn test_string_keeps_inner_spacing() {
            let expr = "\"  spaced\t(out) # not a comment\"\n";
            let tree_ok = r#"string "  spaced\t(out) # not a comment" (1:1)"#;
        }

        fn test_number_is_not_validated() {
            let expr = "0x1f\n";
            let tree_ok = "number 0x1f (1:1)";
        }

        fn test_error_unclosed_function() {
            let program = "main() {\n\tprint 1\n";
            let expected_errors = &["Unexpected end of input"];
        }

        fn test_error_missing_trailing_line_break() {
            let program = "main() {\n}";
            let expected_errors = &["Unexpected end of input"];
        }

        fn test_error_unclosed_string() {
            let program = "main() {\n\tprint \"oops\n}\n";
            let expected_errors = &["Unexpected end of input"];
        }

        fn test_error_comment_without_line_break() {
            let program = "# trailing";
            let expected_errors = &["Unexpected end of input"];
        }

        fn test_error_missing_space_before_brace() {
            let program = "main(){\n}\n";
            let expected_errors = &[r#"Unexpected braceOpen "{" at 1:7"#];
        }

        fn test_error_wrong_indentation() {
            let program = "main() {\n\tif (true) {\n\tprint 1\n\t}\n}\n";
            let expected_errors = &[r#"Unexpected identifier "print" at 3:2"#];
        }

        fn test_error_constant_at_top_level() {
            let program = "MAIN() {\n}\n";
            let expected_errors = &[r#"Unexpected constant "MAIN" at 1:1"#];
        }

        fn test_error_capitalized_statement() {
            let program = "main() {\n\tPoint = 1\n}\n";
            let expected_errors = &[r#"Unexpected constant "Point" at 2:2"#];
        }

        fn test_error_camel_case_assignment() {
            let program = "main() {\n\tmyVar = 1\n}\n";
            let expected_errors = &[r#"Unexpected constant "myVar" at 2:2"#];
        }

        fn test_error_line_value_is_escaped() {
            let program = "main() {\n\tprint\n}\n";
            let expected_errors = &[r#"Unexpected line "\n" at 2:7"#];
        }

        fn test_error_call_with_arguments() {
            let program = "main() {\n\tf(x)\n}\n";
            let expected_errors = &[r#"Unexpected identifier "x" at 2:4"#];
        }
    );

    #[test]
    fn test_error_carries_expected_kinds() {
        use crate::{lexer::lex_in_new, parser::Error, token::TokenKind};
        use pretty_assertions::assert_eq;

        let error = super::parse_program(lex_in_new("main() {\n\t= 1\n}\n")).unwrap_err();
        let Error::Unexpected { expected, .. } = error else {
            panic!("expected an unexpected-token error, got {error:?}");
        };
        assert_eq!(&*expected, &[TokenKind::Identifier]);
    }
}
