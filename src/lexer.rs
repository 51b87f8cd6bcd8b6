use crate::token::{Position, Token, TokenKind, BREAKS};

pub const SUGGESTED_TOKENS_CAPACITY: usize = 1_024;

/// Lexes the provided string, producing the tokens into the provided buffer.
///
/// Lexing never fails. Lexemes the grammar has no use for still become tokens
/// and are rejected later by the parser.
pub fn lex(src: &str, tokens: &mut Vec<Token>) {
    Lexer::new(src, tokens).lex();
}

/// A convenience function that allocates a new buffer per lexed input and
/// returns it.
pub fn lex_in_new(src: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(SUGGESTED_TOKENS_CAPACITY);
    lex(src, &mut tokens);
    tokens
}

/// Word characters extend the current lexeme; every other character breaks it.
fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Classifies a complete lexeme.
///
/// The rules are checked in a fixed order and the first match wins. Each rule
/// looks for its pattern anywhere in the lexeme, so `a1` is a number and
/// `myVar` is a constant. Any lexeme the class rule would accept already has an
/// uppercase letter, which makes it a constant first.
fn classify(lexeme: &str) -> TokenKind {
    let bytes = lexeme.as_bytes();
    if bytes.iter().any(u8::is_ascii_digit) {
        TokenKind::Number
    } else if bytes.iter().any(u8::is_ascii_uppercase) {
        TokenKind::Constant
    } else if bytes
        .windows(2)
        .any(|pair| pair[0].is_ascii_uppercase() && is_word(char::from(pair[1])))
    {
        TokenKind::Class
    } else {
        TokenKind::Identifier
    }
}

struct Lexer<'src, 'tok> {
    iter: std::str::Chars<'src>,
    line: u32,
    column: u32,
    lexeme: String,
    lexeme_pos: Position,
    tokens: &'tok mut Vec<Token>,
}

impl Lexer<'_, '_> {
    /// Scans the source string until the input is exhausted.
    fn lex(mut self) {
        assert_eq!(self.tokens.len(), 0, "must pass clean tokens buffer");
        while let Some(c) = self.iter.next() {
            if is_word(c) {
                if self.lexeme.is_empty() {
                    self.lexeme_pos = self.pos();
                }
                self.lexeme.push(c);
            } else {
                self.flush_lexeme();
                let kind = BREAKS.get(&c).copied().unwrap_or(TokenKind::Symbol);
                let pos = self.pos();
                self.tokens.push(Token::new(kind, c.to_string(), pos));
                if c == '\n' {
                    self.line += 1;
                    self.column = 0;
                }
            }
            self.column += 1;
        }
        self.flush_lexeme();
    }

    /// Emits the pending lexeme, if any.
    fn flush_lexeme(&mut self) {
        if self.lexeme.is_empty() {
            return;
        }
        let kind = classify(&self.lexeme);
        let value = std::mem::take(&mut self.lexeme);
        self.tokens.push(Token::new(kind, value, self.lexeme_pos));
    }

    fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl Lexer<'_, '_> {
    fn new<'src, 'tok>(src: &'src str, tokens: &'tok mut Vec<Token>) -> Lexer<'src, 'tok> {
        Lexer {
            iter: src.chars(),
            line: 1,
            column: 1,
            lexeme: String::with_capacity(32),
            lexeme_pos: Position::new(1, 1),
            tokens,
        }
    }
}
