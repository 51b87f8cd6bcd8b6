use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Box<str>,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<Box<str>>, pos: Position) -> Token {
        Token {
            kind,
            value: value.into(),
            pos,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?}, {:?}, {})", self.kind, self.value, self.pos)
    }
}

/// A 1-based source position.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Position {
        Position { line, column }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({self})")
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
    /// A lexeme with an uppercase letter anywhere in it, like `MAX` or `myVar`.
    Constant,
    /// An uppercase letter followed by a word character. Every such lexeme is
    /// classified as a constant first, so the lexer never produces this kind.
    Class,

    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
    /// `#`
    Comment,
    /// A horizontal tab. Only meaningful at the start of a line.
    Indent,
    /// `\n`
    Line,
    /// The `"` delimiter. String contents are separate tokens.
    String,
    Space,
    /// Any other non-word character, such as `=`.
    Symbol,
}

impl TokenKind {
    /// The name used for this kind in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Constant => "constant",
            TokenKind::Class => "class",
            TokenKind::ParenOpen => "parenOpen",
            TokenKind::ParenClose => "parenClose",
            TokenKind::BracketOpen => "bracketOpen",
            TokenKind::BracketClose => "bracketClose",
            TokenKind::BraceOpen => "braceOpen",
            TokenKind::BraceClose => "braceClose",
            TokenKind::Comment => "comment",
            TokenKind::Indent => "indent",
            TokenKind::Line => "line",
            TokenKind::String => "string",
            TokenKind::Space => "space",
            TokenKind::Symbol => "symbol",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Characters that end a lexeme and become tokens of their own. Anything not
/// listed here (and not a word character) is a [`TokenKind::Symbol`].
pub static BREAKS: phf::Map<char, TokenKind> = phf::phf_map! {
    '(' => TokenKind::ParenOpen,
    ')' => TokenKind::ParenClose,
    '[' => TokenKind::BracketOpen,
    ']' => TokenKind::BracketClose,
    '{' => TokenKind::BraceOpen,
    '}' => TokenKind::BraceClose,
    '#' => TokenKind::Comment,
    '\t' => TokenKind::Indent,
    '\n' => TokenKind::Line,
    '"' => TokenKind::String,
    ' ' => TokenKind::Space,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Keyword {
    If,
    Print,
    Return,
    True,
    False,
}

/// Keywords are plain identifiers to the lexer; the parser looks them up here.
pub static KEYWORDS: phf::Map<&'static str, Keyword> = phf::phf_map! {
    "if" => Keyword::If,
    "print" => Keyword::Print,
    "return" => Keyword::Return,
    "true" => Keyword::True,
    "false" => Keyword::False,
};
