use crate::{codegen, parser};

/// Every way a compilation can fail. All of them are fatal.
///
/// Lexing itself never fails: lexemes the grammar can't use (such as
/// constants) are reported by the parser as [`Error::Syntax`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] parser::Error),
    #[error(transparent)]
    UnsupportedConstruct(#[from] codegen::Error),
    #[error(transparent)]
    UnknownTarget(#[from] codegen::UnknownTarget),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile, compile_for, token::Position, Target};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_target_wins_over_syntax_errors() {
        let error = compile_for("}}} not a program", "Cobol").unwrap_err();
        assert_eq!(
            error,
            Error::UnknownTarget(codegen::UnknownTarget(Box::from("Cobol")))
        );
        assert_eq!(error.to_string(), "Unknown target language: Cobol");
    }

    #[test]
    fn test_syntax_error_message_is_forwarded() {
        let error = compile("main() {\n", Target::JavaScript).unwrap_err();
        assert!(matches!(error, Error::Syntax(_)));
        assert_eq!(error.to_string(), "Unexpected end of input");
    }

    #[test]
    fn test_unsupported_construct() {
        let error = compile("f() {\n\tx = y - 1\n}\n", Target::JavaScript).unwrap_err();
        let Error::UnsupportedConstruct(codegen::Error::Unsupported { pos, .. }) = error else {
            panic!("expected an unsupported construct, got {error:?}");
        };
        assert_eq!(pos, Position::new(2, 6));
    }
}
