/// The lexer takes the source input, mapping it into a sequence of tokens.
pub mod lexer;

/// The parser drains a sequence of tokens, mapping it into an AST.
pub mod parser;

/// The code generator walks the AST and emits source for a target language.
pub mod codegen;

pub mod ast;
pub mod error;
pub mod token;

pub mod util {
    pub mod fmt;
    #[cfg(test)]
    pub(crate) mod test_utils;
}

pub use crate::{codegen::Target, error::Error};

/// Compiles a whole source file for the provided target.
///
/// The source is lexed, parsed and generated in that order; the first error
/// aborts the compilation and no partial output is produced.
pub fn compile(src: &str, target: Target) -> Result<String, Error> {
    let tokens = lexer::lex_in_new(src);
    let program = parser::parse_program(tokens)?;
    let code = codegen::generate(target, &program)?;
    Ok(code)
}

/// Like [`compile`], but selects the target by name. Unknown names are
/// rejected before the source is looked at.
pub fn compile_for(src: &str, target: &str) -> Result<String, Error> {
    let target = target.parse::<Target>()?;
    compile(src, target)
}
