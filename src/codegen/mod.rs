use std::{fmt, str::FromStr};

use crate::{ast::Program, token::Position};

pub mod javascript;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Generates the program for the provided target.
pub fn generate(target: Target, program: &Program) -> Result<String> {
    match target {
        Target::JavaScript => javascript::Generator::new().generate(program),
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    JavaScript,
}

impl Target {
    pub const ALL: &[Target] = &[Target::JavaScript];

    pub const fn name(self) -> &'static str {
        match self {
            Target::JavaScript => "JavaScript",
        }
    }

    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Target::JavaScript => &["js"],
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .iter()
            .copied()
            .find(|target| {
                target.name().eq_ignore_ascii_case(s)
                    || target.aliases().iter().any(|a| a.eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| UnknownTarget(Box::from(s)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown target language: {0}")]
pub struct UnknownTarget(pub Box<str>);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The tree holds a construct the target has no rendering for.
    #[error("Not implemented for {target}: {construct} at {pos}")]
    Unsupported {
        target: Target,
        construct: String,
        pos: Position,
    },
}
