use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use ooc::{lexer, parser, util::fmt::print_program_string};

mod target;

#[derive(Parser)]
#[command(version, about = "Compiles oo programs", long_about = None)]
struct Cli {
    /// Source file to compile.
    input: PathBuf,

    /// Where to write the result. Prints to stdout when omitted.
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = target::Target::JavaScript)]
    target: target::Target,

    /// Stop after the given stage and print what it produced.
    #[arg(long, value_enum, default_value_t = Emit::Code)]
    emit: Emit,

    /// Print full error details instead of just the message.
    #[arg(long, env = "DEBUG")]
    debug: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
enum Emit {
    Tokens,
    Tree,
    Code,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if cli.debug {
                eprintln!("{error:?}");
                if let Some(error) = error.downcast_ref::<ooc::Error>() {
                    eprintln!("{error:#?}");
                }
            } else {
                eprintln!("{error:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let output = match cli.emit {
        Emit::Tokens => lexer::lex_in_new(&src)
            .iter()
            .map(|token| format!("{token:?}\n"))
            .collect::<String>(),
        Emit::Tree => {
            let program = parser::parse_program(lexer::lex_in_new(&src)).map_err(ooc::Error::from)?;
            print_program_string(&program)
        }
        Emit::Code => ooc::compile(&src, cli.target.into())?,
    };

    match &cli.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
