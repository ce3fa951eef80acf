use std::env;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{event, Level};
use crate::config::Config;
use crate::display::{DisplaySink, PlainSink, TerminalSink};
use crate::errors::*;
use crate::grammar::{language_for_path, SyntaxLibrary};
use crate::highlight::{Highlighter, Summary};
use crate::theme::ThemeLibrary;

pub const USAGE: &str = "Usage: shcat <filename>";

/// How a run ended.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Usage,
    Version,
    NotFound(PathBuf),
    Highlighted(Summary),
}

/// Runs the command line with `args` (excluding the program name),
/// writing everything user-facing to `out`. The writer is flushed before
/// returning, and a failed flush fails the run.
pub fn run<I, W>(args: I, config: &Config, out: &mut W) -> Result<Outcome>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let outcome = execute(args, config, out);
    out.flush()?;

    outcome
}

fn execute<I, W>(args: I, config: &Config, out: &mut W) -> Result<Outcome>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let path = match args.into_iter().next() {
        None => {
            writeln!(out, "{}", USAGE)?;
            return Ok(Outcome::Usage)
        },
        Some(arg) => match arg.as_str() {
            "-h" | "--help" => {
                writeln!(out, "{}", USAGE)?;
                return Ok(Outcome::Usage)
            },
            "-V" | "--version" => {
                writeln!(out, "shcat {}", env!("CARGO_PKG_VERSION"))?;
                return Ok(Outcome::Version)
            },
            _ => absolute_path(Path::new(&arg))?,
        }
    };

    if !path.is_file() {
        writeln!(out, "{}", Error::from(ErrorKind::FileNotFound(path.display().to_string())))?;
        return Ok(Outcome::NotFound(path))
    }

    let summary = highlight_file(&path, config, out)?;
    Ok(Outcome::Highlighted(summary))
}

fn highlight_file<W: Write>(path: &Path, config: &Config, out: &mut W) -> Result<Summary> {
    let syntaxes = SyntaxLibrary::new();
    let theme = ThemeLibrary::new().theme(&config.theme)?;
    event!(Level::DEBUG, "Using theme {}", config.theme);

    let input = BufReader::new(File::open(path)?);
    let highlighter = Highlighter::for_language(&syntaxes, language_for_path(path), &theme);
    if !highlighter.has_grammar() {
        event!(Level::DEBUG, "Writing {} without highlighting", path.display());
    }

    let mut sink: Box<dyn DisplaySink + '_> = if config.color {
        Box::new(TerminalSink::new(&mut *out))
    } else {
        Box::new(PlainSink::new(&mut *out))
    };

    highlighter.run(input, &mut sink)
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
