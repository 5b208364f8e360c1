use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::engine::Engine;

/// The two required flags: `-H` names the history file to replay and `-m`
/// names the file to write the chosen move to.
#[derive(Debug, PartialEq, Eq)]
pub struct Options {
    pub history_path: PathBuf,
    pub move_path: PathBuf,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("expected: -H <path to input history file> -m <path to output move file>")]
pub struct UsageError;

/// Parses the command-line arguments (without the program name). Any shape
/// other than the two flag pairs, in either order, is a usage error.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Options, UsageError> {
    let mut history_path = None;
    let mut move_path = None;

    let mut args = args.iter();
    while let Some(flag) = args.next() {
        let value = args.next().ok_or(UsageError)?.as_ref();
        match flag.as_ref() {
            "-H" => history_path = Some(PathBuf::from(value)),
            "-m" => move_path = Some(PathBuf::from(value)),
            _ => return Err(UsageError),
        }
    }

    match (history_path, move_path) {
        (Some(history_path), Some(move_path)) => Ok(Options { history_path, move_path }),
        _ => Err(UsageError),
    }
}

/// Serves one move request: replay the history, pick a move, write it out.
/// Returns an error only for output failures; a missing history file falls
/// back to the starting position and a finished game simply writes nothing.
pub fn run(options: &Options) -> anyhow::Result<()> {
    let mut engine = Engine::new();

    match fs::read_to_string(&options.history_path) {
        Ok(text) => engine.load_history(&text),
        Err(err) => {
            warn!(
                path = %options.history_path.display(),
                %err,
                "history file not readable, assuming starting position"
            );
        }
    }

    let Some(mv) = engine.choose_move() else {
        // Checkmate or stalemate: exit cleanly and leave the output as is.
        return Ok(());
    };

    write_move(&options.move_path, &mv.to_string())?;
    info!(%mv, path = %options.move_path.display(), "wrote move");

    Ok(())
}

/// Writes the move in coordinate notation, newline terminated, overwriting
/// any previous contents.
fn write_move(path: &Path, notation: &str) -> anyhow::Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("could not open move file {}", path.display()))?;
    writeln!(file, "{notation}")
        .with_context(|| format!("could not write move file {}", path.display()))?;
    Ok(())
}

/// Prints the usage line to standard error.
pub fn print_usage(program: &str) {
    eprintln!("Usage: {program} -H <path to input history file> -m <path to output move file>");
}
