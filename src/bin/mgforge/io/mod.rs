use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};

use molgraph_forge::io::{decompress, open_dataset};
use molgraph_forge::{TypeVocabulary, io::vocab};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Returns `true` if stdin is a terminal (interactive).
pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

/// Opens a dataset file or stdin, gunzipping either when needed.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) => open_dataset(p)
            .with_context(|| format!("Failed to open input file: {}", p.display())),
        None => decompress(BufReader::new(io::stdin())).context("Failed to read from stdin"),
    }
}

pub fn read_vocabulary(path: &Path) -> Result<TypeVocabulary> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open vocabulary file: {}", path.display()))?;
    vocab::read(BufReader::new(file))
        .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))
}
