use std::io::{self, Write};

use anyhow::{Context, Result};

use molgraph_forge::io::smiles;
use molgraph_forge::{build_vocabulary, encode};

use crate::cli::EncodeArgs;
use crate::display::{Context as DisplayContext, print_vocabulary};
use crate::io::read_vocabulary;

pub fn run_encode(args: EncodeArgs, ctx: DisplayContext) -> Result<()> {
    let mut molecule = smiles::read(&args.smiles)?;
    if !args.no_hydrogens {
        molecule.add_hydrogens();
    }

    // without a saved vocabulary the molecule is its own corpus
    let vocab = match &args.vocab {
        Some(path) => read_vocabulary(path)?,
        None => build_vocabulary([&molecule]),
    };

    if ctx.interactive {
        print_vocabulary(&vocab);
    }

    let record = encode(&molecule, &vocab)
        .with_context(|| format!("Failed to encode '{}'", args.smiles))?;

    let json = if args.compact {
        serde_json::to_string(&record)
    } else {
        serde_json::to_string_pretty(&record)
    }
    .context("Failed to serialize record")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").context("Failed to write to stdout")?;
    Ok(())
}
