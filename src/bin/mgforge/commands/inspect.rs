use std::io::{self, Write};

use anyhow::{Context, Result};

use molgraph_forge::io::record::RecordReader;

use crate::cli::InspectArgs;
use crate::display::{Context as DisplayContext, print_record_summary};
use crate::io::read_vocabulary;

pub fn run_inspect(args: InspectArgs, ctx: DisplayContext) -> Result<()> {
    let vocab = args.vocab.as_deref().map(read_vocabulary).transpose()?;

    let path = args.file.display().to_string();
    let mut reader =
        RecordReader::open(&args.file).with_context(|| format!("Failed to open {path}"))?;

    // the whole file is decoded so a damaged tail is reported
    let mut sample = Vec::with_capacity(args.limit);
    let mut total = 0usize;
    while let Some(record) = reader
        .read_record()
        .with_context(|| format!("Failed to read {path}"))?
    {
        if sample.len() < args.limit {
            sample.push(record);
        }
        total += 1;
    }

    let mut stdout = io::stdout().lock();
    for record in &sample {
        let json = serde_json::to_string(record).context("Failed to serialize record")?;
        writeln!(stdout, "{json}").context("Failed to write to stdout")?;
    }

    if ctx.interactive {
        print_record_summary(&path, &sample, total, vocab.as_ref());
    }
    Ok(())
}
