use anyhow::{Context, Result, bail};
use tracing::info;

use molgraph_forge::BuildConfig;
use molgraph_forge::io::jsonl::read_entries;
use molgraph_forge::pipeline::{self, PreparedDataset};

use crate::cli::BuildArgs;
use crate::config::build_config;
use crate::display::{
    Context as DisplayContext, Progress, print_corpus_summary, print_element_distribution,
    print_partitions, print_vocabulary,
};
use crate::io::{open_input, stdin_is_tty};

const TOTAL_STEPS: u8 = 5;

pub fn run_build(args: BuildArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: mgforge build -i <INPUT> -o <DIR> or pipe JSON lines via stdin."
        );
    }

    let config = build_config(&args)?;
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading dataset");
    let reader = open_input(args.io.input.as_deref())?;
    let entries = read_entries(reader, &config.input).context("Failed to read dataset entries")?;
    if entries.is_empty() {
        bail!("Input dataset is empty: no entries were found");
    }
    progress.complete_step("Reading dataset", &read_details(entries.len(), &config));

    progress.step("Parsing SMILES");
    let molecules = pipeline::parse_entries(&entries, config.add_hydrogens)?;
    progress.complete_step(
        "Parsing SMILES",
        &[if config.add_hydrogens {
            "Expand implicit hydrogens".to_string()
        } else {
            "Keep hydrogens implicit".to_string()
        }],
    );

    if ctx.interactive {
        print_corpus_summary(entries.len(), &molecules);
        print_element_distribution(&molecules);
    }

    progress.step("Building vocabulary and encoding");
    let vocabulary = pipeline::build_vocabulary(&molecules);
    let records = pipeline::encode_entries(&molecules, &vocabulary)?;
    progress.complete_step(
        "Building vocabulary and encoding",
        &[
            format!(
                "{} atom types, {} bond types",
                vocabulary.atom_types().len(),
                vocabulary.bond_types().len()
            ),
            format!("{} records", records.len()),
        ],
    );

    if ctx.interactive {
        print_vocabulary(&vocabulary);
    }

    progress.step("Partitioning");
    let partitions = pipeline::partition(records, &config.split)?;
    progress.complete_step(
        "Partitioning",
        &[
            format!(
                "test {:.0}%, validation {:.0}% of remainder",
                config.split.test_fraction * 100.0,
                config.split.valid_fraction * 100.0
            ),
            format!("seed {}", partitions.seed),
        ],
    );
    let seed = partitions.seed;
    info!(seed, "partitioned records");

    progress.step("Writing output");
    let prepared = PreparedDataset {
        vocabulary,
        partitions,
    };
    let written = pipeline::write_dataset(&args.io.output, &prepared).with_context(|| {
        format!(
            "Failed to write dataset to {}",
            args.io.output.display()
        )
    })?;
    progress.complete_step(
        "Writing output",
        &[format!("{}", args.io.output.display())],
    );

    if ctx.interactive {
        print_partitions(&written, seed);
    }

    progress.finish("Build complete");

    Ok(())
}

fn read_details(entries: usize, config: &BuildConfig) -> Vec<String> {
    vec![
        format!("{entries} entries"),
        format!("SMILES field '{}'", config.input.smiles_field),
        format!("Labels: {}", config.input.label_fields.join(", ")),
    ]
}
