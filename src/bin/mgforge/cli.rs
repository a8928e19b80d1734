use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mgforge",
    about = "Molecular graph dataset builder",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build train/valid/test record files from a JSON-lines SMILES dataset
    #[command(visible_alias = "b")]
    Build(BuildArgs),

    /// Encode a single SMILES string and print the record as JSON
    #[command(visible_alias = "e")]
    Encode(EncodeArgs),

    /// Summarize a record file and dump its first records
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
}

impl Command {
    pub fn quiet(&self) -> bool {
        match self {
            Command::Build(args) => args.io.quiet,
            Command::Encode(args) => args.quiet,
            Command::Inspect(args) => args.quiet,
        }
    }
}

/// Input and output locations for `build`.
#[derive(Args)]
pub struct BuildIoOptions {
    /// JSON-lines dataset, optionally gzip-compressed (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory receiving train_data, valid_data, test_data and vocab.json
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Build configuration TOML (defaults are built in)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Dataset Fields")]
pub struct FieldOptions {
    /// JSON field holding the SMILES string
    #[arg(long, value_name = "NAME")]
    pub smiles_field: Option<String>,

    /// Label field copied into each record, repeatable (replaces the configured list)
    #[arg(long = "label", value_name = "NAME", action = clap::ArgAction::Append)]
    pub labels: Vec<String>,

    /// Keep hydrogens implicit instead of adding them as atoms
    #[arg(long)]
    pub no_hydrogens: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Partitioning")]
pub struct SplitOptions {
    /// Fraction of the corpus held out for testing
    #[arg(long, value_name = "F")]
    pub test_fraction: Option<f64>,

    /// Fraction of the training pool held out for validation
    #[arg(long, value_name = "F")]
    pub valid_fraction: Option<f64>,

    /// Shuffle seed (random and reported if omitted)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub io: BuildIoOptions,

    #[command(flatten)]
    pub fields: FieldOptions,

    #[command(flatten)]
    pub split: SplitOptions,
}

#[derive(Args)]
pub struct EncodeArgs {
    /// SMILES string to encode
    #[arg(value_name = "SMILES")]
    pub smiles: String,

    /// Vocabulary file from a previous build (derived from the molecule if omitted)
    #[arg(long, value_name = "FILE")]
    pub vocab: Option<PathBuf>,

    /// Keep hydrogens implicit instead of adding them as atoms
    #[arg(long)]
    pub no_hydrogens: bool,

    /// Print the record on a single line
    #[arg(long)]
    pub compact: bool,

    /// Suppress the summary tables
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Record file written by `build`
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of records to print as JSON
    #[arg(short = 'n', long, value_name = "N", default_value = "3")]
    pub limit: usize,

    /// Vocabulary file used to name atom and bond types
    #[arg(long, value_name = "FILE")]
    pub vocab: Option<PathBuf>,

    /// Suppress the summary tables
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_collects_repeated_labels() {
        let cli = Cli::try_parse_from([
            "mgforge", "build", "-o", "out", "--label", "mu", "--label", "gap", "--seed", "7",
        ])
        .unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.fields.labels, vec!["mu", "gap"]);
        assert_eq!(args.split.seed, Some(7));
        assert!(args.io.input.is_none());
    }

    #[test]
    fn inspect_defaults_to_three_records() {
        let cli = Cli::try_parse_from(["mgforge", "inspect", "train_data"]).unwrap();
        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.limit, 3);
    }
}
