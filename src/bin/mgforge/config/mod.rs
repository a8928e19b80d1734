use std::fs;

use anyhow::{Context, Result};

use molgraph_forge::BuildConfig;
use molgraph_forge::pipeline::load_config;

use crate::cli::BuildArgs;

/// Loads the configured defaults and applies command-line overrides on top.
pub fn build_config(args: &BuildArgs) -> Result<BuildConfig> {
    let custom = match &args.io.config {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?,
        ),
        None => None,
    };
    let mut config = load_config(custom.as_deref()).context("Invalid build configuration")?;

    if let Some(field) = &args.fields.smiles_field {
        config.input.smiles_field = field.clone();
    }
    if !args.fields.labels.is_empty() {
        config.input.label_fields = args.fields.labels.clone();
    }
    if args.fields.no_hydrogens {
        config.add_hydrogens = false;
    }

    if let Some(f) = args.split.test_fraction {
        config.split.test_fraction = f;
    }
    if let Some(f) = args.split.valid_fraction {
        config.split.valid_fraction = f;
    }
    if args.split.seed.is_some() {
        config.split.seed = args.split.seed;
    }

    Ok(config)
}
