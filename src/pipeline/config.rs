use std::sync::OnceLock;

use serde::Deserialize;

use super::error::Error;
use crate::dataset::SplitConfig;
use crate::io::jsonl::EntryFields;

const DEFAULT_CONFIG_TOML: &str = include_str!("../../resources/default.config.toml");

static DEFAULT_CONFIG: OnceLock<BuildConfig> = OnceLock::new();

/// Settings for a full dataset build.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub input: EntryFields,

    #[serde(default = "default_add_hydrogens")]
    pub add_hydrogens: bool,

    #[serde(default)]
    pub split: SplitConfig,
}

fn default_add_hydrogens() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        default_config().clone()
    }
}

/// Parses a custom TOML configuration, or returns the built-in defaults.
pub fn load_config(custom_toml: Option<&str>) -> Result<BuildConfig, Error> {
    match custom_toml {
        Some(toml) => Ok(toml::from_str(toml)?),
        None => Ok(default_config().clone()),
    }
}

pub fn default_config() -> &'static BuildConfig {
    DEFAULT_CONFIG.get_or_init(|| {
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("Failed to parse embedded default build configuration. This is a library bug.")
    })
}
