use serde::Deserialize;

/// Settings for the two-stage random split.
///
/// The corpus is first split into a training pool and a test set using
/// `test_fraction`; the pool is then split into training and validation sets
/// using `valid_fraction`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SplitConfig {
    /// Fraction of the whole corpus held out for testing.
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,

    /// Fraction of the training pool held out for validation.
    #[serde(default = "default_valid_fraction")]
    pub valid_fraction: f64,

    /// Shuffle seed. `None` draws one from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_test_fraction() -> f64 {
    0.1
}
fn default_valid_fraction() -> f64 {
    0.1
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            valid_fraction: default_valid_fraction(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_values() {
        let config = SplitConfig::default();
        assert_eq!(config.test_fraction, 0.1);
        assert_eq!(config.valid_fraction, 0.1);
        assert!(config.seed.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: SplitConfig = toml::from_str("seed = 7").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.test_fraction, 0.1);
    }
}
