//! Random train/validation/test partitioning.
//!
//! Splitting is a uniform shuffle followed by a cut; no stratification.
//! The held-out side of each cut receives `ceil(fraction * n)` items.

mod config;

pub use config::SplitConfig;

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name} must be in [0, 1), got {value}")]
    InvalidFraction { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    Train,
    Valid,
    Test,
}

impl PartitionKind {
    pub const ALL: [PartitionKind; 3] = [Self::Train, Self::Valid, Self::Test];

    /// File name of the partition's record container.
    pub fn file_name(&self) -> &'static str {
        match self {
            PartitionKind::Train => "train_data",
            PartitionKind::Valid => "valid_data",
            PartitionKind::Test => "test_data",
        }
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKind::Train => write!(f, "train"),
            PartitionKind::Valid => write!(f, "validation"),
            PartitionKind::Test => write!(f, "test"),
        }
    }
}

/// Three disjoint subsets of one corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct Partitions<T> {
    pub train: Vec<T>,
    pub valid: Vec<T>,
    pub test: Vec<T>,
    /// Seed the shuffles were driven by.
    pub seed: u64,
}

impl<T> Partitions<T> {
    pub fn get(&self, kind: PartitionKind) -> &[T] {
        match kind {
            PartitionKind::Train => &self.train,
            PartitionKind::Valid => &self.valid,
            PartitionKind::Test => &self.test,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartitionKind, &[T])> {
        PartitionKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> usize {
        self.train.len() + self.valid.len() + self.test.len()
    }
}

/// Shuffles `items` and cuts off `ceil(fraction * n)` of them.
///
/// Returns `(retained, held_out)`.
pub fn split<T, R: Rng + ?Sized>(
    mut items: Vec<T>,
    fraction: f64,
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    items.shuffle(rng);
    let held = held_out_len(items.len(), fraction);
    let held_out = items.split_off(items.len() - held);
    (items, held_out)
}

fn held_out_len(n: usize, fraction: f64) -> usize {
    ((fraction * n as f64).ceil() as usize).min(n)
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), Error> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidFraction { name, value })
    }
}

/// Runs both splits: corpus → (pool, test), pool → (train, valid).
pub fn partition<T>(items: Vec<T>, config: &SplitConfig) -> Result<Partitions<T>, Error> {
    check_fraction("test_fraction", config.test_fraction)?;
    check_fraction("valid_fraction", config.valid_fraction)?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    let mut rng = StdRng::seed_from_u64(seed);

    let total = items.len();
    let (pool, test) = split(items, config.test_fraction, &mut rng);
    let (train, valid) = split(pool, config.valid_fraction, &mut rng);

    info!(
        seed,
        total,
        train = train.len(),
        valid = valid.len(),
        test = test.len(),
        "dataset partitioned"
    );

    Ok(Partitions {
        train,
        valid,
        test,
        seed,
    })
}
